//! Recognizes Solana-style addresses in free text and classifies whether a
//! message looks like a token or wallet query.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Base58 address shape (32-44 chars). Shape only, no checksum.
    static ref SOLANA_ADDRESS_RE: Regex =
        Regex::new(r"[1-9A-HJ-NP-Za-km-z]{32,44}").unwrap();
    static ref TICKER_RE: Regex = Regex::new(r"\$[A-Za-z]+").unwrap();
    static ref TOKEN_KEYWORD_RE: Regex = Regex::new(r"(?i)token|price|analysis").unwrap();
}

/// All candidate addresses in document order.
pub fn extract_addresses(text: &str) -> Vec<&str> {
    SOLANA_ADDRESS_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// First candidate address in document order, if any.
pub fn extract_first_address(text: &str) -> Option<&str> {
    SOLANA_ADDRESS_RE.find(text).map(|m| m.as_str())
}

/// The trimmed text is exactly one candidate address and nothing more.
pub fn is_bare_address(text: &str) -> bool {
    let trimmed = text.trim();
    extract_first_address(trimmed) == Some(trimmed)
}

/// A message is token-shaped if it carries an address, a `$TICKER` mention,
/// or one of the token keywords.
pub fn looks_like_token_query(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    SOLANA_ADDRESS_RE.is_match(text)
        || TICKER_RE.is_match(text)
        || TOKEN_KEYWORD_RE.is_match(text)
}

/// A message is wallet-shaped if it carries an address embedded in
/// surrounding prose. A bare address on its own is rejected so it falls
/// through to the token scanner instead.
pub fn looks_like_wallet_query(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if is_bare_address(text) {
        return false;
    }
    SOLANA_ADDRESS_RE.is_match(text)
}
