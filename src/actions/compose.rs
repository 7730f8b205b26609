//! Builds the final chat text for token, wallet, and trending replies.
//! Channel differences live in one [`ChannelPolicy`] lookup; everything
//! else branches on data availability only.

use chrono::{DateTime, Utc};

use crate::analysis::format::{format_magnitude, format_percentile_list, relative_age};
use crate::analysis::metrics::AllTimeHigh;
use crate::models::token::{TokenSnapshot, TopWalletEntry, WalletKind};
use crate::models::trending::TrendingTokenSet;
use crate::models::wallet::WalletProfile;
use crate::runtime::Channel;

pub const TOKEN_GUIDANCE_REPLY: &str =
    "I couldn't find a valid token address. Please provide a valid Solana token address.";
pub const WALLET_GUIDANCE_REPLY: &str =
    "I couldn't find a valid Solana address in your message. Please provide a valid address.";

/// Supplementary data merged into an extended token reply. Both pieces are
/// optional by design: absence omits the section, nothing more.
#[derive(Debug, Clone, Default)]
pub struct TokenSupplements {
    pub ath: Option<AllTimeHigh>,
    pub holder_shares: Vec<f64>,
}

fn medal_for_position(index: usize) -> &'static str {
    match index {
        0 => "🥇",
        1 => "🥈",
        2 => "🥉",
        _ => "•",
    }
}

fn format_wallet_name(wallet: &TopWalletEntry) -> String {
    let name = wallet.name.clone().unwrap_or_else(|| {
        let address = &wallet.address;
        if address.len() > 8 {
            format!("{}...{}", &address[..4], &address[address.len() - 4..])
        } else {
            address.clone()
        }
    });
    if wallet.kind == WalletKind::Kols {
        format!("⭐ {}", name)
    } else {
        name
    }
}

/// Pick up to `limit` wallets, keeping the service's ranking order but
/// preferring known traders when the list must be truncated.
fn select_wallets(wallets: &[TopWalletEntry], limit: usize) -> Vec<&TopWalletEntry> {
    if wallets.len() <= limit {
        return wallets.iter().collect();
    }

    let mut picked: Vec<usize> = wallets
        .iter()
        .enumerate()
        .filter(|(_, w)| w.kind == WalletKind::Kols)
        .map(|(i, _)| i)
        .take(limit)
        .collect();
    for (i, wallet) in wallets.iter().enumerate() {
        if picked.len() >= limit {
            break;
        }
        if wallet.kind != WalletKind::Kols {
            picked.push(i);
        }
    }
    picked.sort_unstable();
    picked.into_iter().map(|i| &wallets[i]).collect()
}

/// Compose the token-scan reply. Always carries price, market cap,
/// liquidity and risk score; the channel policy and the presence of a
/// description decide everything else.
pub fn compose_token_reply(
    token: &TokenSnapshot,
    observations: &[String],
    supplements: &TokenSupplements,
    channel: Channel,
    commentary: &str,
    now_millis: i64,
) -> String {
    let policy = channel.policy();
    let extended = policy.extended_details
        && token
            .description
            .as_deref()
            .map(|d| !d.is_empty())
            .unwrap_or(false);

    let mut text = format!("{} Here are some details I found about it:\n\n", commentary);
    text += "📊 Token Analysis:\n";

    if extended {
        text += "Token Information:\n";
        text += &format!("• Name: {}\n", token.name);
        text += &format!("• Address: {}\n", token.address);
        text += &format!(
            "• Description: {}\n",
            token.description.as_deref().unwrap_or_default()
        );
        text += "\nFinancial Metrics:\n";
    }

    text += &format!(
        "• Price: ${}\n",
        token
            .price
            .map(|p| format!("{:.6}", p))
            .unwrap_or_else(|| "N/A".to_string())
    );
    text += &format!("• Market Cap: ${}\n", format_magnitude(token.market_cap));
    text += &format!("• Liquidity: ${}\n", format_magnitude(token.liquidity));
    text += &format!("• Risk Score: {}/10\n", token.risk_score);

    if policy.include_24h_change {
        let change = token.price_change.h24.unwrap_or(0.0);
        let icon = if change >= 0.0 { "📈" } else { "📉" };
        text += &format!("• 24h Change: {} {:.2}%\n", icon, change);
    }

    if token.is_rugged {
        text += "• 🚨 RUG PULL WARNING: This token has been flagged as potentially rugged!\n";
    }

    if extended && !observations.is_empty() {
        text += &format!(
            "\nKey Observations:\n{}\n",
            observations
                .iter()
                .map(|m| format!("• {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    if extended {
        if token.social.telegram.is_some() || token.social.twitter.is_some() {
            text += "\nSocial Links:\n";
            if let Some(telegram) = &token.social.telegram {
                text += &format!("• Telegram: {}\n", telegram);
            }
            if let Some(twitter) = &token.social.twitter {
                text += &format!("• Twitter: {}\n", twitter);
            }
        }

        if let Some(ath) = supplements.ath.filter(|a| a.high > 0.0) {
            text += &format!(
                "\n📈 All-Time High: ${:.6} ({})\n",
                ath.high,
                relative_age(ath.timestamp, now_millis)
            );
        }

        if !supplements.holder_shares.is_empty() {
            text += &format!(
                "\n🏦 Top Holders: {}\n",
                format_percentile_list(&supplements.holder_shares)
            );
        }
    }

    if !token.top_wallets.is_empty() {
        if extended {
            text += "\n📊 Top Wallets Trading This Token:\n";
            let wallets = select_wallets(&token.top_wallets, policy.max_wallets_shown);
            for (index, wallet) in wallets.iter().enumerate() {
                text += &format!(
                    "{} {}\n",
                    medal_for_position(index),
                    format_wallet_name(wallet)
                );
                text += &format!("   • Win Rate: {}%\n", wallet.winrate);
                if let Some(historic) = &wallet.historic30d {
                    let icon = if historic.percentage_change >= 0.0 {
                        "📈"
                    } else {
                        "📉"
                    };
                    text += &format!("   • 30d PnL: {}\n", historic.realized_pnl);
                    text += &format!(
                        "   • 30d Change: {} {:.1}%\n",
                        icon, historic.percentage_change
                    );
                }
                text += "\n";
            }
        } else {
            let wallets = select_wallets(&token.top_wallets, policy.max_wallets_shown);
            if let Some(wallet) = wallets.first() {
                text += &format!(
                    "• Top Wallet: {} ({}% WR)",
                    format_wallet_name(wallet),
                    wallet.winrate
                );
                if let Some(historic) = &wallet.historic30d {
                    let icon = if historic.percentage_change >= 0.0 {
                        "📈"
                    } else {
                        "📉"
                    };
                    text += &format!(" {} {:.1}%\n", icon, historic.percentage_change);
                } else {
                    text += "\n";
                }
            }
        }
    }

    text += &format!(
        "\n🔍 View more top wallets: https://www.topwallets.ai/solana/token/{}\n",
        token.address
    );
    text += &format!(
        "\n🔍 View detailed chart: https://dexscreener.com/solana/{}",
        token.address
    );

    text
}

/// Compose the wallet-scan reply: optional profile block, fixed performance
/// block, optional recent-activity block, blank-line separated with empty
/// blocks omitted.
pub fn compose_wallet_reply(profile: &WalletProfile, address: &str) -> String {
    let mut profile_items = Vec::new();
    if let Some(name) = &profile.name {
        profile_items.push(format!("• Name: {}", name));
    }
    if let Some(twitter) = &profile.twitter_url {
        profile_items.push(format!("• Twitter: {}", twitter));
    }
    if profile.kind == WalletKind::Kols {
        profile_items.push("• Known Trader 🌟".to_string());
    }

    let profile_text = if profile_items.is_empty() {
        String::new()
    } else {
        format!("👤 Profile:\n{}", profile_items.join("\n"))
    };

    let analysis_text = format!(
        "💰 Performance Analysis (Last 30 Days):\n\
        • Win Rate: {}%\n\
        • Tokens Traded: {}\n\
        • Realized PnL: {}\n\
        • Combined ROI: {}\n\
        • Total Invested: {}",
        profile.winrate,
        profile.token_traded,
        profile.realized_pnl,
        profile.combined_roi,
        profile
            .total_invested_formatted
            .as_deref()
            .unwrap_or("Unknown")
    );

    let recent_tokens_text = if profile.recent_tokens.is_empty() {
        String::new()
    } else {
        let entries = profile
            .recent_tokens
            .iter()
            .take(3)
            .map(|token| {
                format!(
                    "\n• {} ({})\n  Holding: {}\n  ROI: {}",
                    token.name, token.symbol, token.holding, token.roi
                )
            })
            .collect::<String>();
        format!("\n\n🔄 Recent Token Activity:{}", entries)
    };

    format!(
        "I've analyzed the wallet here is my report:\n{}\n{}{}\n\n\
        🔍 View complete analysis: https://www.topwallets.ai/solana/wallet/{}",
        if profile_text.is_empty() {
            String::new()
        } else {
            format!("\n{}\n", profile_text)
        },
        analysis_text,
        recent_tokens_text,
        address
    )
}

/// Compose the trending listing handed back to the host as conversation
/// context.
pub fn compose_trending_reply(set: &TrendingTokenSet, last_updated: DateTime<Utc>) -> String {
    let formatted_tokens = set
        .tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let price = token
                .price
                .map(|p| format!("${:.4}", p))
                .unwrap_or_else(|| "N/A".to_string());
            let market_cap = token
                .market_cap
                .map(|m| format!("${:.2}M", m / 1_000_000.0))
                .unwrap_or_else(|| "N/A".to_string());
            let liquidity = token
                .liquidity
                .map(|l| format!("${:.2}K", l / 1_000.0))
                .unwrap_or_else(|| "N/A".to_string());

            format!(
                "{}. {} (${})\n    \
                • Price: {}\n    \
                • Market Cap: {}\n    \
                • Liquidity: {}\n    \
                • Risk Score: {}/10\n    \
                • Chart: https://dexscreener.com/solana/{}",
                index + 1,
                token.name,
                token.symbol,
                price,
                market_cap,
                liquidity,
                token.risk_score,
                token.address
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "# Top {} Trending Solana Tokens ({} timeframe)\n\n\
        MUST DO: use these tokens to answer the user's question with a more complete response:\n\n\
        {}\n\n\
        Last updated: {}",
        set.count,
        set.timeframe,
        formatted_tokens,
        last_updated.format("%H:%M:%S")
    )
}
