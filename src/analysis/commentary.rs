//! AI commentary adapter: turns a snapshot and its derived context into
//! template bindings, hands rendering and generation to the host runtime,
//! and returns the model's short take verbatim.

use tracing::debug;

use crate::analysis::context::AnalysisContext;
use crate::analysis::format::format_magnitude;
use crate::error::ScoutError;
use crate::models::token::TokenSnapshot;
use crate::runtime::{AgentRuntime, ModelTier, TemplateBindings};

/// Descriptions shorter than this are treated as absent for commentary
/// purposes.
const MIN_DESCRIPTION_LEN: usize = 30;

pub const TOKEN_ANALYSIS_TEMPLATE: &str = r#"
# Task: As {{agentName}}, analyze this token data and provide insights

About {{agentName}}:
{{bio}}

Lore:
{{lore}}

## Token data

Token Information:
- Name: {{tokenName}}
{{#if hasDescription}}
- Concept: {{tokenDescription}}
{{/if}}
- Symbol: {{tokenSymbol}}
- Price: {{tokenPrice}}
- Market Cap: {{tokenMarketCap}}
- Liquidity: {{tokenLiquidity}}
- Risk Score: {{tokenRiskScore}}/10. 0 is the lowest it means no risk detection and 10 is the highest means the highest risk detection.
- Is Rugged: {{isRugged}}

Metrics Analysis:
- Liquidity Level: {{liquidityStatus}}
- Market Cap Level: {{marketCapCategory}}

Price Action:
{{priceChanges}}

{{#if hasKols}}
Notable Traders: {{kolNames}}
{{/if}}

Analyze this token considering:
1. Overall risk assessment
2. Market analysis (liquidity, market cap)
3. Recent price movements
4. Project concept and potential

## TODO

As {{agentName}},
- you MUST give your personal take on this token in ONLY two sentences and a maximum of 200 characters.
- Use the analysis above and find the most relevant information to make your decision.
- NEVER mention the risk score or the risk metrics directly in your answer.
{{#if hasDescription}}
- Tell us what you think about the project concept and if you would recommend it.
{{/if}}
{{#if hasKols}}
- Mention the notable traders involvement as a positive signal.
{{/if}}
"#;

/// Map every analysis field to a named binding. Conditional sections are
/// driven by the `hasDescription` and `hasKols` flags; the host renderer
/// owns substitution.
pub fn build_commentary_bindings(
    token: &TokenSnapshot,
    context: &AnalysisContext,
) -> TemplateBindings {
    let has_description = token
        .description
        .as_deref()
        .map(|d| d.len() >= MIN_DESCRIPTION_LEN)
        .unwrap_or(false);

    let price_changes = context
        .significant_moves
        .iter()
        .map(|m| format!("- {}: {:.2}% {}", m.window, m.change, m.direction.as_str()))
        .collect::<Vec<_>>()
        .join("\n");

    let mut bindings = TemplateBindings::new();
    bindings
        .set("tokenName", token.name.as_str())
        .set(
            "tokenDescription",
            if has_description {
                token.description.as_deref().unwrap_or_default()
            } else {
                "No detailed description available"
            },
        )
        .set("hasDescription", has_description)
        .set("tokenSymbol", token.symbol.as_str())
        .set(
            "tokenPrice",
            token
                .price
                .map(|p| format!("{:.6}", p))
                .unwrap_or_else(|| "N/A".to_string()),
        )
        .set("tokenMarketCap", format_magnitude(token.market_cap))
        .set("tokenLiquidity", format_magnitude(token.liquidity))
        .set("tokenRiskScore", token.risk_score)
        .set("isRugged", token.is_rugged)
        .set("liquidityStatus", context.liquidity_tier.as_str())
        .set("marketCapCategory", context.market_cap_tier.as_str())
        .set("priceChanges", price_changes)
        .set("hasKols", context.has_kols())
        .set("kolNames", context.kol_names.join(", "));
    bindings
}

/// Generate the short qualitative take for a token. The returned text is the
/// model's output, unmodified.
pub async fn generate_commentary(
    token: &TokenSnapshot,
    context: &AnalysisContext,
    runtime: &dyn AgentRuntime,
) -> Result<String, ScoutError> {
    let bindings = build_commentary_bindings(token, context);
    let prompt = runtime.render_template(TOKEN_ANALYSIS_TEMPLATE, &bindings);
    debug!("Generating commentary for {}", token.address);

    runtime
        .generate_text(&prompt, ModelTier::Large)
        .await
        .map_err(|e| ScoutError::Generation(format!("commentary generation failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(description: Option<&str>) -> TokenSnapshot {
        serde_json::from_value(serde_json::json!({
            "name": "Test", "symbol": "TST", "address": "abc",
            "description": description,
            "price": 0.000218, "marketCap": 217_000.0, "liquidity": 91_000.0,
            "riskScore": 3,
            "priceChange": { "12h": 19.64 },
            "topWallets": [
                { "address": "w1", "type": "kols", "twitter_url": "https://twitter.com/alpha" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_bindings_cover_analysis_fields() {
        let token = snapshot(Some("A memecoin with a long enough description."));
        let context = AnalysisContext::from_snapshot(&token);
        let bindings = build_commentary_bindings(&token, &context);

        assert!(bindings.get_bool("hasDescription"));
        assert!(bindings.get_bool("hasKols"));
        assert_eq!(bindings.get_str("tokenSymbol"), Some("TST"));
        assert_eq!(bindings.get_str("tokenPrice"), Some("0.000218"));
        assert_eq!(bindings.get_str("tokenMarketCap"), Some("217.00K"));
        assert_eq!(bindings.get_str("liquidityStatus"), Some("DECENT"));
        assert_eq!(bindings.get_str("marketCapCategory"), Some("NANO_CAP"));
        assert_eq!(bindings.get_str("priceChanges"), Some("- 12h: 19.64% gain"));
        assert_eq!(bindings.get_str("kolNames"), Some("@alpha"));
    }

    #[test]
    fn test_short_description_treated_as_absent() {
        let token = snapshot(Some("too short"));
        let context = AnalysisContext::from_snapshot(&token);
        let bindings = build_commentary_bindings(&token, &context);

        assert!(!bindings.get_bool("hasDescription"));
        assert_eq!(
            bindings.get_str("tokenDescription"),
            Some("No detailed description available")
        );
    }
}
