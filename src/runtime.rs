//! Collaborator interfaces supplied by the host agent runtime.
//!
//! The plugin core never talks to a language model, renders a template, or
//! delivers a message itself; it produces prompts, bindings, and reply text
//! and hands them to these seams.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Messaging surface a request arrived on. Drives reply verbosity and
/// error visibility through [`ChannelPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Telegram,
    Twitter,
    Discord,
    Unknown,
}

impl Channel {
    pub fn from_source_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "telegram" => Channel::Telegram,
            "twitter" => Channel::Twitter,
            "discord" => Channel::Discord,
            _ => Channel::Unknown,
        }
    }

    /// Per-channel reply policy, consulted once per response.
    pub fn policy(&self) -> ChannelPolicy {
        match self {
            Channel::Telegram => ChannelPolicy {
                extended_details: true,
                include_24h_change: false,
                max_wallets_shown: 5,
                surface_upstream_errors: true,
            },
            _ => ChannelPolicy {
                extended_details: false,
                include_24h_change: true,
                max_wallets_shown: 1,
                surface_upstream_errors: false,
            },
        }
    }
}

/// Verbosity and error-visibility switches for one channel. Keeping these in
/// one table keeps the composer free of per-channel conditionals.
#[derive(Debug, Clone, Copy)]
pub struct ChannelPolicy {
    /// Identity block, observations, socials, supplementary data, ranked
    /// wallet list. Still requires a token description to be present.
    pub extended_details: bool,
    pub include_24h_change: bool,
    pub max_wallets_shown: usize,
    pub surface_upstream_errors: bool,
}

/// Inbound chat message as seen by the plugin: the core reads only the text
/// and the channel tag.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub channel: Channel,
}

impl InboundMessage {
    pub fn new(text: impl Into<String>, channel: Channel) -> Self {
        Self {
            text: text.into(),
            channel,
        }
    }
}

/// Outbound reply payload handed to the host for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub action: Option<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
        }
    }

    pub fn with_action(text: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: Some(action.into()),
        }
    }
}

/// Model quality tier requested from the host's text-generation capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Small,
    Large,
}

/// Named values bound into a prompt template. The core's responsibility ends
/// here; the host's renderer owns substitution and conditional sections.
#[derive(Debug, Clone, Default)]
pub struct TemplateBindings {
    entries: Vec<(String, Value)>,
}

impl TemplateBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.entries.push((key.to_string(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Host agent runtime: template rendering plus the language-model
/// capabilities the pipeline relies on.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Substitute `bindings` into `template`, honoring the host's
    /// conditional-section syntax.
    fn render_template(&self, template: &str, bindings: &TemplateBindings) -> String;

    /// Free-text generation.
    async fn generate_text(&self, prompt: &str, tier: ModelTier) -> Result<String>;

    /// Boolean intent classification.
    async fn classify_true_false(&self, prompt: &str, tier: ModelTier) -> Result<bool>;

    /// Structured extraction; the returned object is untrusted and must be
    /// validated by the caller.
    async fn extract_object(&self, prompt: &str, tier: ModelTier) -> Result<Value>;
}

/// Delivery seam for composed replies.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_source_tag() {
        assert_eq!(Channel::from_source_tag("telegram"), Channel::Telegram);
        assert_eq!(Channel::from_source_tag("Twitter"), Channel::Twitter);
        assert_eq!(Channel::from_source_tag("slack"), Channel::Unknown);
    }

    #[test]
    fn test_telegram_policy() {
        let policy = Channel::Telegram.policy();
        assert!(policy.extended_details);
        assert!(!policy.include_24h_change);
        assert_eq!(policy.max_wallets_shown, 5);
        assert!(policy.surface_upstream_errors);
    }

    #[test]
    fn test_non_telegram_policies_match() {
        for channel in [Channel::Twitter, Channel::Discord, Channel::Unknown] {
            let policy = channel.policy();
            assert!(!policy.extended_details);
            assert!(policy.include_24h_change);
            assert_eq!(policy.max_wallets_shown, 1);
            assert!(!policy.surface_upstream_errors);
        }
    }

    #[test]
    fn test_bindings_lookup() {
        let mut bindings = TemplateBindings::new();
        bindings.set("tokenSymbol", "TEST").set("hasKols", true);
        assert_eq!(bindings.get_str("tokenSymbol"), Some("TEST"));
        assert!(bindings.get_bool("hasKols"));
        assert!(!bindings.get_bool("hasDescription"));
    }
}
