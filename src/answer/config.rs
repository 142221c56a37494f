//! Answer service configuration

use super::DEFAULT_TOP_K;

const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Where the answer service lives and how many sources to ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerConfig {
    pub base_url: String,
    pub top_k: u32,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl AnswerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("BUHO_ANSWER_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            top_k: lookup("BUHO_TOP_K")
                .and_then(|k| k.trim().parse::<u32>().ok())
                .filter(|k| *k > 0)
                .unwrap_or(defaults.top_k),
        }
    }
}
