use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// A summarized recent news item about a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSignal {
    pub headline: String,
    /// One of Expansion, AI/ML Launch, Funding, Leadership, Partnership, Risk, General.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub relevance: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn default_category() -> String {
    "General".to_string()
}
