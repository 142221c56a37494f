//! Wire and domain types for the answer service

use serde::{Deserialize, Serialize};

/// Text used when the service answers without a `respuesta`
pub const FALLBACK_ANSWER_TEXT: &str = "No suitable answer was found.";

/// Text shown in place of an answer when the exchange fails
pub const APOLOGY_TEXT: &str = "Sorry, there was an error processing your message.";

/// Default number of supporting sources requested per query
pub const DEFAULT_TOP_K: u32 = 5;

/// Body of `POST /generar_respuesta`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRequest<'a> {
    pub query: &'a str,
    pub k: u32,
}

/// Response body as sent by the service. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub respuesta: Option<String>,
    #[serde(default)]
    pub fuentes: Option<Vec<String>>,
}

/// A resolved answer with its supporting citations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub citations: Vec<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>, citations: Vec<String>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }
}

impl From<AnswerResponse> for Answer {
    fn from(response: AnswerResponse) -> Self {
        let text = response
            .respuesta
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_ANSWER_TEXT.to_string());
        Self::new(text, response.fuentes.unwrap_or_default())
    }
}
