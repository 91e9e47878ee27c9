//! Model providers: which backend serves a model, what kind of model it is,
//! and how the model list offered to an administrator is derived.

pub mod catalog;
pub mod filter;
pub mod http_client;
pub mod listing;
pub mod scrub;

use serde::{Deserialize, Serialize};

pub use catalog::fallback_models;
pub use filter::{ModelClass, classify_model, filter_models, matching_models, select_default};
pub use http_client::build_provider_client;
pub use listing::{ListingSource, ModelListClient, ModelListing, listing_from_raw};

/// Backend family serving LLM or embedding models.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    clap::ValueEnum,
)]
pub enum ProviderType {
    #[default]
    #[serde(rename = "ollama")]
    #[strum(serialize = "ollama")]
    #[value(name = "ollama")]
    Ollama,
    #[serde(rename = "vllm")]
    #[strum(serialize = "vllm")]
    #[value(name = "vllm")]
    Vllm,
    #[serde(rename = "openai-compatible", alias = "openai")]
    #[strum(to_string = "openai-compatible", serialize = "openai")]
    #[value(name = "openai-compatible", alias = "openai")]
    OpenAiCompatible,
}

impl ProviderType {
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::Vllm => "http://localhost:8000",
            Self::OpenAiCompatible => "https://api.openai.com",
        }
    }

    /// Human-readable service name used in logs and warnings.
    pub fn service_name(self) -> &'static str {
        match self {
            Self::Ollama => "Ollama",
            Self::Vllm => "vLLM",
            Self::OpenAiCompatible => "OpenAI-compatible API",
        }
    }

    pub fn requires_api_key(self) -> bool {
        matches!(self, Self::OpenAiCompatible)
    }
}

/// What a model is used for.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelType {
    #[default]
    Llm,
    Embedding,
}
