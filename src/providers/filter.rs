//! Name-based model classification.
//!
//! Providers only hand back model names, so the split between chat models,
//! embedding models and vision models is a substring heuristic. Known to
//! misclassify some names (anything with `mm-` counts as multimodal); the
//! tables are kept as they are.

use super::catalog::fallback_model_names;
use super::{ModelType, ProviderType};

const EMBEDDING_PATTERNS: [&str; 11] = [
    "embed",
    "embedding",
    "bge-",
    "e5-",
    "gte-",
    "jina-embed",
    "nomic-embed",
    "mxbai-embed",
    "snowflake-arctic-embed",
    "multilingual-e5",
    "all-minilm",
];

const VISION_PATTERNS: [&str; 5] = ["vision", "vl-", "mm-", "multimodal", "llava"];

const OPENAI_EMBEDDING_MARKERS: [&str; 3] =
    ["embedding", "text-embedding-3", "text-embedding-ada"];

/// Coarse model category derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModelClass {
    Llm,
    Embedding,
    Vision,
}

fn matches_any(lowered: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| lowered.contains(pattern))
}

fn is_openai_embedding(name: &str) -> bool {
    OPENAI_EMBEDDING_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

pub fn classify_model(name: &str, provider_type: ProviderType) -> ModelClass {
    if provider_type == ProviderType::OpenAiCompatible {
        return if is_openai_embedding(name) {
            ModelClass::Embedding
        } else {
            ModelClass::Llm
        };
    }

    let lowered = name.to_lowercase();
    if matches_any(&lowered, &EMBEDDING_PATTERNS) {
        ModelClass::Embedding
    } else if matches_any(&lowered, &VISION_PATTERNS) {
        ModelClass::Vision
    } else {
        ModelClass::Llm
    }
}

fn keeps(name: &str, model_type: ModelType, provider_type: ProviderType) -> bool {
    match (provider_type, model_type) {
        (ProviderType::OpenAiCompatible, ModelType::Embedding) => is_openai_embedding(name),
        (ProviderType::OpenAiCompatible, ModelType::Llm) => !name.contains("embedding"),
        (_, ModelType::Embedding) => classify_model(name, provider_type) == ModelClass::Embedding,
        (_, ModelType::Llm) => classify_model(name, provider_type) == ModelClass::Llm,
    }
}

/// Names suitable for `model_type`, without any fallback.
pub fn matching_models(
    raw: &[String],
    model_type: ModelType,
    provider_type: ProviderType,
) -> Vec<String> {
    raw.iter()
        .filter(|name| keeps(name, model_type, provider_type))
        .cloned()
        .collect()
}

/// Keep the names suitable for `model_type`, falling back to the provider's
/// common models when nothing survives.
pub fn filter_models(
    raw: &[String],
    model_type: ModelType,
    provider_type: ProviderType,
) -> Vec<String> {
    let kept = matching_models(raw, model_type, provider_type);

    if kept.is_empty() {
        tracing::debug!(
            provider = %provider_type,
            model_type = %model_type,
            raw = raw.len(),
            "no model matched, using fallback list"
        );
        return fallback_model_names(provider_type, model_type);
    }

    kept
}

/// Pick the model to preselect: an existing choice wins, otherwise the
/// first entry.
pub fn select_default(prior: Option<&str>, models: &[String]) -> Option<String> {
    match prior.map(str::trim) {
        Some(existing) if !existing.is_empty() => Some(existing.to_string()),
        _ => models.first().cloned(),
    }
}
