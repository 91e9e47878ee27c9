//! Fetch raw model names from a provider endpoint and turn them into the
//! list an administrator picks from.

use reqwest::Client;
use serde::Deserialize;

use super::filter::{filter_models, matching_models, select_default};
use super::http_client::{build_provider_client, build_provider_client_with_timeout, join_url};
use super::scrub::api_error;
use super::{ModelType, ProviderType};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelObject>,
}

#[derive(Debug, Deserialize)]
struct ModelObject {
    id: String,
}

/// Where the offered models came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ListingSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListing {
    pub provider_type: ProviderType,
    pub model_type: ModelType,
    pub models: Vec<String>,
    pub selected: Option<String>,
    pub source: ListingSource,
    /// User-facing note when the endpoint could not be read.
    pub warning: Option<String>,
}

pub struct ModelListClient {
    client: Client,
}

impl ModelListClient {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    fn resolve_base(provider_type: ProviderType, base_url: Option<&str>) -> String {
        match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => provider_type.default_endpoint().to_string(),
        }
    }

    fn models_url(provider_type: ProviderType, base: &str) -> String {
        match provider_type {
            ProviderType::Ollama => join_url(base, "/api/tags"),
            ProviderType::Vllm | ProviderType::OpenAiCompatible => {
                if base.ends_with("/v1") {
                    join_url(base, "/models")
                } else {
                    join_url(base, "/v1/models")
                }
            }
        }
    }

    /// Raw model names exactly as the provider reports them.
    pub async fn fetch_model_names(
        &self,
        provider_type: ProviderType,
        base_url: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Vec<String>, FetchError> {
        let base = Self::resolve_base(provider_type, base_url);
        let url = Self::models_url(provider_type, &base);
        let service = provider_type.service_name();
        let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());

        tracing::debug!(provider = %provider_type, %url, "fetching model list");

        let mut request = self.client.get(&url);
        if provider_type != ProviderType::Ollama {
            if let Some(key) = api_key {
                request = request.bearer_auth(key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(service, &url, &e))?;

        if !response.status().is_success() {
            return Err(api_error(service, response, api_key).await);
        }

        let names = match provider_type {
            ProviderType::Ollama => {
                let tags: TagsResponse = response
                    .json()
                    .await
                    .map_err(|e| decode_error(service, &e))?;
                tags.models.into_iter().map(|m| m.name).collect::<Vec<_>>()
            }
            ProviderType::Vllm | ProviderType::OpenAiCompatible => {
                let models: ModelsResponse = response
                    .json()
                    .await
                    .map_err(|e| decode_error(service, &e))?;
                models.data.into_iter().map(|m| m.id).collect::<Vec<_>>()
            }
        };

        tracing::info!(provider = %provider_type, count = names.len(), "fetched model list");
        Ok(names)
    }

    /// Fetch, filter and preselect. Never fails: an unreadable endpoint
    /// yields the fallback list plus a warning.
    pub async fn load_models(
        &self,
        provider_type: ProviderType,
        model_type: ModelType,
        base_url: Option<&str>,
        api_key: Option<&str>,
        prior: Option<&str>,
    ) -> ModelListing {
        let (raw, warning) = match self
            .fetch_model_names(provider_type, base_url, api_key)
            .await
        {
            Ok(raw) => (raw, None),
            Err(err) => {
                tracing::warn!(provider = %provider_type, error = %err, "model list unavailable");
                (
                    Vec::new(),
                    Some(format!(
                        "Could not load models from {}: {err}. Showing common models instead.",
                        provider_type.service_name()
                    )),
                )
            }
        };

        listing_from_raw(&raw, provider_type, model_type, prior, warning)
    }
}

impl Default for ModelListClient {
    fn default() -> Self {
        Self {
            client: build_provider_client(),
        }
    }
}

fn decode_error(service: &str, err: &reqwest::Error) -> FetchError {
    FetchError::Decode {
        service: service.to_string(),
        message: err.to_string(),
    }
}

/// Build a listing from names already fetched.
pub fn listing_from_raw(
    raw: &[String],
    provider_type: ProviderType,
    model_type: ModelType,
    prior: Option<&str>,
    warning: Option<String>,
) -> ModelListing {
    let source = if matching_models(raw, model_type, provider_type).is_empty() {
        ListingSource::Fallback
    } else {
        ListingSource::Live
    };
    let models = filter_models(raw, model_type, provider_type);
    let selected = select_default(prior, &models);

    ModelListing {
        provider_type,
        model_type,
        models,
        selected,
        source,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_uses_tags_endpoint() {
        assert_eq!(
            ModelListClient::models_url(ProviderType::Ollama, "http://localhost:11434"),
            "http://localhost:11434/api/tags"
        );
    }

    #[test]
    fn openai_avoids_double_v1() {
        assert_eq!(
            ModelListClient::models_url(ProviderType::OpenAiCompatible, "https://api.example.com/v1"),
            "https://api.example.com/v1/models"
        );
        assert_eq!(
            ModelListClient::models_url(ProviderType::Vllm, "http://gpu-box:8000"),
            "http://gpu-box:8000/v1/models"
        );
    }

    #[test]
    fn blank_base_uses_provider_default() {
        assert_eq!(
            ModelListClient::resolve_base(ProviderType::Vllm, Some("  ")),
            "http://localhost:8000"
        );
        assert_eq!(
            ModelListClient::resolve_base(ProviderType::Ollama, Some("http://10.0.0.5:11434/")),
            "http://10.0.0.5:11434"
        );
        assert_eq!(
            ModelListClient::resolve_base(ProviderType::OpenAiCompatible, None),
            "https://api.openai.com"
        );
    }

    #[test]
    fn listing_marks_fallback_source() {
        let listing = listing_from_raw(&[], ProviderType::Ollama, ModelType::Llm, None, None);
        assert_eq!(listing.source, ListingSource::Fallback);
        assert_eq!(listing.selected.as_deref(), Some("llama3.1"));
    }

    #[test]
    fn listing_marks_live_source() {
        let raw = vec!["phi3".to_string(), "bge-m3".to_string()];
        let listing = listing_from_raw(
            &raw,
            ProviderType::Ollama,
            ModelType::Embedding,
            Some("mxbai-embed-large"),
            None,
        );
        assert_eq!(listing.source, ListingSource::Live);
        assert_eq!(listing.models, vec!["bge-m3".to_string()]);
        assert_eq!(listing.selected.as_deref(), Some("mxbai-embed-large"));
    }
}
