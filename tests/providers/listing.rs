use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use govcon_admin::providers::catalog::fallback_model_names;
use govcon_admin::providers::{ListingSource, ModelListClient, ModelType, ProviderType};

#[tokio::test]
async fn ollama_tags_are_filtered_to_chat_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "llama3.1", "size": 4_661_224_676_u64},
                {"name": "nomic-embed-text"},
                {"name": "llava-7b"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let listing = client
        .load_models(
            ProviderType::Ollama,
            ModelType::Llm,
            Some(&server.uri()),
            None,
            None,
        )
        .await;

    assert_eq!(listing.models, vec!["llama3.1".to_string()]);
    assert_eq!(listing.selected.as_deref(), Some("llama3.1"));
    assert_eq!(listing.source, ListingSource::Live);
    assert!(listing.warning.is_none());
    server.verify().await;
}

#[tokio::test]
async fn openai_listing_sends_bearer_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer sk-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "text-embedding-3-small", "object": "model"},
                {"id": "gpt-4o", "object": "model"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let listing = client
        .load_models(
            ProviderType::OpenAiCompatible,
            ModelType::Embedding,
            Some(&server.uri()),
            Some("sk-test-key"),
            None,
        )
        .await;

    assert_eq!(listing.models, vec!["text-embedding-3-small".to_string()]);
    assert_eq!(listing.source, ListingSource::Live);
    server.verify().await;
}

#[tokio::test]
async fn base_ending_in_v1_is_not_doubled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "Qwen/Qwen2.5-7B-Instruct"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let base = format!("{}/v1/", server.uri());
    let names = client
        .fetch_model_names(ProviderType::Vllm, Some(&base), None)
        .await
        .unwrap();

    assert_eq!(names, vec!["Qwen/Qwen2.5-7B-Instruct".to_string()]);
    server.verify().await;
}

#[tokio::test]
async fn prior_selection_survives_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "llama3.1"}, {"name": "qwen2.5"}]
        })))
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let listing = client
        .load_models(
            ProviderType::Ollama,
            ModelType::Llm,
            Some(&server.uri()),
            None,
            Some("qwen2.5"),
        )
        .await;

    assert_eq!(listing.selected.as_deref(), Some("qwen2.5"));
}

#[tokio::test]
async fn server_error_falls_back_with_warning() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model registry offline"))
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let listing = client
        .load_models(
            ProviderType::Ollama,
            ModelType::Embedding,
            Some(&server.uri()),
            None,
            None,
        )
        .await;

    let expected = fallback_model_names(ProviderType::Ollama, ModelType::Embedding);
    assert_eq!(listing.models, expected);
    assert_eq!(listing.selected.as_deref(), Some(expected[0].as_str()));
    assert_eq!(listing.source, ListingSource::Fallback);

    let warning = listing.warning.unwrap();
    assert!(warning.contains("500"), "{warning}");
    assert!(warning.contains("Showing common models instead"));
}

#[tokio::test]
async fn unreachable_endpoint_falls_back() {
    let client = ModelListClient::new(2);
    let listing = client
        .load_models(
            ProviderType::Vllm,
            ModelType::Llm,
            Some("http://127.0.0.1:1"),
            None,
            None,
        )
        .await;

    assert_eq!(
        listing.models,
        fallback_model_names(ProviderType::Vllm, ModelType::Llm)
    );
    assert_eq!(listing.source, ListingSource::Fallback);
    assert!(listing.warning.is_some());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = ModelListClient::new(5);
    let err = client
        .fetch_model_names(ProviderType::OpenAiCompatible, Some(&server.uri()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, govcon_admin::FetchError::Decode { .. }), "{err:?}");
}
