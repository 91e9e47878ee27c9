use super::{ModelType, ProviderType};

const OLLAMA_LLM: &[&str] = &["llama3.1", "llama3.2", "qwen2.5", "mistral", "gemma2"];

const OLLAMA_EMBEDDING: &[&str] = &[
    "nomic-embed-text",
    "mxbai-embed-large",
    "bge-m3",
    "all-minilm",
];

const VLLM_LLM: &[&str] = &[
    "meta-llama/Llama-3.1-8B-Instruct",
    "Qwen/Qwen2.5-7B-Instruct",
    "mistralai/Mistral-7B-Instruct-v0.3",
];

const VLLM_EMBEDDING: &[&str] = &[
    "BAAI/bge-m3",
    "intfloat/multilingual-e5-large",
    "sentence-transformers/all-MiniLM-L6-v2",
];

const OPENAI_LLM: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-3.5-turbo"];

const OPENAI_EMBEDDING: &[&str] = &[
    "text-embedding-3-small",
    "text-embedding-3-large",
    "text-embedding-ada-002",
];

/// Common models offered when a provider returns nothing usable.
pub fn fallback_models(provider_type: ProviderType, model_type: ModelType) -> &'static [&'static str] {
    match (provider_type, model_type) {
        (ProviderType::Ollama, ModelType::Llm) => OLLAMA_LLM,
        (ProviderType::Ollama, ModelType::Embedding) => OLLAMA_EMBEDDING,
        (ProviderType::Vllm, ModelType::Llm) => VLLM_LLM,
        (ProviderType::Vllm, ModelType::Embedding) => VLLM_EMBEDDING,
        (ProviderType::OpenAiCompatible, ModelType::Llm) => OPENAI_LLM,
        (ProviderType::OpenAiCompatible, ModelType::Embedding) => OPENAI_EMBEDDING,
    }
}

/// Owned copy of [`fallback_models`].
pub fn fallback_model_names(provider_type: ProviderType, model_type: ModelType) -> Vec<String> {
    fallback_models(provider_type, model_type)
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}
