use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `govcon-admin`.
///
/// Library seams return the typed variants so callers can decide whether to
/// fall back (fetches) or report (tree structure). Command glue keeps using
/// `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum AdminError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend / provider fetches ──────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Organization tree structure ─────────────────────────────────────
    #[error("org tree: {0}")]
    Tree(#[from] TreeError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Fetch errors ────────────────────────────────────────────────────────────

/// Failure while talking to a model provider or the admin backend.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{service} unreachable at {url}")]
    Connection { service: String, url: String },

    #[error("{service} timed out")]
    Timeout { service: String },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} sent an unexpected response: {message}")]
    Decode { service: String, message: String },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// Classify a transport-level `reqwest` failure.
    pub fn from_reqwest(service: &str, url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                service: service.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                service: service.to_string(),
                message: err.to_string(),
            }
        } else if err.is_builder() {
            Self::InvalidUrl {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Connection {
                service: service.to_string(),
                url: url.to_string(),
            }
        }
    }
}

// ─── Tree structure errors ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("cycle detected at unit {id}")]
    Cycle { id: String },

    #[error("unit {id} appears more than once")]
    DuplicateId { id: String },
}
