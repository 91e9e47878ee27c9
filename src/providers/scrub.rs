use crate::error::FetchError;
use crate::utils::text::truncate_with_ellipsis;

const MAX_API_ERROR_CHARS: usize = 200;

const REDACTED: &str = "[REDACTED]";

/// Remove a known secret from text echoed back by a backend.
fn redact_secret(input: &str, secret: Option<&str>) -> String {
    match secret.map(str::trim) {
        Some(secret) if secret.len() >= 4 => input.replace(secret, REDACTED),
        _ => input.to_string(),
    }
}

/// Redact bearer tokens that a backend echoes in its error body. The
/// marker matches case-insensitively.
fn redact_bearer(input: &str) -> String {
    const MARKER: &str = "bearer ";
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    // ASCII lowercasing keeps byte offsets aligned with `rest`.
    while let Some(pos) = rest.to_ascii_lowercase().find(MARKER) {
        let token_start = pos + MARKER.len();
        out.push_str(&rest[..token_start]);
        let tail = &rest[token_start..];
        let token_len = tail
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '}'))
            .unwrap_or(tail.len());
        if token_len > 0 {
            out.push_str(REDACTED);
        }
        rest = &tail[token_len..];
    }
    out.push_str(rest);
    out
}

/// Scrub secrets from an error body and truncate it for display.
pub fn sanitize_api_error(input: &str, secret: Option<&str>) -> String {
    let scrubbed = redact_bearer(&redact_secret(input, secret));
    truncate_with_ellipsis(scrubbed.trim(), MAX_API_ERROR_CHARS)
}

/// Build a sanitized fetch error from a failed HTTP response.
pub async fn api_error(
    service: &str,
    response: reqwest::Response,
    secret: Option<&str>,
) -> FetchError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    FetchError::Status {
        service: service.to_string(),
        status,
        body: sanitize_api_error(&body, secret),
    }
}
