//! Retry loop for transient backend errors.
//!
//! Every outbound call goes through [`send_json`] rather than
//! `reqwest::RequestBuilder::send()` directly, so every request gets the
//! same treatment: exponential backoff on connection failures, timeouts,
//! HTTP 429, and HTTP 5xx; no retry on other 4xx. The session core above
//! never retries — a request that fails here fails once, tagged with its
//! selection id.

use std::time::Duration;

use crate::ClientError;

/// Maximum retry attempts for transient errors. Backoff is 2s, 4s, 8s.
const MAX_RETRIES: u32 = 3;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`ClientError::Http`] or [`ClientError::Status`] if the
/// request still fails after all retries, and [`ClientError::Malformed`]
/// if a successful response body is not valid JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, ClientError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<ClientError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    last_error = Some(ClientError::Http(e));
                    continue;
                }
                return Err(ClientError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                // 429 and 5xx are worth another attempt; other 4xx are
                // permanent.
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if attempt < MAX_RETRIES {
                        log::warn!("  HTTP {status}");
                        last_error = Some(ClientError::Status { status });
                        continue;
                    }
                    return Err(ClientError::Status { status });
                }
                if status.is_client_error() {
                    return Err(ClientError::Status { status });
                }

                let text = response.text().await?;
                return serde_json::from_str(&text).map_err(|e| ClientError::Malformed {
                    message: format!("response was not valid JSON: {e}"),
                });
            }
        }
    }

    Err(last_error.unwrap_or(ClientError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
    }))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
