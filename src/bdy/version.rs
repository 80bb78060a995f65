//! Latest-version lookup against the release server.

use crate::error::{ActionError, Result};

/// URL serving the latest version of a channel
pub fn latest_version_url(base_url: &str, channel: &str) -> String {
    format!("{}/{}/latest", base_url.trim_end_matches('/'), channel)
}

/// Fetch the latest published version string for `channel`.
///
/// Single attempt. The body is trimmed; an empty body is treated as a failure
/// since it cannot name a download.
///
/// # Errors
///
/// * `Fetch` - transport failure, non-2xx status or empty body; always names the URL
pub async fn fetch_latest_version(
    client: &reqwest::Client,
    base_url: &str,
    channel: &str,
) -> Result<String> {
    let url = latest_version_url(base_url, channel);
    log::debug!("Fetching latest version from {url}");

    let fetch_error = |reason: String| ActionError::Fetch {
        url: url.clone(),
        reason,
    };

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!(
            "Failed to fetch latest version: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| fetch_error(format!("Failed to read response: {e}")))?;

    let version = body.trim();
    if version.is_empty() {
        return Err(fetch_error("empty version response".to_string()));
    }

    Ok(version.to_string())
}
