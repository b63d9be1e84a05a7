//! Single GET of the node's `/net_info` endpoint.

use std::time::Duration;

pub const NET_INFO_PATH: &str = "/net_info";

/// `<host>/net_info`, with `http://` prepended unless the host already starts with "http".
pub fn net_info_url(host: &str) -> String {
    add_scheme(&format!("{}{}", host, NET_INFO_PATH))
}

fn add_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("error fetching {url}: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("error reading response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Fetch the raw body. The response is fully drained and dropped before returning.
pub async fn fetch_net_info(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::Client)?;
    let resp = http_client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
    log::debug!("{} answered {}", url, resp.status());
    let bytes = resp.bytes().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}
