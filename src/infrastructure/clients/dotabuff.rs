use crate::error::{ProxyError, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Fetches raw pages from the upstream statistics site.
#[derive(Debug, Clone)]
pub struct DotabuffClient {
    client: Client,
    base_url: String,
}

impl DotabuffClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// One GET per call. Non-success statuses come back as typed errors.
    pub async fn fetch_document(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self.url_for(path);
        debug!(%url, ?query, "Fetching upstream page");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if let Err(err) = check_status(status, &url) {
            warn!(%url, %status, "Upstream request failed");
            return Err(err);
        }

        Ok(response.text().await?)
    }
}

pub fn check_status(status: StatusCode, url: &str) -> Result<()> {
    match status {
        status if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(ProxyError::NotFound(url.to_string())),
        StatusCode::TOO_MANY_REQUESTS => Err(ProxyError::RateLimited),
        status if status.is_server_error() => Err(ProxyError::UpstreamUnavailable(status)),
        other => Err(ProxyError::Transport(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses() {
        let url = "https://example.test/players/1";
        assert!(check_status(StatusCode::OK, url).is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, url),
            Err(ProxyError::NotFound(u)) if u == url
        ));
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, url),
            Err(ProxyError::RateLimited)
        ));
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR, url),
            Err(ProxyError::UpstreamUnavailable(StatusCode::INTERNAL_SERVER_ERROR))
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, url),
            Err(ProxyError::UpstreamUnavailable(_))
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN, url),
            Err(ProxyError::Transport(StatusCode::FORBIDDEN))
        ));
    }

    #[test]
    fn joins_paths_onto_base() {
        let client = DotabuffClient::new(Client::new(), "https://www.dotabuff.com/");
        assert_eq!(
            client.url_for("players/1/matches"),
            "https://www.dotabuff.com/players/1/matches"
        );
        assert_eq!(client.url_for("/matches/9"), "https://www.dotabuff.com/matches/9");
    }
}
