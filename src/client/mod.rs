mod builder;
mod cache;

use crate::error::{ClientError, Result};
use crate::{log_debug, log_error, log_warn};
pub use builder::ClientBuilder;
pub use cache::{CachedResponse, HttpCache};
use rquest::Client as RquestClient;

/// Successful page fetch: HTTP status, body text, final URL after
/// redirects.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub text: String,
    pub url: String,
}

pub struct Client {
    inner: RquestClient,
    cache: HttpCache,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Soft fetch gateway: one attempt, any failure is logged with the
    /// URL and swallowed. Routine loops degrade per-item on `None`.
    pub async fn fetch(&self, url: &str) -> Option<PageResponse> {
        match self.get(url).await {
            Ok(response) => {
                log_debug!(
                    "[client] Fetched {} (status {}, {} bytes)",
                    response.url,
                    response.status,
                    response.text.len()
                );
                Some(response)
            }
            Err(e) => {
                log_error!("[client] Fetch failed for {}: {}", url, e);
                None
            }
        }
    }

    /// Cached GET. Cache hits skip the network entirely; successful
    /// responses are written back so a rerun against the same pages is
    /// byte-identical.
    pub async fn get(&self, url: &str) -> std::result::Result<PageResponse, ClientError> {
        if let Some(hit) = self.cache.load(url) {
            log_debug!("[client] Cache hit for {}", url);
            return Ok(PageResponse {
                status: hit.status,
                text: hit.body,
                url: hit.url,
            });
        }

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let final_url = response.url().to_string();
        let text = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                url: url.to_string(),
            });
        }

        let entry = CachedResponse {
            url: final_url.clone(),
            status,
            body: text.clone(),
        };
        if let Err(e) = self.cache.store(url, &entry) {
            log_warn!("[client] Failed to cache {}: {}", url, e);
        }

        Ok(PageResponse {
            status,
            text,
            url: final_url,
        })
    }

    /// Uncached binary GET, used for the archive download where the body
    /// must reach disk verbatim.
    pub async fn get_bytes(&self, url: &str) -> std::result::Result<Vec<u8>, ClientError> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ClientError::ResponseError {
                status_code: status,
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response body: {}", e))
        })?;

        Ok(bytes.to_vec())
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(cache_dir: &std::path::Path) -> Client {
        Client::builder()
            .cache_dir(cache_dir)
            .timeout_secs(5)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_none_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = test_client(dir.path());

        let result = client.fetch(&format!("{}/broken", server.uri())).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_reads_through_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>cached</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = test_client(dir.path());
        let url = format!("{}/page", server.uri());

        let first = client.get(&url).await.unwrap();
        let second = client.get(&url).await.unwrap();

        assert_eq!(first.text, "<html>cached</html>");
        assert_eq!(second.text, first.text);
        assert_eq!(second.status, 200);
    }

    #[tokio::test]
    async fn failed_responses_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = test_client(dir.path());
        let url = format!("{}/flaky", server.uri());

        assert!(client.get(&url).await.is_err());
        assert!(client.get(&url).await.is_err());
    }

    #[tokio::test]
    async fn get_bytes_bypasses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/archive.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = test_client(dir.path());
        let url = format!("{}/archive.zip", server.uri());

        let first = client.get_bytes(&url).await.unwrap();
        let second = client.get_bytes(&url).await.unwrap();

        assert_eq!(first, vec![0x50, 0x4b, 0x03, 0x04]);
        assert_eq!(second, first);
    }
}
