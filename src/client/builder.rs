use super::{cache::HttpCache, Client};
use crate::error::{ClientError, Result};
use http::{
    header::{HeaderMap, HeaderName},
    HeaderValue,
};
use rquest::Client as RquestClient;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Default)]
pub struct ClientBuilder {
    cache_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    headers: HeaderMap,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            ..Default::default()
        }
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    pub fn header<K, V>(mut self, key: K, value: V) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let header_name = HeaderName::from_str(key.as_ref())
            .map_err(|e| ClientError::BuildError(format!("Invalid header name: {}", e)))?;

        let header_value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| ClientError::BuildError(format!("Invalid header value: {}", e)))?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn build(self) -> Result<Client> {
        let cache_dir = self
            .cache_dir
            .ok_or_else(|| ClientError::BuildError("Cache directory is required".to_string()))?;

        let mut client_builder = RquestClient::builder();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let mut inner = client_builder
            .build()
            .map_err(|e| ClientError::BuildError(format!("Failed to build client: {}", e)))?;

        // Set the headers on the client
        *inner.as_mut().headers() = self.headers;

        Ok(Client {
            inner,
            cache: HttpCache::new(cache_dir),
        })
    }
}
