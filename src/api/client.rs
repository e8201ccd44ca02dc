use std::time::Duration;

use moka::future::Cache;
use reqwest::RequestBuilder;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

use super::wire::ApiError;

/// HTTP client for the ticketing backend.
///
/// Holds the bearer token for the active session and a small response cache
/// for per-session reference data (the area hierarchy changes rarely, so
/// repeat fetches within the TTL are served locally).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cache: Cache<String, String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let cache = Cache::builder()
            .max_capacity(50)
            .time_to_live(Duration::from_secs(
                u64::from(config.cache_ttl_minutes) * 60,
            ))
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: None,
            cache,
        })
    }

    /// Install or clear the session bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("api: GET {path}");
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("api: GET {path}");
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// GET through the reference-data cache, keyed by path.
    pub(crate) async fn get_cached<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        if let Some(body) = self.cache.get(path).await {
            tracing::debug!("api: cache hit for {path}");
            return Ok(serde_json::from_str(&body)?);
        }
        tracing::debug!("api: GET {path} (cache miss)");
        let body = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.cache.insert(path.to_owned(), body.clone()).await;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!("api: POST {path}");
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        tracing::debug!("api: POST {path} (multipart)");
        let response = self
            .authorize(self.http.post(self.url(path)).multipart(form))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}
