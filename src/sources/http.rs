use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use url::Url;

use crate::domain::Announcement;
use crate::errors::{NewsError, NewsResult};
use crate::sources::traits::NewsSource;

const NEWS_PATH: &str = "/api/news";
const REFRESH_PATH: &str = "/api/news/refresh";

/// [`NewsSource`] backed by the news backend's HTTP API.
pub struct HttpNewsSource {
    base_url: String,
    client: Client,
}

impl HttpNewsSource {
    pub fn new(base_url: &Url, timeout: Duration) -> NewsResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn news_url(&self) -> String {
        format!("{}{}", self.base_url, NEWS_PATH)
    }

    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url, REFRESH_PATH)
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn fetch_news(&self) -> NewsResult<Vec<Announcement>> {
        let url = self.news_url();
        debug!("GET {}", url);

        let response = ensure_success(self.client.get(&url).send().await?, &url)?;
        let body = response.bytes().await?;

        decode_news(&body)
    }

    async fn trigger_refresh(&self) -> NewsResult<()> {
        let url = self.refresh_url();
        debug!("POST {}", url);

        // Response body is ignored
        ensure_success(self.client.post(&url).send().await?, &url)?;
        Ok(())
    }
}

fn ensure_success(response: Response, url: &str) -> NewsResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(NewsError::Status {
            endpoint: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Decode a listing body. An empty body or `null` is an empty list.
pub fn decode_news(body: &[u8]) -> NewsResult<Vec<Announcement>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let items: Option<Vec<Announcement>> = serde_json::from_slice(body)?;
    Ok(items.unwrap_or_default())
}
