//! HTTP adapter for InfluxDB 2.x (and the 1.8 compatibility endpoints).

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Url};

use crate::config::StoreConfig;
use crate::error::{StoreError, WxError};

use super::{Health, Point, PointStore};

pub struct InfluxClient {
    client: reqwest::Client,
    health_url: Url,
    write_url: Url,
    auth: Option<String>,
}

impl InfluxClient {
    pub fn new(config: &StoreConfig) -> Result<Self, WxError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pi-wx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WxError::Config(format!("cannot build HTTP client: {e}")))?;
        Self::with_client(client, config)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &StoreConfig) -> Result<Self, WxError> {
        let mut write_url = endpoint(&config.server, &["api", "v2", "write"])?;
        write_url
            .query_pairs_mut()
            .append_pair("org", &config.org)
            .append_pair("bucket", &config.bucket)
            .append_pair("precision", "ns");

        Ok(Self {
            client,
            health_url: endpoint(&config.server, &["health"])?,
            write_url,
            auth: config.auth_token(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(token) => request.header(AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }
}

impl PointStore for InfluxClient {
    async fn health(&self) -> Result<Health, StoreError> {
        let response = self
            .authorized(self.client.get(self.health_url.clone()))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // An unhealthy server still answers with a JSON status document.
        match serde_json::from_str::<Health>(&body) {
            Ok(health) => Ok(health),
            Err(e) => Err(StoreError::Api {
                status: status.as_u16(),
                body: if status.is_success() {
                    format!("malformed health response: {e}")
                } else {
                    body
                },
            }),
        }
    }

    async fn write_point(&self, point: &Point) -> Result<(), StoreError> {
        let line = point.to_line_protocol()?;
        let response = self
            .authorized(self.client.post(self.write_url.clone()))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, WxError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| WxError::Config(format!("'{base}' cannot be used as a server address")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
