use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::BaseStreamProber;

/// Stream prober backed by a shared reqwest client.
pub struct HttpStreamProber {
    client: Client,
}

impl HttpStreamProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build probe HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BaseStreamProber for HttpStreamProber {
    async fn probe(&self, url: &str) -> Result<u16> {
        debug!(url, "Probing stream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        Ok(response.status().as_u16())
    }
}
