//! Authentication test endpoint.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use serde::Deserialize;

const PING_ENDPOINT: &str = "ping";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Ping {
    data: String,
}

/// Service for the authentication test endpoint.
pub struct PingService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> PingService<'a> {
    /// Creates a new ping service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Returns true when the API accepts the configured credentials.
    pub async fn ping(&self) -> ChartMogulResult<bool> {
        let ping: Ping = self.client.retrieve(PING_ENDPOINT, "").await?;
        Ok(ping.data == "pong!")
    }
}
