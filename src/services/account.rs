//! Account operations.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use serde::{Deserialize, Serialize};

const ACCOUNT_ENDPOINT: &str = "account";

/// Details of the current account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Account name.
    pub name: String,
    /// Reporting currency code.
    pub currency: String,
    /// Time zone identifier.
    pub time_zone: String,
    /// First day of the reporting week.
    pub week_start_on: String,
}

/// Service for account operations.
pub struct AccountService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> AccountService<'a> {
    /// Creates a new account service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Retrieves details of the current account.
    ///
    /// The account is a singleton resource: its endpoint carries no
    /// identifier, so nothing is substituted into the path.
    pub async fn retrieve(&self) -> ChartMogulResult<Account> {
        self.client.retrieve(ACCOUNT_ENDPOINT, "").await
    }
}
