//! Subscription operations.

use crate::client::ChartMogulClient;
use crate::endpoint;
use crate::errors::ChartMogulResult;
use crate::services::Cursor;
use serde::{Deserialize, Serialize};

const CUSTOMER_SUBSCRIPTIONS_ENDPOINT: &str = "import/customers/:customer_uuid/subscriptions";
const CANCEL_SUBSCRIPTION_ENDPOINT: &str = "import/subscriptions/:uuid";

/// A subscription derived from imported invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    /// Subscription UUID.
    pub uuid: String,
    /// Identifier in the source billing system.
    pub external_id: String,
    /// Plan the subscription bills for.
    pub plan_uuid: String,
    /// Customer holding the subscription.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_uuid: String,
    /// Data source the subscription belongs to.
    pub data_source_uuid: String,
    /// Dates on which the subscription was cancelled.
    pub cancellation_dates: Vec<String>,
}

/// Result of listing a customer's subscriptions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Subscriptions {
    /// The subscriptions on this page.
    pub subscriptions: Vec<Subscription>,
    /// Customer the subscriptions belong to.
    pub customer_uuid: String,
    /// Total number of pages.
    pub total_pages: u32,
    /// The page returned.
    pub current_page: u32,
}

/// Cancellation parameters: one date, or the full replacement set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelSubscriptionParams {
    /// Cancellation timestamp to record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    /// Full replacement list of cancellation dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_dates: Option<Vec<String>>,
}

/// Service for subscription operations.
pub struct SubscriptionsService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> SubscriptionsService<'a> {
    /// Creates a new subscriptions service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Cancels a subscription by recording cancellation dates.
    pub async fn cancel(
        &self,
        subscription_uuid: &str,
        params: &CancelSubscriptionParams,
    ) -> ChartMogulResult<Subscription> {
        self.client
            .update(CANCEL_SUBSCRIPTION_ENDPOINT, subscription_uuid, params)
            .await
    }

    /// Lists all subscriptions of a customer.
    pub async fn list(
        &self,
        cursor: &Cursor,
        customer_uuid: &str,
    ) -> ChartMogulResult<Subscriptions> {
        let path = endpoint::resolve(
            CUSTOMER_SUBSCRIPTIONS_ENDPOINT,
            endpoint::CUSTOMER_UUID_TOKEN,
            customer_uuid,
        );
        self.client.list(&path, &[cursor]).await
    }
}
