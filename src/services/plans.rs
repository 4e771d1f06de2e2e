//! Plan operations.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use crate::services::Cursor;
use serde::{Deserialize, Serialize};

const PLANS_ENDPOINT: &str = "plans";
const SINGLE_PLAN_ENDPOINT: &str = "plans/:uuid";

/// A plan: the categorization of subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    /// Plan UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Data source the plan belongs to.
    pub data_source_uuid: String,
    /// Identifier in the source billing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Plan name.
    pub name: String,
    /// Billing interval length.
    pub interval_count: u32,
    /// Billing interval unit, e.g. `month`.
    pub interval_unit: String,
}

/// Result of listing plans.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Plans {
    /// The plans on this page.
    pub plans: Vec<Plan>,
    /// Total number of pages.
    pub total_pages: u32,
    /// The page returned.
    pub current_page: u32,
}

/// Optional filters for listing plans.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPlansParams {
    /// Filter by data source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    /// Filter by external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Service for plan operations.
pub struct PlansService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> PlansService<'a> {
    /// Creates a new plans service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Creates a plan. `data_source_uuid` must be set.
    pub async fn create(&self, plan: &Plan) -> ChartMogulResult<Plan> {
        self.client.create(PLANS_ENDPOINT, plan).await
    }

    /// Returns one plan by UUID.
    pub async fn retrieve(&self, uuid: &str) -> ChartMogulResult<Plan> {
        self.client.retrieve(SINGLE_PLAN_ENDPOINT, uuid).await
    }

    /// Lists plans.
    pub async fn list(
        &self,
        params: &ListPlansParams,
        cursor: &Cursor,
    ) -> ChartMogulResult<Plans> {
        self.client.list(PLANS_ENDPOINT, &[params, cursor]).await
    }

    /// Updates a plan.
    pub async fn update(&self, uuid: &str, plan: &Plan) -> ChartMogulResult<Plan> {
        self.client.update(SINGLE_PLAN_ENDPOINT, uuid, plan).await
    }

    /// Deletes one plan by UUID.
    pub async fn delete(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client.delete(SINGLE_PLAN_ENDPOINT, uuid).await
    }
}
