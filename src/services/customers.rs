//! Customer operations: import API plus the enrichment endpoints
//! (update, search, merge).

use crate::client::ChartMogulClient;
use crate::errors::{ChartMogulResult, FieldErrors};
use crate::services::attributes::Attributes;
use crate::services::Cursor;
use serde::{Deserialize, Serialize};

const IMPORT_CUSTOMERS_ENDPOINT: &str = "import/customers";
const SINGLE_IMPORT_CUSTOMER_ENDPOINT: &str = "import/customers/:uuid";
const SINGLE_CUSTOMER_ENDPOINT: &str = "customers/:uuid";
const SEARCH_CUSTOMERS_ENDPOINT: &str = "customers/search";
const MERGE_CUSTOMERS_ENDPOINT: &str = "customers/merges";

/// One customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Data source the customer belongs to.
    pub data_source_uuid: String,
    /// Identifier in the source billing system.
    pub external_id: String,
    /// Customer name.
    pub name: String,
    /// Contact e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// State or region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// When the lead was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_created_at: Option<String>,
    /// When the free trial started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_started_at: Option<String>,
    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Tags and custom attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Server-side validation feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Result of listing imported customers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Customers {
    /// The customers on this page.
    pub customers: Vec<Customer>,
    /// Total number of pages.
    pub total_pages: u32,
    /// The page returned.
    pub current_page: u32,
}

/// Result of the search and by-email endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerSearchResult {
    /// Matching customers.
    pub entries: Vec<Customer>,
    /// The page returned.
    pub page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

/// Optional filters for listing customers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCustomersParams {
    /// Filter by data source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    /// Filter by external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Parameters for searching customers by e-mail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchCustomersParams {
    /// E-mail address to search for.
    pub email: String,
}

/// One side of a merge: exactly one of the identifiers must be set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerRef {
    /// Customer UUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uuid: Option<String>,
    /// External ID in the source system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Parameters for merging two customers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeCustomersParams {
    /// Customer to merge from; it disappears after the merge.
    pub from: CustomerRef,
    /// Customer to merge into.
    pub into: CustomerRef,
}

/// Service for customer operations.
pub struct CustomersService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> CustomersService<'a> {
    /// Creates a new customers service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Imports a customer. `data_source_uuid` and `external_id` must be set.
    pub async fn create(&self, customer: &Customer) -> ChartMogulResult<Customer> {
        self.client.create(IMPORT_CUSTOMERS_ENDPOINT, customer).await
    }

    /// Returns one customer by UUID.
    pub async fn retrieve(&self, uuid: &str) -> ChartMogulResult<Customer> {
        self.client.retrieve(SINGLE_CUSTOMER_ENDPOINT, uuid).await
    }

    /// Updates customer details.
    pub async fn update(&self, uuid: &str, customer: &Customer) -> ChartMogulResult<Customer> {
        self.client
            .update(SINGLE_CUSTOMER_ENDPOINT, uuid, customer)
            .await
    }

    /// Lists imported customers.
    pub async fn list(
        &self,
        params: &ListCustomersParams,
        cursor: &Cursor,
    ) -> ChartMogulResult<Customers> {
        self.client
            .list(IMPORT_CUSTOMERS_ENDPOINT, &[params, cursor])
            .await
    }

    /// Searches customers by e-mail.
    pub async fn search(
        &self,
        params: &SearchCustomersParams,
        cursor: &Cursor,
    ) -> ChartMogulResult<CustomerSearchResult> {
        self.client
            .list(SEARCH_CUSTOMERS_ENDPOINT, &[params, cursor])
            .await
    }

    /// Merges two customers. The endpoint answers with an empty body, so
    /// there is nothing to decode on success.
    pub async fn merge(&self, params: &MergeCustomersParams) -> ChartMogulResult<()> {
        let _: serde_json::Value = self
            .client
            .create(MERGE_CUSTOMERS_ENDPOINT, params)
            .await?;
        Ok(())
    }

    /// Deletes the customer identified by its UUID.
    pub async fn delete(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client
            .delete(SINGLE_IMPORT_CUSTOMER_ENDPOINT, uuid)
            .await
    }
}
