//! Invoice operations.

use crate::client::ChartMogulClient;
use crate::endpoint;
use crate::errors::{ChartMogulResult, FieldErrors};
use crate::services::transactions::Transaction;
use crate::services::Cursor;
use serde::{Deserialize, Serialize};

const INVOICES_ENDPOINT: &str = "invoices";
const SINGLE_INVOICE_ENDPOINT: &str = "invoices/:uuid";
const CUSTOMER_INVOICES_ENDPOINT: &str = "import/customers/:customer_uuid/invoices";

/// An invoice, the basis for subscription auto-generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Invoice UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Customer the invoice belongs to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_uuid: String,
    /// Invoice currency code.
    pub currency: String,
    /// Data source the invoice belongs to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_source_uuid: String,
    /// Invoice date.
    pub date: String,
    /// Payment due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Identifier in the source billing system.
    pub external_id: String,
    /// Invoice line items.
    pub line_items: Vec<LineItem>,
    /// Payments and refunds against the invoice.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
    /// Server-side validation feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// A single line of an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Line item UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Line type: `subscription` or `one_time`.
    #[serde(rename = "type")]
    pub line_type: String,
    /// Amount in the invoice currency's smallest unit.
    pub amount_in_cents: i64,
    /// Line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier in the source billing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Plan the subscription line bills for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_uuid: Option<String>,
    /// Whether the line is prorated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prorated: bool,
    /// Quantity billed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Start of the billed service period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_period_start: Option<String>,
    /// End of the billed service period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_period_end: Option<String>,
    /// External ID of the subscription the line belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_external_id: Option<String>,
}

/// A page of invoices; also the bulk-import envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoices {
    /// Customer the invoices belong to, when listed per customer.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_uuid: String,
    /// The page returned.
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: u32,
    /// Total number of pages.
    #[serde(skip_serializing_if = "is_zero")]
    pub total_pages: u32,
    /// The invoices.
    pub invoices: Vec<Invoice>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Optional filters for listing invoices across customers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAllInvoicesParams {
    /// Filter by customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uuid: Option<String>,
    /// Filter by data source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    /// Filter by external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

#[derive(Serialize)]
struct CreateInvoicesCall<'a> {
    invoices: &'a [Invoice],
}

/// Service for invoice operations.
pub struct InvoicesService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> InvoicesService<'a> {
    /// Creates a new invoices service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Imports invoices for a customer. The customer must already have a
    /// server-assigned UUID.
    pub async fn create(
        &self,
        invoices: &[Invoice],
        customer_uuid: &str,
    ) -> ChartMogulResult<Invoices> {
        let path = endpoint::resolve(
            CUSTOMER_INVOICES_ENDPOINT,
            endpoint::CUSTOMER_UUID_TOKEN,
            customer_uuid,
        );
        self.client
            .create(&path, &CreateInvoicesCall { invoices })
            .await
    }

    /// Lists imported invoices for a customer.
    pub async fn list(&self, cursor: &Cursor, customer_uuid: &str) -> ChartMogulResult<Invoices> {
        let path = endpoint::resolve(
            CUSTOMER_INVOICES_ENDPOINT,
            endpoint::CUSTOMER_UUID_TOKEN,
            customer_uuid,
        );
        self.client.list(&path, &[cursor]).await
    }

    /// Lists invoices across all customers, narrowed by the given filters.
    pub async fn list_all(
        &self,
        params: &ListAllInvoicesParams,
        cursor: &Cursor,
    ) -> ChartMogulResult<Invoices> {
        self.client.list(INVOICES_ENDPOINT, &[params, cursor]).await
    }

    /// Returns one invoice by UUID.
    pub async fn retrieve(&self, uuid: &str) -> ChartMogulResult<Invoice> {
        self.client.retrieve(SINGLE_INVOICE_ENDPOINT, uuid).await
    }

    /// Deletes one invoice by UUID.
    pub async fn delete(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client.delete(SINGLE_INVOICE_ENDPOINT, uuid).await
    }
}
