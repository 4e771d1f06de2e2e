//! Transaction operations.

use crate::client::ChartMogulClient;
use crate::endpoint;
use crate::errors::{ChartMogulResult, FieldErrors};
use serde::{Deserialize, Serialize};

const TRANSACTIONS_ENDPOINT: &str = "import/invoices/:invoice_uuid/transactions";

/// A payment or refund against an invoice, for its full value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Transaction UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Transaction date.
    pub date: String,
    /// Identifier in the source billing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Outcome: `successful` or `failed`.
    pub result: String,
    /// Kind: `payment` or `refund`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Server-side validation feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Service for transaction operations.
pub struct TransactionsService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> TransactionsService<'a> {
    /// Creates a new transactions service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Records a transaction against an invoice.
    pub async fn create(
        &self,
        transaction: &Transaction,
        invoice_uuid: &str,
    ) -> ChartMogulResult<Transaction> {
        let path = endpoint::resolve(
            TRANSACTIONS_ENDPOINT,
            endpoint::INVOICE_UUID_TOKEN,
            invoice_uuid,
        );
        self.client.create(&path, transaction).await
    }
}
