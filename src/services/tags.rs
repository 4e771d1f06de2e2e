//! Tag operations on customers.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use crate::services::customers::CustomerSearchResult;
use serde::{Deserialize, Serialize};

const CUSTOMER_TAGS_ENDPOINT: &str = "customers/:uuid/attributes/tags";
const TAGS_ENDPOINT: &str = "customers/attributes/tags";

/// The tag list of a customer; both request and response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsResult {
    /// The tags.
    pub tags: Vec<String>,
}

#[derive(Serialize)]
struct TagsByEmail<'a> {
    email: &'a str,
    tags: &'a [String],
}

/// Service for tag operations.
pub struct TagsService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> TagsService<'a> {
    /// Creates a new tags service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Adds tags to a customer, returning the full tag list.
    pub async fn add_to_customer(
        &self,
        customer_uuid: &str,
        tags: &[String],
    ) -> ChartMogulResult<TagsResult> {
        self.client
            .add(
                CUSTOMER_TAGS_ENDPOINT,
                customer_uuid,
                &TagsResult {
                    tags: tags.to_vec(),
                },
            )
            .await
    }

    /// Adds tags to all customers matching an e-mail address.
    pub async fn add_to_customers_with_email(
        &self,
        email: &str,
        tags: &[String],
    ) -> ChartMogulResult<CustomerSearchResult> {
        self.client
            .create(TAGS_ENDPOINT, &TagsByEmail { email, tags })
            .await
    }

    /// Removes the given tags from a customer, returning the remaining tag
    /// list.
    pub async fn remove_from_customer(
        &self,
        customer_uuid: &str,
        tags: &[String],
    ) -> ChartMogulResult<TagsResult> {
        self.client
            .delete_with_body(
                CUSTOMER_TAGS_ENDPOINT,
                customer_uuid,
                &TagsResult {
                    tags: tags.to_vec(),
                },
            )
            .await
    }
}
