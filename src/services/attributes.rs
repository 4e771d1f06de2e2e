//! Customer attribute operations: tags and typed custom attributes.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use crate::services::customers::CustomerSearchResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CUSTOMER_ATTRIBUTES_ENDPOINT: &str = "customers/:uuid/attributes";
const CUSTOMER_CUSTOM_ATTRIBUTES_ENDPOINT: &str = "customers/:uuid/attributes/custom";
const CUSTOM_ATTRIBUTES_ENDPOINT: &str = "customers/attributes/custom";

/// Data type of a custom attribute.
pub const ATTR_TYPE_STRING: &str = "String";
/// Data type of a custom attribute.
pub const ATTR_TYPE_INTEGER: &str = "Integer";
/// Data type of a custom attribute.
pub const ATTR_TYPE_TIMESTAMP: &str = "Timestamp";
/// Data type of a custom attribute.
pub const ATTR_TYPE_BOOLEAN: &str = "Boolean";

/// Attributes attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    /// Tags on the customer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Custom attribute values by key.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

/// Envelope of the attributes retrieval endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttributesResult {
    /// The customer's attributes.
    pub attributes: Option<Attributes>,
}

/// A typed custom attribute to add.
#[derive(Debug, Clone, Serialize)]
pub struct CustomAttribute {
    /// Data type, one of the `ATTR_TYPE_*` constants.
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Value,
}

/// Custom attribute values after a write.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomAttributes {
    /// Custom attribute values by key.
    pub custom: Map<String, Value>,
}

#[derive(Serialize)]
struct AttributesDefinition<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    custom: &'a [CustomAttribute],
}

#[derive(Serialize)]
struct UpdateCustomAttributes<'a> {
    custom: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct DeleteCustomAttributes<'a> {
    custom: &'a [String],
}

/// Service for customer attribute operations.
pub struct AttributesService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> AttributesService<'a> {
    /// Creates a new attributes service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Returns the attributes of a customer.
    pub async fn retrieve(&self, customer_uuid: &str) -> ChartMogulResult<AttributesResult> {
        self.client
            .retrieve(CUSTOMER_ATTRIBUTES_ENDPOINT, customer_uuid)
            .await
    }

    /// Adds custom attributes to a customer.
    pub async fn add_to_customer(
        &self,
        customer_uuid: &str,
        custom: &[CustomAttribute],
    ) -> ChartMogulResult<CustomAttributes> {
        self.client
            .add(
                CUSTOMER_CUSTOM_ATTRIBUTES_ENDPOINT,
                customer_uuid,
                &AttributesDefinition {
                    email: None,
                    custom,
                },
            )
            .await
    }

    /// Adds custom attributes to all customers matching an e-mail address.
    pub async fn add_with_email(
        &self,
        email: &str,
        custom: &[CustomAttribute],
    ) -> ChartMogulResult<CustomerSearchResult> {
        self.client
            .create(
                CUSTOM_ATTRIBUTES_ENDPOINT,
                &AttributesDefinition {
                    email: Some(email),
                    custom,
                },
            )
            .await
    }

    /// Overwrites custom attribute values of a customer.
    pub async fn update_of_customer(
        &self,
        customer_uuid: &str,
        custom: &Map<String, Value>,
    ) -> ChartMogulResult<CustomAttributes> {
        self.client
            .update(
                CUSTOMER_CUSTOM_ATTRIBUTES_ENDPOINT,
                customer_uuid,
                &UpdateCustomAttributes { custom },
            )
            .await
    }

    /// Removes custom attributes from a customer by key.
    pub async fn remove(
        &self,
        customer_uuid: &str,
        keys: &[String],
    ) -> ChartMogulResult<CustomAttributes> {
        self.client
            .delete_with_body(
                CUSTOMER_CUSTOM_ATTRIBUTES_ENDPOINT,
                customer_uuid,
                &DeleteCustomAttributes { custom: keys },
            )
            .await
    }
}
