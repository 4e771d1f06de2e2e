//! Data source operations.

use crate::client::ChartMogulClient;
use crate::errors::{ChartMogulResult, FieldErrors};
use serde::{Deserialize, Serialize};

const DATA_SOURCES_ENDPOINT: &str = "data_sources";
const SINGLE_DATA_SOURCE_ENDPOINT: &str = "data_sources/:uuid";
const PURGE_DATA_SOURCE_ENDPOINT: &str = "data_sources/:uuid/dependent";
const EMPTY_DATA_SOURCE_ENDPOINT: &str = "data_sources/:uuid/all";

/// A data source: one billing system feeding the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSource {
    /// Data source UUID, assigned by the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Import status.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Source billing system.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub system: String,
    /// Server-side validation feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Result of listing data sources; the endpoint does not page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// The data sources.
    pub data_sources: Vec<DataSource>,
}

/// Optional filters for listing data sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListDataSourcesParams {
    /// Filter by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Filter by source system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

#[derive(Serialize)]
struct CreateDataSourceCall<'a> {
    name: &'a str,
}

/// Service for data source operations.
pub struct DataSourcesService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> DataSourcesService<'a> {
    /// Creates a new data sources service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Creates a data source with the given name.
    pub async fn create(&self, name: &str) -> ChartMogulResult<DataSource> {
        self.client
            .create(DATA_SOURCES_ENDPOINT, &CreateDataSourceCall { name })
            .await
    }

    /// Creates a data source with more than just a name.
    pub async fn create_with_system(
        &self,
        data_source: &DataSource,
    ) -> ChartMogulResult<DataSource> {
        self.client.create(DATA_SOURCES_ENDPOINT, data_source).await
    }

    /// Returns one data source by UUID.
    pub async fn retrieve(&self, uuid: &str) -> ChartMogulResult<DataSource> {
        self.client.retrieve(SINGLE_DATA_SOURCE_ENDPOINT, uuid).await
    }

    /// Lists all data sources.
    pub async fn list(&self) -> ChartMogulResult<DataSources> {
        self.client.list(DATA_SOURCES_ENDPOINT, &[]).await
    }

    /// Lists data sources matching the given filters.
    pub async fn list_with_filters(
        &self,
        params: &ListDataSourcesParams,
    ) -> ChartMogulResult<DataSources> {
        self.client.list(DATA_SOURCES_ENDPOINT, &[params]).await
    }

    /// Deletes the data source identified by its UUID.
    pub async fn delete(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client.delete(SINGLE_DATA_SOURCE_ENDPOINT, uuid).await
    }

    /// Deletes all dependent data, keeping the data source and its
    /// customers.
    pub async fn purge(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client.delete(PURGE_DATA_SOURCE_ENDPOINT, uuid).await
    }

    /// Deletes all data in the data source, keeping its UUID.
    pub async fn empty(&self, uuid: &str) -> ChartMogulResult<()> {
        self.client.delete(EMPTY_DATA_SOURCE_ENDPOINT, uuid).await
    }
}
