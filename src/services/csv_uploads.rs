//! CSV upload to the data platform.

use crate::client::ChartMogulClient;
use crate::endpoint;
use crate::errors::ChartMogulResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

const UPLOAD_ENDPOINT: &str = "data_sources/:data_source_uuid/uploads";

/// Input parameters for a CSV upload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CsvUploadRequest {
    /// Data source to upload into; encoded in the path, not the form.
    pub data_source_uuid: String,
    /// Kind of rows in the file, e.g. `invoices`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_type: String,
    /// Batch label shown in the UI.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub batch_name: String,
}

/// Status of an accepted CSV upload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsvUploadResponse {
    /// Upload identifier.
    pub id: String,
    /// Original file name.
    pub original_name: String,
    /// Kind of rows in the file.
    pub data_type: String,
    /// Server-side storage path.
    pub storage_path: String,
    /// Processing progress.
    pub percent_complete: f32,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Batch label.
    pub batch_name: String,
}

/// Service for CSV uploads.
pub struct CsvUploadsService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> CsvUploadsService<'a> {
    /// Creates a new CSV uploads service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Uploads a CSV file to the data platform.
    ///
    /// The file is sent under form field `file`; the request's remaining
    /// scalar fields become form fields, except `data_source_uuid`, which
    /// the path already encodes.
    pub async fn upload(
        &self,
        file_path: &Path,
        request: &CsvUploadRequest,
    ) -> ChartMogulResult<CsvUploadResponse> {
        let path = endpoint::resolve(
            UPLOAD_ENDPOINT,
            endpoint::DATA_SOURCE_UUID_TOKEN,
            &request.data_source_uuid,
        );
        self.client
            .upload(&path, file_path, request, &["data_source_uuid"])
            .await
    }
}
