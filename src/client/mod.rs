//! ChartMogul API client implementation.
//!
//! The client exposes six generic operations — create, retrieve, list, the
//! update family, the delete family, and upload — and every resource module
//! funnels through them. No caller constructs raw requests itself.

use crate::auth::AuthMethod;
use crate::config::{ChartMogulConfig, ChartMogulConfigBuilder, RetryConfig};
use crate::endpoint;
use crate::errors::{ChartMogulError, ChartMogulResult, TransportError};
use crate::resilience::{AttemptOutcome, RetryController};
use crate::services::*;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// HTTP verb selector for the update family of operations.
///
/// The remote API spells "update" three ways depending on the resource;
/// one implementation covers all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateVerb {
    /// PATCH — partial update of an existing resource.
    Patch,
    /// POST — additive update, e.g. appending tags or attributes.
    Post,
    /// PUT — full replacement of a sub-resource.
    Put,
}

impl UpdateVerb {
    fn method(self) -> Method {
        match self {
            Self::Patch => Method::PATCH,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

/// Ordered query parameters for list operations.
///
/// Each object is flattened into query-string pairs; objects are appended in
/// call order. Blanket-implemented for any `Serialize` type with flat,
/// scalar fields.
pub trait QueryParams {
    /// Encodes this object as a query-string fragment (no leading `?`).
    fn query_fragment(&self) -> ChartMogulResult<String>;
}

impl<T: Serialize> QueryParams for T {
    fn query_fragment(&self) -> ChartMogulResult<String> {
        serde_urlencoded::to_string(self).map_err(|e| {
            ChartMogulError::request_encoding(format!("failed to encode query parameters: {}", e))
        })
    }
}

/// Request body variants built fresh for each retry attempt.
#[derive(Debug, Clone)]
enum RequestBody {
    None,
    Json(Bytes),
    Multipart(MultipartBody),
}

#[derive(Debug, Clone)]
struct MultipartBody {
    file_name: String,
    file_contents: Bytes,
    fields: Vec<(String, String)>,
}

/// ChartMogul API client.
///
/// Holds no operation-scoped mutable state; configuration is immutable after
/// construction, so a client can be shared freely across tasks.
pub struct ChartMogulClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: ChartMogulConfig,
    /// Retry controller.
    retry: RetryController,
}

impl ChartMogulClient {
    /// Creates a new ChartMogul client.
    pub fn new(config: ChartMogulConfig) -> ChartMogulResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| {
                ChartMogulError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        let retry = RetryController::new(&config.retry);

        Ok(Self {
            http,
            config,
            retry,
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> ChartMogulClientBuilder {
        ChartMogulClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // Service accessors

    /// Gets the account service.
    pub fn account(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    /// Gets the ping service.
    pub fn ping(&self) -> PingService<'_> {
        PingService::new(self)
    }

    /// Gets the data sources service.
    pub fn data_sources(&self) -> DataSourcesService<'_> {
        DataSourcesService::new(self)
    }

    /// Gets the customers service.
    pub fn customers(&self) -> CustomersService<'_> {
        CustomersService::new(self)
    }

    /// Gets the plans service.
    pub fn plans(&self) -> PlansService<'_> {
        PlansService::new(self)
    }

    /// Gets the invoices service.
    pub fn invoices(&self) -> InvoicesService<'_> {
        InvoicesService::new(self)
    }

    /// Gets the transactions service.
    pub fn transactions(&self) -> TransactionsService<'_> {
        TransactionsService::new(self)
    }

    /// Gets the subscriptions service.
    pub fn subscriptions(&self) -> SubscriptionsService<'_> {
        SubscriptionsService::new(self)
    }

    /// Gets the tags service.
    pub fn tags(&self) -> TagsService<'_> {
        TagsService::new(self)
    }

    /// Gets the custom attributes service.
    pub fn attributes(&self) -> AttributesService<'_> {
        AttributesService::new(self)
    }

    /// Gets the metrics service.
    pub fn metrics(&self) -> MetricsService<'_> {
        MetricsService::new(self)
    }

    /// Gets the CSV uploads service.
    pub fn csv_uploads(&self) -> CsvUploadsService<'_> {
        CsvUploadsService::new(self)
    }

    // Generic operations

    /// Creates a resource: POST with a JSON body, decoding the JSON response.
    ///
    /// Not safe to blindly retry against a backend without duplicate
    /// detection: a retried create whose first response was lost can create
    /// a duplicate remote resource. The remote service surfaces duplicates
    /// via field-error maps in the response body.
    pub async fn create<I, O>(&self, path: &str, input: &I) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let body = json_body(input)?;
        let bytes = self.execute(Method::POST, path, &[], body).await?;
        decode_json(&bytes)
    }

    /// Retrieves a resource: GET with the identifier substituted into the
    /// template.
    ///
    /// An empty identifier performs no substitution, which addresses
    /// singleton resources whose templates carry no token.
    pub async fn retrieve<O>(&self, template: &str, uuid: &str) -> ChartMogulResult<O>
    where
        O: DeserializeOwned,
    {
        let path = endpoint::resolve(template, endpoint::UUID_TOKEN, uuid);
        let bytes = self
            .execute(Method::GET, &path, &[], RequestBody::None)
            .await?;
        decode_json(&bytes)
    }

    /// Lists resources: GET with zero or more query objects flattened into
    /// the query string in call order.
    pub async fn list<O>(&self, path: &str, query: &[&dyn QueryParams]) -> ChartMogulResult<O>
    where
        O: DeserializeOwned,
    {
        let bytes = self
            .execute(Method::GET, path, query, RequestBody::None)
            .await?;
        decode_json(&bytes)
    }

    /// Updates a resource with PATCH.
    pub async fn update<I, O>(&self, template: &str, uuid: &str, input: &I) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        self.update_with(template, uuid, input, UpdateVerb::Patch)
            .await
    }

    /// Like [`update`](Self::update), but POST.
    pub async fn add<I, O>(&self, template: &str, uuid: &str, input: &I) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        self.update_with(template, uuid, input, UpdateVerb::Post)
            .await
    }

    /// Like [`update`](Self::update), but PUT.
    pub async fn put_to<I, O>(&self, template: &str, uuid: &str, input: &I) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        self.update_with(template, uuid, input, UpdateVerb::Put).await
    }

    /// Shared implementation of the update family, parameterized by verb.
    pub async fn update_with<I, O>(
        &self,
        template: &str,
        uuid: &str,
        input: &I,
        verb: UpdateVerb,
    ) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let path = endpoint::resolve(template, endpoint::UUID_TOKEN, uuid);
        let body = json_body(input)?;
        let bytes = self.execute(verb.method(), &path, &[], body).await?;
        decode_json(&bytes)
    }

    /// Deletes a resource, ignoring the response body.
    pub async fn delete(&self, template: &str, uuid: &str) -> ChartMogulResult<()> {
        let path = endpoint::resolve(template, endpoint::UUID_TOKEN, uuid);
        self.execute(Method::DELETE, &path, &[], RequestBody::None)
            .await?;
        Ok(())
    }

    /// Deletes with a JSON request body, decoding the JSON response.
    pub async fn delete_with_body<I, O>(
        &self,
        template: &str,
        uuid: &str,
        input: &I,
    ) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let path = endpoint::resolve(template, endpoint::UUID_TOKEN, uuid);
        let body = json_body(input)?;
        let bytes = self.execute(Method::DELETE, &path, &[], body).await?;
        decode_json(&bytes)
    }

    /// Uploads a file: POST multipart/form-data with the file contents under
    /// form field `file` and the scalar fields of `input` as further form
    /// fields, minus `exclude_fields` (fields the resolved path already
    /// encodes).
    ///
    /// The file is read fully into memory once; the multipart body is
    /// rebuilt for every retry attempt. Same duplicate hazard as
    /// [`create`](Self::create).
    pub async fn upload<I, O>(
        &self,
        path: &str,
        file_path: &Path,
        input: &I,
        exclude_fields: &[&str],
    ) -> ChartMogulResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let file_contents = tokio::fs::read(file_path).await.map_err(|e| {
            ChartMogulError::Request {
                errors: vec![TransportError::Io(format!(
                    "failed to read {}: {}",
                    file_path.display(),
                    e
                ))],
            }
        })?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let body = RequestBody::Multipart(MultipartBody {
            file_name,
            file_contents: Bytes::from(file_contents),
            fields: scalar_fields(input, exclude_fields)?,
        });
        let bytes = self.execute(Method::POST, path, &[], body).await?;
        decode_json(&bytes)
    }

    // Internal methods

    /// Resolves the full URL, drives the retry controller over per-attempt
    /// request execution, and wraps the final outcome.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[&dyn QueryParams],
        body: RequestBody,
    ) -> ChartMogulResult<Bytes> {
        let url = self.build_url(path, query)?;
        tracing::debug!(method = %method, url = %url, "executing request");

        let outcome = self
            .retry
            .run(|| {
                let http = self.http.clone();
                let method = method.clone();
                let url = url.clone();
                let auth = self.config.auth.clone();
                let user_agent = self.config.user_agent.clone();
                let body = body.clone();

                send_attempt(http, method, url, auth, user_agent, body)
            })
            .await;

        if let Some(error) = ChartMogulError::from_outcome(&outcome) {
            tracing::debug!(error = %error, "request failed");
            return Err(error);
        }
        Ok(outcome.body.unwrap_or_default())
    }

    fn build_url(&self, path: &str, query: &[&dyn QueryParams]) -> ChartMogulResult<String> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = format!("{}/{}", base, path);

        let mut fragments = Vec::new();
        for params in query {
            let fragment = params.query_fragment()?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
        if !fragments.is_empty() {
            url.push('?');
            url.push_str(&fragments.join("&"));
        }
        Ok(url)
    }
}

/// Executes one attempt: builds the request from scratch, sends it, and
/// collapses whatever happened into an [`AttemptOutcome`].
async fn send_attempt(
    http: Client,
    method: Method,
    url: String,
    auth: Option<AuthMethod>,
    user_agent: String,
    body: RequestBody,
) -> AttemptOutcome {
    let mut request = http.request(method, &url).header(USER_AGENT, &user_agent);
    if let Some(auth) = &auth {
        request = auth.apply(request);
    }

    request = match body {
        RequestBody::None => request.header(CONTENT_TYPE, "application/json"),
        RequestBody::Json(bytes) => request
            .header(CONTENT_TYPE, "application/json")
            .body(bytes),
        RequestBody::Multipart(parts) => {
            let file = reqwest::multipart::Part::bytes(parts.file_contents.to_vec())
                .file_name(parts.file_name);
            let mut form = reqwest::multipart::Form::new().part("file", file);
            for (key, value) in parts.fields {
                form = form.text(key, value);
            }
            // reqwest sets the multipart/form-data content type with the
            // generated boundary.
            request.multipart(form)
        }
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "request attempt failed");
            return AttemptOutcome::failure(TransportError::from_reqwest(&e));
        }
    };

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("").to_string();

    match response.bytes().await {
        Ok(bytes) => AttemptOutcome {
            status: Some(status.as_u16()),
            status_text: Some(status_text),
            body: Some(bytes),
            transport_errors: vec![],
        },
        Err(e) => AttemptOutcome {
            status: Some(status.as_u16()),
            status_text: Some(status_text),
            body: None,
            transport_errors: vec![TransportError::from_reqwest(&e)],
        },
    }
}

fn json_body<I: Serialize + ?Sized>(input: &I) -> ChartMogulResult<RequestBody> {
    let bytes = serde_json::to_vec(input).map_err(|e| {
        ChartMogulError::request_encoding(format!("failed to encode request body: {}", e))
    })?;
    Ok(RequestBody::Json(Bytes::from(bytes)))
}

/// Flattens the scalar fields of `input` into multipart form fields,
/// skipping `exclude_fields` and any nested values.
fn scalar_fields<I: Serialize + ?Sized>(
    input: &I,
    exclude_fields: &[&str],
) -> ChartMogulResult<Vec<(String, String)>> {
    let value = serde_json::to_value(input).map_err(|e| {
        ChartMogulError::request_encoding(format!("failed to encode upload fields: {}", e))
    })?;
    let object = match value {
        serde_json::Value::Object(object) => object,
        _ => {
            return Err(ChartMogulError::request_encoding(
                "upload input must serialize to a JSON object",
            ))
        }
    };

    let mut fields = Vec::new();
    for (key, value) in object {
        if exclude_fields.contains(&key.as_str()) {
            continue;
        }
        match value {
            serde_json::Value::String(s) => fields.push((key, s)),
            serde_json::Value::Number(n) => fields.push((key, n.to_string())),
            serde_json::Value::Bool(b) => fields.push((key, b.to_string())),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => {}
        }
    }
    Ok(fields)
}

/// Decodes a JSON response body, surfacing failures as a distinct error
/// kind instead of a zero-valued output.
fn decode_json<O: DeserializeOwned>(bytes: &Bytes) -> ChartMogulResult<O> {
    // A handful of endpoints answer 2xx with an empty body; decode it as
    // JSON null so callers expecting no payload can use a permissive target.
    let bytes: &[u8] = if bytes.is_empty() { b"null" } else { bytes.as_ref() };
    serde_json::from_slice(bytes).map_err(|e| ChartMogulError::Decode {
        message: e.to_string(),
        body: String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// Builder for [`ChartMogulClient`].
pub struct ChartMogulClientBuilder {
    config_builder: ChartMogulConfigBuilder,
}

impl ChartMogulClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: ChartMogulConfig::builder(),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets HTTP Basic credentials (account token + access key).
    pub fn basic_auth(self, account_token: impl Into<String>, access_key: impl Into<String>) -> Self {
        self.auth(AuthMethod::basic(account_token, access_key))
    }

    /// Sets an API key credential.
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.auth(AuthMethod::api_key(key))
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sets the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.config_builder = self.config_builder.retry(config);
        self
    }

    /// Disables retries.
    pub fn no_retry(mut self) -> Self {
        self.config_builder = self.config_builder.no_retry();
        self
    }

    /// Builds the client.
    pub fn build(self) -> ChartMogulResult<ChartMogulClient> {
        let config = self.config_builder.build()?;
        ChartMogulClient::new(config)
    }
}

impl Default for ChartMogulClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn test_client() -> ChartMogulClient {
        ChartMogulClient::builder()
            .basic_auth("token", "key")
            .build()
            .unwrap()
    }

    #[derive(Serialize)]
    struct Filter {
        name: Option<String>,
        system: Option<String>,
    }

    #[test]
    fn test_build_url() {
        let client = test_client();
        assert_eq!(
            client.build_url("data_sources", &[]).unwrap(),
            "https://api.chartmogul.com/v1/data_sources"
        );
        assert_eq!(
            client.build_url("/data_sources", &[]).unwrap(),
            "https://api.chartmogul.com/v1/data_sources"
        );
    }

    #[test]
    fn test_build_url_query_order() {
        let client = test_client();
        let first = Filter {
            name: Some("billing".to_string()),
            system: None,
        };
        let second = crate::services::Cursor {
            page: Some(2),
            per_page: Some(50),
        };
        let url = client
            .build_url("data_sources", &[&first, &second])
            .unwrap();
        assert_eq!(
            url,
            "https://api.chartmogul.com/v1/data_sources?name=billing&page=2&per_page=50"
        );
    }

    #[test]
    fn test_build_url_skips_empty_query_objects() {
        let client = test_client();
        let empty = Filter {
            name: None,
            system: None,
        };
        let url = client.build_url("data_sources", &[&empty]).unwrap();
        assert_eq!(url, "https://api.chartmogul.com/v1/data_sources");
    }

    #[test]
    fn test_update_verb_methods() {
        assert_eq!(UpdateVerb::Patch.method(), Method::PATCH);
        assert_eq!(UpdateVerb::Post.method(), Method::POST);
        assert_eq!(UpdateVerb::Put.method(), Method::PUT);
    }

    #[test]
    fn test_scalar_fields_excludes_path_field() {
        #[derive(Serialize)]
        struct Upload {
            data_source_uuid: String,
            data_type: String,
            batch_name: String,
        }
        let fields = scalar_fields(
            &Upload {
                data_source_uuid: "ds_1".to_string(),
                data_type: "invoices".to_string(),
                batch_name: "batch-1".to_string(),
            },
            &["data_source_uuid"],
        )
        .unwrap();
        assert!(fields.iter().all(|(k, _)| k != "data_source_uuid"));
        assert!(fields.contains(&("data_type".to_string(), "invoices".to_string())));
        assert!(fields.contains(&("batch_name".to_string(), "batch-1".to_string())));
    }

    #[test]
    fn test_scalar_fields_skips_nested_values() {
        #[derive(Serialize)]
        struct Mixed {
            name: String,
            count: u32,
            flag: bool,
            nested: Vec<String>,
        }
        let fields = scalar_fields(
            &Mixed {
                name: "x".to_string(),
                count: 3,
                flag: true,
                nested: vec!["a".to_string()],
            },
            &[],
        )
        .unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|(k, _)| k != "nested"));
    }

    #[test]
    fn test_decode_json_error_keeps_body() {
        let bytes = Bytes::from_static(b"not json");
        let err = decode_json::<serde_json::Value>(&bytes).unwrap_err();
        match err {
            ChartMogulError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("expected Decode, got {:?}", other),
        }
    }
}
