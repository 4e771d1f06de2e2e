//! Metrics API: aggregated billing analytics.
//!
//! The wire format uses hyphenated keys throughout, preserved here with
//! serde renames.

use crate::client::ChartMogulClient;
use crate::errors::ChartMogulResult;
use serde::{Deserialize, Serialize};

const METRICS_ALL_ENDPOINT: &str = "metrics/all";
const METRICS_MRR_ENDPOINT: &str = "metrics/mrr";
const METRICS_ARR_ENDPOINT: &str = "metrics/arr";
const METRICS_ARPA_ENDPOINT: &str = "metrics/arpa";
const METRICS_ASP_ENDPOINT: &str = "metrics/asp";
const METRICS_CUSTOMER_COUNT_ENDPOINT: &str = "metrics/customer-count";
const METRICS_CUSTOMER_CHURN_RATE_ENDPOINT: &str = "metrics/customer-churn-rate";
const METRICS_MRR_CHURN_RATE_ENDPOINT: &str = "metrics/mrr-churn-rate";
const METRICS_LTV_ENDPOINT: &str = "metrics/ltv";

/// Filtering parameters shared by all metrics endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsFilter {
    /// Start of the reporting window, `YYYY-MM-DD`.
    #[serde(rename = "start-date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End of the reporting window, `YYYY-MM-DD`.
    #[serde(rename = "end-date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Sampling interval: `day`, `week`, `month` or `quarter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Comma-separated country codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    /// Comma-separated plan names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<String>,
}

/// One sampling point with every key metric.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AllMetrics {
    /// Sample date.
    pub date: String,
    /// Customer churn rate.
    #[serde(rename = "customer-churn-rate")]
    pub customer_churn_rate: f64,
    /// MRR churn rate.
    #[serde(rename = "mrr-churn-rate")]
    pub mrr_churn_rate: f64,
    /// Customer lifetime value.
    pub ltv: f64,
    /// Customer count.
    pub customers: u32,
    /// Average sale price.
    pub asp: f64,
    /// Average revenue per account.
    pub arpa: f64,
    /// Annualized run rate.
    pub arr: f64,
    /// Monthly recurring revenue.
    pub mrr: f64,
}

/// Result of retrieving all key metrics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsResult {
    /// One entry per sampling point.
    pub entries: Vec<AllMetrics>,
}

/// Summary attached to single-metric results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Summary {
    /// Value for the current period.
    pub current: f64,
    /// Value for the previous period.
    pub previous: f64,
    /// Change between the two periods.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// One MRR sampling point, with its movement breakdown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MRRMetrics {
    /// Sample date.
    pub date: String,
    /// Monthly recurring revenue.
    pub mrr: f64,
    /// MRR from new business.
    #[serde(rename = "mrr-new-business")]
    pub mrr_new_business: f64,
    /// MRR from expansion.
    #[serde(rename = "mrr-expansion")]
    pub mrr_expansion: f64,
    /// MRR lost to contraction.
    #[serde(rename = "mrr-contraction")]
    pub mrr_contraction: f64,
    /// MRR lost to churn.
    #[serde(rename = "mrr-churn")]
    pub mrr_churn: f64,
    /// MRR from reactivation.
    #[serde(rename = "mrr-reactivation")]
    pub mrr_reactivation: f64,
}

/// Result of retrieving MRR.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MRRResult {
    /// One entry per sampling point.
    pub entries: Vec<MRRMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One ARR sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ARRMetrics {
    /// Sample date.
    pub date: String,
    /// Annualized run rate.
    pub arr: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving ARR.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ARRResult {
    /// One entry per sampling point.
    pub entries: Vec<ARRMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One ARPA sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ARPAMetrics {
    /// Sample date.
    pub date: String,
    /// Average revenue per account.
    pub arpa: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving ARPA.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ARPAResult {
    /// One entry per sampling point.
    pub entries: Vec<ARPAMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One ASP sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ASPMetrics {
    /// Sample date.
    pub date: String,
    /// Average sale price.
    pub asp: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving ASP.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ASPResult {
    /// One entry per sampling point.
    pub entries: Vec<ASPMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One customer-count sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CustomerCountMetrics {
    /// Sample date.
    pub date: String,
    /// Customer count.
    pub customers: u32,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving the customer count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerCountResult {
    /// One entry per sampling point.
    pub entries: Vec<CustomerCountMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One customer-churn-rate sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CustomerChurnRateMetrics {
    /// Sample date.
    pub date: String,
    /// Customer churn rate.
    #[serde(rename = "customer-churn-rate")]
    pub customer_churn_rate: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving the customer churn rate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerChurnRateResult {
    /// One entry per sampling point.
    pub entries: Vec<CustomerChurnRateMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One MRR-churn-rate sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MRRChurnRateMetrics {
    /// Sample date.
    pub date: String,
    /// MRR churn rate.
    #[serde(rename = "mrr-churn-rate")]
    pub mrr_churn_rate: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving the MRR churn rate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MRRChurnRateResult {
    /// One entry per sampling point.
    pub entries: Vec<MRRChurnRateMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// One LTV sampling point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LTVMetrics {
    /// Sample date.
    pub date: String,
    /// Customer lifetime value.
    pub ltv: f64,
    /// Change against the previous sample.
    #[serde(rename = "percentage-change")]
    pub percentage_change: f64,
}

/// Result of retrieving LTV.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LTVResult {
    /// One entry per sampling point.
    pub entries: Vec<LTVMetrics>,
    /// Period summary.
    pub summary: Option<Summary>,
}

/// Service for the metrics endpoints.
pub struct MetricsService<'a> {
    client: &'a ChartMogulClient,
}

impl<'a> MetricsService<'a> {
    /// Creates a new metrics service.
    pub fn new(client: &'a ChartMogulClient) -> Self {
        Self { client }
    }

    /// Retrieves all key metrics for the filtered window.
    pub async fn retrieve_all(&self, filter: &MetricsFilter) -> ChartMogulResult<MetricsResult> {
        self.client.list(METRICS_ALL_ENDPOINT, &[filter]).await
    }

    /// Retrieves monthly recurring revenue.
    pub async fn retrieve_mrr(&self, filter: &MetricsFilter) -> ChartMogulResult<MRRResult> {
        self.client.list(METRICS_MRR_ENDPOINT, &[filter]).await
    }

    /// Retrieves the annualized run rate.
    pub async fn retrieve_arr(&self, filter: &MetricsFilter) -> ChartMogulResult<ARRResult> {
        self.client.list(METRICS_ARR_ENDPOINT, &[filter]).await
    }

    /// Retrieves the average revenue per account.
    pub async fn retrieve_arpa(&self, filter: &MetricsFilter) -> ChartMogulResult<ARPAResult> {
        self.client.list(METRICS_ARPA_ENDPOINT, &[filter]).await
    }

    /// Retrieves the average sale price.
    pub async fn retrieve_asp(&self, filter: &MetricsFilter) -> ChartMogulResult<ASPResult> {
        self.client.list(METRICS_ASP_ENDPOINT, &[filter]).await
    }

    /// Retrieves the customer count.
    pub async fn retrieve_customer_count(
        &self,
        filter: &MetricsFilter,
    ) -> ChartMogulResult<CustomerCountResult> {
        self.client
            .list(METRICS_CUSTOMER_COUNT_ENDPOINT, &[filter])
            .await
    }

    /// Retrieves the customer churn rate.
    pub async fn retrieve_customer_churn_rate(
        &self,
        filter: &MetricsFilter,
    ) -> ChartMogulResult<CustomerChurnRateResult> {
        self.client
            .list(METRICS_CUSTOMER_CHURN_RATE_ENDPOINT, &[filter])
            .await
    }

    /// Retrieves the MRR churn rate.
    pub async fn retrieve_mrr_churn_rate(
        &self,
        filter: &MetricsFilter,
    ) -> ChartMogulResult<MRRChurnRateResult> {
        self.client
            .list(METRICS_MRR_CHURN_RATE_ENDPOINT, &[filter])
            .await
    }

    /// Retrieves the customer lifetime value.
    pub async fn retrieve_ltv(&self, filter: &MetricsFilter) -> ChartMogulResult<LTVResult> {
        self.client.list(METRICS_LTV_ENDPOINT, &[filter]).await
    }
}
