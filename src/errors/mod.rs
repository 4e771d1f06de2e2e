//! Error types for the ChartMogul client.

use crate::resilience::AttemptOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Result type alias for ChartMogul operations.
pub type ChartMogulResult<T> = Result<T, ChartMogulError>;

/// Key in a [`FieldErrors`] map indicating a problem with the external ID of
/// the resource.
pub const ERR_KEY_EXTERNAL_ID: &str = "external_id";
/// Key in a [`FieldErrors`] map indicating a problem with the external ID of
/// a transaction.
pub const ERR_KEY_TRANSACTION_EXTERNAL_ID: &str = "transactions.external_id";
/// Key in a [`FieldErrors`] map for the data source name.
pub const ERR_KEY_NAME: &str = "name";

/// Message returned when a customer with the same external ID already exists.
pub const ERR_VAL_CUSTOMER_EXTERNAL_ID_EXISTS: &str =
    "The external ID for this customer already exists in our system.";
/// Message returned when a transaction external ID is already taken.
pub const ERR_VAL_EXTERNAL_ID_EXISTS: &str = "has already been taken";
/// Message returned when an invoice with the same external ID already exists.
pub const ERR_VAL_INVOICE_EXTERNAL_ID_EXISTS: &str =
    "The external ID for this invoice already exists in our system.";
/// Message returned when a plan with the same identifier already exists.
pub const ERR_VAL_PLAN_EXTERNAL_ID_EXISTS: &str =
    "A plan with this identifier already exists in our system.";
/// Message returned when a data source name is already taken.
pub const ERR_VAL_HAS_ALREADY_BEEN_TAKEN: &str = "Has already been taken.";

/// A single transport-level failure from one request attempt.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection could not be established (refusal, DNS failure, TLS setup).
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request or the response body read timed out.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The response body could not be read after a status was received.
    #[error("failed to read response body: {0}")]
    Body(String),
    /// Local I/O failure, e.g. reading a file for upload.
    #[error("i/o error: {0}")]
    Io(String),
    /// Any other transport failure, including request encoding problems.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns true if this failure is a network-class error (connection
    /// refusal, DNS failure, I/O timeout) and therefore retryable.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout(_))
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() {
            Self::Body(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Error type for ChartMogul client operations.
///
/// Every operation terminates in exactly one of two states: a decoded output
/// with no error, or no output and one of these variants.
#[derive(Debug, Error)]
pub enum ChartMogulError {
    /// A response was received with a status outside the 2xx range.
    ///
    /// The body is preserved verbatim so callers can inspect embedded
    /// field-error maps; the client itself never interprets them.
    #[error("HTTP {status_code} {status_text}: {raw_body}")]
    Http {
        /// HTTP status code.
        status_code: u16,
        /// Canonical status text, e.g. `Not Found`.
        status_text: String,
        /// Raw response body, byte-for-byte as received.
        raw_body: String,
    },

    /// No usable response: network failure or request encoding failure.
    #[error("request error: {}", format_transport_errors(.errors))]
    Request {
        /// Transport failures from the final attempt.
        errors: Vec<TransportError>,
    },

    /// A 2xx response whose body could not be decoded as the expected JSON
    /// shape. Surfaced immediately, never retried.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Decoder message.
        message: String,
        /// The undecodable body.
        body: String,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

fn format_transport_errors(errors: &[TransportError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ChartMogulError {
    /// Gets the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Gets the raw response body of an [`ChartMogulError::Http`] error.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Http { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }

    /// Wraps the final outcome of a request into an error, or `None` on
    /// success.
    ///
    /// Runs once, after the retry budget is settled, never between attempts.
    /// A received non-2xx status wins over coexisting transport errors.
    pub(crate) fn from_outcome(outcome: &AttemptOutcome) -> Option<Self> {
        if let Some(status) = outcome.status {
            if !(200..300).contains(&status) {
                return Some(Self::Http {
                    status_code: status,
                    status_text: outcome.status_text.clone().unwrap_or_default(),
                    raw_body: outcome
                        .body
                        .as_ref()
                        .map(|b| String::from_utf8_lossy(b).into_owned())
                        .unwrap_or_default(),
                });
            }
        }
        if !outcome.transport_errors.is_empty() {
            return Some(Self::Request {
                errors: outcome.transport_errors.clone(),
            });
        }
        None
    }

    pub(crate) fn request_encoding(message: impl Into<String>) -> Self {
        Self::Request {
            errors: vec![TransportError::Other(message.into())],
        }
    }
}

/// Validation feedback embedded in many response bodies: a map from a dotted
/// field path (e.g. `external_id`, `transactions.external_id`) to a
/// human-readable message.
///
/// The client passes these through untouched; the helpers here are for
/// callers pattern-matching on the server's duplicate-detection messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub HashMap<String, String>);

impl FieldErrors {
    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the message for a field path.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if there is exactly one error and it means the uploaded
    /// resource with the same external ID (or data source name) already
    /// exists.
    pub fn is_already_exists(&self) -> bool {
        if self.0.len() != 1 {
            return false;
        }
        if let Some(msg) = self
            .get(ERR_KEY_EXTERNAL_ID)
            .or_else(|| self.get(ERR_KEY_TRANSACTION_EXTERNAL_ID))
        {
            return msg == ERR_VAL_EXTERNAL_ID_EXISTS
                || msg == ERR_VAL_CUSTOMER_EXTERNAL_ID_EXISTS
                || msg == ERR_VAL_PLAN_EXTERNAL_ID_EXISTS
                || msg == ERR_VAL_INVOICE_EXTERNAL_ID_EXISTS;
        }
        self.get(ERR_KEY_NAME) == Some(ERR_VAL_HAS_ALREADY_BEEN_TAKEN)
    }

    /// Returns true if both the invoice and its transaction already exist.
    pub fn is_invoice_and_transaction_already_exist(&self) -> bool {
        if self.0.len() != 2 {
            return false;
        }
        self.get(ERR_KEY_EXTERNAL_ID) == Some(ERR_VAL_INVOICE_EXTERNAL_ID_EXISTS)
            && self.get(ERR_KEY_TRANSACTION_EXTERNAL_ID) == Some(ERR_VAL_EXTERNAL_ID_EXISTS)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort();
        let mut first = true;
        for (key, msg) in entries {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", key, msg)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn outcome(
        status: Option<u16>,
        body: Option<&str>,
        transport_errors: Vec<TransportError>,
    ) -> AttemptOutcome {
        AttemptOutcome {
            status,
            status_text: status.map(|_| "Status".to_string()),
            body: body.map(|b| Bytes::copy_from_slice(b.as_bytes())),
            transport_errors,
        }
    }

    #[test]
    fn test_wrap_success() {
        assert!(ChartMogulError::from_outcome(&outcome(Some(200), Some("{}"), vec![])).is_none());
        assert!(ChartMogulError::from_outcome(&outcome(Some(204), None, vec![])).is_none());
    }

    #[test]
    fn test_wrap_http_error_preserves_body() {
        let raw = r#"{"external_id":["is invalid"]}"#;
        let err = ChartMogulError::from_outcome(&outcome(Some(404), Some(raw), vec![]))
            .expect("non-2xx must wrap");
        match err {
            ChartMogulError::Http {
                status_code,
                raw_body,
                ..
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(raw_body, raw);
            }
            other => panic!("expected Http, got {:?}", other),
        }
    }

    #[test]
    fn test_wrap_request_errors_without_response() {
        let err = ChartMogulError::from_outcome(&outcome(
            None,
            None,
            vec![TransportError::Connect("refused".into())],
        ))
        .expect("transport failure must wrap");
        assert!(matches!(err, ChartMogulError::Request { ref errors } if errors.len() == 1));
        assert!(err.status_code().is_none());
    }

    #[test]
    fn test_wrap_prefers_status_on_partial_failure() {
        // Status received but the body read failed: the HTTP error wins.
        let err = ChartMogulError::from_outcome(&outcome(
            Some(500),
            None,
            vec![TransportError::Body("reset".into())],
        ))
        .expect("must wrap");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_network_classification() {
        assert!(TransportError::Connect("x".into()).is_network());
        assert!(TransportError::Timeout("x".into()).is_network());
        assert!(!TransportError::Body("x".into()).is_network());
        assert!(!TransportError::Other("x".into()).is_network());
    }

    #[test]
    fn test_field_errors_already_exists() {
        let mut map = HashMap::new();
        map.insert(
            ERR_KEY_EXTERNAL_ID.to_string(),
            ERR_VAL_CUSTOMER_EXTERNAL_ID_EXISTS.to_string(),
        );
        assert!(FieldErrors(map).is_already_exists());

        let mut map = HashMap::new();
        map.insert(
            ERR_KEY_NAME.to_string(),
            ERR_VAL_HAS_ALREADY_BEEN_TAKEN.to_string(),
        );
        assert!(FieldErrors(map).is_already_exists());

        let mut map = HashMap::new();
        map.insert(ERR_KEY_EXTERNAL_ID.to_string(), "is invalid".to_string());
        assert!(!FieldErrors(map).is_already_exists());
    }

    #[test]
    fn test_field_errors_invoice_and_transaction() {
        let mut map = HashMap::new();
        map.insert(
            ERR_KEY_EXTERNAL_ID.to_string(),
            ERR_VAL_INVOICE_EXTERNAL_ID_EXISTS.to_string(),
        );
        map.insert(
            ERR_KEY_TRANSACTION_EXTERNAL_ID.to_string(),
            ERR_VAL_EXTERNAL_ID_EXISTS.to_string(),
        );
        assert!(FieldErrors(map).is_invoice_and_transaction_already_exist());
    }

    #[test]
    fn test_field_errors_deserialize() {
        let errors: FieldErrors =
            serde_json::from_str(r#"{"name":"Has already been taken."}"#).unwrap();
        assert!(errors.is_already_exists());
    }
}
