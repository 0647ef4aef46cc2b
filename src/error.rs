use std::collections::BTreeMap;

use thiserror::Error;

/// Failure of a single backend call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received at all.
    #[error("network request failed: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The server answered 2xx but the body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Client-side form validation failure. Never reaches the network.
#[derive(Error, Debug, Clone, Default, PartialEq)]
#[error("{} invalid field(s)", .fields.len())]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Drops the error for a field once the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
