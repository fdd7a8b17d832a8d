//! JSON envelope returned to the browser.

// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;

/// Either a bullet-formatted answer or a user-safe error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedResponse {
    Success { response: String },
    Failure { error: String },
}

impl FormattedResponse {
    pub fn success(response: impl Into<String>) -> Self {
        FormattedResponse::Success {
            response: response.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        FormattedResponse::Failure {
            error: error.into(),
        }
    }
}
