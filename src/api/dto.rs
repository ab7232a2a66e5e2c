use crate::domain::model::Assignment;
use crate::utils::error::SantaError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

const GENERIC_FAILURE_MESSAGE: &str = "Unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDto {
    pub id: Option<i64>,
    pub assignment_year: i32,
    pub santa_id: i64,
    pub santa_name: Option<String>,
    pub recipient_id: i64,
    pub recipient_name: Option<String>,
}

impl From<&Assignment> for AssignmentDto {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id,
            assignment_year: assignment.assignment_year,
            santa_id: assignment.santa_id,
            santa_name: assignment.santa_name.clone(),
            recipient_id: assignment.recipient_id,
            recipient_name: assignment.recipient_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    /// Maps an error to its status and body. Client errors keep their
    /// message; anything else is reported generically.
    pub fn from_error(error: &SantaError) -> (u16, Self) {
        if error.is_client_error() {
            (
                STATUS_BAD_REQUEST,
                Self::new(error.error_code(), error.to_string()),
            )
        } else {
            (
                STATUS_INTERNAL_SERVER_ERROR,
                Self::new(error.error_code(), GENERIC_FAILURE_MESSAGE),
            )
        }
    }
}
