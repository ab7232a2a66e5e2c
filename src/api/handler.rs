use crate::api::dto::{AssignmentDto, ErrorResponse, STATUS_OK};
use crate::core::service::{run_with_deadline, SecretSantaService};
use crate::core::{Assignment, AssignmentRepository, MemberRepository};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const ASSIGNMENTS_ROUTE: &str = "/api/v1/secret-santa/assignments/{year}";
pub const API_VERSION_HEADER: &str = "API-Version";
pub const DEFAULT_API_VERSION: &str = "1";

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentsRequest {
    pub year: i32,
    /// Logged only; no behavior depends on it yet.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Compute without persisting.
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl AssignmentsRequest {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            api_version: default_api_version(),
            preview: false,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

pub async fn execute_request<M, A>(
    service: &SecretSantaService<M, A>,
    request: &AssignmentsRequest,
) -> Result<Vec<Assignment>>
where
    M: MemberRepository,
    A: AssignmentRepository,
{
    tracing::info!(
        "Retrieving Secret Santa assignments for year: {}, API Version: {}",
        request.year,
        request.api_version
    );

    let assignments = if request.preview {
        run_with_deadline(request.timeout_seconds, service.preview_assignments(request.year)).await?
    } else {
        run_with_deadline(request.timeout_seconds, service.create_assignments(request.year)).await?
    };

    tracing::info!("Completed retrieving assignments for year: {}", request.year);
    Ok(assignments)
}

/// Runs one request and renders it the way the HTTP endpoint answers:
/// a JSON list of assignments, or an error body with 400/500.
pub async fn handle_assignments_request<M, A>(
    service: &SecretSantaService<M, A>,
    request: AssignmentsRequest,
) -> ApiResponse
where
    M: MemberRepository,
    A: AssignmentRepository,
{
    match execute_request(service, &request).await {
        Ok(assignments) => {
            let dtos: Vec<AssignmentDto> = assignments.iter().map(AssignmentDto::from).collect();
            match serde_json::to_value(&dtos) {
                Ok(body) => ApiResponse {
                    status: STATUS_OK,
                    body,
                },
                Err(e) => error_response(&e.into()),
            }
        }
        Err(e) => {
            tracing::error!("Error creating assignments: {}", e);
            error_response(&e)
        }
    }
}

fn error_response(error: &crate::utils::error::SantaError) -> ApiResponse {
    let (status, body) = ErrorResponse::from_error(error);
    ApiResponse {
        status,
        body: serde_json::to_value(&body).unwrap_or_else(|_| {
            serde_json::json!({ "code": body.code, "message": body.message })
        }),
    }
}
