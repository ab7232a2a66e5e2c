// Transport boundary: request/response shapes and error mapping for hosts
// that expose the assignment endpoint.

pub mod dto;
pub mod handler;

pub use dto::{AssignmentDto, ErrorResponse};
pub use handler::{handle_assignments_request, ApiResponse, AssignmentsRequest};
