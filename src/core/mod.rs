pub mod graph;
pub mod hamiltonian;
pub mod service;
pub mod validator;

pub use crate::domain::model::{Assignment, HistoryIndex, Participant, RelationEdge, RelationType};
pub use crate::domain::ports::{AssignmentRepository, AssignmentStrategy, MemberRepository};
pub use crate::utils::error::Result;
