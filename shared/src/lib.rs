pub mod error;
pub mod response;
pub mod types;

// Re-export commonly used items
pub use error::{DomainError, DomainResult};
pub use response::ApiResponse;
pub use types::{CoreShift, CoverageShift, NurseId, RequestKind, ShiftStatus};
