pub mod calendar;
pub mod engine;
pub mod policy;
pub mod problem;
pub mod roster;

pub use calendar::MonthCalendar;
pub use engine::{EngineConfig, RosterEngine, SolveOutcome};
pub use policy::RosterPolicy;
pub use problem::{FixRequest, RosterProblem, ShiftRequest, StaffingOverride};
pub use roster::Roster;
