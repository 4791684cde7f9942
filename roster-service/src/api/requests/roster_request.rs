use std::collections::HashMap;

use serde::Deserialize;
use shared::{NurseId, ShiftStatus};
use utoipa::ToSchema;

use crate::domain::problem::{FixRequest, RosterProblem, ShiftRequest, StaffingOverride};

/// Solve request for one month. Mirrors the engine's problem type; request
/// lists default to empty so a minimal body is just the calendar and pool.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRosterRequest {
    pub year: i32,
    pub month: u32,
    pub days: u32,
    pub nurses: Vec<NurseId>,
    #[serde(default)]
    pub requests: Vec<ShiftRequest>,
    #[serde(default)]
    pub fix_requests: Vec<FixRequest>,
    #[serde(default)]
    pub overrides: Vec<StaffingOverride>,
    #[serde(default)]
    pub enable_oncall: bool,
    #[serde(default)]
    pub holidays: Vec<u32>,
    /// Last up to 7 statuses of the previous month per nurse, oldest first.
    #[serde(default)]
    pub prev_month: HashMap<String, Vec<ShiftStatus>>,
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
}

impl CreateRosterRequest {
    pub fn into_problem(self) -> RosterProblem {
        RosterProblem {
            year: self.year,
            month: self.month,
            days: self.days,
            nurses: self.nurses,
            requests: self.requests,
            fix_requests: self.fix_requests,
            overrides: self.overrides,
            enable_oncall: self.enable_oncall,
            holidays: self.holidays,
            prev_month: self
                .prev_month
                .into_iter()
                .map(|(nurse, tail)| (NurseId::new(nurse), tail))
                .collect(),
            time_limit_seconds: self.time_limit_seconds,
        }
    }
}
