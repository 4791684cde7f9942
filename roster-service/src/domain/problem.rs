use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shared::{CoreShift, CoverageShift, DomainError, DomainResult, NurseId, RequestKind, ShiftStatus};
use utoipa::ToSchema;

use crate::domain::calendar::MonthCalendar;

pub const MAX_TAIL_LEN: usize = 7;

/// Personal day request. Off is a soft wish; Leave and Train pin `L_T`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShiftRequest {
    pub nurse: NurseId,
    pub day: u32,
    pub kind: RequestKind,
    /// 1 strongest .. 10 weakest.
    #[serde(default = "default_priority")]
    pub priority: u8,
    pub month: u32,
    pub year: i32,
}

fn default_priority() -> u8 {
    1
}

/// Wish to work a specific shift on specific days.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FixRequest {
    pub nurse: NurseId,
    pub shift: CoreShift,
    pub days: Vec<u32>,
    pub month: u32,
    pub year: i32,
}

/// Replaces the default afternoon or night minimum on a day range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffingOverride {
    pub start: u32,
    pub end: u32,
    pub shift: CoverageShift,
    pub count: u32,
    pub month: u32,
    pub year: i32,
}

impl StaffingOverride {
    pub fn covers(&self, day: u32) -> bool {
        (self.start..=self.end).contains(&day)
    }

    pub fn span(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Everything one solve call needs. Immutable; the engine keeps no state
/// between calls.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    pub year: i32,
    pub month: u32,
    pub days: u32,
    pub nurses: Vec<NurseId>,
    pub requests: Vec<ShiftRequest>,
    pub fix_requests: Vec<FixRequest>,
    pub overrides: Vec<StaffingOverride>,
    pub enable_oncall: bool,
    /// Holiday days of the month, from the calendar provider.
    pub holidays: Vec<u32>,
    /// Last (up to 7) statuses of the previous month, oldest first.
    pub prev_month: HashMap<NurseId, Vec<ShiftStatus>>,
    /// Overrides the configured solver budget when set.
    pub time_limit_seconds: Option<u64>,
}

impl RosterProblem {
    /// Requests scoped to this problem's month and year. The store hands
    /// over every saved request; filtering is the engine's job.
    pub fn scoped_requests(&self) -> impl Iterator<Item = &ShiftRequest> {
        self.requests
            .iter()
            .filter(|r| r.month == self.month && r.year == self.year)
    }

    pub fn scoped_fixes(&self) -> impl Iterator<Item = &FixRequest> {
        self.fix_requests
            .iter()
            .filter(|r| r.month == self.month && r.year == self.year)
    }

    pub fn scoped_overrides(&self) -> impl Iterator<Item = &StaffingOverride> {
        self.overrides
            .iter()
            .filter(|r| r.month == self.month && r.year == self.year)
    }

    /// Rejects structurally bad input before any model is built.
    pub fn validate(&self, calendar: &MonthCalendar) -> DomainResult<()> {
        if self.nurses.is_empty() {
            return Err(DomainError::InvalidInput(
                "At least one nurse is required".to_string(),
            ));
        }

        let mut seen: HashSet<&NurseId> = HashSet::new();
        for nurse in &self.nurses {
            if !seen.insert(nurse) {
                return Err(DomainError::InvalidInput(format!(
                    "Duplicate nurse id {}",
                    nurse
                )));
            }
        }

        let known: HashSet<&NurseId> = self.nurses.iter().collect();
        let days = calendar.days();

        for req in self.scoped_requests() {
            if !known.contains(&req.nurse) {
                return Err(DomainError::InvalidInput(format!(
                    "Request for unknown nurse {}",
                    req.nurse
                )));
            }
            if req.day < 1 || req.day > days {
                return Err(DomainError::InvalidInput(format!(
                    "Request day {} outside 1..={}",
                    req.day, days
                )));
            }
            if !(1..=10).contains(&req.priority) {
                return Err(DomainError::InvalidInput(format!(
                    "Request priority {} outside 1..=10",
                    req.priority
                )));
            }
        }

        for fix in self.scoped_fixes() {
            if !known.contains(&fix.nurse) {
                return Err(DomainError::InvalidInput(format!(
                    "Fix request for unknown nurse {}",
                    fix.nurse
                )));
            }
            for &day in &fix.days {
                if day < 1 || day > days {
                    return Err(DomainError::InvalidInput(format!(
                        "Fix request day {} outside 1..={}",
                        day, days
                    )));
                }
            }
        }

        for ov in self.scoped_overrides() {
            if ov.start < 1 || ov.end > days || ov.start > ov.end {
                return Err(DomainError::InvalidInput(format!(
                    "Override range {}..={} outside 1..={}",
                    ov.start, ov.end, days
                )));
            }
            if ov.count as usize > self.nurses.len() {
                return Err(DomainError::InvalidInput(format!(
                    "Override demands {} nurses, pool has {}",
                    ov.count,
                    self.nurses.len()
                )));
            }
        }

        for (nurse, tail) in &self.prev_month {
            if !known.contains(nurse) {
                return Err(DomainError::InvalidInput(format!(
                    "Previous-month tail for unknown nurse {}",
                    nurse
                )));
            }
            if tail.len() > MAX_TAIL_LEN {
                return Err(DomainError::InvalidInput(format!(
                    "Previous-month tail for {} has {} entries, max {}",
                    nurse,
                    tail.len(),
                    MAX_TAIL_LEN
                )));
            }
        }

        Ok(())
    }
}
