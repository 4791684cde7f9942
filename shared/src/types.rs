use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Nurse identifier, e.g. `"ER01"`. Opaque to the engine; the designated
/// roles are configured separately (see the roster policy).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct NurseId(pub String);

impl NurseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NurseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NurseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Daily status of a nurse. Exactly one per (nurse, day).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum ShiftStatus {
    /// Morning shift.
    #[serde(rename = "M")]
    Morning,
    /// Afternoon shift.
    #[serde(rename = "S")]
    Afternoon,
    /// Night shift.
    #[serde(rename = "N")]
    Night,
    /// Day off.
    #[serde(rename = "O")]
    Off,
    /// Approved leave or training. A workday that never fills staffing.
    #[serde(rename = "L_T")]
    LeaveTraining,
    /// Combined afternoon+night double shift. Fills both S and N staffing.
    #[serde(rename = "NS")]
    DoubleShift,
    /// On-call standby. Not a worked day.
    #[serde(rename = "OC")]
    OnCall,
}

impl ShiftStatus {
    pub const ALL: [ShiftStatus; 7] = [
        ShiftStatus::Morning,
        ShiftStatus::Afternoon,
        ShiftStatus::Night,
        ShiftStatus::Off,
        ShiftStatus::LeaveTraining,
        ShiftStatus::DoubleShift,
        ShiftStatus::OnCall,
    ];

    /// The short wire/display code.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftStatus::Morning => "M",
            ShiftStatus::Afternoon => "S",
            ShiftStatus::Night => "N",
            ShiftStatus::Off => "O",
            ShiftStatus::LeaveTraining => "L_T",
            ShiftStatus::DoubleShift => "NS",
            ShiftStatus::OnCall => "OC",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Counts toward the monthly worked-day total.
    pub fn is_work(&self) -> bool {
        matches!(
            self,
            ShiftStatus::Morning
                | ShiftStatus::Afternoon
                | ShiftStatus::Night
                | ShiftStatus::LeaveTraining
                | ShiftStatus::DoubleShift
        )
    }

    /// Occupies a night slot for staffing purposes.
    pub fn fills_night(&self) -> bool {
        matches!(self, ShiftStatus::Night | ShiftStatus::DoubleShift)
    }

    /// Occupies an afternoon slot for staffing purposes.
    pub fn fills_afternoon(&self) -> bool {
        matches!(self, ShiftStatus::Afternoon | ShiftStatus::DoubleShift)
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Assignable shift for fix requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum CoreShift {
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "S")]
    Afternoon,
    #[serde(rename = "N")]
    Night,
}

impl CoreShift {
    pub fn status(&self) -> ShiftStatus {
        match self {
            CoreShift::Morning => ShiftStatus::Morning,
            CoreShift::Afternoon => ShiftStatus::Afternoon,
            CoreShift::Night => ShiftStatus::Night,
        }
    }
}

/// Shift whose daily minimum can be overridden per day range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum CoverageShift {
    #[serde(rename = "S")]
    Afternoon,
    #[serde(rename = "N")]
    Night,
}

/// Kind of a personal day request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Soft wish for a day off. May yield to staffing demand.
    Off,
    /// Approved leave. Forces `L_T`.
    Leave,
    /// Training or meeting day. Forces `L_T`.
    Train,
}

impl RequestKind {
    /// Leave and Train both pin the day; Off is only rewarded.
    pub fn is_binding(&self) -> bool {
        matches!(self, RequestKind::Leave | RequestKind::Train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in ShiftStatus::ALL {
            assert_eq!(ShiftStatus::parse(status.code()), Some(status));
        }
        assert_eq!(ShiftStatus::parse("X"), None);
    }

    #[test]
    fn double_shift_fills_both_slots() {
        assert!(ShiftStatus::DoubleShift.fills_afternoon());
        assert!(ShiftStatus::DoubleShift.fills_night());
        assert!(ShiftStatus::DoubleShift.is_work());
        assert!(!ShiftStatus::OnCall.is_work());
        assert!(!ShiftStatus::LeaveTraining.fills_night());
    }
}
