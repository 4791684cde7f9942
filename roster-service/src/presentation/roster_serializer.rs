use serde::Serialize;
use shared::NurseId;
use utoipa::ToSchema;

use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::materializer;
use crate::domain::engine::{DayShortfall, Diagnosis};
use crate::domain::policy::RosterPolicy;
use crate::domain::roster::Roster;

/// One roster row: display cells in day order, blank for a plain off day.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterRowSerialize {
    pub nurse: NurseId,
    pub cells: Vec<String>,
}

/// Solved roster response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterSerialize {
    pub year: i32,
    pub month: u32,
    pub days: u32,
    pub rows: Vec<RosterRowSerialize>,
    pub warnings: Vec<String>,
}

impl RosterSerialize {
    pub fn render(
        roster: &Roster,
        calendar: &MonthCalendar,
        policy: &RosterPolicy,
        warnings: Vec<String>,
    ) -> Self {
        let rows = materializer::display_rows(roster, calendar, policy)
            .into_iter()
            .map(|(nurse, cells)| RosterRowSerialize { nurse, cells })
            .collect();
        Self {
            year: calendar.year(),
            month: calendar.month(),
            days: calendar.days(),
            rows,
            warnings,
        }
    }
}

/// One day that cannot be staffed, with the nurses taken out that day.
#[derive(Debug, Serialize, ToSchema)]
pub struct DayShortfallSerialize {
    pub day: u32,
    pub available: usize,
    pub needed: usize,
    pub shortfall: usize,
    pub unavailable: Vec<NurseId>,
}

impl From<&DayShortfall> for DayShortfallSerialize {
    fn from(short: &DayShortfall) -> Self {
        Self {
            day: short.day,
            available: short.available,
            needed: short.needed,
            shortfall: short.shortfall(),
            unavailable: short.unavailable.clone(),
        }
    }
}

/// Infeasibility response: the days that fall short and any pre-check notes.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiagnosisSerialize {
    pub short_days: Vec<DayShortfallSerialize>,
    pub notes: Vec<String>,
}

impl From<&Diagnosis> for DiagnosisSerialize {
    fn from(diagnosis: &Diagnosis) -> Self {
        Self {
            short_days: diagnosis.short_days.iter().map(Into::into).collect(),
            notes: diagnosis.notes.clone(),
        }
    }
}
