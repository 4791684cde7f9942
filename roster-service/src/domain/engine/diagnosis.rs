use chrono::Weekday;
use shared::NurseId;

use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::model::EngineInputs;
use crate::domain::policy::RosterPolicy;

/// One day that cannot be staffed: fewer usable nurses than the day's
/// combined demand.
#[derive(Debug, Clone)]
pub struct DayShortfall {
    pub day: u32,
    pub available: usize,
    pub needed: usize,
    pub unavailable: Vec<NurseId>,
}

impl DayShortfall {
    pub fn shortfall(&self) -> usize {
        self.needed.saturating_sub(self.available)
    }
}

/// Why no roster came out. Advisory only: the engine explains, it never
/// repairs.
#[derive(Debug, Clone, Default)]
pub struct Diagnosis {
    pub short_days: Vec<DayShortfall>,
    pub notes: Vec<String>,
}

/// Counts, per day, the nurses taken out by requests or by contract against
/// the day's total staffing demand, and reports every day that falls short.
pub fn diagnose(
    inputs: &EngineInputs,
    calendar: &MonthCalendar,
    policy: &RosterPolicy,
    notes: Vec<String>,
) -> Diagnosis {
    let pool = inputs.nurse_count();
    let weekday_nurse = inputs
        .nurses
        .iter()
        .position(|n| *n == policy.day_shift_only);

    let mut short_days = Vec::new();
    for day in 1..=calendar.days() {
        let idx = (day - 1) as usize;
        let away = &inputs.unavailable_by_day[idx];
        let mut available = pool - away.len();

        // The weekday nurse only ever covers a plain Friday morning.
        if let Some(n) = weekday_nurse {
            if !away.contains(&n) {
                let usable = calendar.weekday(day) == Weekday::Fri && !calendar.is_special(day);
                if !usable {
                    available -= 1;
                }
            }
        }

        let needed = (inputs.morning_req[idx] + inputs.afternoon_req[idx] + inputs.night_req[idx])
            as usize
            + usize::from(day <= inputs.oncall_window);

        if available < needed {
            short_days.push(DayShortfall {
                day,
                available,
                needed,
                unavailable: away.iter().map(|&n| inputs.nurses[n].clone()).collect(),
            });
        }
    }

    Diagnosis { short_days, notes }
}
