use chrono::Weekday;
use shared::{NurseId, ShiftStatus};

use crate::domain::calendar::MonthCalendar;
use crate::domain::policy::RosterPolicy;
use crate::domain::roster::Roster;

/// Display label for an approved leave or training day.
pub const LEAVE_LABEL: &str = "L/T";
/// Display label for on-call standby.
pub const ONCALL_LABEL: &str = "OC";
/// Display label for the weekday nurse's contractual Mon-Thu day.
pub const CONTRACT_DAY_LABEL: &str = "NCD";

/// Wraps the solver's indicator grid into a roster, rows in input order.
pub fn from_assignment(
    nurses: &[NurseId],
    calendar: &MonthCalendar,
    assignment: Vec<Vec<ShiftStatus>>,
) -> Roster {
    Roster::new(nurses.to_vec(), calendar.days(), assignment)
}

/// Renders the per-cell display codes: worked shifts show their code, plain
/// off days stay blank, and the weekday nurse's Mon-Thu off shows as NCD.
pub fn display_rows(
    roster: &Roster,
    calendar: &MonthCalendar,
    policy: &RosterPolicy,
) -> Vec<(NurseId, Vec<String>)> {
    roster
        .nurses()
        .iter()
        .enumerate()
        .map(|(n, nurse)| {
            let cells = (1..=roster.days())
                .map(|day| display_cell(roster.status(n, day), nurse, day, calendar, policy))
                .collect();
            (nurse.clone(), cells)
        })
        .collect()
}

fn display_cell(
    status: ShiftStatus,
    nurse: &NurseId,
    day: u32,
    calendar: &MonthCalendar,
    policy: &RosterPolicy,
) -> String {
    match status {
        ShiftStatus::Off => {
            let contract_day = *nurse == policy.day_shift_only
                && matches!(
                    calendar.weekday(day),
                    Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
                );
            if contract_day {
                CONTRACT_DAY_LABEL.to_string()
            } else {
                String::new()
            }
        }
        ShiftStatus::LeaveTraining => LEAVE_LABEL.to_string(),
        ShiftStatus::OnCall => ONCALL_LABEL.to_string(),
        other => other.code().to_string(),
    }
}
