use std::collections::{BTreeMap, BTreeSet};

use shared::{NurseId, RequestKind};

use crate::domain::calendar::MonthCalendar;
use crate::domain::problem::RosterProblem;

/// Unavailable-nurse count per day that only warrants a warning.
const UNAVAILABLE_WARN: usize = 4;
/// Unavailable-nurse count per day that makes the day hopeless up front.
const UNAVAILABLE_CONFLICT: usize = 5;
/// Guideline: weekend off wishes per week of the month.
const WEEKEND_OFF_PER_WEEK: usize = 2;
/// Guideline: fix wishes per week of the month.
const FIXES_PER_WEEK: usize = 3;

/// Outcome of the pure input checks that run before any model is built.
/// Warnings ride along with a successful roster; conflicts abort the solve.
#[derive(Debug, Default)]
pub struct PrecheckReport {
    pub warnings: Vec<String>,
    pub conflicts: Vec<String>,
}

impl PrecheckReport {
    pub fn conflict_notes(&self) -> Vec<String> {
        self.conflicts.clone()
    }
}

/// What a request entry pins or wishes for, for contradiction detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    Off,
    Leave,
    Fix(shared::CoreShift),
}

impl Effect {
    /// Leave and Train collapse onto the same forced status.
    fn of_kind(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Off => Effect::Off,
            RequestKind::Leave | RequestKind::Train => Effect::Leave,
        }
    }
}

pub fn run(problem: &RosterProblem, calendar: &MonthCalendar) -> PrecheckReport {
    let mut report = PrecheckReport::default();
    let days = calendar.days();

    let mut per_cell: BTreeMap<(&NurseId, u32), Vec<Effect>> = BTreeMap::new();
    let mut unavailable_by_day: Vec<BTreeSet<&NurseId>> = vec![BTreeSet::new(); days as usize];
    let mut leave_days_per_nurse: BTreeMap<&NurseId, usize> = BTreeMap::new();
    let mut weekend_off_per_week: BTreeMap<u32, usize> = BTreeMap::new();
    let mut fixes_per_week: BTreeMap<u32, usize> = BTreeMap::new();

    for req in problem.scoped_requests() {
        per_cell
            .entry((&req.nurse, req.day))
            .or_default()
            .push(Effect::of_kind(req.kind));
        unavailable_by_day[(req.day - 1) as usize].insert(&req.nurse);

        if req.kind.is_binding() {
            *leave_days_per_nurse.entry(&req.nurse).or_default() += 1;
        }
        if req.kind == RequestKind::Off && calendar.is_special(req.day) {
            *weekend_off_per_week
                .entry(MonthCalendar::week_occurrence(req.day))
                .or_default() += 1;
        }
    }

    for fix in problem.scoped_fixes() {
        for &day in &fix.days {
            per_cell
                .entry((&fix.nurse, day))
                .or_default()
                .push(Effect::Fix(fix.shift));
            *fixes_per_week
                .entry(MonthCalendar::week_occurrence(day))
                .or_default() += 1;
        }
    }

    for ((nurse, day), effects) in &per_cell {
        if effects.len() < 2 {
            continue;
        }
        let contradictory = effects.iter().any(|e| e != &effects[0]);
        if contradictory {
            report.conflicts.push(format!(
                "Contradictory requests for {} on day {}",
                nurse, day
            ));
        } else {
            report.warnings.push(format!(
                "Duplicate request for {} on day {}",
                nurse, day
            ));
        }
    }

    for (idx, nurses) in unavailable_by_day.iter().enumerate() {
        let day = idx as u32 + 1;
        if nurses.len() >= UNAVAILABLE_CONFLICT {
            report.conflicts.push(format!(
                "Day {}: {} nurses unavailable ({})",
                day,
                nurses.len(),
                join(nurses)
            ));
        } else if nurses.len() >= UNAVAILABLE_WARN {
            report.warnings.push(format!(
                "Day {}: {} nurses unavailable ({})",
                day,
                nurses.len(),
                join(nurses)
            ));
        }
    }

    for (week, count) in &weekend_off_per_week {
        if *count > WEEKEND_OFF_PER_WEEK {
            report.warnings.push(format!(
                "Week {}: {} weekend off wishes, guideline is {}",
                week, count, WEEKEND_OFF_PER_WEEK
            ));
        }
    }

    for (week, count) in &fixes_per_week {
        if *count > FIXES_PER_WEEK {
            report.warnings.push(format!(
                "Week {}: {} fix wishes, guideline is {}",
                week, count, FIXES_PER_WEEK
            ));
        }
    }

    let leave_cap = (days / 3) as usize;
    for (nurse, count) in &leave_days_per_nurse {
        if *count > leave_cap {
            report.warnings.push(format!(
                "{} has {} leave days, guideline is {}",
                nurse, count, leave_cap
            ));
        }
    }

    report
}

fn join(nurses: &BTreeSet<&NurseId>) -> String {
    nurses
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
