use std::collections::HashMap;

use chrono::Weekday;
use roster_service::domain::calendar::MonthCalendar;
use roster_service::domain::engine::{EngineConfig, RosterEngine};
use roster_service::domain::policy::RosterPolicy;
use roster_service::domain::problem::RosterProblem;
use roster_service::domain::roster::Roster;
use roster_service::infrastructure::config::StaffingSettings;
use shared::{CoverageShift, NurseId, ShiftStatus};

/// Generous budget for full-month solves in tests.
pub const TEST_TIME_LIMIT: u64 = 60;

pub fn nurses10() -> Vec<NurseId> {
    (1..=10).map(|i| NurseId::new(format!("ER{:02}", i))).collect()
}

pub fn baseline_problem(year: i32, month: u32, days: u32) -> RosterProblem {
    RosterProblem {
        year,
        month,
        days,
        nurses: nurses10(),
        requests: Vec::new(),
        fix_requests: Vec::new(),
        overrides: Vec::new(),
        enable_oncall: false,
        holidays: Vec::new(),
        prev_month: HashMap::new(),
        time_limit_seconds: Some(TEST_TIME_LIMIT),
    }
}

pub fn engine() -> RosterEngine {
    RosterEngine::new(EngineConfig::default())
}

fn is_night(status: ShiftStatus) -> bool {
    status.fills_night()
}

/// Checks every roster invariant the engine promises, derived from the
/// problem alone. Used by all end-to-end tests so any feasible output is
/// verified in depth.
pub fn assert_roster_invariants(problem: &RosterProblem, roster: &Roster) {
    let calendar =
        MonthCalendar::new(problem.year, problem.month, problem.days, &problem.holidays).unwrap();
    let policy = RosterPolicy::default();
    let staffing = StaffingSettings::default();
    let days = calendar.days();
    let pool = problem.nurses.len();

    assert_eq!(roster.nurses(), problem.nurses.as_slice());
    assert_eq!(roster.days(), days);

    // Daily staffing minima, overrides resolved the same way the engine
    // resolves them (narrowest covering range wins).
    let overrides: Vec<_> = problem.scoped_overrides().collect();
    let resolve = |day: u32, shift: CoverageShift, default: u32| -> u32 {
        overrides
            .iter()
            .filter(|ov| ov.shift == shift && ov.covers(day))
            .min_by_key(|ov| ov.span())
            .map(|ov| ov.count)
            .unwrap_or(default)
    };
    for day in 1..=days {
        let mornings = (0..pool)
            .filter(|&n| roster.status(n, day) == ShiftStatus::Morning)
            .count() as u32;
        let afternoons = (0..pool)
            .filter(|&n| roster.status(n, day).fills_afternoon())
            .count() as u32;
        let nights = (0..pool)
            .filter(|&n| roster.status(n, day).fills_night())
            .count() as u32;

        let m_req = if calendar.is_special(day) {
            staffing.morning_special
        } else {
            staffing.morning_weekday
        };
        assert!(mornings >= m_req, "day {}: {} mornings", day, mornings);
        let s_req = resolve(day, CoverageShift::Afternoon, staffing.afternoon_default);
        assert!(afternoons >= s_req, "day {}: {} afternoons", day, afternoons);
        let n_req = resolve(day, CoverageShift::Night, staffing.night_default);
        assert!(nights >= n_req, "day {}: {} nights", day, nights);
    }

    // Ergonomic transitions, within the month and over the boundary.
    for (n, nurse) in problem.nurses.iter().enumerate() {
        let tail = problem.prev_month.get(nurse).cloned().unwrap_or_default();
        let mut line: Vec<ShiftStatus> = tail.clone();
        let boundary = line.len();
        line.extend((1..=days).map(|d| roster.status(n, d)));

        for w in boundary.saturating_sub(1)..line.len().saturating_sub(1) {
            let (a, b) = (line[w], line[w + 1]);
            if w >= boundary {
                // Both days inside the month: the full transition set.
                assert!(
                    !(a == ShiftStatus::Afternoon && is_night(b)),
                    "{} afternoon into night",
                    nurse
                );
                assert!(
                    !(is_night(a) && b == ShiftStatus::Afternoon),
                    "{} night into afternoon",
                    nurse
                );
                assert!(!(is_night(a) && is_night(b)), "{} repeated nights", nurse);
                assert!(
                    !(a == ShiftStatus::DoubleShift && b != ShiftStatus::Off),
                    "{} no rest after NS",
                    nurse
                );
            } else {
                // Last tail entry against day 1.
                assert!(
                    !(is_night(a) && b == ShiftStatus::Morning),
                    "{} morning right after a night tail",
                    nurse
                );
                assert!(
                    !(a == ShiftStatus::Afternoon && is_night(b)),
                    "{} night right after an afternoon tail",
                    nurse
                );
                assert!(
                    !(a == ShiftStatus::Off
                        && matches!(
                            b,
                            ShiftStatus::Night | ShiftStatus::DoubleShift | ShiftStatus::OnCall
                        )),
                    "{} night or standby after an off tail",
                    nurse
                );
            }
        }

        // Three-day cascade inside the month.
        for d in 1..=days.saturating_sub(2) {
            let cascade = roster.status(n, d) == ShiftStatus::Afternoon
                && roster.status(n, d + 1) == ShiftStatus::Morning
                && is_night(roster.status(n, d + 2));
            assert!(!cascade, "{} cascade at day {}", nurse, d);
        }

        // At most one NS in any 5-day window.
        for start in 1..=days.saturating_sub(4) {
            let doubles = (start..start + 5)
                .filter(|&d| roster.status(n, d) == ShiftStatus::DoubleShift)
                .count();
            assert!(doubles <= 1, "{} NS crowding at day {}", nurse, start);
        }

        // No 8 consecutive entries (tail included) with 8 worked days.
        for start in 0..line.len().saturating_sub(7) {
            let worked = line[start..start + 8].iter().filter(|s| s.is_work()).count();
            assert!(worked <= 7, "{} 8-day window fully worked", nurse);
        }
    }

    // Contract nurses.
    if let Some(n) = problem.nurses.iter().position(|x| *x == policy.day_shift_only) {
        for day in 1..=days {
            let status = roster.status(n, day);
            if calendar.is_special(day) {
                assert_eq!(status, ShiftStatus::Off);
            } else if calendar.weekday(day) == Weekday::Fri {
                assert_eq!(status, ShiftStatus::Morning);
            } else {
                assert_eq!(status, ShiftStatus::Off);
            }
        }
    }
    if let Some(n) = problem.nurses.iter().position(|x| *x == policy.fixed_quota) {
        let morning_side =
            roster.count_of(n, ShiftStatus::Morning) + roster.count_of(n, ShiftStatus::LeaveTraining);
        let late_side =
            roster.count_of(n, ShiftStatus::Afternoon) + roster.count_of(n, ShiftStatus::Night);
        assert!((9..=11).contains(&morning_side), "quota mornings {}", morning_side);
        assert!((9..=11).contains(&late_side), "quota lates {}", late_side);
        assert!(roster.count_of(n, ShiftStatus::Night) <= 4);
    }
    for banned in [&policy.day_shift_only, &policy.fixed_quota] {
        if let Some(n) = problem.nurses.iter().position(|x| x == banned) {
            assert_eq!(roster.count_of(n, ShiftStatus::DoubleShift), 0);
            assert_eq!(roster.count_of(n, ShiftStatus::OnCall), 0);
        }
    }

    // On-call coverage.
    let window = if problem.enable_oncall { 10.min(days) } else { 0 };
    for day in 1..=days {
        let standbys = (0..pool)
            .filter(|&n| roster.status(n, day) == ShiftStatus::OnCall)
            .count();
        if day <= window {
            assert_eq!(standbys, 1, "day {}: {} standbys", day, standbys);
        } else {
            assert_eq!(standbys, 0, "day {}: standby outside window", day);
        }
    }
    for n in 0..pool {
        for day in 1..days {
            let oc = roster.status(n, day) == ShiftStatus::OnCall;
            assert!(
                !(oc && roster.status(n, day + 1) == ShiftStatus::OnCall),
                "adjacent standby"
            );
            assert!(
                !(oc && roster.status(n, day + 1) == ShiftStatus::Morning),
                "morning after standby"
            );
        }
    }

    // Leave appears exactly where requested.
    for (n, nurse) in problem.nurses.iter().enumerate() {
        let requested: Vec<u32> = problem
            .scoped_requests()
            .filter(|r| r.nurse == *nurse && r.kind.is_binding())
            .map(|r| r.day)
            .collect();
        for day in 1..=days {
            let has_leave = roster.status(n, day) == ShiftStatus::LeaveTraining;
            assert_eq!(
                has_leave,
                requested.contains(&day),
                "{} leave mismatch on day {}",
                nurse,
                day
            );
        }
    }

    // Fairness.
    let rotating: Vec<usize> = (0..pool)
        .filter(|&n| policy.is_rotating(&problem.nurses[n]))
        .collect();
    let work: Vec<usize> = rotating.iter().map(|&n| roster.work_count(n)).collect();
    if let (Some(&max), Some(&min)) = (work.iter().max(), work.iter().min()) {
        assert!(max - min <= 1, "work disparity: {:?}", work);
    }
    let target = calendar.target_work_days() as usize;
    for &w in &work {
        assert!(w.abs_diff(target) <= 2, "work {} vs target {}", w, target);
    }
    let t_off = calendar.target_off_days() as usize;
    for &n in &rotating {
        let offs = roster.count_of(n, ShiftStatus::Off);
        assert!(offs.abs_diff(t_off) <= 1, "offs {} vs target {}", offs, t_off);
    }
    let special_offs: Vec<usize> = rotating
        .iter()
        .map(|&n| {
            (1..=days)
                .filter(|&d| calendar.is_special(d) && roster.status(n, d) == ShiftStatus::Off)
                .count()
        })
        .collect();
    if let (Some(&max), Some(&min)) = (special_offs.iter().max(), special_offs.iter().min()) {
        assert!(max - min <= 1, "special-day off disparity: {:?}", special_offs);
    }

    let sn_pool: Vec<usize> = (0..pool)
        .filter(|&n| policy.in_sn_pool(&problem.nurses[n]))
        .collect();
    for counts in [
        sn_pool
            .iter()
            .map(|&n| {
                roster.count_of(n, ShiftStatus::Afternoon)
                    + roster.count_of(n, ShiftStatus::DoubleShift)
            })
            .collect::<Vec<_>>(),
        sn_pool
            .iter()
            .map(|&n| {
                roster.count_of(n, ShiftStatus::Night) + roster.count_of(n, ShiftStatus::DoubleShift)
            })
            .collect::<Vec<_>>(),
    ] {
        if let (Some(&max), Some(&min)) = (counts.iter().max(), counts.iter().min()) {
            assert!(max - min <= 1, "shift equity disparity: {:?}", counts);
        }
    }
}
