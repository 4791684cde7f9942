use chrono::Weekday;
use selen::prelude::VarId;
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;

/// Monthly quota band of the fixed-quota nurse: morning-side and
/// afternoon/night-side worked days both stay inside this band.
const QUOTA_BAND: (i32, i32) = (9, 11);
/// Night cap of the fixed-quota nurse.
const QUOTA_NIGHT_MAX: i32 = 4;

/// Contract terms of the two designated nurses. The weekday nurse has a
/// fully determined week: off Mon-Thu, morning on Friday, off on weekends
/// and holidays. The fixed-quota nurse works banded monthly counts instead
/// of the rotating fairness rules. Their NS and OC bans are enforced at
/// variable creation.
pub struct ContractRule;

impl ModelRule for ContractRule {
    fn name(&self) -> &'static str {
        "nurse contracts"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let days = ctx.calendar.days();

        let day_shift_only = ctx
            .inputs
            .nurses
            .iter()
            .position(|n| *n == ctx.policy.day_shift_only);
        if let Some(n) = day_shift_only {
            for day in 1..=days {
                if ctx.calendar.is_special(day) {
                    let off = ctx.var(n, day, ShiftStatus::Off);
                    ctx.pin(off, 1);
                    continue;
                }
                match ctx.calendar.weekday(day) {
                    Weekday::Fri => {
                        let morning = ctx.var(n, day, ShiftStatus::Morning);
                        ctx.pin(morning, 1);
                    }
                    _ => {
                        let off = ctx.var(n, day, ShiftStatus::Off);
                        ctx.pin(off, 1);
                    }
                }
            }
        }

        let fixed_quota = ctx
            .inputs
            .nurses
            .iter()
            .position(|n| *n == ctx.policy.fixed_quota);
        if let Some(n) = fixed_quota {
            let morning_side: Vec<VarId> = (1..=days)
                .flat_map(|d| {
                    [
                        ctx.var(n, d, ShiftStatus::Morning),
                        ctx.var(n, d, ShiftStatus::LeaveTraining),
                    ]
                })
                .collect();
            ctx.at_least(&morning_side, QUOTA_BAND.0);
            ctx.at_most(&morning_side, QUOTA_BAND.1);

            let late_side: Vec<VarId> = (1..=days)
                .flat_map(|d| {
                    [
                        ctx.var(n, d, ShiftStatus::Afternoon),
                        ctx.var(n, d, ShiftStatus::Night),
                    ]
                })
                .collect();
            ctx.at_least(&late_side, QUOTA_BAND.0);
            ctx.at_most(&late_side, QUOTA_BAND.1);

            let nights: Vec<VarId> = (1..=days)
                .map(|d| ctx.var(n, d, ShiftStatus::Night))
                .collect();
            ctx.at_most(&nights, QUOTA_NIGHT_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::rules::TransitionRule;
    use crate::domain::engine::testkit as tk;
    use crate::domain::policy::RosterPolicy;

    #[test]
    fn weekday_nurse_follows_contract() {
        let calendar = tk::february();
        let policy = RosterPolicy::default();
        let inputs = tk::blank_inputs(&["ER01", "ER05"], &calendar);

        let mut ctx = tk::ctx(&calendar, &policy, &inputs, tk::satisfy_stage());
        ContractRule.apply(&mut ctx);
        let assignment = ctx.into_assignment().expect("feasible");

        for day in 1..=28u32 {
            let status = assignment[0][(day - 1) as usize];
            if calendar.is_special(day) {
                assert_eq!(status, ShiftStatus::Off);
            } else if calendar.weekday(day) == Weekday::Fri {
                assert_eq!(status, ShiftStatus::Morning);
            } else {
                assert_eq!(status, ShiftStatus::Off);
            }
        }
    }

    #[test]
    fn quota_nurse_counts_stay_in_band() {
        let calendar = tk::february();
        let policy = RosterPolicy::default();
        let inputs = tk::blank_inputs(&["ER07", "ER05"], &calendar);

        let mut ctx = tk::ctx(&calendar, &policy, &inputs, tk::satisfy_stage());
        ContractRule.apply(&mut ctx);
        TransitionRule.apply(&mut ctx);
        let assignment = ctx.into_assignment().expect("feasible");

        let morning_side = assignment[0]
            .iter()
            .filter(|s| matches!(s, ShiftStatus::Morning | ShiftStatus::LeaveTraining))
            .count();
        let late_side = assignment[0]
            .iter()
            .filter(|s| matches!(s, ShiftStatus::Afternoon | ShiftStatus::Night))
            .count();
        let nights = assignment[0]
            .iter()
            .filter(|&&s| s == ShiftStatus::Night)
            .count();

        assert!((9..=11).contains(&morning_side));
        assert!((9..=11).contains(&late_side));
        assert!(nights <= 4);
    }
}
