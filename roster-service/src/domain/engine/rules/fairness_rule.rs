use selen::prelude::{int, ModelExt, VarId};
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;
use crate::domain::engine::objective;

/// Equity across the pool. Rotating nurses carry near-identical worked-day
/// totals anchored around the monthly target, balanced off days and balanced
/// special-day offs; everyone but the weekday nurse shares afternoons and
/// nights evenly. The worked-day count here is M, S, N and L_T; NS enters
/// only the afternoon/night equity sums.
pub struct FairnessRule;

impl ModelRule for FairnessRule {
    fn name(&self) -> &'static str {
        "fairness"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let days = ctx.calendar.days();
        let inputs = ctx.inputs;

        let rotating: Vec<usize> = (0..inputs.nurse_count())
            .filter(|&n| ctx.policy.is_rotating(&inputs.nurses[n]))
            .collect();
        let sn_pool: Vec<usize> = (0..inputs.nurse_count())
            .filter(|&n| ctx.policy.in_sn_pool(&inputs.nurses[n]))
            .collect();

        let work_total = |ctx: &mut ModelCtx<'_>, n: usize| -> VarId {
            let vars: Vec<VarId> = (1..=days)
                .flat_map(|d| {
                    [
                        ctx.var(n, d, ShiftStatus::Morning),
                        ctx.var(n, d, ShiftStatus::Afternoon),
                        ctx.var(n, d, ShiftStatus::Night),
                        ctx.var(n, d, ShiftStatus::LeaveTraining),
                    ]
                })
                .collect();
            ctx.sum_vars(&vars)
        };

        let t_work = ctx.calendar.target_work_days() as i32;
        let t_off = ctx.calendar.target_off_days() as i32;

        let work: Vec<VarId> = rotating.iter().map(|&n| work_total(ctx, n)).collect();

        for (i, &wi) in work.iter().enumerate() {
            for &wj in work.iter().skip(i + 1) {
                ctx.diff_at_most(wi, wj, 1);
                ctx.diff_at_most(wj, wi, 1);
            }
        }

        for &w in &work {
            ctx.model.c(w).ge(int(t_work - 2));
            ctx.model.c(w).le(int(t_work + 2));

            if ctx.stage.optimize {
                // Deviation slack: dev >= |work - target|, pushed down by
                // its penalty weight.
                let dev = ctx.model.int(0, days as i32);
                let target = ctx.fixed(t_work);
                let above = ctx.model.sub(w, target);
                let below = ctx.model.sub(target, w);
                let gap_above = ctx.model.sub(dev, above);
                ctx.model.c(gap_above).ge(int(0));
                let gap_below = ctx.model.sub(dev, below);
                ctx.model.c(gap_below).ge(int(0));
                ctx.penalize(dev, objective::WORK_TARGET_DEVIATION);
            }
        }

        for &n in &rotating {
            let offs: Vec<VarId> = (1..=days).map(|d| ctx.var(n, d, ShiftStatus::Off)).collect();
            let total = ctx.sum_vars(&offs);
            ctx.model.c(total).ge(int(t_off - 1));
            ctx.model.c(total).le(int(t_off + 1));
        }

        let special_days: Vec<u32> = (1..=days).filter(|&d| ctx.calendar.is_special(d)).collect();
        let special_off: Vec<VarId> = rotating
            .iter()
            .map(|&n| {
                let vars: Vec<VarId> = special_days
                    .iter()
                    .map(|&d| ctx.var(n, d, ShiftStatus::Off))
                    .collect();
                ctx.sum_vars(&vars)
            })
            .collect();
        for (i, &si) in special_off.iter().enumerate() {
            for &sj in special_off.iter().skip(i + 1) {
                ctx.diff_at_most(si, sj, 1);
                ctx.diff_at_most(sj, si, 1);
            }
        }

        for statuses in [
            [ShiftStatus::Afternoon, ShiftStatus::DoubleShift],
            [ShiftStatus::Night, ShiftStatus::DoubleShift],
        ] {
            let totals: Vec<VarId> = sn_pool
                .iter()
                .map(|&n| {
                    let vars: Vec<VarId> = (1..=days)
                        .flat_map(|d| statuses.map(|s| ctx.var(n, d, s)))
                        .collect();
                    ctx.sum_vars(&vars)
                })
                .collect();
            for (i, &ti) in totals.iter().enumerate() {
                for &tj in totals.iter().skip(i + 1) {
                    ctx.diff_at_most(ti, tj, 1);
                    ctx.diff_at_most(tj, ti, 1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::testkit as tk;
    use crate::domain::policy::RosterPolicy;

    #[test]
    fn workload_disparity_stays_within_one() {
        // February 2025: 8 weekend days, target 20 worked days.
        let calendar = tk::february();
        let policy = RosterPolicy::default();
        let inputs = tk::blank_inputs(&["ER05", "ER06", "ER09"], &calendar);

        let mut ctx = tk::ctx(&calendar, &policy, &inputs, tk::satisfy_stage());
        FairnessRule.apply(&mut ctx);
        let assignment = ctx.into_assignment().expect("feasible");

        let work: Vec<usize> = assignment
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|s| {
                        matches!(
                            s,
                            ShiftStatus::Morning
                                | ShiftStatus::Afternoon
                                | ShiftStatus::Night
                                | ShiftStatus::LeaveTraining
                        )
                    })
                    .count()
            })
            .collect();
        let max = *work.iter().max().unwrap();
        let min = *work.iter().min().unwrap();
        assert!(max - min <= 1, "work counts {:?}", work);

        let target = calendar.target_work_days() as usize;
        for &w in &work {
            assert!(w.abs_diff(target) <= 2, "work {} vs target {}", w, target);
        }

        for row in &assignment {
            let offs = row.iter().filter(|&&s| s == ShiftStatus::Off).count();
            let t_off = calendar.target_off_days() as usize;
            assert!(offs.abs_diff(t_off) <= 1, "offs {} vs target {}", offs, t_off);
        }
    }

    #[test]
    fn contract_nurses_stay_out_of_the_rotating_pool() {
        let calendar = tk::february();
        let policy = RosterPolicy::default();
        // Only ER01 and ER07: no rotating pairs, so no equity constraints
        // should make this infeasible even with wildly uneven loads.
        let inputs = tk::blank_inputs(&["ER01", "ER07"], &calendar);

        let mut ctx = tk::ctx(&calendar, &policy, &inputs, tk::satisfy_stage());
        FairnessRule.apply(&mut ctx);
        for day in 1..=28 {
            let work = ctx.var(0, day, ShiftStatus::Morning);
            ctx.pin(work, 1);
            let off = ctx.var(1, day, ShiftStatus::Off);
            ctx.pin(off, 1);
        }
        assert!(ctx.into_assignment().is_some());
    }
}
