use selen::prelude::VarId;
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;

/// Cross-month continuity from the previous-month tail: transition bans over
/// the month boundary, forced recovery days after long worked runs, and the
/// rolling cap of 7 worked days in any 8-day window straddling the boundary.
pub struct ContinuityRule;

impl ModelRule for ContinuityRule {
    fn name(&self) -> &'static str {
        "cross-month continuity"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let days = ctx.calendar.days();

        for n in 0..ctx.inputs.nurse_count() {
            let tail = &ctx.inputs.tails[n];
            if tail.is_empty() {
                continue;
            }

            match *tail.last().expect("non-empty tail") {
                ShiftStatus::Night | ShiftStatus::DoubleShift => {
                    let morning = ctx.var(n, 1, ShiftStatus::Morning);
                    ctx.pin(morning, 0);
                }
                ShiftStatus::Afternoon => {
                    let night = ctx.var(n, 1, ShiftStatus::Night);
                    let double = ctx.var(n, 1, ShiftStatus::DoubleShift);
                    ctx.pin(night, 0);
                    ctx.pin(double, 0);
                }
                ShiftStatus::Off => {
                    let night = ctx.var(n, 1, ShiftStatus::Night);
                    let double = ctx.var(n, 1, ShiftStatus::DoubleShift);
                    let oncall = ctx.var(n, 1, ShiftStatus::OnCall);
                    ctx.pin(night, 0);
                    ctx.pin(double, 0);
                    ctx.pin(oncall, 0);
                }
                _ => {}
            }

            let run = tail.iter().rev().take_while(|s| s.is_work()).count();
            match run {
                r if r >= 7 => {
                    let off = ctx.var(n, 1, ShiftStatus::Off);
                    ctx.pin(off, 1);
                }
                6 => {
                    let offs: Vec<VarId> = (1..=2.min(days))
                        .map(|d| ctx.var(n, d, ShiftStatus::Off))
                        .collect();
                    ctx.at_least(&offs, 1);
                }
                5 => {
                    let offs: Vec<VarId> = (1..=3.min(days))
                        .map(|d| ctx.var(n, d, ShiftStatus::Off))
                        .collect();
                    ctx.at_least(&offs, 1);
                }
                _ => {}
            }

            // Rolling boundary windows: days 1..d plus the trailing 8-d tail
            // entries may hold at most 7 worked days in total.
            for d in 1..=7.min(days) {
                let tail_window = (8 - d) as usize;
                let from = tail.len().saturating_sub(tail_window);
                let tail_worked = tail[from..].iter().filter(|s| s.is_work()).count() as i32;
                let limit = 7 - tail_worked;
                if limit >= d as i32 {
                    continue;
                }
                let window: Vec<VarId> = (1..=d).flat_map(|day| ctx.work_vars(n, day)).collect();
                ctx.at_most(&window, limit.max(0));
            }
        }
    }
}
