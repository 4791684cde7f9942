use selen::prelude::{int, ModelExt};
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;
use crate::domain::engine::objective;

/// Soft ergonomic shaping: discourage tiring shapes (off into night, night
/// with a single-day gap, the wasted S-O-N off day, any NS), encourage
/// restful ones (morning on special days, rest after nights, paired off
/// days), and keep the separated pair apart. All of it trades inside the
/// objective; nothing here is hard.
pub struct PreferenceRule;

impl ModelRule for PreferenceRule {
    fn name(&self) -> &'static str {
        "ergonomic preferences"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        if !ctx.stage.optimize {
            return;
        }
        let days = ctx.calendar.days();
        let inputs = ctx.inputs;

        for n in 0..inputs.nurse_count() {
            let exempt = inputs.nurses[n] == ctx.policy.off_pattern_exempt;

            for day in 1..=days {
                if ctx.stage.allow_double {
                    let double = ctx.var(n, day, ShiftStatus::DoubleShift);
                    ctx.penalize(double, objective::DOUBLE_SHIFT);
                }
                if ctx.calendar.is_special(day) {
                    let morning = ctx.var(n, day, ShiftStatus::Morning);
                    ctx.reward(morning, objective::SPECIAL_DAY_MORNING);
                }

                if day < days {
                    let off = ctx.var(n, day, ShiftStatus::Off);
                    let night_next = ctx.night_vars(n, day + 1);
                    ctx.penalize_if_all(&[&[off], &night_next], objective::OFF_THEN_NIGHT);

                    if !exempt {
                        let night = ctx.night_vars(n, day);
                        let off_next = ctx.var(n, day + 1, ShiftStatus::Off);
                        ctx.reward_if_all(&[&night, &[off_next]], objective::OFF_AFTER_NIGHT);
                        ctx.reward_if_all(&[&[off], &[off_next]], objective::PAIRED_OFF);
                    }
                }

                if day + 2 <= days {
                    let night = ctx.night_vars(n, day);
                    let off_next = ctx.var(n, day + 1, ShiftStatus::Off);
                    let night_after = ctx.night_vars(n, day + 2);
                    ctx.penalize_if_all(
                        &[&night, &[off_next], &night_after],
                        objective::NIGHT_GAP,
                    );

                    let afternoon = ctx.var(n, day, ShiftStatus::Afternoon);
                    ctx.penalize_if_all(
                        &[&[afternoon], &[off_next], &night_after],
                        objective::WASTED_OFF,
                    );
                }
            }
        }

        self.keep_pair_apart(ctx);
    }
}

impl PreferenceRule {
    /// Auxiliary same-shift indicator per day and shift for the separated
    /// pair, tied from both sides: x1 + x2 <= 1 + y and x1 + x2 >= 2y.
    fn keep_pair_apart(&self, ctx: &mut ModelCtx<'_>) {
        let inputs = ctx.inputs;
        let (first, second) = (&ctx.policy.separated_pair.0, &ctx.policy.separated_pair.1);
        let a = inputs.nurses.iter().position(|n| n == first);
        let b = inputs.nurses.iter().position(|n| n == second);
        let (Some(a), Some(b)) = (a, b) else {
            return;
        };

        for day in 1..=ctx.calendar.days() {
            for status in [ShiftStatus::Morning, ShiftStatus::Afternoon, ShiftStatus::Night] {
                let x1 = ctx.var(a, day, status);
                let x2 = ctx.var(b, day, status);
                let together = ctx.model.int(0, 1);
                let pair = ctx.model.sum(&[x1, x2]);
                let relaxed = ctx.model.sub(pair, together);
                ctx.model.c(relaxed).le(int(1));
                let two = ctx.fixed(2);
                let doubled = ctx.model.mul(together, two);
                let lower = ctx.model.sub(doubled, pair);
                ctx.model.c(lower).le(int(0));
                ctx.penalize(together, objective::PAIR_TOGETHER);
            }
        }
    }
}
