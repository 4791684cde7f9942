use selen::prelude::VarId;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;
use crate::domain::engine::objective;

/// Bounded working streaks: no 8 consecutive days may contain more than 7
/// worked days, and a fully worked 7-day window is penalized.
pub struct StreakRule;

impl ModelRule for StreakRule {
    fn name(&self) -> &'static str {
        "working streaks"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let days = ctx.calendar.days();

        for n in 0..ctx.inputs.nurse_count() {
            for start in 1..=days.saturating_sub(7) {
                let window: Vec<VarId> = (start..start + 8)
                    .flat_map(|d| ctx.work_vars(n, d))
                    .collect();
                ctx.at_most(&window, 7);
            }

            for start in 1..=days.saturating_sub(6) {
                let day_groups: Vec<[VarId; 5]> =
                    (start..start + 7).map(|d| ctx.work_vars(n, d)).collect();
                let groups: Vec<&[VarId]> =
                    day_groups.iter().map(|g| g.as_slice()).collect();
                ctx.penalize_if_all(&groups, objective::LONG_STREAK);
            }
        }
    }
}
