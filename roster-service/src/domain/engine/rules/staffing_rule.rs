use selen::prelude::VarId;
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;

/// Daily staffing minima. Morning demand rises on special days; afternoon
/// and night defaults can be raised or lowered by overrides. NS fills both
/// the afternoon and the night slot; L_T and OC fill nothing.
pub struct StaffingRule;

impl ModelRule for StaffingRule {
    fn name(&self) -> &'static str {
        "daily staffing"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        for day in 1..=ctx.calendar.days() {
            let idx = (day - 1) as usize;

            let morning: Vec<VarId> = (0..ctx.inputs.nurse_count())
                .map(|n| ctx.var(n, day, ShiftStatus::Morning))
                .collect();
            ctx.at_least(&morning, ctx.inputs.morning_req[idx] as i32);

            let afternoon: Vec<VarId> = (0..ctx.inputs.nurse_count())
                .flat_map(|n| {
                    [
                        ctx.var(n, day, ShiftStatus::Afternoon),
                        ctx.var(n, day, ShiftStatus::DoubleShift),
                    ]
                })
                .collect();
            ctx.at_least(&afternoon, ctx.inputs.afternoon_req[idx] as i32);

            let night: Vec<VarId> = (0..ctx.inputs.nurse_count())
                .flat_map(|n| ctx.night_vars(n, day))
                .collect();
            ctx.at_least(&night, ctx.inputs.night_req[idx] as i32);
        }
    }
}
