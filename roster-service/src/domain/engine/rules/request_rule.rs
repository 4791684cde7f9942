use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;
use crate::domain::engine::objective;

/// Personal requests. Leave and training days are pinned to `L_T` (and the
/// variable layer keeps `L_T` at zero everywhere else, so the solver cannot
/// invent leave). Off wishes join the objective with their priority weight;
/// fix wishes join with a flat reward, or become pins in the dedicated
/// fallback stage.
pub struct RequestRule;

impl ModelRule for RequestRule {
    fn name(&self) -> &'static str {
        "personal requests"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let inputs = ctx.inputs;

        for n in 0..inputs.nurse_count() {
            for &day in &inputs.binding_days[n] {
                let leave = ctx.var(n, day, ShiftStatus::LeaveTraining);
                ctx.pin(leave, 1);
            }
        }

        for &(n, day, priority) in &inputs.off_requests {
            let off = ctx.var(n, day, ShiftStatus::Off);
            ctx.reward(off, objective::off_request_weight(priority));
        }

        for &(n, day, shift) in &inputs.fixes {
            let var = ctx.var(n, day, shift.status());
            if ctx.stage.pin_fixes {
                ctx.pin(var, 1);
            } else {
                ctx.reward(var, objective::FIX_SHIFT);
            }
        }
    }
}
