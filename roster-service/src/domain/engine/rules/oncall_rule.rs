use selen::prelude::VarId;
use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;
use crate::domain::engine::objective;

/// On-call standby for the first stretch of the month. Exactly one nurse
/// covers each day inside the window; nobody stands by on adjacent days,
/// after a standby no morning follows, and any 4-day window holds at most
/// one standby per nurse. The backup group is penalized per standby. When
/// on-call is disabled the variable layer pins every OC indicator to zero
/// and this rule has nothing to do.
pub struct OnCallRule;

impl ModelRule for OnCallRule {
    fn name(&self) -> &'static str {
        "on-call standby"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let window = ctx.inputs.oncall_window;
        if window == 0 {
            return;
        }
        let inputs = ctx.inputs;
        let days = ctx.calendar.days();

        for day in 1..=window {
            let cover: Vec<VarId> = (0..inputs.nurse_count())
                .map(|n| ctx.var(n, day, ShiftStatus::OnCall))
                .collect();
            let total = ctx.sum_vars(&cover);
            ctx.pin(total, 1);
        }

        for n in 0..inputs.nurse_count() {
            for day in 1..window {
                let oc = ctx.var(n, day, ShiftStatus::OnCall);
                let oc_next = ctx.var(n, day + 1, ShiftStatus::OnCall);
                ctx.at_most(&[oc, oc_next], 1);
            }

            for day in 1..=window.min(days.saturating_sub(1)) {
                let oc = ctx.var(n, day, ShiftStatus::OnCall);
                let morning_next = ctx.var(n, day + 1, ShiftStatus::Morning);
                ctx.at_most(&[oc, morning_next], 1);
            }

            for start in 1..=window.saturating_sub(3) {
                let stretch: Vec<VarId> = (start..start + 4)
                    .map(|d| ctx.var(n, d, ShiftStatus::OnCall))
                    .collect();
                ctx.at_most(&stretch, 1);
            }

            if ctx.policy.is_oncall_backup(&inputs.nurses[n]) {
                for day in 1..=window {
                    let oc = ctx.var(n, day, ShiftStatus::OnCall);
                    ctx.penalize(oc, objective::BACKUP_ONCALL);
                }
            }
        }
    }
}
