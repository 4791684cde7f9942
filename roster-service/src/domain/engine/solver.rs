use std::time::Duration;

use selen::prelude::*;
use shared::ShiftStatus;

use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::model::{EngineInputs, ModelCtx, StagePlan};
use crate::domain::engine::rules;
use crate::domain::policy::RosterPolicy;

/// Search stages, each with its slice of the wall-clock budget. NS stays
/// pinned to zero until the NS-free rounds are exhausted, keeping the
/// double shift a genuine last resort even when the optimize pass runs out
/// of time. The fix-pinning stage rescues fix wishes when no objective is
/// in play; it is skipped when there are none.
const STAGES: [(StagePlan, f64); 5] = [
    (
        StagePlan {
            allow_double: false,
            optimize: true,
            pin_fixes: false,
        },
        0.40,
    ),
    (
        StagePlan {
            allow_double: false,
            optimize: false,
            pin_fixes: true,
        },
        0.15,
    ),
    (
        StagePlan {
            allow_double: false,
            optimize: false,
            pin_fixes: false,
        },
        0.10,
    ),
    (
        StagePlan {
            allow_double: true,
            optimize: true,
            pin_fixes: false,
        },
        0.25,
    ),
    (
        StagePlan {
            allow_double: true,
            optimize: false,
            pin_fixes: false,
        },
        0.10,
    ),
];

/// Runs the staged search. Returns the first assignment any stage produces,
/// or None when the whole budget is spent without a feasible roster.
pub fn run(
    inputs: &EngineInputs,
    calendar: &MonthCalendar,
    policy: &RosterPolicy,
    budget: Duration,
) -> Option<Vec<Vec<ShiftStatus>>> {
    let rules = rules::standard_rules();

    for (stage, share) in STAGES {
        if stage.pin_fixes && inputs.fixes.is_empty() {
            continue;
        }

        let timeout_ms = ((budget.as_millis() as f64) * share).max(250.0) as u64;
        let config = SolverConfig::default().with_timeout_ms(timeout_ms);
        let model = Model::with_config(config);

        let mut ctx = ModelCtx::new(model, calendar, policy, inputs, stage);
        for rule in &rules {
            rule.apply(&mut ctx);
        }

        tracing::debug!(
            allow_double = stage.allow_double,
            optimize = stage.optimize,
            pin_fixes = stage.pin_fixes,
            timeout_ms,
            "Running solver stage"
        );

        if let Some(assignment) = ctx.into_assignment() {
            tracing::debug!(
                allow_double = stage.allow_double,
                optimize = stage.optimize,
                "Stage produced a roster"
            );
            return Some(assignment);
        }
    }

    None
}
