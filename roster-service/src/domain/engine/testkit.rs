//! Helpers for rule-level tests: tiny pools, zeroed staffing minima and a
//! context builder, so each rule can be solved in isolation.

use std::collections::BTreeSet;

use selen::prelude::*;
use shared::NurseId;

use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::model::{EngineInputs, ModelCtx, StagePlan};
use crate::domain::policy::RosterPolicy;

pub fn february() -> MonthCalendar {
    MonthCalendar::new(2025, 2, 28, &[]).unwrap()
}

pub fn nurse_ids(names: &[&str]) -> Vec<NurseId> {
    names.iter().map(|n| NurseId::from(*n)).collect()
}

/// Inputs with no requests and zero staffing minima, so only the rule under
/// test constrains the model.
pub fn blank_inputs(names: &[&str], calendar: &MonthCalendar) -> EngineInputs {
    let days = calendar.days() as usize;
    EngineInputs {
        nurses: nurse_ids(names),
        binding_days: vec![BTreeSet::new(); names.len()],
        off_requests: Vec::new(),
        fixes: Vec::new(),
        morning_req: vec![0; days],
        afternoon_req: vec![0; days],
        night_req: vec![0; days],
        tails: vec![Vec::new(); names.len()],
        enable_oncall: false,
        oncall_window: 0,
        unavailable_by_day: vec![BTreeSet::new(); days],
    }
}

pub fn satisfy_stage() -> StagePlan {
    StagePlan {
        allow_double: true,
        optimize: false,
        pin_fixes: false,
    }
}

pub fn optimize_stage() -> StagePlan {
    StagePlan {
        allow_double: true,
        optimize: true,
        pin_fixes: false,
    }
}

pub fn ctx<'a>(
    calendar: &'a MonthCalendar,
    policy: &'a RosterPolicy,
    inputs: &'a EngineInputs,
    stage: StagePlan,
) -> ModelCtx<'a> {
    ModelCtx::new(Model::default(), calendar, policy, inputs, stage)
}
