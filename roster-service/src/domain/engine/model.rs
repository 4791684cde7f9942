use std::collections::{BTreeSet, HashMap};

use selen::prelude::*;
use shared::{CoreShift, CoverageShift, NurseId, RequestKind, ShiftStatus};

use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::EngineConfig;
use crate::domain::policy::RosterPolicy;
use crate::domain::problem::RosterProblem;

/// Problem inputs digested for model building: month-scoped requests grouped
/// by nurse, per-day staffing minima with overrides resolved, and tails.
#[derive(Debug, Clone)]
pub struct EngineInputs {
    pub nurses: Vec<NurseId>,
    /// Days pinned to `L_T` per nurse (leave and training requests).
    pub binding_days: Vec<BTreeSet<u32>>,
    /// (nurse index, day, priority) of soft off wishes.
    pub off_requests: Vec<(usize, u32, u8)>,
    /// (nurse index, day, shift) of fix wishes.
    pub fixes: Vec<(usize, u32, CoreShift)>,
    /// Per-day staffing minima, index day - 1.
    pub morning_req: Vec<u32>,
    pub afternoon_req: Vec<u32>,
    pub night_req: Vec<u32>,
    /// Previous-month tail per nurse, oldest first. Empty when absent.
    pub tails: Vec<Vec<ShiftStatus>>,
    pub enable_oncall: bool,
    /// Last day that needs on-call coverage; 0 when on-call is disabled.
    pub oncall_window: u32,
    /// Nurse indices with an Off, Leave or Train request per day, index
    /// day - 1. Used by the pre-check and the infeasibility diagnoser.
    pub unavailable_by_day: Vec<BTreeSet<usize>>,
}

impl EngineInputs {
    pub fn prepare(problem: &RosterProblem, calendar: &MonthCalendar, config: &EngineConfig) -> Self {
        let days = calendar.days();
        let nurse_index: HashMap<&NurseId, usize> = problem
            .nurses
            .iter()
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect();

        let mut binding_days = vec![BTreeSet::new(); problem.nurses.len()];
        let mut off_requests = Vec::new();
        let mut unavailable_by_day = vec![BTreeSet::new(); days as usize];

        for req in problem.scoped_requests() {
            let n = nurse_index[&req.nurse];
            unavailable_by_day[(req.day - 1) as usize].insert(n);
            match req.kind {
                RequestKind::Off => off_requests.push((n, req.day, req.priority)),
                RequestKind::Leave | RequestKind::Train => {
                    binding_days[n].insert(req.day);
                }
            }
        }

        let mut fixes = Vec::new();
        for fix in problem.scoped_fixes() {
            let n = nurse_index[&fix.nurse];
            for &day in &fix.days {
                fixes.push((n, day, fix.shift));
            }
        }

        let overrides: Vec<_> = problem.scoped_overrides().collect();
        let resolve = |day: u32, shift: CoverageShift, default: u32| -> u32 {
            // Narrowest covering range wins; later entries break ties.
            overrides
                .iter()
                .filter(|ov| ov.shift == shift && ov.covers(day))
                .min_by_key(|ov| ov.span())
                .map(|ov| ov.count)
                .unwrap_or(default)
        };

        let staffing = &config.staffing;
        let morning_req = (1..=days)
            .map(|d| {
                if calendar.is_special(d) {
                    staffing.morning_special
                } else {
                    staffing.morning_weekday
                }
            })
            .collect();
        let afternoon_req = (1..=days)
            .map(|d| resolve(d, CoverageShift::Afternoon, staffing.afternoon_default))
            .collect();
        let night_req = (1..=days)
            .map(|d| resolve(d, CoverageShift::Night, staffing.night_default))
            .collect();

        let tails = problem
            .nurses
            .iter()
            .map(|n| problem.prev_month.get(n).cloned().unwrap_or_default())
            .collect();

        let oncall_window = if problem.enable_oncall {
            staffing.oncall_days.min(days)
        } else {
            0
        };

        Self {
            nurses: problem.nurses.clone(),
            binding_days,
            off_requests,
            fixes,
            morning_req,
            afternoon_req,
            night_req,
            tails,
            enable_oncall: problem.enable_oncall,
            oncall_window,
            unavailable_by_day,
        }
    }

    pub fn nurse_count(&self) -> usize {
        self.nurses.len()
    }
}

/// How one solver pass is set up. The harness runs several of these with a
/// slice of the time budget each (see `solver`).
#[derive(Debug, Clone, Copy)]
pub struct StagePlan {
    /// Release the NS double shift, or keep it pinned to zero.
    pub allow_double: bool,
    /// Build soft terms and maximize, or just search for a feasible roster.
    pub optimize: bool,
    /// Turn fix wishes into hard pins (fallback stage without an objective).
    pub pin_fixes: bool,
}

const STATUS_COUNT: usize = ShiftStatus::ALL.len();

/// One CP model under construction: the x[nurse][day][status] indicator
/// grid plus the weighted objective terms the rules accumulate.
pub struct ModelCtx<'a> {
    pub model: Model,
    pub calendar: &'a MonthCalendar,
    pub policy: &'a RosterPolicy,
    pub inputs: &'a EngineInputs,
    pub stage: StagePlan,
    vars: Vec<VarId>,
    objective_terms: Vec<VarId>,
}

impl<'a> ModelCtx<'a> {
    /// Creates the indicator grid. Statuses a nurse can never hold on a day
    /// are created as fixed-zero variables, so every later sum can include
    /// them without special cases.
    pub fn new(
        model: Model,
        calendar: &'a MonthCalendar,
        policy: &'a RosterPolicy,
        inputs: &'a EngineInputs,
        stage: StagePlan,
    ) -> Self {
        let mut ctx = Self {
            model,
            calendar,
            policy,
            inputs,
            stage,
            vars: Vec::with_capacity(inputs.nurse_count() * calendar.days() as usize * STATUS_COUNT),
            objective_terms: Vec::new(),
        };

        for n in 0..inputs.nurse_count() {
            let nurse = &inputs.nurses[n];
            for day in 1..=calendar.days() {
                for status in ShiftStatus::ALL {
                    let possible = match status {
                        ShiftStatus::DoubleShift => {
                            stage.allow_double && policy.may_double_or_oncall(nurse)
                        }
                        ShiftStatus::OnCall => {
                            day <= inputs.oncall_window && policy.may_double_or_oncall(nurse)
                        }
                        ShiftStatus::LeaveTraining => inputs.binding_days[n].contains(&day),
                        _ => true,
                    };
                    let var = if possible {
                        ctx.model.int(0, 1)
                    } else {
                        ctx.model.int(0, 0)
                    };
                    ctx.vars.push(var);
                }
            }
        }

        // Exactly one status per (nurse, day).
        for n in 0..inputs.nurse_count() {
            for day in 1..=calendar.days() {
                let statuses: Vec<VarId> =
                    ShiftStatus::ALL.iter().map(|&s| ctx.var(n, day, s)).collect();
                let total = ctx.model.sum(&statuses);
                ctx.model.c(total).eq(int(1));
            }
        }

        ctx
    }

    fn index(&self, n: usize, day: u32, status: ShiftStatus) -> usize {
        let s = ShiftStatus::ALL
            .iter()
            .position(|&x| x == status)
            .expect("status in ALL");
        (n * self.calendar.days() as usize + (day - 1) as usize) * STATUS_COUNT + s
    }

    pub fn var(&self, n: usize, day: u32, status: ShiftStatus) -> VarId {
        self.vars[self.index(n, day, status)]
    }

    /// Night slot on a day: N or NS.
    pub fn night_vars(&self, n: usize, day: u32) -> [VarId; 2] {
        [
            self.var(n, day, ShiftStatus::Night),
            self.var(n, day, ShiftStatus::DoubleShift),
        ]
    }

    /// Statuses counting as worked days.
    pub fn work_vars(&self, n: usize, day: u32) -> [VarId; 5] {
        [
            self.var(n, day, ShiftStatus::Morning),
            self.var(n, day, ShiftStatus::Afternoon),
            self.var(n, day, ShiftStatus::Night),
            self.var(n, day, ShiftStatus::LeaveTraining),
            self.var(n, day, ShiftStatus::DoubleShift),
        ]
    }

    pub fn fixed(&mut self, value: i32) -> VarId {
        self.model.int(value, value)
    }

    pub fn sum_vars(&mut self, vars: &[VarId]) -> VarId {
        self.model.sum(vars)
    }

    pub fn at_least(&mut self, vars: &[VarId], bound: i32) {
        let total = self.model.sum(vars);
        self.model.c(total).ge(int(bound));
    }

    pub fn at_most(&mut self, vars: &[VarId], bound: i32) {
        let total = self.model.sum(vars);
        self.model.c(total).le(int(bound));
    }

    pub fn pin(&mut self, var: VarId, value: i32) {
        self.model.c(var).eq(int(value));
    }

    /// a - b <= bound, for var-vs-var comparisons.
    pub fn diff_at_most(&mut self, a: VarId, b: VarId, bound: i32) {
        let diff = self.model.sub(a, b);
        self.model.c(diff).le(int(bound));
    }

    /// Adds `weight * var` to the objective. No-op in satisfy-only stages.
    pub fn reward(&mut self, var: VarId, weight: i32) {
        if !self.stage.optimize {
            return;
        }
        let w = self.fixed(weight);
        let term = self.model.mul(var, w);
        self.objective_terms.push(term);
    }

    pub fn penalize(&mut self, var: VarId, weight: i32) {
        self.reward(var, -weight);
    }

    /// Penalizes the conjunction of groups: a fresh indicator is forced to 1
    /// when every group has a set member, then weighted negatively. Each
    /// group's members are mutually exclusive, so the flat sum counts
    /// satisfied groups.
    pub fn penalize_if_all(&mut self, groups: &[&[VarId]], weight: i32) {
        if !self.stage.optimize {
            return;
        }
        let slack = self.model.int(0, 1);
        let flat: Vec<VarId> = groups.iter().flat_map(|g| g.iter().copied()).collect();
        let total = self.model.sum(&flat);
        let relaxed = self.model.sub(total, slack);
        self.model.c(relaxed).le(int(groups.len() as i32 - 1));
        self.penalize(slack, weight);
    }

    /// Rewards the conjunction of groups: the indicator is capped by every
    /// group sum, so it can only be 1 when the pattern holds.
    pub fn reward_if_all(&mut self, groups: &[&[VarId]], weight: i32) {
        if !self.stage.optimize {
            return;
        }
        let gain = self.model.int(0, 1);
        for &group in groups {
            let total = self.model.sum(group);
            let over = self.model.sub(gain, total);
            self.model.c(over).le(int(0));
        }
        self.reward(gain, weight);
    }

    /// Collapses the accumulated terms into the maximization target.
    pub fn build_objective(&mut self) -> Option<VarId> {
        if self.objective_terms.is_empty() {
            return None;
        }
        let terms = std::mem::take(&mut self.objective_terms);
        Some(self.model.sum(&terms))
    }

    /// Consumes the context, runs the search and reads back the grid.
    /// Returns None when this pass found nothing within its budget.
    pub fn into_assignment(mut self) -> Option<Vec<Vec<ShiftStatus>>> {
        let objective = if self.stage.optimize {
            self.build_objective()
        } else {
            None
        };

        let vars = self.vars;
        let days = self.calendar.days();
        let nurse_count = self.inputs.nurse_count();

        let mut model = self.model;
        let result = match objective {
            Some(obj) => model.maximize(obj),
            None => model.solve(),
        };

        let solution = match result {
            Ok(solution) => solution,
            Err(error) => {
                tracing::debug!(?error, "Solver pass returned no solution");
                return None;
            }
        };

        let mut assignment = Vec::with_capacity(nurse_count);
        for n in 0..nurse_count {
            let mut row = Vec::with_capacity(days as usize);
            for day in 1..=days {
                let status = ShiftStatus::ALL.iter().copied().find(|&s| {
                    let idx = (n * days as usize + (day - 1) as usize) * STATUS_COUNT
                        + ShiftStatus::ALL.iter().position(|&x| x == s).unwrap();
                    solution.get::<i32>(vars[idx]) == 1
                });
                // Exactly-one guarantees a set indicator per cell.
                row.push(status.expect("one status set per nurse and day"));
            }
            assignment.push(row);
        }
        Some(assignment)
    }
}
