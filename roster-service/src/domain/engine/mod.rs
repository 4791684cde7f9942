pub mod diagnosis;
pub mod materializer;
pub mod model;
pub mod objective;
pub mod precheck;
pub mod rules;
pub mod solver;

#[cfg(test)]
pub(crate) mod testkit;

use std::time::Duration;

use shared::DomainResult;

use crate::domain::calendar::MonthCalendar;
use crate::domain::policy::RosterPolicy;
use crate::domain::problem::RosterProblem;
use crate::domain::roster::Roster;
use crate::infrastructure::config::StaffingSettings;

pub use diagnosis::{DayShortfall, Diagnosis};
pub use precheck::PrecheckReport;

/// Engine tuning: staffing defaults, the designated-role map and the solver
/// budget. The service builds this from `Settings`; tests use `Default`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub staffing: StaffingSettings,
    pub policy: RosterPolicy,
    pub time_limit: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            staffing: StaffingSettings::default(),
            policy: RosterPolicy::default(),
            time_limit: Duration::from_secs(20),
        }
    }
}

/// Result of a solve call. Infeasibility is a value, not an error: the
/// engine diagnoses, it does not guess a partial roster.
#[derive(Debug)]
pub enum SolveOutcome {
    Roster {
        roster: Roster,
        warnings: Vec<String>,
    },
    Infeasible {
        diagnosis: Diagnosis,
    },
}

pub struct RosterEngine {
    config: EngineConfig,
}

impl RosterEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds the constraint model from the problem and hands it to the
    /// solver. Blocks up to the configured time budget.
    #[tracing::instrument(skip_all, fields(year = problem.year, month = problem.month, nurses = problem.nurses.len()))]
    pub fn solve(&self, problem: &RosterProblem) -> DomainResult<SolveOutcome> {
        let calendar = MonthCalendar::new(problem.year, problem.month, problem.days, &problem.holidays)?;
        problem.validate(&calendar)?;

        let inputs = model::EngineInputs::prepare(problem, &calendar, &self.config);

        let report = precheck::run(problem, &calendar);
        for warning in &report.warnings {
            tracing::warn!(warning = %warning, "Pre-check warning");
        }
        if !report.conflicts.is_empty() {
            tracing::warn!(
                conflicts = report.conflicts.len(),
                "Pre-check found hard conflicts, skipping solve"
            );
            let diagnosis =
                diagnosis::diagnose(&inputs, &calendar, &self.config.policy, report.conflict_notes());
            return Ok(SolveOutcome::Infeasible { diagnosis });
        }

        let budget = problem
            .time_limit_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.config.time_limit);

        match solver::run(&inputs, &calendar, &self.config.policy, budget) {
            Some(assignment) => {
                let roster = materializer::from_assignment(&inputs.nurses, &calendar, assignment);
                tracing::info!("Roster solved");
                Ok(SolveOutcome::Roster {
                    roster,
                    warnings: report.warnings,
                })
            }
            None => {
                tracing::warn!("No feasible roster within budget");
                let mut diagnosis =
                    diagnosis::diagnose(&inputs, &calendar, &self.config.policy, Vec::new());
                if diagnosis.short_days.is_empty() && diagnosis.notes.is_empty() {
                    diagnosis.notes.push(
                        "No single-day shortage found; constraints conflict across days \
                         or the time budget ran out"
                            .to_string(),
                    );
                }
                Ok(SolveOutcome::Infeasible { diagnosis })
            }
        }
    }
}
