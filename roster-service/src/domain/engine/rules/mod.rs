pub mod contract_rule;
pub mod continuity_rule;
pub mod fairness_rule;
pub mod oncall_rule;
pub mod preference_rule;
pub mod request_rule;
pub mod staffing_rule;
pub mod streak_rule;
pub mod transition_rule;

use crate::domain::engine::model::ModelCtx;

pub use contract_rule::ContractRule;
pub use continuity_rule::ContinuityRule;
pub use fairness_rule::FairnessRule;
pub use oncall_rule::OnCallRule;
pub use preference_rule::PreferenceRule;
pub use request_rule::RequestRule;
pub use staffing_rule::StaffingRule;
pub use streak_rule::StreakRule;
pub use transition_rule::TransitionRule;

/// One family of constraints. Rules are declarative: each emits its part of
/// the CP model into the shared context, hard constraints and weighted soft
/// terms alike.
pub trait ModelRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: &mut ModelCtx<'_>);
}

/// The full rule set, applied to every solver pass.
pub fn standard_rules() -> Vec<Box<dyn ModelRule>> {
    vec![
        Box::new(StaffingRule),
        Box::new(TransitionRule),
        Box::new(StreakRule),
        Box::new(ContinuityRule),
        Box::new(ContractRule),
        Box::new(RequestRule),
        Box::new(PreferenceRule),
        Box::new(FairnessRule),
        Box::new(OnCallRule),
    ]
}
