use shared::ShiftStatus;

use super::ModelRule;
use crate::domain::engine::model::ModelCtx;

/// Hard shift-to-shift transitions within the month: afternoon never runs
/// into a night, a night never runs into an afternoon, nights never repeat
/// back to back, and the S, M, night three-day cascade is forbidden. The NS
/// double shift forces the next day off and may appear at most once in any
/// 5-day window.
pub struct TransitionRule;

impl ModelRule for TransitionRule {
    fn name(&self) -> &'static str {
        "shift transitions"
    }

    fn apply(&self, ctx: &mut ModelCtx<'_>) {
        let days = ctx.calendar.days();

        for n in 0..ctx.inputs.nurse_count() {
            for day in 1..days {
                let s = ctx.var(n, day, ShiftStatus::Afternoon);
                let [night_next, double_next] = ctx.night_vars(n, day + 1);
                ctx.at_most(&[s, night_next, double_next], 1);

                let [night, double] = ctx.night_vars(n, day);
                let s_next = ctx.var(n, day + 1, ShiftStatus::Afternoon);
                ctx.at_most(&[night, double, s_next], 1);

                ctx.at_most(&[night, double, night_next, double_next], 1);

                // NS exhausts the nurse; the following day must be off.
                let off_next = ctx.var(n, day + 1, ShiftStatus::Off);
                ctx.diff_at_most(double, off_next, 0);
            }

            for day in 1..=days.saturating_sub(2) {
                let s = ctx.var(n, day, ShiftStatus::Afternoon);
                let m_next = ctx.var(n, day + 1, ShiftStatus::Morning);
                let [night, double] = ctx.night_vars(n, day + 2);
                ctx.at_most(&[s, m_next, night, double], 2);
            }

            for start in 1..=days.saturating_sub(4) {
                let window: Vec<_> = (start..start + 5)
                    .map(|d| ctx.var(n, d, ShiftStatus::DoubleShift))
                    .collect();
                ctx.at_most(&window, 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::testkit as tk;
    use crate::domain::policy::RosterPolicy;

    fn solve_with_pins(
        pins: &[(u32, ShiftStatus)],
    ) -> Option<Vec<Vec<ShiftStatus>>> {
        let calendar = tk::february();
        let policy = RosterPolicy::default();
        let inputs = tk::blank_inputs(&["ER05"], &calendar);

        let mut ctx = tk::ctx(&calendar, &policy, &inputs, tk::satisfy_stage());
        TransitionRule.apply(&mut ctx);
        for &(day, status) in pins {
            let var = ctx.var(0, day, status);
            ctx.pin(var, 1);
        }
        ctx.into_assignment()
    }

    #[test]
    fn afternoon_into_night_is_rejected() {
        assert!(solve_with_pins(&[(3, ShiftStatus::Afternoon), (4, ShiftStatus::Night)]).is_none());
        assert!(solve_with_pins(&[(3, ShiftStatus::Afternoon), (4, ShiftStatus::DoubleShift)])
            .is_none());
    }

    #[test]
    fn night_into_afternoon_is_rejected() {
        assert!(solve_with_pins(&[(3, ShiftStatus::Night), (4, ShiftStatus::Afternoon)]).is_none());
    }

    #[test]
    fn consecutive_nights_are_rejected() {
        assert!(solve_with_pins(&[(3, ShiftStatus::Night), (4, ShiftStatus::Night)]).is_none());
        assert!(solve_with_pins(&[(3, ShiftStatus::Night), (5, ShiftStatus::Night)]).is_some());
    }

    #[test]
    fn cascade_is_rejected() {
        assert!(solve_with_pins(&[
            (3, ShiftStatus::Afternoon),
            (4, ShiftStatus::Morning),
            (5, ShiftStatus::Night),
        ])
        .is_none());
    }

    #[test]
    fn double_shift_forces_rest_day() {
        let assignment =
            solve_with_pins(&[(3, ShiftStatus::DoubleShift)]).expect("feasible");
        assert_eq!(assignment[0][3], ShiftStatus::Off);
    }

    #[test]
    fn double_shifts_spaced_apart() {
        assert!(solve_with_pins(&[(3, ShiftStatus::DoubleShift), (7, ShiftStatus::DoubleShift)])
            .is_none());
        assert!(solve_with_pins(&[(3, ShiftStatus::DoubleShift), (8, ShiftStatus::DoubleShift)])
            .is_some());
    }
}
