use shared::{NurseId, ShiftStatus};

/// The solved month: one status per nurse per day, nurses in input order.
#[derive(Debug, Clone)]
pub struct Roster {
    nurses: Vec<NurseId>,
    days: u32,
    /// assignments[nurse_index][day - 1]
    assignments: Vec<Vec<ShiftStatus>>,
}

impl Roster {
    pub fn new(nurses: Vec<NurseId>, days: u32, assignments: Vec<Vec<ShiftStatus>>) -> Self {
        debug_assert_eq!(nurses.len(), assignments.len());
        debug_assert!(assignments.iter().all(|row| row.len() == days as usize));
        Self {
            nurses,
            days,
            assignments,
        }
    }

    pub fn nurses(&self) -> &[NurseId] {
        &self.nurses
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn status(&self, nurse_index: usize, day: u32) -> ShiftStatus {
        self.assignments[nurse_index][(day - 1) as usize]
    }

    pub fn row(&self, nurse_index: usize) -> &[ShiftStatus] {
        &self.assignments[nurse_index]
    }

    /// Worked days in the fairness sense: M, S, N and L_T.
    pub fn work_count(&self, nurse_index: usize) -> usize {
        self.assignments[nurse_index]
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    ShiftStatus::Morning
                        | ShiftStatus::Afternoon
                        | ShiftStatus::Night
                        | ShiftStatus::LeaveTraining
                )
            })
            .count()
    }

    pub fn count_of(&self, nurse_index: usize, status: ShiftStatus) -> usize {
        self.assignments[nurse_index]
            .iter()
            .filter(|&&s| s == status)
            .count()
    }
}
