use serde::Deserialize;
use shared::NurseId;

/// Designated-role map for the nurse pool. The engine treats nurse ids as
/// opaque; every special-cased rule looks the role up here.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterPolicy {
    /// Weekday contract nurse: Mon-Thu off (shown as "NCD"), Friday morning,
    /// weekends and holidays off. Never NS or OC.
    pub day_shift_only: NurseId,
    /// Banded-quota contract nurse. Never NS or OC, excluded from the
    /// rotating fairness pool.
    pub fixed_quota: NurseId,
    /// Excluded from the off-shape rewards (off after night, paired offs).
    pub off_pattern_exempt: NurseId,
    /// Pair penalized for sharing the same M/S/N shift on a day.
    pub separated_pair: (NurseId, NurseId),
    /// Soft-avoid group for on-call standby.
    pub oncall_backup: Vec<NurseId>,
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            day_shift_only: NurseId::from("ER01"),
            fixed_quota: NurseId::from("ER07"),
            off_pattern_exempt: NurseId::from("ER03"),
            separated_pair: (NurseId::from("ER02"), NurseId::from("ER07")),
            oncall_backup: vec![NurseId::from("ER04"), NurseId::from("ER08")],
        }
    }
}

impl RosterPolicy {
    /// Fairness pool: everyone except the two contract nurses.
    pub fn is_rotating(&self, nurse: &NurseId) -> bool {
        *nurse != self.day_shift_only && *nurse != self.fixed_quota
    }

    /// Afternoon/night equity pool: everyone except the weekday nurse.
    pub fn in_sn_pool(&self, nurse: &NurseId) -> bool {
        *nurse != self.day_shift_only
    }

    /// The contract nurses never take the double shift or on-call standby.
    pub fn may_double_or_oncall(&self, nurse: &NurseId) -> bool {
        *nurse != self.day_shift_only && *nurse != self.fixed_quota
    }

    pub fn is_oncall_backup(&self, nurse: &NurseId) -> bool {
        self.oncall_backup.contains(nurse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles() {
        let policy = RosterPolicy::default();
        assert!(!policy.is_rotating(&NurseId::from("ER01")));
        assert!(!policy.is_rotating(&NurseId::from("ER07")));
        assert!(policy.is_rotating(&NurseId::from("ER05")));
        assert!(policy.in_sn_pool(&NurseId::from("ER07")));
        assert!(!policy.in_sn_pool(&NurseId::from("ER01")));
        assert!(policy.is_oncall_backup(&NurseId::from("ER08")));
        assert!(!policy.may_double_or_oncall(&NurseId::from("ER07")));
    }
}
