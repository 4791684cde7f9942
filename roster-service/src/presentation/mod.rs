pub mod roster_serializer;

pub use roster_serializer::{
    DayShortfallSerialize, DiagnosisSerialize, RosterRowSerialize, RosterSerialize,
};
