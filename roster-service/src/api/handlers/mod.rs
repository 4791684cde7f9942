pub mod roster_handlers;

pub use roster_handlers::{create_roster, health};
