pub mod roster_request;

pub use roster_request::CreateRosterRequest;
