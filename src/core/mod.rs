pub mod admin;
pub mod directory;
pub mod log;
pub mod query;
pub mod workflow;
