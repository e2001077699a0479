pub mod profile;
pub mod role;
pub mod status;
pub mod timesheet;
