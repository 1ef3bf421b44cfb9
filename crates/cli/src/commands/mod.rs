//! CLI subcommand implementations

pub mod chat;
pub mod estimate;
pub mod meetings;
pub mod projects;
