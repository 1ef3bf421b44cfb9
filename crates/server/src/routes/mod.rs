//! Route handlers, grouped by domain

pub mod chat;
pub mod documents;
pub mod estimate;
pub mod meetings;
pub mod projects;
