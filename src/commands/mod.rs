//! CLI commands for reckon

pub mod dispatch;
pub mod import;
pub mod means;
pub mod neighbors;
pub mod predict;
pub mod profile;
