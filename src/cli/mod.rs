//! Command implementations and terminal rendering

pub mod add;
pub mod entries;
pub mod goal;
pub mod setup;
pub mod stats;
pub mod status;
pub mod ui;
