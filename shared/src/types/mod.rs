//! Core data types

pub mod events;
pub mod menu;
pub mod state;
