//! Fielddrift library
//!
//! A charged particle drifting through a time-varying synthetic electric
//! field. The kernel lives in [`physics`]; [`plugins`] drive it from a Bevy
//! app at a fixed tick rate.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;
