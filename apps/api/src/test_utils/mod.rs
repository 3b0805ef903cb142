//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories and token signing helpers
//! - In-memory implementations of the identity store, code store and delivery channel
//! - Builders for use cases and `AppState` wired to those mocks

mod app_state_builder;
mod auth_mocks;
mod factories;

pub use app_state_builder::*;
pub use auth_mocks::*;
pub use factories::*;
