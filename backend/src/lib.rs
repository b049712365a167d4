//! Gym Manager Backend Library
//!
//! This library exposes the backend modules for use in the CLI and in tests.

pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
