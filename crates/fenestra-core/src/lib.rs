//! Fenestra Core
//!
//! This crate contains the shared utilities for the Fenestra
//! window-management toolkit.

pub mod alloc;
pub mod fs;
pub mod geometry;
pub mod logging;
pub mod math;
