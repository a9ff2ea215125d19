//! Vector math used throughout the toolkit.
//!
//! Re-exports the [`glam`] crate, which provides SIMD-accelerated vector
//! types. Fenestra only touches the 2D surface of it:
//!
//! - [`Vec2`]: pointer positions, drag deltas, sizes
//!
//! # Examples
//!
//! ```
//! use fenestra_core::math::Vec2;
//!
//! let start = Vec2::new(120.0, 48.0);
//! let pointer = Vec2::new(180.0, 52.0);
//! let delta = pointer - start;
//! assert!(delta.length() > 0.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam
pub use glam::*;
