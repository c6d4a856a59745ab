//! Trajectory data model
//!
//! Points and the trajectories they form, in the shape they are written out.

pub mod types;

pub use types::{Point, Trajectory};
