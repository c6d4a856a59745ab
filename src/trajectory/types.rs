//! Core Trajectory Types
//!
//! A [`Trajectory`] is the decoded form of one source log file: an identifier
//! derived from the file name and the ordered points of its data rows.

use serde::{Deserialize, Serialize};

/// A single fix in a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude (decimal degrees)
    pub lat: f64,
    /// Longitude (decimal degrees)
    pub lng: f64,
    /// Altitude, in the unit used by the source file
    pub alt: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64, alt: f64) -> Self {
        Self { lat, lng, alt }
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((lat, lng, alt): (f64, f64, f64)) -> Self {
        Self::new(lat, lng, alt)
    }
}

/// A sequence of connected points read from one source file
///
/// `path` keeps the row order of the originating file. The `id` is fixed at
/// construction; there is no way to change it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    id: String,
    path: Vec<Point>,
}

impl Trajectory {
    /// Create a trajectory from a fully consumed point sequence
    pub fn new(id: impl Into<String>, path: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            path,
        }
    }

    /// Identifier (the source file name without its extension)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Points in source row order
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
