//! Node distributions along the three grid axes.
//!
//! Every function maps a node index in `[0, max_index]` to a physical
//! coordinate. `max_index` must be at least one.

use crate::parameters::{Geometry, Partition};

/// One-sided sinh distribution, spacing smallest at index zero.
pub fn vertical_coord(index: usize, max_index: usize, length: f64, stretch: f64) -> f64 {
    let frac = index as f64 / max_index as f64;
    length * (stretch * frac).sinh() / stretch.sinh()
}

/// Uniform distribution.
pub fn lateral_coord(index: usize, max_index: usize, length: f64) -> f64 {
    index as f64 / max_index as f64 * length
}

/// Region of the streamwise axis an index fraction falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Upstream of the bump
    Approach,
    /// Exactly on the bump's leading edge
    LeadingEdge,
    /// Over the bump, uniformly spaced
    Bump,
    /// Exactly on the bump's trailing edge
    TrailingEdge,
    /// Downstream of the bump
    Departure,
}

impl Partition {
    pub fn classify(&self, frac: f64) -> Section {
        if frac < self.leading_edge {
            Section::Approach
        } else if frac == self.leading_edge {
            Section::LeadingEdge
        } else if frac < self.trailing_edge {
            Section::Bump
        } else if frac == self.trailing_edge {
            Section::TrailingEdge
        } else {
            Section::Departure
        }
    }
}

/// Physical lengths of the three streamwise sections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamwiseLengths {
    pub approach: f64,
    pub bump: f64,
    pub departure: f64,
}

impl From<&Geometry> for StreamwiseLengths {
    fn from(geometry: &Geometry) -> Self {
        StreamwiseLengths {
            approach: geometry.approach_length(),
            bump: geometry.bump_length,
            departure: geometry.departure_length(),
        }
    }
}

/// Three-section streamwise distribution.
///
/// Approach nodes follow an asinh map, so spacing shrinks towards the bump's
/// leading edge. Bump nodes are uniform. Departure nodes follow a sinh map with
/// the finest spacing at the trailing edge. The map is continuous, but not
/// smooth, across both section boundaries.
pub fn streamwise_coord(
    index: usize,
    max_index: usize,
    lengths: &StreamwiseLengths,
    stretch: f64,
    partition: &Partition,
) -> f64 {
    let frac = index as f64 / max_index as f64;
    let (fr0, fr1) = (partition.leading_edge, partition.trailing_edge);

    match partition.classify(frac) {
        Section::Approach => {
            let t = ((frac / fr0) * stretch.sinh()).asinh() / stretch;
            lengths.approach * t
        }
        Section::LeadingEdge => lengths.approach,
        Section::Bump => lengths.approach + lengths.bump * (frac - fr0) / (fr1 - fr0),
        Section::TrailingEdge => lengths.approach + lengths.bump,
        Section::Departure => {
            let t = (stretch * (frac - fr1) / (1.0 - fr1)).sinh() / stretch.sinh();
            lengths.approach + lengths.bump + lengths.departure * t
        }
    }
}
