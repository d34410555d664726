//! Boundary-condition faces of the structured block.
//!
//! Point ranges use the 1-based, inclusive vertex indices of the mesh file.
//! Neighbouring faces share their common edge.

use {
    crate::parameters::Partition,
    anyhow::{bail, Result},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// How the bottom wall is split into boundary-condition faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallMode {
    /// One wall face spanning the whole streamwise extent
    Single,
    /// Three wall faces split at the bump's leading and trailing edges
    Segmented,
}

impl WallMode {
    pub fn from_selector(selector: u32) -> Result<Self> {
        match selector {
            1 => Ok(WallMode::Single),
            2 => Ok(WallMode::Segmented),
            _ => bail!("Wall mode must be 1 (single) or 2 (segmented), got {}", selector),
        }
    }

    pub fn selector(self) -> u32 {
        match self {
            WallMode::Single => 1,
            WallMode::Segmented => 2,
        }
    }
}

/// Boundary-condition classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcType {
    Farfield,
    SymmetryPlane,
    WallViscousHeatFlux,
}

/// Inclusive range of vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRange {
    pub begin: [usize; 3],
    pub end: [usize; 3],
}

impl PointRange {
    pub fn new(begin: [usize; 3], end: [usize; 3]) -> Self {
        PointRange { begin, end }
    }

    /// Whether the range lies inside a zone of the given vertex size
    pub fn fits(&self, vertex_size: [usize; 3]) -> bool {
        (0..3).all(|d| {
            1 <= self.begin[d] && self.begin[d] <= self.end[d] && self.end[d] <= vertex_size[d]
        })
    }

    pub fn contains(&self, point: [usize; 3]) -> bool {
        (0..3).all(|d| self.begin[d] <= point[d] && point[d] <= self.end[d])
    }
}

impl fmt::Display for PointRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [i0, j0, k0] = self.begin;
        let [i1, j1, k1] = self.end;
        write!(f, "({},{},{})-({},{},{})", i0, j0, k0, i1, j1, k1)
    }
}

/// A tagged region on one side of the block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub name: &'static str,
    pub kind: BcType,
    pub range: PointRange,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<5}{:<21}{}", self.name, format!("{:?}", self.kind), self.range)
    }
}

/// Streamwise node indices at which the wall is split.
///
/// Truncates `fraction * ni`, so a boundary can fall one node short of where
/// the distribution places the bump edge.
pub fn wall_breaks(ni: usize, partition: &Partition) -> (usize, usize) {
    (
        (partition.leading_edge * ni as f64) as usize,
        (partition.trailing_edge * ni as f64) as usize,
    )
}

/// Derives the boundary faces for a block of `vertex_size` nodes.
pub fn tag_faces(vertex_size: [usize; 3], wall_mode: WallMode, partition: &Partition) -> Vec<Face> {
    let [ni, nj, nk] = vertex_size;
    let face = |name, kind, begin, end| Face {
        name,
        kind,
        range: PointRange::new(begin, end),
    };

    let mut faces = vec![
        face("Ilo", BcType::Farfield, [1, 1, 1], [1, nj, nk]),
        face("Ihi", BcType::Farfield, [ni, 1, 1], [ni, nj, nk]),
        face("Jlo", BcType::SymmetryPlane, [1, 1, 1], [ni, 1, nk]),
        face("Jhi", BcType::SymmetryPlane, [1, nj, 1], [ni, nj, nk]),
    ];

    match wall_mode {
        WallMode::Single => {
            faces.push(face("Klo", BcType::WallViscousHeatFlux, [1, 1, 1], [ni, nj, 1]));
        }
        WallMode::Segmented => {
            let (leading, trailing) = wall_breaks(ni, partition);
            let wall = BcType::WallViscousHeatFlux;
            faces.push(face("Klo1", wall, [1, 1, 1], [leading, nj, 1]));
            faces.push(face("Klo2", wall, [leading, 1, 1], [trailing, nj, 1]));
            faces.push(face("Klo3", wall, [trailing, 1, 1], [ni, nj, 1]));
        }
    }

    faces.push(face("Khi", BcType::Farfield, [1, 1, nk], [ni, nj, nk]));

    faces
}
