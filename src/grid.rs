//! Tensor-product assembly of the node coordinates.

use {
    crate::{
        constants::{COORDINATE_NAMES, LATERAL_NODES},
        distribution::{lateral_coord, streamwise_coord, vertical_coord, StreamwiseLengths},
        parameters::Parameters,
        stretch::solve_stretch,
        utils::arr3_from_fn,
    },
    ndarray::Array3,
};

/// Target spacings and the stretching parameters solved from them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stretching {
    /// Target streamwise spacing over the bump
    pub streamwise_target: f64,
    /// Target first off-wall spacing, relative to the channel height
    pub vertical_target: f64,
    pub streamwise: f64,
    pub vertical: f64,
}

impl Stretching {
    /// Derives both targets for a grid with `ni` streamwise nodes.
    ///
    /// The streamwise target is the uniform spacing the bump section would
    /// have if its index share were spread over `ni` nodes.
    pub fn solve(ni: usize, params: &Parameters) -> Self {
        let p = &params.partition;
        let streamwise_target =
            params.geometry.bump_length / ((p.trailing_edge - p.leading_edge) * ni as f64);
        let vertical_target = params.spacing.wall_normal;

        Stretching {
            streamwise_target,
            vertical_target,
            streamwise: solve_stretch(streamwise_target),
            vertical: solve_stretch(vertical_target),
        }
    }
}

/// Node coordinates of the single structured block, indexed `[[i, j, k]]`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Array3<f64>,
    pub y: Array3<f64>,
    pub z: Array3<f64>,
}

impl Grid {
    /// Fills the coordinate arrays for `ni` streamwise and `nk` vertical nodes.
    ///
    /// Both `ni` and `nk` must be at least two.
    pub fn assemble(ni: usize, nk: usize, params: &Parameters, stretching: &Stretching) -> Self {
        let nj = LATERAL_NODES;
        let g = &params.geometry;
        let lengths = StreamwiseLengths::from(g);

        let x = arr3_from_fn(ni, nj, nk, |(i, _, _)| {
            streamwise_coord(i, ni - 1, &lengths, stretching.streamwise, &params.partition)
        });
        let y = arr3_from_fn(ni, nj, nk, |(_, j, _)| lateral_coord(j, nj - 1, g.lateral_width));
        let z = arr3_from_fn(ni, nj, nk, |(_, _, k)| {
            vertical_coord(k, nk - 1, g.vertical_height, stretching.vertical)
        });

        Grid { x, y, z }
    }

    pub fn vertex_size(&self) -> [usize; 3] {
        let (ni, nj, nk) = self.x.dim();
        [ni, nj, nk]
    }

    pub fn cell_size(&self) -> [usize; 3] {
        let [ni, nj, nk] = self.vertex_size();
        [ni - 1, nj - 1, nk - 1]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_size().iter().product()
    }

    pub fn cell_count(&self) -> usize {
        self.cell_size().iter().product()
    }

    /// Coordinate arrays paired with their standard names
    pub fn coordinates(&self) -> [(&'static str, &Array3<f64>); 3] {
        [
            (COORDINATE_NAMES[0], &self.x),
            (COORDINATE_NAMES[1], &self.y),
            (COORDINATE_NAMES[2], &self.z),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.coordinates()
            .iter()
            .all(|(_, a)| a.iter().all(|v| v.is_finite()))
    }
}
