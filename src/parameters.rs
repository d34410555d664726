use {
    crate::{constants::*, meshfile::Format},
    anyhow::{ensure, Result},
    serde::Deserialize,
};

/// Mesh generation parameters
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub geometry: Geometry,
    pub partition: Partition,
    pub spacing: Spacing,
    pub output: Output,
}

impl Parameters {
    /// Checks the physical and index-space constraints the distribution functions rely on
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;

        ensure!(
            g.streamwise_length > 0.0 && g.lateral_width > 0.0 && g.vertical_height > 0.0,
            "Domain lengths must be positive, got {} x {} x {}",
            g.streamwise_length,
            g.lateral_width,
            g.vertical_height
        );
        ensure!(
            g.approach_fraction > 0.0 && g.approach_fraction < 1.0,
            "Approach fraction must lie in (0, 1), got {}",
            g.approach_fraction
        );
        ensure!(
            g.bump_length > 0.0 && g.bump_length < g.departure_region_budget(),
            "Bump length {} does not fit behind an approach region of length {}",
            g.bump_length,
            g.approach_length()
        );
        ensure!(
            0.0 < self.partition.leading_edge
                && self.partition.leading_edge < self.partition.trailing_edge
                && self.partition.trailing_edge < 1.0,
            "Partition fractions must satisfy 0 < {} < {} < 1",
            self.partition.leading_edge,
            self.partition.trailing_edge
        );
        ensure!(
            self.spacing.wall_normal > 0.0 && self.spacing.wall_normal < 1.0,
            "Wall-normal spacing target must lie in (0, 1), got {}",
            self.spacing.wall_normal
        );

        Ok(())
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Length of the channel along the flow
    pub streamwise_length: f64,
    /// Width of the slab
    pub lateral_width: f64,
    /// Height of the channel
    pub vertical_height: f64,
    /// Physical length of the bump
    pub bump_length: f64,
    /// Share of the streamwise length upstream of the bump
    pub approach_fraction: f64,
}

impl Geometry {
    pub fn approach_length(&self) -> f64 {
        self.streamwise_length * self.approach_fraction
    }

    pub fn departure_length(&self) -> f64 {
        self.streamwise_length - self.bump_length - self.approach_length()
    }

    fn departure_region_budget(&self) -> f64 {
        self.streamwise_length - self.approach_length()
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            streamwise_length: STREAMWISE_LENGTH,
            lateral_width: LATERAL_WIDTH,
            vertical_height: VERTICAL_HEIGHT,
            bump_length: BUMP_LENGTH,
            approach_fraction: APPROACH_FRACTION,
        }
    }
}

/// Index fractions splitting the streamwise axis into approach, bump and departure
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Partition {
    pub leading_edge: f64,
    pub trailing_edge: f64,
}

impl Default for Partition {
    fn default() -> Self {
        Partition {
            leading_edge: LEADING_EDGE,
            trailing_edge: TRAILING_EDGE,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Target first off-wall spacing as a fraction of the channel height
    pub wall_normal: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing {
            wall_normal: WALL_NORMAL_SPACING,
        }
    }
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Encoding of the written mesh file
    pub format: Format,
}
