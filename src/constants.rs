/// Streamwise length of the channel
pub const STREAMWISE_LENGTH: f64 = 2.5;
/// Spanwise width of the single-cell slab
pub const LATERAL_WIDTH: f64 = 1.0;
/// Height of the channel above the wall
pub const VERTICAL_HEIGHT: f64 = 0.15;
/// Physical length of the bump (25.4 mm over a 250 mm reference length)
pub const BUMP_LENGTH: f64 = 25.4 / 250.0;
/// Share of the streamwise length ahead of the bump
pub const APPROACH_FRACTION: f64 = 4.0 / 5.0;

/// Index fraction at which the bump starts
pub const LEADING_EDGE: f64 = 5.0 / 12.0;
/// Index fraction at which the bump ends
pub const TRAILING_EDGE: f64 = 10.0 / 12.0;

/// Target first off-wall spacing, relative to the channel height
pub const WALL_NORMAL_SPACING: f64 = 2e-5;

/// Nodes across the slab; the mesh is quasi two-dimensional
pub const LATERAL_NODES: usize = 2;

/// Spacing fraction at which the two branches of the stretching approximation meet
pub const STRETCH_THRESHOLD: f64 = 0.269_389_72;

pub const BASE_NAME: &str = "Base";
pub const ZONE_NAME: &str = "Zone  1";
pub const COORDINATE_NAMES: [&str; 3] = ["CoordinateX", "CoordinateY", "CoordinateZ"];
