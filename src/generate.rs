//! Grid generation pipeline: solve spacings, assemble the grid, then write
//! coordinates and boundary conditions in two passes over the mesh file.

use {
    crate::{
        boundary::{tag_faces, wall_breaks, WallMode},
        constants::{BASE_NAME, ZONE_NAME},
        grid::{Grid, Stretching},
        meshfile::{BaseId, MeshFile, Mode, ZoneId, ZoneSize},
        parameters::Parameters,
    },
    anyhow::{ensure, Context, Result},
    log::{debug, info},
    std::path::{Path, PathBuf},
};

/// One mesh to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Streamwise node count
    pub nx: usize,
    /// Vertical node count
    pub nz: usize,
    pub wall_mode: WallMode,
    /// Leading part of the output file name
    pub name_prefix: String,
}

impl Job {
    pub fn new(nx: usize, nz: usize, wall_mode: WallMode, name_prefix: &str) -> Result<Self> {
        ensure!(nx >= 2, "At least two streamwise nodes are required, got {}", nx);
        ensure!(nz >= 2, "At least two vertical nodes are required, got {}", nz);
        ensure!(!name_prefix.is_empty(), "Output name prefix must not be empty");

        Ok(Job {
            nx,
            nz,
            wall_mode,
            name_prefix: name_prefix.to_owned(),
        })
    }

    /// `{prefix}_{nx}_{nz}_{wall_mode}.{extension}`
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}_{}_{}_{}.{}",
            self.name_prefix,
            self.nx,
            self.nz,
            self.wall_mode.selector(),
            extension
        )
    }
}

/// Generates the mesh described by `job` in `directory`, returning the file path.
pub fn generate(job: &Job, params: &Parameters, directory: &Path) -> Result<PathBuf> {
    params.validate()?;

    if job.wall_mode == WallMode::Segmented {
        let (leading, trailing) = wall_breaks(job.nx, &params.partition);
        ensure!(
            1 <= leading && leading < trailing,
            "{} streamwise nodes are too few to split the wall at the bump",
            job.nx
        );
    }

    let stretching = Stretching::solve(job.nx, params);
    ensure!(
        stretching.streamwise_target < 1.0,
        "Bump spacing target {} must be below 1; increase the streamwise resolution",
        stretching.streamwise_target
    );
    info!(
        "Stretching parameters: streamwise {:.6} (target {:e}), vertical {:.6} (target {:e})",
        stretching.streamwise,
        stretching.streamwise_target,
        stretching.vertical,
        stretching.vertical_target
    );

    let grid = Grid::assemble(job.nx, job.nz, params, &stretching);
    ensure!(grid.is_finite(), "Grid contains non-finite coordinates");
    info!(
        "Created {} x {} x {} grid points",
        job.nx,
        grid.vertex_size()[1],
        job.nz
    );

    let path = directory.join(job.file_name(params.output.format.extension()));

    write_grid(&path, params, &grid)?;
    info!("Successfully wrote grid to {}", path.display());

    write_boundary_conditions(&path, job.wall_mode, params)?;
    info!("Successfully wrote boundary conditions to {}", path.display());

    Ok(path)
}

fn write_grid(path: &Path, params: &Parameters, grid: &Grid) -> Result<()> {
    let mut file = MeshFile::open(path, Mode::Write(params.output.format))?;

    let base = file.write_base(BASE_NAME, 3, 3)?;
    let zone = file.write_zone(base, ZONE_NAME, ZoneSize::structured(grid.vertex_size()))?;

    for (name, coords) in grid.coordinates().iter() {
        let data = coords
            .as_slice_memory_order()
            .context("Coordinate array is not contiguous")?;
        file.write_coord(base, zone, name, data)?;
    }

    file.close()
}

fn write_boundary_conditions(path: &Path, wall_mode: WallMode, params: &Parameters) -> Result<()> {
    let mut file = MeshFile::open(path, Mode::Modify)?;
    let (base, zone) = (BaseId(0), ZoneId(0));

    let (_, size) = file.read_zone(base, zone)?;

    for face in tag_faces(size.vertex, wall_mode, &params.partition) {
        debug!("{}", face);
        file.write_boco(base, zone, face.name, face.kind, face.range)?;
    }

    file.close()
}
