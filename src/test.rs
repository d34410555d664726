use {
    crate::{
        boundary::{BcType, PointRange, WallMode},
        generate::{generate, Job},
        grid::{Grid, Stretching},
        meshfile::{Boco, Document, Format, MeshFile, Mode},
        parameters::Parameters,
        utils::view3d,
    },
    approx::assert_abs_diff_eq,
    lazy_static::lazy_static,
    tempdir::TempDir,
};

/// Generates a mesh in a scratch directory and reads it back.
fn generate_and_read(job: &Job, params: &Parameters) -> (String, Document) {
    let tempdir = TempDir::new("bump-mesh").unwrap();
    let path = generate(job, params, tempdir.path()).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let document = MeshFile::open(&path, Mode::Read).unwrap().document().clone();

    (name, document)
}

lazy_static! {
    static ref MESH_10_5_2: (String, Document) = generate_and_read(
        &Job::new(10, 5, WallMode::Segmented, "test").unwrap(),
        &Parameters::default()
    );
    static ref MESH_96_49_1: (String, Document) = generate_and_read(
        &Job::new(96, 49, WallMode::Single, "bump").unwrap(),
        &Parameters::default()
    );
}

/// Asserts that the faces cover all six sides of the block and that faces on
/// the same side meet at most along an edge.
fn assert_tiles_surface(vertex_size: [usize; 3], bocos: &[Boco]) {
    let side_of = |range: &PointRange| {
        let flat = (0..3)
            .filter(|&d| range.begin[d] == range.end[d])
            .collect::<Vec<_>>();
        assert_eq!(flat.len(), 1, "{} is not a face", range);

        let d = flat[0];
        assert!(range.begin[d] == 1 || range.begin[d] == vertex_size[d]);
        (d, range.begin[d])
    };

    for d in 0..3 {
        for &value in &[1, vertex_size[d]] {
            let on_side = bocos
                .iter()
                .filter(|b| side_of(&b.range) == (d, value))
                .collect::<Vec<_>>();
            assert!(!on_side.is_empty(), "side {} = {} untagged", d, value);

            let (u, v) = ((d + 1) % 3, (d + 2) % 3);
            for p in 1..=vertex_size[u] {
                for q in 1..=vertex_size[v] {
                    let mut point = [0; 3];
                    point[d] = value;
                    point[u] = p;
                    point[v] = q;

                    assert!(
                        on_side.iter().any(|b| b.range.contains(point)),
                        "{:?} is not covered",
                        point
                    );
                }
            }

            for (n, first) in on_side.iter().enumerate() {
                for second in &on_side[n + 1..] {
                    let overlap = (0..3)
                        .map(|e| {
                            let lo = first.range.begin[e].max(second.range.begin[e]);
                            let hi = first.range.end[e].min(second.range.end[e]);
                            (hi + 1).saturating_sub(lo)
                        })
                        .collect::<Vec<_>>();

                    let edge = overlap.iter().filter(|&&len| len == 1).count() >= 2;
                    assert!(
                        overlap.contains(&0) || edge,
                        "{} and {} overlap",
                        first.name,
                        second.name
                    );
                }
            }
        }
    }
}

mod segmented_10_5 {
    use super::*;

    #[test]
    fn file_name() {
        assert_eq!(MESH_10_5_2.0, "test_10_5_2.bmsh");
    }

    #[test]
    fn zone() {
        let base = &MESH_10_5_2.1.bases[0];
        assert_eq!(MESH_10_5_2.1.bases.len(), 1);
        assert_eq!((base.name.as_str(), base.cell_dim, base.phys_dim), ("Base", 3, 3));

        let zone = &base.zones[0];
        assert_eq!(base.zones.len(), 1);
        assert_eq!(zone.name, "Zone  1");
        assert_eq!(zone.size.vertex, [10, 2, 5]);
        assert_eq!(zone.size.cell, [9, 1, 4]);
        assert_eq!(zone.size.boundary_vertex, [0, 0, 0]);
    }

    #[test]
    fn coordinates() {
        let params = Parameters::default();
        let grid = Grid::assemble(10, 5, &params, &Stretching::solve(10, &params));
        let zone = &MESH_10_5_2.1.bases[0].zones[0];

        assert_eq!(zone.coordinates.len(), 3);
        for ((name, expected), written) in grid.coordinates().iter().zip(&zone.coordinates) {
            assert_eq!(*name, written.name);
            let view = view3d(&written.data, 10, 2, 5).unwrap();
            assert_abs_diff_eq!(view, expected.view(), epsilon = 1.0E-13);
        }
    }

    #[test]
    fn wall_segments() {
        let bocos = &MESH_10_5_2.1.bases[0].zones[0].bocos;
        let walls = bocos
            .iter()
            .filter(|b| b.kind == BcType::WallViscousHeatFlux)
            .map(|b| (b.name.as_str(), b.range.begin[0], b.range.end[0]))
            .collect::<Vec<_>>();

        assert_eq!(walls, vec![("Klo1", 1, 4), ("Klo2", 4, 8), ("Klo3", 8, 10)]);
        for b in bocos.iter().filter(|b| b.name.starts_with("Klo")) {
            assert_eq!((b.range.begin[2], b.range.end[2]), (1, 1));
            assert_eq!((b.range.begin[1], b.range.end[1]), (1, 2));
        }
    }

    #[test]
    fn boundary_names_and_types() {
        let bocos = &MESH_10_5_2.1.bases[0].zones[0].bocos;
        let tags = bocos
            .iter()
            .map(|b| (b.name.as_str(), b.kind))
            .collect::<Vec<_>>();

        assert_eq!(
            tags,
            vec![
                ("Ilo", BcType::Farfield),
                ("Ihi", BcType::Farfield),
                ("Jlo", BcType::SymmetryPlane),
                ("Jhi", BcType::SymmetryPlane),
                ("Klo1", BcType::WallViscousHeatFlux),
                ("Klo2", BcType::WallViscousHeatFlux),
                ("Klo3", BcType::WallViscousHeatFlux),
                ("Khi", BcType::Farfield),
            ]
        );
    }

    #[test]
    fn tiles_surface() {
        let zone = &MESH_10_5_2.1.bases[0].zones[0];
        assert_tiles_surface(zone.size.vertex, &zone.bocos);
    }
}

mod single_96_49 {
    use super::*;

    #[test]
    fn counts() {
        let size = MESH_96_49_1.1.bases[0].zones[0].size;

        assert_eq!(MESH_96_49_1.0, "bump_96_49_1.bmsh");
        assert_eq!(size.vertex_count(), 96 * 2 * 49);
        assert_eq!(size.cell_count(), 95 * 1 * 48);
    }

    #[test]
    fn one_full_wall() {
        let bocos = &MESH_96_49_1.1.bases[0].zones[0].bocos;
        let walls = bocos
            .iter()
            .filter(|b| b.kind == BcType::WallViscousHeatFlux)
            .collect::<Vec<_>>();

        assert_eq!(bocos.len(), 6);
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].range, PointRange::new([1, 1, 1], [96, 2, 1]));
    }

    #[test]
    fn tiles_surface() {
        let zone = &MESH_96_49_1.1.bases[0].zones[0];
        assert_tiles_surface(zone.size.vertex, &zone.bocos);
    }

    #[test]
    fn wall_clustering() {
        let z = &MESH_96_49_1.1.bases[0].zones[0].coordinates[2].data;
        let first = z[96 * 2] - z[0];

        assert!(first > 0.0 && first < 0.15 / 48.0, "first off-wall spacing {}", first);
    }
}

#[test]
fn yaml_output() {
    let mut params = Parameters::default();
    params.output.format = Format::Yaml;

    let job = Job::new(12, 4, WallMode::Segmented, "yaml").unwrap();
    let (name, document) = generate_and_read(&job, &params);
    let zone = &document.bases[0].zones[0];

    assert_eq!(name, "yaml_12_4_2.yaml");
    assert_eq!(zone.size.vertex, [12, 2, 4]);
    assert_eq!(zone.bocos.len(), 8);
    assert_tiles_surface(zone.size.vertex, &zone.bocos);
}

#[test]
fn too_few_nodes_to_split_wall() {
    let tempdir = TempDir::new("bump-mesh").unwrap();
    let job = Job::new(2, 4, WallMode::Segmented, "short").unwrap();

    assert!(generate(&job, &Parameters::default(), tempdir.path()).is_err());
    assert!(!tempdir.path().join("short_2_4_2.bmsh").exists());
}

#[test]
fn invalid_parameters_write_nothing() {
    let tempdir = TempDir::new("bump-mesh").unwrap();
    let mut params = Parameters::default();
    params.spacing.wall_normal = 1.5;

    let job = Job::new(10, 5, WallMode::Single, "bad").unwrap();

    assert!(generate(&job, &params, tempdir.path()).is_err());
    assert!(std::fs::read_dir(tempdir.path()).unwrap().next().is_none());
}
