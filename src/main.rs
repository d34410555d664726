#[macro_use]
extern crate clap;

use {
    bump_mesh::{
        boundary::WallMode,
        generate::{generate, Job},
        parameters::Parameters,
    },
    clap::ErrorKind,
    log::{error, info},
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    std::{fs::File, path::Path},
};

const USAGE: &str = "Incorrect number of arguments: need <nx> <nz> <wall_mode> <name_prefix>";

#[quit::main]
fn main() {
    let matches = clap_app!(bump_mesh =>
        (version: crate_version!())
        (about: "Generates a structured channel mesh with a wall-mounted bump and tags its boundary faces.")
        (@arg PARAMETERS: -p --parameters +takes_value "Path to a YAML file overriding the default geometry and spacing.")
        (@arg NX: +required "Number of nodes along the streamwise axis")
        (@arg NZ: +required "Number of nodes along the wall-normal axis")
        (@arg WALL_MODE: +required "1 for a single wall face, 2 to split the wall at the bump")
        (@arg NAME: +required "Prefix of the output file name")
    )
    .get_matches_safe()
    .unwrap_or_else(|e| match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
        _ => {
            println!("{}", USAGE);
            quit::with_code(1);
        }
    });

    TermLogger::init(LevelFilter::Info, LogConfig::default(), TerminalMode::Mixed)
        .expect("Failed to initialize logger");

    let params = match matches.value_of("PARAMETERS") {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                error!("Failed to open {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            let params = serde_yaml::from_reader::<_, Parameters>(file).unwrap_or_else(|e| {
                error!("Failed to parse parameters from {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            info!(
                "Successfully loaded mesh parameters from \"{}\": \n{:#?}",
                path, params
            );

            params
        }
        None => Parameters::default(),
    };

    let job = {
        let nx = value_t!(matches, "NX", usize);
        let nz = value_t!(matches, "NZ", usize);
        let wall_mode = value_t!(matches, "WALL_MODE", u32);

        match (nx, nz, wall_mode) {
            (Ok(nx), Ok(nz), Ok(wall_mode)) => {
                let name = matches.value_of("NAME").unwrap_or_default();
                WallMode::from_selector(wall_mode).and_then(|mode| Job::new(nx, nz, mode, name))
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e.into()),
        }
    }
    .unwrap_or_else(|e| {
        error!("Invalid arguments: \"{}\"", e);
        quit::with_code(1);
    });

    generate(&job, &params, Path::new(".")).unwrap_or_else(|e| {
        error!("Error: \"{:#}\"", e);
        quit::with_code(1);
    });
}
