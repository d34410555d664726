#[cfg(test)]
mod test;

pub mod boundary;
pub mod distribution;
pub mod generate;
pub mod grid;
pub mod meshfile;
pub mod stretch;

pub mod constants;
pub mod parameters;
pub mod utils;
