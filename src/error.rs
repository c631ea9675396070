use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read config file \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't parse config file \"{}\": {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid height: {0}")]
    InvalidHeight(i64),
    #[error("Invalid width: {0}")]
    InvalidWidth(i64),
    #[error("Invalid number of threads: {0}")]
    InvalidThreads(i64),
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(i64),
    #[error("Unknown preset: \"{0}\"")]
    UnknownPreset(String),
    #[error("Preset not chosen")]
    MissingPreset,
    #[error("Out file not specified")]
    MissingOutput,
    #[error("{} configuration errors: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to open file: \"{}\"", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse mesh file: \"{}\"", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("face {face} references {kind} {index}, but only {len} exist")]
    IndexOutOfBounds {
        face: usize,
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to spawn {name} thread")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("render worker {0} panicked")]
    WorkerPanicked(usize),
    #[error("progress reporting thread panicked")]
    ReporterPanicked,
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("output directory \"{}\" does not exist", path.display())]
    MissingDirectory { path: PathBuf },
    #[error("Failed to encode image for: \"{}\"", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to open: \"{}\"", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
