use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("cannot read sprite: {0}")]
    Io(#[from] std::io::Error),

    #[error("sprite file has no visible characters")]
    Empty,

    #[error("sprite is {width}x{height} cells, the limit is {max_width}x{max_height}")]
    TooLarge {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },
}
