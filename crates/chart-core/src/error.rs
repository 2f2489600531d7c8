// File: crates/chart-core/src/error.rs
// Summary: Error type for the fallible edges (config, CSV input, file output).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv input: {0}")]
    Csv(#[from] csv::Error),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}
