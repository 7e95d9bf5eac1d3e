//! Configuration: data directory resolution and `config.toml` settings.

pub mod settings;

pub use settings::{resolve_data_dir, Settings};
