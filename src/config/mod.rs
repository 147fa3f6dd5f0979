#[cfg(feature = "cli")]
pub mod cli;
pub mod samples;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;
