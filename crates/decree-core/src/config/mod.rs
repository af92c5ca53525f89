//! Configuration for connecting to a project
//!
//! Settings live in `decree.toml`, by default under the platform config
//! directory (`~/.config/decree/decree.toml` on Linux).

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_decree_toml, parse_decree_toml_str, to_toml};
pub use paths::default_config_path;
pub use schema::{ConfigOverrides, DecreeConfig, TokenConfig};
pub use store::ConfigStore;
