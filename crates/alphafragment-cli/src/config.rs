mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, resolve_thresholds};
pub use models::AppConfig;
