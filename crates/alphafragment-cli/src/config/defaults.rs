use alphafragment::engine::config::{
    DEFAULT_LENGTH, DEFAULT_LENGTH_INCREMENT, DEFAULT_OVERLAP, DEFAULT_TIME_LIMIT, Profile,
};
use std::time::Duration;

pub struct DefaultsConfig {
    pub length: Profile,
    pub overlap: Profile,
    pub length_increment: usize,
    pub time_limit: Duration,
    pub method: String,
    pub use_pae: bool,
    pub use_manual: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            overlap: DEFAULT_OVERLAP,
            length_increment: DEFAULT_LENGTH_INCREMENT,
            time_limit: DEFAULT_TIME_LIMIT,
            method: "definite".to_string(),
            use_pae: true,
            use_manual: true,
        }
    }
}
