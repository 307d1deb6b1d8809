use alphafragment::engine::config::FragmentationConfig;
use alphafragment::workflows::domains::DomainSourceConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub fragmentation: FragmentationConfig,
    pub domain_sources: DomainSourceConfig,
}
