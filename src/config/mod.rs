// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod provider;
mod settings;

pub use loader::{load_config, parse_config, EnvOverrides};
pub use provider::ProviderEntry;
pub use settings::{Config, FeaturesConfig, ServerConfig};
