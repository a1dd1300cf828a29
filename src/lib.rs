// Coach - Personal financial coaching service
// Library exports

pub mod coach;
pub mod config;
pub mod errors;
pub mod insights;
pub mod providers;
pub mod server;

pub use coach::{FinancialCoach, UserBehavior};
pub use config::{load_config, Config};
pub use errors::{CoachError, ProviderError};
pub use providers::{create_provider, LlmProvider};
pub use server::{create_router, AppState, CoachServer};
