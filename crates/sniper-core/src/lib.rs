pub mod adurl;
pub mod analysis;
pub mod app_config;
mod config;
pub mod listing;
pub mod phones;

pub use analysis::{average_price, MarketAnalysis, MarketTrend};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use listing::{DealScore, GroundingSource, Listing};
pub use phones::PhoneModel;
