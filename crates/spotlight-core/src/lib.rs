pub mod app_config;
pub mod config;
pub mod events;
pub mod genres;
pub mod geo;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use events::Event;
pub use genres::genre_display_name;
pub use geo::{haversine_distance_m, Coordinate, EARTH_RADIUS_M};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
