mod app_config;

pub use app_config::{
    AdminSeedConfig, AppConfig, CorsConfig, DatabaseConfig, ServerConfig, SessionConfig,
};
