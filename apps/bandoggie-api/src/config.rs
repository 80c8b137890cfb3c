//! Configuration for the BanDoggie API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::common::RetryConfig;
use database::mongodb::MongoConfig;
use media::MediaConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    /// Backoff for the initial MongoDB connection
    pub mongodb_retry: RetryConfig,
    pub media: MediaConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            mongodb,
            mongodb_retry: RetryConfig::from_env()?,
            media: MediaConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
