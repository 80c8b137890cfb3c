use crate::cloudinary::CloudinaryStore;
use crate::error::{MediaError, MediaResult};
use crate::memory::InMemoryMediaStore;
use crate::store::MediaStore;
use core_config::{env_or_default, env_parse, env_required, ConfigError, Environment, FromEnv};
use std::str::FromStr;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaProvider {
    Cloudinary,
    /// Process-local store for development and tests; refused in production
    Memory,
}

#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaConfig {
    pub provider: MediaProvider,
    /// Present when `provider` is Cloudinary
    pub cloudinary: Option<CloudinaryConfig>,
    /// Root folder; domains upload into `<folder>/<resource>`
    pub folder: String,
    /// Uploads in flight per request
    pub upload_concurrency: usize,
}

impl MediaConfig {
    pub fn in_memory() -> Self {
        Self {
            provider: MediaProvider::Memory,
            cloudinary: None,
            folder: "bandoggie".to_string(),
            upload_concurrency: 4,
        }
    }

    /// Folder for one kind of resource, e.g. `bandoggie/products`
    pub fn folder_for(&self, resource: &str) -> String {
        format!("{}/{}", self.folder.trim_end_matches('/'), resource)
    }
}

/// Environment variables:
/// - `MEDIA_PROVIDER` (`cloudinary` | `memory`, default: cloudinary).
///   `memory` is rejected when `APP_ENV=production`
/// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`
///   (required for cloudinary)
/// - `MEDIA_FOLDER` (default: bandoggie)
/// - `MEDIA_UPLOAD_CONCURRENCY` (default: 4, at least 1)
impl FromEnv for MediaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_provider = env_or_default("MEDIA_PROVIDER", "cloudinary");
        let provider =
            MediaProvider::from_str(raw_provider.trim()).map_err(|_| ConfigError::ParseError {
                key: "MEDIA_PROVIDER".to_string(),
                details: format!("unknown provider '{}'", raw_provider),
            })?;

        if provider == MediaProvider::Memory && Environment::from_env().is_production() {
            return Err(ConfigError::Invalid(
                "MEDIA_PROVIDER=memory is not allowed in production".to_string(),
            ));
        }

        let cloudinary = match provider {
            MediaProvider::Cloudinary => Some(CloudinaryConfig {
                cloud_name: env_required("CLOUDINARY_CLOUD_NAME")?,
                api_key: env_required("CLOUDINARY_API_KEY")?,
                api_secret: env_required("CLOUDINARY_API_SECRET")?,
            }),
            MediaProvider::Memory => None,
        };

        let upload_concurrency = env_parse("MEDIA_UPLOAD_CONCURRENCY", 4usize)?;
        if upload_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "MEDIA_UPLOAD_CONCURRENCY must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            provider,
            cloudinary,
            folder: env_or_default("MEDIA_FOLDER", "bandoggie"),
            upload_concurrency,
        })
    }
}

/// Instantiate the store selected by `config`
pub fn build_store(config: &MediaConfig) -> MediaResult<Arc<dyn MediaStore>> {
    let store: Arc<dyn MediaStore> = match config.provider {
        MediaProvider::Cloudinary => {
            let cloudinary = config.cloudinary.as_ref().ok_or_else(|| {
                MediaError::Config("Cloudinary credentials are missing".to_string())
            })?;
            Arc::new(CloudinaryStore::new(cloudinary))
        }
        MediaProvider::Memory => Arc::new(InMemoryMediaStore::new()),
    };

    info!(provider = store.name(), folder = %config.folder, "Media store ready");
    Ok(store)
}
