//! Media storage for product and review images
//!
//! Images are pushed to an external host behind the [`MediaStore`] trait:
//!
//! - [`CloudinaryStore`]: signed uploads to the Cloudinary REST API
//! - [`InMemoryMediaStore`]: keeps uploads in memory, for tests and local runs
//!
//! [`upload_batch`] fans a request's files out with bounded concurrency and
//! deletes the already-stored files of the batch when one of them fails.
//!
//! ```rust,ignore
//! use core_config::FromEnv;
//! use media::{build_store, upload_batch, MediaConfig};
//!
//! let config = MediaConfig::from_env()?;
//! let store = build_store(&config)?;
//! let stored = upload_batch(store.as_ref(), files, "bandoggie/products", config.upload_concurrency).await?;
//! ```

pub mod batch;
pub mod cloudinary;
pub mod config;
pub mod error;
pub mod memory;
pub mod store;

pub use batch::{rollback, upload_batch};
pub use cloudinary::CloudinaryStore;
pub use config::{build_store, CloudinaryConfig, MediaConfig, MediaProvider};
pub use error::{MediaError, MediaResult};
pub use memory::InMemoryMediaStore;
pub use store::{MediaFile, MediaStore, StoredMedia};
