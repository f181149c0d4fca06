//! Persistent option storage for plugin settings panels.
//!
//! This crate keeps the current values of an [`optsmith_core::Schema`] and
//! persists them through a pluggable storage collaborator.
//!
//! # Features
//!
//! - **Option Store**: typed get/set with range snapping, load/save/reset, change listeners
//! - **Storage**: in-memory and file-backed collaborators behind one trait
//! - **Definitions**: declare a schema as JSON
//! - **Paths**: platform-specific storage directory
//!
//! # Example
//!
//! ```rust,no_run
//! use optsmith_config::{FileStorage, OptionStore};
//! use optsmith_core::{OptionSchema, Schema};
//!
//! let schema = Schema::new()
//!     .with_option("text", OptionSchema::text("Some text", "Text"))
//!     .with_option("range", OptionSchema::range("A range", 50.0).with_step(10.0));
//!
//! let mut store = OptionStore::for_plugin(schema, FileStorage::user_default(), "My Plugin")
//!     .on_change(|key, value| println!("{key} = {value}"));
//!
//! store.load()?;
//! store.set("range", 73.0)?;
//! store.reset()?;
//! # Ok::<(), optsmith_config::ConfigError>(())
//! ```

mod definition;
mod error;
mod storage;
mod store;

/// Platform-specific paths for stored options.
pub mod paths;

pub use definition::schema_from_json;
pub use error::{ConfigError, StorageError};
pub use paths::{storage_file, user_config_dir, user_storage_dir};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{OptionStore, default_storage_key, plugin_short_name};
