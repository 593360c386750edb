pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::ApodClient;
pub use app::session::{Command, Session};
pub use config::storage::{ConsoleNotifier, LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::date_range::DateRangeInput;
pub use core::gallery::{GalleryController, GalleryState};
pub use core::modal::ModalController;
pub use utils::error::{GalleryError, Result};
