pub mod card;
pub mod date_range;
pub mod facts;
pub mod format;
pub mod gallery;
pub mod modal;
pub mod page;

pub use crate::domain::model::{DateRange, MediaItem, MediaType};
pub use crate::domain::ports::{ApodSource, ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
