use crate::domain::model::{DateRange, MediaItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// The remote image-of-the-day API.
#[async_trait]
pub trait ApodSource: Send + Sync {
    async fn fetch_range(&self, range: &DateRange) -> Result<Vec<MediaItem>>;
}

/// Blocking, user-facing alert (validation failures).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}
