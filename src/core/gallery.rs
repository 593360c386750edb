use crate::core::card::{render_cards, Card};
use crate::core::date_range::parse_range;
use crate::core::{ApodSource, MediaItem, Notifier};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LOADING_MESSAGE: &str = "Loading space photos...";
pub const EMPTY_MESSAGE: &str =
    "No images found for the selected date range. Try a different date range.";
pub const ERROR_MESSAGE: &str = "Sorry, we couldn't load the space images. Please try again later.";

/// Contents of the gallery container.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GalleryState {
    #[default]
    Idle,
    Loading,
    Empty,
    Failed,
    Cards(Vec<Card>),
}

impl GalleryState {
    pub fn cards(&self) -> &[Card] {
        match self {
            GalleryState::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            GalleryState::Loading => Some(LOADING_MESSAGE),
            GalleryState::Empty => Some(EMPTY_MESSAGE),
            GalleryState::Failed => Some(ERROR_MESSAGE),
            GalleryState::Idle | GalleryState::Cards(_) => None,
        }
    }
}

/// Validates a date range, queries the API and replaces the gallery.
///
/// Concurrent calls are not fenced: each one overwrites the gallery when it
/// finishes, so the response that lands last wins.
pub struct GalleryController<S: ApodSource, N: Notifier> {
    source: S,
    notifier: N,
    state: Arc<RwLock<GalleryState>>,
    next_request: AtomicU64,
}

impl<S: ApodSource, N: Notifier> GalleryController<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self {
            source,
            notifier,
            state: Arc::new(RwLock::new(GalleryState::Idle)),
            next_request: AtomicU64::new(1),
        }
    }

    pub async fn state(&self) -> GalleryState {
        self.state.read().await.clone()
    }

    /// Finds a rendered card by its zero-based position.
    pub async fn card(&self, index: usize) -> Option<Card> {
        self.state.read().await.cards().get(index).cloned()
    }

    /// Fetch failures never surface here: they end up as the error
    /// placeholder. Only validation failures are returned, after alerting.
    pub async fn fetch_range(&self, start: &str, end: &str) -> Result<()> {
        let range = match parse_range(start, end) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!("⚠️ Rejected date range '{}'..'{}': {}", start, end, e);
                self.notifier.alert(&e.user_friendly_message());
                return Err(e);
            }
        };

        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            "🚀 Request #{} for {} → {}",
            request_id,
            range.start_param(),
            range.end_param()
        );

        self.set_state(GalleryState::Loading).await;

        match self.source.fetch_range(&range).await {
            Ok(items) => {
                tracing::info!("✅ Request #{} returned {} items", request_id, items.len());
                self.display_items(&items).await;
            }
            Err(e) => {
                tracing::error!("❌ Error fetching space images (request #{}): {}", request_id, e);
                self.set_state(GalleryState::Failed).await;
            }
        }

        Ok(())
    }

    /// Replaces the gallery with cards for `items`, or the empty placeholder.
    pub async fn display_items(&self, items: &[MediaItem]) {
        let next = if items.is_empty() {
            GalleryState::Empty
        } else {
            GalleryState::Cards(render_cards(items))
        };
        self.set_state(next).await;
    }

    async fn set_state(&self, next: GalleryState) {
        *self.state.write().await = next;
    }
}
