use crate::core::format::{format_long_date, youtube_id, youtube_thumbnail};
use crate::core::MediaItem;

/// A clickable preview in the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// `None` when a video link carries no recognisable identifier.
    pub thumbnail_url: Option<String>,
    pub alt: String,
    pub title: String,
    pub formatted_date: String,
    pub item: MediaItem,
}

pub fn render_card(item: &MediaItem) -> Card {
    let thumbnail_url = if item.is_video() {
        youtube_id(&item.url).map(youtube_thumbnail)
    } else {
        Some(item.url.clone())
    };

    Card {
        thumbnail_url,
        alt: item.title.clone(),
        title: item.title.clone(),
        formatted_date: format_long_date(item.date),
        item: item.clone(),
    }
}

/// One card per item, in input order.
pub fn render_cards(items: &[MediaItem]) -> Vec<Card> {
    items.iter().map(render_card).collect()
}
