//! Renders the gallery page as a standalone HTML document.

use crate::core::card::Card;
use crate::core::date_range::{iso, DateRangeInput};
use crate::core::gallery::GalleryState;
use crate::core::modal::{ModalController, ModalView};
use crate::utils::html::escape;

pub struct PageView<'a> {
    pub input: &'a DateRangeInput,
    pub fact: Option<&'a str>,
    pub gallery: &'a GalleryState,
}

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; background: #0b0d21; color: #f1f1f1; margin: 0; padding: 20px; }
.filters { display: flex; gap: 10px; margin-bottom: 20px; }
.fact { background: #1c1f3b; padding: 12px 16px; border-radius: 6px; margin-bottom: 20px; }
.gallery { display: flex; flex-wrap: wrap; gap: 20px; }
.gallery-item { flex: 1 1 300px; background: #fff; color: #222; border-radius: 6px; overflow: hidden; text-decoration: none; }
.gallery-item img { width: 100%; height: 200px; object-fit: cover; }
.gallery-item-content { padding: 10px; }
.gallery-item-title { font-weight: bold; }
.gallery-item-date { color: #666; font-size: 14px; }
.placeholder, .loading { flex: 1 1 100%; text-align: center; padding: 40px; }
.no-thumbnail { height: 200px; background: #333; }
.modal { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.8); overflow: auto; }
.modal:target { display: block; }
.modal-backdrop { position: fixed; inset: 0; }
.modal-content { position: relative; background: #fff; color: #222; margin: 5% auto; padding: 20px; max-width: 800px; border-radius: 6px; }
.modal-content img, .modal-content iframe { width: 100%; }
.modal-content iframe { aspect-ratio: 16 / 9; border: 0; }
.close { position: absolute; top: 10px; right: 16px; font-size: 28px; color: #222; text-decoration: none; }
"#;

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<title>Space Explorer</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Space Explorer</h1>\n");

    let min = iso(view.input.min());
    let max = iso(view.input.max());
    html.push_str(&format!(
        "<div class=\"filters\">\n\
         <input type=\"date\" id=\"startDate\" min=\"{min}\" max=\"{max}\" value=\"{}\">\n\
         <input type=\"date\" id=\"endDate\" min=\"{min}\" max=\"{max}\" value=\"{}\">\n\
         <button id=\"fetchButton\">Get Space Images</button>\n</div>\n",
        escape(view.input.start_value()),
        escape(view.input.end_value()),
    ));

    if let Some(fact) = view.fact {
        html.push_str(&format!(
            "<div class=\"fact\"><strong>Did You Know?</strong> <span id=\"factText\">{}</span></div>\n",
            escape(fact)
        ));
    }

    html.push_str("<div id=\"gallery\" class=\"gallery\">\n");
    html.push_str(&render_gallery(view.gallery));
    html.push_str("</div>\n");

    for (index, card) in view.gallery.cards().iter().enumerate() {
        let mut modal = ModalController::new();
        modal.show(&card.item);
        html.push_str(&render_modal(&card_anchor(index), modal.view()));
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub fn render_gallery(state: &GalleryState) -> String {
    match state {
        GalleryState::Idle => String::new(),
        GalleryState::Loading => placeholder("loading", "🚀", state),
        GalleryState::Empty => placeholder("placeholder", "🌌", state),
        GalleryState::Failed => placeholder("placeholder", "❌", state),
        GalleryState::Cards(cards) => cards
            .iter()
            .enumerate()
            .map(|(index, card)| render_card(index, card))
            .collect(),
    }
}

fn placeholder(class: &str, icon: &str, state: &GalleryState) -> String {
    format!(
        "<div class=\"{class}\">\n<div class=\"{class}-icon\">{icon}</div>\n<p>{}</p>\n</div>\n",
        escape(state.placeholder().unwrap_or_default())
    )
}

/// Fragment id linking the card at `index` to its detail overlay.
pub fn card_anchor(index: usize) -> String {
    format!("apod-{}", index + 1)
}

pub fn render_card(index: usize, card: &Card) -> String {
    let media = match &card.thumbnail_url {
        Some(src) => format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape(src),
            escape(&card.alt)
        ),
        None => "<div class=\"no-thumbnail\"></div>".to_string(),
    };

    format!(
        "<a class=\"gallery-item\" href=\"#{}\">\n{}\n<div class=\"gallery-item-content\">\n\
         <div class=\"gallery-item-title\">{}</div>\n\
         <div class=\"gallery-item-date\">{}</div>\n</div>\n</a>\n",
        card_anchor(index),
        media,
        escape(&card.title),
        escape(&card.formatted_date),
    )
}

/// Detail overlay; clicking the backdrop or the close control drops the fragment.
pub fn render_modal(anchor: &str, view: &ModalView) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div id=\"{anchor}\" class=\"modal\">\n<a class=\"modal-backdrop\" href=\"#\"></a>\n\
         <div class=\"modal-content\">\n<a class=\"close\" href=\"#\">&times;</a>\n\
         <h2 class=\"modal-title\">{}</h2>\n<p class=\"modal-date\">{}</p>\n",
        escape(&view.title),
        escape(&view.date),
    ));

    if view.image.visible {
        html.push_str(&format!(
            "<img class=\"modal-image\" src=\"{}\" alt=\"{}\" />\n",
            escape(&view.image.src),
            escape(&view.image.alt)
        ));
    }
    if view.video.visible {
        html.push_str(&format!(
            "<iframe class=\"modal-video\" src=\"{}\" allowfullscreen></iframe>\n",
            escape(&view.video.src)
        ));
    }

    html.push_str(&format!(
        "<p class=\"modal-explanation\">{}</p>\n",
        escape(&view.explanation)
    ));
    if let Some(copyright) = &view.copyright {
        html.push_str(&format!(
            "<p class=\"modal-copyright\">&copy; {}</p>\n",
            escape(copyright.trim())
        ));
    }
    html.push_str("</div>\n</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::render_cards;
    use crate::core::gallery::{EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE};
    use crate::core::{MediaItem, MediaType};
    use chrono::NaiveDate;

    fn items() -> Vec<MediaItem> {
        vec![
            MediaItem {
                title: "Rosette <Nebula>".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                explanation: "Red & pink.".to_string(),
                media_type: MediaType::Image,
                url: "https://example.com/rosette.jpg".to_string(),
                hdurl: None,
                copyright: Some("\nJane Doe\n".to_string()),
            },
            MediaItem {
                title: "Launch".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
                explanation: "Liftoff.".to_string(),
                media_type: MediaType::Video,
                url: "https://www.youtube.com/embed/launch01".to_string(),
                hdurl: None,
                copyright: None,
            },
        ]
    }

    fn input() -> DateRangeInput {
        DateRangeInput::new(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap())
    }

    #[test]
    fn test_page_with_cards() {
        let input = input();
        let gallery = GalleryState::Cards(render_cards(&items()));
        let html = render_page(&PageView {
            input: &input,
            fact: Some("Light takes 8 minutes."),
            gallery: &gallery,
        });

        assert_eq!(html.matches("class=\"gallery-item\"").count(), 2);
        assert_eq!(html.matches("class=\"modal\"").count(), 2);
        assert!(html.contains("Rosette &lt;Nebula&gt;"));
        assert!(html.contains("January 5, 2024"));
        assert!(html.contains("href=\"#apod-2\""));
        assert!(html.contains("<div id=\"apod-2\" class=\"modal\">"));
        assert!(html.contains("https://img.youtube.com/vi/launch01/maxresdefault.jpg"));
        assert!(html.contains("<iframe class=\"modal-video\" src=\"https://www.youtube.com/embed/launch01\""));
        assert!(html.contains("&copy; Jane Doe"));
        assert!(html.contains("Light takes 8 minutes."));
        assert!(html.contains("min=\"1995-06-16\" max=\"2024-01-09\" value=\"2024-01-01\""));

        let first = html.find("Rosette &lt;Nebula&gt;").unwrap();
        let second = html.find("gallery-item-title\">Launch").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_page_placeholders() {
        let input = input();
        for (state, message) in [
            (GalleryState::Empty, EMPTY_MESSAGE),
            (GalleryState::Failed, ERROR_MESSAGE),
        ] {
            let html = render_page(&PageView {
                input: &input,
                fact: None,
                gallery: &state,
            });
            assert!(html.contains(&escape(message)));
            assert!(!html.contains("class=\"gallery-item\""));
            assert!(!html.contains("Did You Know?"));
        }
    }

    #[test]
    fn test_loading_placeholder() {
        let html = render_gallery(&GalleryState::Loading);

        assert!(html.contains("<div class=\"loading\">"));
        assert!(html.contains("🚀"));
        assert!(html.contains(LOADING_MESSAGE));
        assert!(!html.contains("gallery-item"));
    }

    #[test]
    fn test_same_day_items_get_distinct_anchors() {
        let mut same_day = items();
        same_day[1].date = same_day[0].date;
        let gallery = GalleryState::Cards(render_cards(&same_day));
        let input = input();
        let html = render_page(&PageView {
            input: &input,
            fact: None,
            gallery: &gallery,
        });

        for anchor in ["apod-1", "apod-2"] {
            assert_eq!(html.matches(&format!("href=\"#{}\"", anchor)).count(), 1);
            assert_eq!(html.matches(&format!("id=\"{}\"", anchor)).count(), 1);
        }
    }

    #[test]
    fn test_modal_shows_only_matching_media() {
        let mut modal = ModalController::new();
        modal.show(&items()[0]);
        let html = render_modal("apod-2024-01-05", modal.view());

        assert!(html.contains("class=\"modal-image\""));
        assert!(!html.contains("<iframe"));
        assert!(html.contains("Red &amp; pink."));
    }
}
