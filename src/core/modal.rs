use crate::core::format::format_long_date;
use crate::core::MediaItem;

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Open(MediaItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay around the content box.
    Backdrop,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    CloseControlClicked,
    Clicked(ClickTarget),
    KeyPressed(Key),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSlot {
    pub visible: bool,
    pub src: String,
    pub alt: String,
}

/// What the overlay currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalView {
    pub visible: bool,
    pub title: String,
    pub date: String,
    pub explanation: String,
    pub copyright: Option<String>,
    pub image: MediaSlot,
    pub video: MediaSlot,
    pub body_scroll_locked: bool,
}

/// Detail overlay for a single item.
///
/// The view keeps the last populated text after closing, like the page does;
/// only visibility, scroll lock and the video source are reset.
#[derive(Debug, Clone)]
pub struct ModalController {
    state: ModalState,
    view: ModalView,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            view: ModalView::default(),
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn show(&mut self, item: &MediaItem) {
        let view = &mut self.view;
        view.title = item.title.clone();
        view.date = format_long_date(item.date);
        view.explanation = item.explanation.clone();
        view.copyright = item.copyright.clone();

        if item.is_video() {
            view.image.visible = false;
            view.video = MediaSlot {
                visible: true,
                src: item.url.clone(),
                alt: String::new(),
            };
        } else {
            view.video.visible = false;
            view.image = MediaSlot {
                visible: true,
                src: item.url.clone(),
                alt: item.title.clone(),
            };
        }

        view.visible = true;
        view.body_scroll_locked = true;
        self.state = ModalState::Open(item.clone());
        tracing::debug!("Modal opened for {}", item.date);
    }

    pub fn close(&mut self) {
        self.view.visible = false;
        self.view.body_scroll_locked = false;
        // 清掉影片來源以停止播放
        self.view.video.src.clear();
        self.state = ModalState::Closed;
    }

    /// Applies a UI event. Returns `true` when the modal was closed by it.
    pub fn handle_event(&mut self, event: &ModalEvent) -> bool {
        let closes = match event {
            ModalEvent::CloseControlClicked => self.is_open(),
            ModalEvent::Clicked(ClickTarget::Backdrop) => self.is_open(),
            ModalEvent::Clicked(ClickTarget::Content) => false,
            ModalEvent::KeyPressed(Key::Escape) => self.is_open(),
            ModalEvent::KeyPressed(Key::Other(_)) => false,
        };

        if closes {
            self.close();
        }
        closes
    }
}
