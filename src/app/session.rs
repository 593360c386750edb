use crate::core::date_range::DateRangeInput;
use crate::core::facts::FactDisplay;
use crate::core::gallery::GalleryController;
use crate::core::modal::{ClickTarget, Key, ModalController, ModalEvent};
use crate::core::page::{render_page, PageView};
use crate::core::{ApodSource, Notifier, Storage};
use anyhow::{bail, Context};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;

pub const PAGE_FILE: &str = "index.html";

const HELP: &str = "\
commands:
  fetch [start end]  fetch a date range (YYYY-MM-DD); runs in the background
  list               list the cards currently in the gallery
  open <n>           open card n in the detail view
  close              click the close control
  outside            click outside the detail view
  esc                press Escape
  fact               show the fact of this session
  save               write the page to the output directory
  help               show this help
  quit               wait for pending fetches, save and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(Option<(String, String)>),
    List,
    Open(usize),
    Modal(ModalEvent),
    Fact,
    Save,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = parts.collect();

        let command = match (name, args.as_slice()) {
            ("fetch", []) => Command::Fetch(None),
            ("fetch", [start, end]) => Command::Fetch(Some((start.to_string(), end.to_string()))),
            ("list", []) => Command::List,
            ("open", [n]) => {
                let n: usize = n.parse().with_context(|| format!("'{}' is not a card number", n))?;
                if n == 0 {
                    bail!("cards are numbered from 1");
                }
                Command::Open(n)
            }
            ("close", []) => Command::Modal(ModalEvent::CloseControlClicked),
            ("outside", []) => Command::Modal(ModalEvent::Clicked(ClickTarget::Backdrop)),
            ("esc", []) => Command::Modal(ModalEvent::KeyPressed(Key::Escape)),
            ("fact", []) => Command::Fact,
            ("save", []) => Command::Save,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("unknown command '{}' (try 'help')", line.trim()),
        };
        Ok(command)
    }
}

/// One page lifetime: the gallery, its detail view, the fact and the date fields.
pub struct Session<S: ApodSource + 'static, N: Notifier + 'static, St: Storage> {
    gallery: Arc<GalleryController<S, N>>,
    modal: ModalController,
    facts: FactDisplay,
    input: DateRangeInput,
    storage: St,
    pending: JoinSet<()>,
}

impl<S: ApodSource + 'static, N: Notifier + 'static, St: Storage> Session<S, N, St> {
    pub fn new(gallery: GalleryController<S, N>, input: DateRangeInput, storage: St) -> Self {
        Self {
            gallery: Arc::new(gallery),
            modal: ModalController::new(),
            facts: FactDisplay::new(),
            input,
            storage,
            pending: JoinSet::new(),
        }
    }

    pub fn gallery(&self) -> &GalleryController<S, N> {
        &self.gallery
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn facts(&self) -> &FactDisplay {
        &self.facts
    }

    /// Page load: show a fact and fetch the pre-filled range, if complete.
    ///
    /// A rejected range has already been alerted; it is returned so one-shot
    /// callers can stop there.
    pub async fn load(&mut self) -> crate::utils::error::Result<()> {
        let fact = self.facts.show_random_fact();
        tracing::debug!("Fact of the session: {}", fact);

        let (start, end) = (self.input.start_value(), self.input.end_value());
        if start.is_empty() || end.is_empty() {
            return Ok(());
        }
        self.gallery.fetch_range(start, end).await
    }

    /// Starts a fetch without waiting for it; later input keeps being handled.
    pub fn spawn_fetch(&mut self, range: Option<(String, String)>) {
        if let Some((start, end)) = range {
            self.input.set_start(start);
            self.input.set_end(end);
        }

        let gallery = Arc::clone(&self.gallery);
        let start = self.input.start_value().to_string();
        let end = self.input.end_value().to_string();
        self.pending.spawn(async move {
            if let Err(e) = gallery.fetch_range(&start, &end).await {
                tracing::debug!("Fetch not started: {}", e);
            }
        });
    }

    /// Waits for every fetch started so far.
    pub async fn wait_pending(&mut self) {
        while let Some(joined) = self.pending.join_next().await {
            if let Err(e) = joined {
                tracing::error!("❌ Fetch task failed: {}", e);
            }
        }
    }

    pub async fn save(&self) -> crate::utils::error::Result<usize> {
        let state = self.gallery.state().await;
        let html = render_page(&PageView {
            input: &self.input,
            fact: self.facts.text(),
            gallery: &state,
        });

        self.storage.write_file(PAGE_FILE, html.as_bytes()).await?;
        tracing::info!("📁 Page written with {} cards", state.cards().len());
        Ok(state.cards().len())
    }

    /// Handles one command and returns the text to show. `None` means quit.
    pub async fn handle(&mut self, command: Command) -> anyhow::Result<Option<String>> {
        let output = match command {
            Command::Fetch(range) => {
                self.spawn_fetch(range);
                format!(
                    "fetching {} → {}",
                    self.input.start_value(),
                    self.input.end_value()
                )
            }
            Command::List => {
                let state = self.gallery.state().await;
                match state.placeholder() {
                    Some(message) => message.to_string(),
                    None => state
                        .cards()
                        .iter()
                        .enumerate()
                        .map(|(i, card)| format!("{:>3}. {} ({})", i + 1, card.title, card.formatted_date))
                        .collect::<Vec<_>>()
                        .join("\n"),
                }
            }
            Command::Open(n) => {
                let card = match n.checked_sub(1) {
                    Some(index) => self.gallery.card(index).await,
                    None => None,
                }
                .with_context(|| format!("no card #{}", n))?;
                self.modal.show(&card.item);
                self.describe_modal()
            }
            Command::Modal(event) => {
                if self.modal.handle_event(&event) {
                    "closed".to_string()
                } else {
                    String::new()
                }
            }
            Command::Fact => self.facts.text().unwrap_or_default().to_string(),
            Command::Save => {
                let cards = self.save().await?;
                format!("saved {} ({} cards)", PAGE_FILE, cards)
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(output))
    }

    fn describe_modal(&self) -> String {
        let view = self.modal.view();
        let media = if view.video.visible {
            format!("video: {}", view.video.src)
        } else {
            format!("image: {}", view.image.src)
        };
        let mut text = format!("{}\n{}\n{}\n\n{}", view.title, view.date, media, view.explanation);
        if let Some(copyright) = &view.copyright {
            text.push_str(&format!("\n© {}", copyright.trim()));
        }
        text
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let result = match Command::parse(&line) {
                Ok(command) => self.handle(command).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(Some(output)) if output.is_empty() => {}
                Ok(Some(output)) => {
                    writer.write_all(output.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                }
                Ok(None) => break,
                Err(e) => {
                    writer.write_all(format!("error: {:#}\n", e).as_bytes()).await?;
                }
            }
            writer.flush().await?;
        }

        self.wait_pending().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("fetch").unwrap(), Command::Fetch(None));
        assert_eq!(
            Command::parse("fetch 2024-01-01 2024-01-09").unwrap(),
            Command::Fetch(Some(("2024-01-01".to_string(), "2024-01-09".to_string())))
        );
        assert_eq!(Command::parse(" open 3 ").unwrap(), Command::Open(3));
        assert_eq!(
            Command::parse("esc").unwrap(),
            Command::Modal(ModalEvent::KeyPressed(Key::Escape))
        );
        assert_eq!(
            Command::parse("outside").unwrap(),
            Command::Modal(ModalEvent::Clicked(ClickTarget::Backdrop))
        );
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("open").is_err());
        assert!(Command::parse("open zero").is_err());
        assert!(Command::parse("open 0").is_err());
        assert!(Command::parse("fetch 2024-01-01").is_err());
        assert!(Command::parse("launch").is_err());
    }
}
