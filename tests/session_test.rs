use anyhow::Result;
use apod_gallery::app::session::PAGE_FILE;
use apod_gallery::core::modal::ModalState;
use apod_gallery::core::Notifier;
use apod_gallery::{ApodClient, Command, DateRangeInput, GalleryController, LocalStorage, Session};
use chrono::NaiveDate;
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

type TestSession = Session<ApodClient, Arc<RecordingNotifier>, LocalStorage>;

fn mock_week(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/apod")
            .query_param("start_date", "2024-03-02")
            .query_param("end_date", "2024-03-10");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "title": "Sombrero Galaxy",
                    "date": "2024-03-09",
                    "explanation": "A hat in space.",
                    "media_type": "image",
                    "url": "https://example.com/m104.jpg",
                    "copyright": "A. Astronomer"
                },
                {
                    "title": "Solar Prominence",
                    "date": "2024-03-10",
                    "explanation": "Plasma loops.",
                    "media_type": "video",
                    "url": "https://www.youtube.com/embed/sun0310"
                }
            ]));
    })
}

fn session_for(server: &MockServer, output: &TempDir) -> (TestSession, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApodClient::new(server.url("/apod"), "test-key");
    let gallery = GalleryController::new(client, notifier.clone());
    let input = DateRangeInput::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    let storage = LocalStorage::new(output.path().to_str().unwrap().to_string());
    (Session::new(gallery, input, storage), notifier)
}

#[tokio::test]
async fn test_page_load_fetches_default_window() -> Result<()> {
    let server = MockServer::start();
    let api_mock = mock_week(&server);
    let output = TempDir::new()?;
    let (mut session, _) = session_for(&server, &output);

    session.load().await?;

    api_mock.assert();
    assert!(session.facts().text().is_some());
    assert_eq!(session.gallery().state().await.cards().len(), 2);

    let cards = session.save().await?;
    assert_eq!(cards, 2);

    let html = std::fs::read_to_string(output.path().join(PAGE_FILE))?;
    assert!(html.contains("Sombrero Galaxy"));
    assert!(html.contains("March 10, 2024"));
    assert!(html.contains("Did You Know?"));
    Ok(())
}

#[tokio::test]
async fn test_scripted_interaction() -> Result<()> {
    let server = MockServer::start();
    let api_mock = mock_week(&server);
    let output = TempDir::new()?;
    let (mut session, notifier) = session_for(&server, &output);

    // 先送出抓取，等背景工作結束
    let mut out = Vec::new();
    session
        .run("fetch 2024-03-02 2024-03-10\n".as_bytes(), &mut out)
        .await?;
    api_mock.assert();
    assert!(String::from_utf8(out)?.contains("fetching 2024-03-02 → 2024-03-10"));

    let mut out = Vec::new();
    session
        .run("list\nopen 2\n".as_bytes(), &mut out)
        .await?;
    let text = String::from_utf8(out)?;
    assert!(text.contains("  1. Sombrero Galaxy (March 9, 2024)"));
    assert!(text.contains("  2. Solar Prominence (March 10, 2024)"));
    assert!(text.contains("video: https://www.youtube.com/embed/sun0310"));

    let view = session.modal().view();
    assert!(view.visible && view.video.visible && !view.image.visible);
    assert!(view.body_scroll_locked);

    let mut out = Vec::new();
    session.run("esc\n".as_bytes(), &mut out).await?;
    assert_eq!(String::from_utf8(out)?, "closed\n");
    assert_eq!(session.modal().state(), &ModalState::Closed);
    assert!(session.modal().view().video.src.is_empty());
    assert!(!session.modal().view().body_scroll_locked);

    let mut out = Vec::new();
    session
        .run("open 1\noutside\nopen 1\nclose\nquit\nlist\n".as_bytes(), &mut out)
        .await?;
    let text = String::from_utf8(out)?;
    assert!(text.contains("image: https://example.com/m104.jpg"));
    assert!(text.contains("© A. Astronomer"));
    assert_eq!(text.matches("closed").count(), 2);
    // quit 之後的指令不處理
    assert!(!text.contains("1. Sombrero"));

    assert!(notifier.alerts.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_interactive_errors_are_reported() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/apod");
        then.status(200).json_body(serde_json::json!([]));
    });
    let output = TempDir::new()?;
    let (mut session, notifier) = session_for(&server, &output);

    let mut out = Vec::new();
    session
        .run(
            "close\nopen 4\nfetch 2024-03-10 2024-03-01\nwarp\nsave\n".as_bytes(),
            &mut out,
        )
        .await?;
    let text = String::from_utf8(out)?;

    // 詳細視窗本來就是關的，close 不輸出任何東西
    assert!(!text.contains("closed"));
    assert!(text.contains("error: no card #4"));
    assert!(text.contains("error: unknown command 'warp'"));
    assert!(text.contains("saved index.html (0 cards)"));
    api_mock.assert_hits(0);
    assert_eq!(
        notifier.alerts.lock().unwrap().as_slice(),
        ["Start date must be before end date."]
    );
    assert!(output.path().join(PAGE_FILE).exists());
    Ok(())
}

#[tokio::test]
async fn test_handle_help_and_fact() -> Result<()> {
    let server = MockServer::start();
    let output = TempDir::new()?;
    let (mut session, _) = session_for(&server, &output);

    let help = session.handle(Command::Help).await?.unwrap();
    assert!(help.contains("open <n>"));

    // 尚未載入頁面時沒有事實可顯示
    assert_eq!(session.handle(Command::Fact).await?, Some(String::new()));
    assert_eq!(session.handle(Command::Quit).await?, None);
    Ok(())
}
