use apod_gallery::core::ConfigProvider;
use apod_gallery::utils::{logger, validation::Validate};
use apod_gallery::{
    ApodClient, CliConfig, ConsoleNotifier, DateRangeInput, GalleryController, LocalStorage,
    Session, TomlConfig,
};
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting apod-gallery");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file_config = match TomlConfig::from_file(&path) {
                Ok(file_config) => file_config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            // 命令列日期優先於設定檔
            let start = config
                .start_date
                .clone()
                .or_else(|| file_config.start_date().map(str::to_string));
            let end = config
                .end_date
                .clone()
                .or_else(|| file_config.end_date().map(str::to_string));
            run(&file_config, start, end, config.interactive).await
        }
        None => {
            let (start, end) = (config.start_date.clone(), config.end_date.clone());
            run(&config, start, end, config.interactive).await
        }
    }
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    start: Option<String>,
    end: Option<String>,
    interactive: bool,
) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut input = DateRangeInput::new(chrono::Local::now().date_naive());
    if let Some(start) = start {
        input.set_start(start);
    }
    if let Some(end) = end {
        input.set_end(end);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let page_path = storage.full_path(apod_gallery::app::session::PAGE_FILE);
    let gallery = GalleryController::new(ApodClient::from_config(config), ConsoleNotifier);
    let mut session = Session::new(gallery, input, storage);

    let loaded = session.load().await;
    if let Some(fact) = session.facts().text() {
        println!("🔭 Did you know? {}", fact);
    }

    if interactive {
        println!("Type 'help' for commands.");
        session
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
    } else if let Err(e) = loaded {
        tracing::error!("❌ Nothing fetched: {}", e);
        std::process::exit(1);
    }

    let state = session.gallery().state().await;
    match session.save().await {
        Ok(cards) => {
            if let Some(message) = state.placeholder() {
                println!("{}", message);
            }
            println!("✅ {} cards", cards);
            println!("📁 Output saved to: {}", page_path);
        }
        Err(e) => {
            tracing::error!("❌ Could not write page: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
