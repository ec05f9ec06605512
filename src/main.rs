use anyhow::Context;
use clap::Parser;
use deck_checklist::adapters::export;
use deck_checklist::config::{CliConfig, Command, DeckArgs};
use deck_checklist::utils::error::ErrorSeverity;
use deck_checklist::utils::{logger, validation::Validate};
use deck_checklist::{
    AppConfig, CardIndex, CardRepository, DeckApp, FilePreferences, LocalStorage, RefreshEngine,
    ScryfallSource,
};
use std::io::Read;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting deck-checklist");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Invalid arguments: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut config = AppConfig::load(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli.command, &config).await {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, config: &AppConfig) -> deck_checklist::Result<()> {
    match command {
        Command::Fetch => fetch(config).await,
        Command::Check { deck } => {
            let mut app = open_app(config, deck).await?;
            print_checklist(&mut app);
            Ok(())
        }
        Command::Export { deck, output } => {
            let mut app = open_app(config, deck).await?;
            let view = app.view();
            let rows = match output {
                Some(path) => export::write_csv(view, std::fs::File::create(path)?)?,
                None => export::write_csv(view, std::io::stdout().lock())?,
            };
            tracing::info!("📁 Exported {} rows", rows);
            Ok(())
        }
        Command::Prefs {
            toggle_deck_box,
            toggle_hide_complete,
        } => {
            let prefs = FilePreferences::open(config.preferences_path())?;
            let mut app = DeckApp::restore(prefs, CardIndex::default(), config.display.default_sort);
            if *toggle_deck_box {
                app.toggle_deck_box()?;
            }
            if *toggle_hide_complete {
                app.toggle_hide_complete()?;
            }

            println!("sort:          {}", app.sort_key());
            println!("show deck:     {}", app.show_deck());
            println!("hide complete: {}", app.hide_complete());
            println!("cards updated: {}", display_or_never(app.updated_at()));
            println!("total cards:   {}", app.total_cards());
            println!("saved deck:    {} lines", app.deck_text().lines().count());
            Ok(())
        }
    }
}

async fn fetch(config: &AppConfig) -> deck_checklist::Result<()> {
    let source = ScryfallSource::new(config.clone())?;
    let repository = CardRepository::new(
        LocalStorage::new(&config.storage.data_dir),
        config.storage.cards_file.clone(),
    );
    let engine = RefreshEngine::new(source, repository);
    let download = engine.run().await?;

    let prefs = FilePreferences::open(config.preferences_path())?;
    let mut app = DeckApp::restore(prefs, CardIndex::default(), config.display.default_sort);
    let view = app.apply_download(download)?;

    println!("✅ Card database refreshed");
    if !view.cards.is_empty() {
        println!(
            "Saved deck: {} unique cards, {} still unresolved",
            view.checklist.unique_card_count(),
            view.unresolved().len()
        );
    }
    Ok(())
}

async fn open_app(
    config: &AppConfig,
    args: &DeckArgs,
) -> deck_checklist::Result<DeckApp<FilePreferences>> {
    let repository = CardRepository::new(
        LocalStorage::new(&config.storage.data_dir),
        config.storage.cards_file.clone(),
    );
    let index = repository.load_index().await?;
    if index.is_empty() {
        tracing::warn!("⚠️ Card cache is empty; every card will be unresolved. Run `fetch` first.");
    }

    let prefs = FilePreferences::open(config.preferences_path())?;
    let mut app = DeckApp::restore(prefs, index, config.display.default_sort);

    if let Some(path) = &args.deck {
        let deck_text = read_deck(path).await?;
        app.set_deck(&deck_text)?;
    }
    if let Some(sort_key) = args.sort {
        app.set_sort(sort_key)?;
    }
    Ok(app)
}

async fn read_deck(path: &Path) -> deck_checklist::Result<String> {
    if path == Path::new("-") {
        let mut deck_text = String::new();
        std::io::stdin().read_to_string(&mut deck_text)?;
        return Ok(deck_text);
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

fn print_checklist(app: &mut DeckApp<FilePreferences>) {
    if app.should_show_deck() {
        println!("Deck:");
        for line in app.deck_text().lines() {
            println!("  {}", line);
        }
        println!();
    }

    let groups = app.visible_groups();
    let view = app.view();
    for group in &groups {
        let marker = if group.complete { " ✅" } else { "" };
        println!("== {} ({}){}", group.key, group.cards.len(), marker);
        for card in &group.cards {
            let boxes: String = view
                .checklist
                .flags(card.name())
                .unwrap_or_default()
                .iter()
                .map(|&owned| if owned { '■' } else { '□' })
                .collect();
            println!("  {} {}x {} [{}]", boxes, card.amount, card.name(), card.rarity());
        }
    }

    println!();
    println!(
        "Unique cards: {}, copies still needed: {}",
        view.checklist.unique_card_count(),
        view.checklist.incomplete_count()
    );

    let unresolved = view.unresolved();
    if !unresolved.is_empty() {
        println!("⚠️ Not found in the card database:");
        for card in unresolved {
            println!("  {}x {}", card.amount, card.name());
        }
    }
}

fn display_or_never(value: &str) -> &str {
    if value.is_empty() {
        "never"
    } else {
        value
    }
}
