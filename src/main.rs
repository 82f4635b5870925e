// ============================================================================
// WalletView - Liste des comptes du wallet
// ============================================================================
// Programme TUI qui affiche les comptes du wallet en crypto ou en fiat.
// Le choix de l'actif et de la devise fiat est persisté dans prefs.json.
//
// CONCEPTS RUST CLÉS :
// 1. Composition root : main() construit le store, l'état de devise et App
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread + tokio runtime pour les appels réseau
// 4. Arc<Mutex<App>> pour partager l'état entre l'UI et le worker
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use walletview::api::fetch_spot_price;
use walletview::app::App;
use walletview::config::{load_accounts, Config};
use walletview::currency::CurrencyState;
use walletview::models::{CryptoCurrency, PriceQuote};
use walletview::prefs::FilePrefs;
use walletview::ui::{events::EventHandler, render};

type SharedApp = Arc<Mutex<App<FilePrefs>>>;

// ============================================================================
// Commandes et résultats du worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Récupère le cours de chaque couple (actif, fiat)
    FetchPrices {
        requests: Vec<(CryptoCurrency, String)>,
    },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    PriceLoaded(PriceQuote),

    PriceError {
        asset: CryptoCurrency,
        fiat: String,
        error: String,
    },
}

/// Verrouille App même si un thread a paniqué en le tenant
fn lock_app(app: &SharedApp) -> MutexGuard<'_, App<FilePrefs>> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
//
// # Utilisation
// ```bash
// tail -f ~/.local/share/walletview/logs/walletview.log.*
// RUST_LOG=walletview=trace cargo run
// ```
// ============================================================================

fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "walletview.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour walletview, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "walletview=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::load()?;

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(data_dir = %config.data_dir.display(), locale = %config.locale, "WalletView starting up");

    // Composition root : store → état de devise → App
    let prefs = FilePrefs::open(config.prefs_path())?;
    let currency = CurrencyState::init(prefs);
    info!(
        currency = %currency.crypto_currency(),
        fiat = %currency.fiat_unit(),
        "Currency state initialized"
    );

    let accounts = load_accounts(&config.accounts_path())?;
    let app: SharedApp = Arc::new(Mutex::new(App::new(accounts, currency, config.locale.clone())));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone());

    // Premier chargement des cours
    request_prices(&app, &command_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Envoie une demande de cours pour tous les actifs des comptes
fn request_prices(app: &SharedApp, command_tx: &mpsc::Sender<AppCommand>) {
    let requests = lock_app(app).price_requests();
    if requests.is_empty() {
        return;
    }
    if command_tx.send(AppCommand::FetchPrices { requests }).is_err() {
        warn!("Worker thread is gone, cannot fetch prices");
    }
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// Thread séparé avec son propre runtime tokio : les appels réseau ne
// bloquent jamais l'UI.
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: SharedApp,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, prices disabled");
                return;
            }
        };

        // recv() échoue quand le channel est fermé : on quitte
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::FetchPrices { requests } => {
                    lock_app(&app).start_loading(Some(format!(
                        "Fetching {} price(s)...",
                        requests.len()
                    )));

                    for (asset, fiat) in requests {
                        let result = runtime.block_on(fetch_spot_price(asset, &fiat));

                        let message = match result {
                            Ok(quote) => AppResult::PriceLoaded(quote),
                            Err(e) => {
                                error!(asset = %asset, fiat = %fiat, error = ?e, "Failed to fetch price");
                                AppResult::PriceError {
                                    asset,
                                    fiat,
                                    error: e.to_string(),
                                }
                            }
                        };

                        if result_tx.send(message).is_err() {
                            info!("Result channel closed, worker exiting");
                            return;
                        }
                    }

                    lock_app(&app).stop_loading();
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker
//   1. Render
//   2. Input
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: SharedApp,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        if !lock_app(&app).is_running() {
            break;
        }

        // 0. RÉSULTATS : try_recv ne bloque pas
        loop {
            match result_rx.try_recv() {
                Ok(AppResult::PriceLoaded(quote)) => {
                    let mut app_lock = lock_app(&app);
                    app_lock.update_price(quote);
                    app_lock.clear_status();
                }
                Ok(AppResult::PriceError { asset, fiat, error }) => {
                    lock_app(&app).set_status(format!(
                        "Price {}-{} unavailable: {}",
                        asset.symbol(),
                        fiat,
                        error
                    ));
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected!");
                    break;
                }
            }
        }

        // 1. RENDER
        {
            let app_lock = lock_app(&app);
            terminal.draw(|frame| render(frame, &*app_lock))?;
        }

        // 2. INPUT
        match events.next() {
            Ok(event) => {
                let needs_prices = handle_event(&mut lock_app(&app), event);
                if needs_prices {
                    request_prices(&app, &command_tx);
                }
            }
            Err(e) => {
                debug!(error = ?e, "Failed to read terminal event");
            }
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// Retourne true si les cours doivent être rechargés.
fn handle_event(app: &mut App<FilePrefs>, event: walletview::ui::events::Event) -> bool {
    use walletview::ui::events::{
        is_archive_event, is_asset_toggle_event, is_display_toggle_event, is_down_event,
        is_make_default_event, is_next_fiat_event, is_quit_event, is_refresh_event,
        is_show_all_event, is_up_event, is_watch_only_event, Event,
    };

    // Toute touche autre que 'q' annule la confirmation de quit
    if matches!(event, Event::Key(_)) && !is_quit_event(&event) {
        app.cancel_quit();
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_up_event(&event) => app.navigate_up(),
        Event::Key(_) if is_down_event(&event) => app.navigate_down(),

        Event::Key(_) if is_display_toggle_event(&event) => app.toggle_display(),
        Event::Key(_) if is_asset_toggle_event(&event) => app.toggle_crypto_currency(),
        Event::Key(_) if is_show_all_event(&event) => app.toggle_show_all_assets(),

        Event::Key(_) if is_next_fiat_event(&event) => {
            let fiat = app.next_fiat();
            info!(fiat = %fiat, "User changed fiat currency");
            return true;
        }

        Event::Key(_) if is_archive_event(&event) => app.toggle_archived_selected(),
        Event::Key(_) if is_watch_only_event(&event) => app.toggle_watch_only_selected(),
        Event::Key(_) if is_make_default_event(&event) => app.make_selected_default(),

        Event::Key(_) if is_refresh_event(&event) => {
            info!("User requested price refresh");
            return true;
        }

        _ => {
            // Tick et autres touches : rien à faire
        }
    }

    false
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
