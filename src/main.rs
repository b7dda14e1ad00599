//! `prism` - terminal front end for the PRISM client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use prism_client::adapters::{FileLocalStorage, HttpBackend, HttpBackendConfig};
use prism_client::application::{
    AnalyzeChartCommand, AnalyzeChartHandler, AnalyzeDecisionCommand, AnalyzeDecisionError,
    AnalyzeDecisionHandler, AnalyzeDecisionOutcome, AuthenticateCommand, AuthenticateError,
    AuthenticateHandler, GatedShell, GetHistoryHandler, HistoryError, PaymentError,
    ProcessPaymentCommand, ProcessPaymentHandler, ResearchError, SessionStore, SessionStoreError,
    ShellError, ShellView,
};
use prism_client::config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
use prism_client::domain::decision::{DecisionAction, DecisionForm, Timeframe};
use prism_client::domain::membership::Currency;
use prism_client::domain::shell::{ShellState, Tab};
use prism_client::ports::{ApiError, AuthMode};
use prism_client::presentation;

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "PRISM decision intelligence client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides PRISM__API__BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current screen for the stored session
    Status,
    /// Sign in (or register) and store the session
    Login {
        /// Create a new account instead of signing in
        #[arg(long)]
        register: bool,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PRISM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Submit a decision for analysis
    Analyze {
        #[arg(long)]
        asset: String,
        #[arg(long, default_value = "BUY")]
        action: DecisionAction,
        #[arg(long)]
        reasoning: String,
        #[arg(long, default_value = "MID_TERM")]
        timeframe: Timeframe,
        /// Conviction, 1-10
        #[arg(long, default_value_t = 5)]
        conviction: i32,
    },
    /// List past decisions
    History,
    /// Upload a chart image for vision analysis
    Research { image: PathBuf },
    /// Show plans
    Pricing {
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Upgrade to the paid plan
    Subscribe {
        #[arg(long)]
        currency: Currency,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] prism_client::config::ValidationError),

    #[error("{0}")]
    Backend(#[from] ApiError),

    #[error("{0}")]
    Shell(#[from] ShellError),

    #[error("{0}")]
    Session(#[from] SessionStoreError),

    #[error("{0}")]
    Authenticate(#[from] AuthenticateError),

    #[error("{0}")]
    Analyze(#[from] AnalyzeDecisionError),

    #[error("{0}")]
    History(#[from] HistoryError),

    #[error("{0}")]
    Research(#[from] ResearchError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("cannot read {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::InvalidConfig(_) => 2,
            _ => 1,
        }
    }
}

struct App {
    store: Arc<SessionStore>,
    shell: GatedShell,
    backend: Arc<HttpBackend>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    init_tracing(&config.logging);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn load_config(base_url: Option<&str>) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = base_url {
        config.api.base_url = url.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    let storage = Arc::new(FileLocalStorage::new(&config.storage.path));
    let store = Arc::new(SessionStore::new(storage));
    let backend = Arc::new(HttpBackend::new(HttpBackendConfig::from(&config.api))?);
    let shell = GatedShell::new(store.clone());

    // Rehydrate before any gating decision
    store.initialize().await;
    shell.wait_ready().await?;

    let app = App {
        store,
        shell,
        backend,
    };

    match command {
        Commands::Status => status(&app).await,
        Commands::Login {
            register,
            email,
            password,
        } => {
            let mode = if register {
                AuthMode::Register
            } else {
                AuthMode::Login
            };
            login(&app, mode, email, password).await
        }
        Commands::Logout => {
            app.store.logout().await?;
            app.shell.sync().await?;
            print!("{}", presentation::render_landing());
            Ok(())
        }
        Commands::Analyze {
            asset,
            action,
            reasoning,
            timeframe,
            conviction,
        } => {
            let form = DecisionForm {
                asset,
                action,
                reasoning,
                timeframe,
                conviction,
            };
            analyze(&app, form).await
        }
        Commands::History => history(&app).await,
        Commands::Research { image } => research(&app, image).await,
        Commands::Pricing { currency } => pricing(&app, currency).await,
        Commands::Subscribe { currency } => subscribe(&app, currency).await,
    }
}

/// Selects `tab`, printing the landing page when there is no session.
async fn open_tab(app: &App, tab: Tab) -> Result<(), CliError> {
    match app.shell.select_tab(tab).await {
        Ok(_) => {
            print_chrome(app, tab);
            Ok(())
        }
        Err(ShellError::NotAuthenticated) => {
            print!("{}", presentation::render_landing());
            Err(ShellError::NotAuthenticated.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_chrome(app: &App, tab: Tab) {
    if let Some(identity) = app.store.snapshot().identity {
        print!("{}", presentation::render_header(&identity));
    }
    println!("{}", presentation::render_nav(tab));
}

async fn status(app: &App) -> Result<(), CliError> {
    match app.shell.current_view().await {
        ShellView::Splash => print!("{}", presentation::render_splash()),
        ShellView::Landing => print!("{}", presentation::render_landing()),
        ShellView::Tab(tab) => print_chrome(app, tab),
    }
    Ok(())
}

async fn login(app: &App, mode: AuthMode, email: String, password: String) -> Result<(), CliError> {
    let handler = AuthenticateHandler::new(app.backend.clone(), app.store.clone());
    handler
        .handle(AuthenticateCommand {
            mode,
            email,
            password,
        })
        .await?;

    if let ShellState::Authenticated(tab) = app.shell.sync().await? {
        print_chrome(app, tab);
    }
    Ok(())
}

async fn analyze(app: &App, form: DecisionForm) -> Result<(), CliError> {
    open_tab(app, Tab::Overview).await?;

    let handler = AnalyzeDecisionHandler::new(app.backend.clone(), app.store.clone());
    let outcome = handler.handle(AnalyzeDecisionCommand { form }).await;
    app.shell.sync().await?;

    match outcome? {
        AnalyzeDecisionOutcome::Report(result) => print!("{}", presentation::render_report(&result)),
        AnalyzeDecisionOutcome::UpgradeRequired { detail } => {
            print!("{}", presentation::render_upgrade_prompt(&detail))
        }
    }
    Ok(())
}

async fn history(app: &App) -> Result<(), CliError> {
    open_tab(app, Tab::History).await?;

    let handler = GetHistoryHandler::new(app.backend.clone(), app.store.clone());
    let records = handler.handle().await?;
    print!("{}", presentation::render_history(&records));
    Ok(())
}

async fn research(app: &App, image: PathBuf) -> Result<(), CliError> {
    open_tab(app, Tab::Research).await?;

    let bytes = tokio::fs::read(&image)
        .await
        .map_err(|source| CliError::ReadImage {
            path: image.clone(),
            source,
        })?;
    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let handler = AnalyzeChartHandler::new(app.backend.clone(), app.store.clone());
    let report = handler
        .handle(AnalyzeChartCommand { file_name, bytes })
        .await?;
    print!("{}", presentation::render_vision(&report));
    Ok(())
}

async fn pricing(app: &App, currency: Option<Currency>) -> Result<(), CliError> {
    open_tab(app, Tab::Pricing).await?;

    let identity = app.store.snapshot().identity;
    let currency = currency
        .or_else(|| identity.as_ref().and_then(|i| i.currency()))
        .unwrap_or_default();
    print!("{}", presentation::render_pricing(currency, identity.as_ref()));
    Ok(())
}

async fn subscribe(app: &App, currency: Currency) -> Result<(), CliError> {
    open_tab(app, Tab::Pricing).await?;

    let handler = ProcessPaymentHandler::new(app.backend.clone(), app.store.clone());
    let outcome = handler.handle(ProcessPaymentCommand { currency }).await;
    app.shell.sync().await?;

    let receipt = outcome?;
    print!("{}", presentation::render_receipt(&receipt));
    Ok(())
}
