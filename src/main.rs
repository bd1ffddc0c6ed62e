use atrium_core::config::Config;
use atrium_data::{invoices, Dataset};
use atrium_tui::{InvoiceSource, Theme};
use clap::Parser;

#[derive(Parser)]
#[command(name = "atrium", about = "Atrium: terminal admin dashboard")]
struct Cli {
    /// Write debug logs to /tmp/atrium-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Use the bundled invoice list instead of fetching it.
    #[arg(long)]
    offline: bool,

    /// Colour theme (dark or light). Overrides the config file.
    #[arg(long)]
    theme: Option<String>,

    /// Endpoint returning `{"users": [...]}` for the invoices view.
    #[arg(long, value_name = "URL")]
    invoices_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/atrium-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("atrium debug log started; tail -f /tmp/atrium-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        Config::defaults()
    });
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }
    if let Some(url) = cli.invoices_url {
        config.data.invoices_url = url;
    }
    config.data.offline |= cli.offline;

    let theme = Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using dark");
        Theme::load_dark()
    });

    // Kept alive for the whole session so the fetch task can finish.
    let runtime = tokio::runtime::Runtime::new()?;
    let source = if config.data.offline {
        tracing::info!("offline: using bundled invoices");
        InvoiceSource::Static(Dataset::Invoices.records())
    } else {
        InvoiceSource::Pending(invoices::spawn_fetch(
            runtime.handle(),
            config.data.invoices_url.clone(),
        ))
    };

    let result = atrium_tui::run(config, theme, source);
    runtime.shutdown_background();
    result
}
