//! Wiring & DI. Entry point: bootstrap adapters, inject into page models, run UI.
//! No business logic here.

use dotenv::dotenv;
use leadsense::adapters::api::{HttpLeadApi, MockLeadApi};
use leadsense::adapters::clipboard::SystemClipboard;
use leadsense::adapters::persistence::CacheJson;
use leadsense::adapters::ui::tui::TuiInputPort;
use leadsense::ports::{ClipboardPort, InputPort, LeadApiPort, LeadCachePort};
use leadsense::shared::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Log lines would interleave with the prompts; stay quiet unless RUST_LOG asks.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    leadsense::adapters::ui::init_ui();

    let api: Arc<dyn LeadApiPort> = if cfg.is_offline() {
        warn!("LEADSENSE_OFFLINE set, using in-memory mock backend");
        Arc::new(MockLeadApi::new())
    } else {
        let url = cfg.api_url_or_default();
        info!(%url, "backend");
        Arc::new(HttpLeadApi::new(url))
    };

    let cache_impl = CacheJson::new(cfg.cache_path());
    info!(path = %cache_impl.path().display(), "client cache");
    cache_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let cache: Arc<dyn LeadCachePort> = Arc::new(cache_impl);

    let clipboard_impl = SystemClipboard::new(cfg.clipboard_cmd.as_deref());
    match clipboard_impl.program() {
        Some(program) => info!(program, "clipboard command"),
        None => warn!("no clipboard command found; copying will fail"),
    }
    let clipboard: Arc<dyn ClipboardPort> = Arc::new(clipboard_impl);

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        api,
        cache,
        clipboard,
        cfg.export_path(),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
