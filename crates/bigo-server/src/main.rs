//! bigo HTTP server.
//!
//! Reads configuration from environment variables (see [`Config`]), registers
//! a font for plot text, opens (or creates) the SQLite analysis store, then
//! serves the HTTP API until SIGINT.
//!
//! ## Quick start
//!
//! ```bash
//! # Development (./analysis.db, port 3000, info log)
//! cargo run --bin bigo-server --release
//!
//! # Custom config
//! BIGO_PORT=8080 \
//! BIGO_DATABASE=/var/lib/bigo/analysis.db \
//! BIGO_LOG_LEVEL=debug \
//! BIGO_MAX_ITEMS=20000 \
//!   cargo run --bin bigo-server --release
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use bigo_algo::Registry;
use bigo_plot::{default_font_candidates, register_first_available, register_font_file, CurveRenderer};
use bigo_server::{serve, AppState, Config};
use bigo_table::{AnalysisStore, SqliteAnalysisStore, StrictStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────────
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .compact()
        .init();

    info!(
        version  = env!("CARGO_PKG_VERSION"),
        database = %config.database,
        port     = config.port,
        "bigo starting"
    );

    // ── Plot font ─────────────────────────────────────────────────────────────
    register_plot_font(&config);

    // ── Analysis store ────────────────────────────────────────────────────────
    if let Some(parent) = Path::new(&config.database).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let sqlite = SqliteAnalysisStore::open(&config.database)
        .with_context(|| format!("failed to open analysis store at {}", config.database))?;
    info!(analyses = sqlite.count()?, "analysis store ready");

    let store: Arc<dyn AnalysisStore> = if config.strict_save {
        info!(tolerance_ms = config.strict_tolerance_ms, "strict save checks enabled");
        Arc::new(StrictStore::new(sqlite, config.strict_tolerance_ms))
    } else {
        Arc::new(sqlite)
    };

    // ── Registry + renderer ───────────────────────────────────────────────────
    let registry = Registry::builtin();
    info!(algorithms = %registry.keys().join(", "), "algorithm registry loaded");

    let renderer = CurveRenderer::new(config.plot_width, config.plot_height)
        .context("invalid plot dimensions")?;

    // ── HTTP API ──────────────────────────────────────────────────────────────
    let addr = config
        .addr()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let state = AppState::new(registry, store, renderer).with_max_items(config.max_items);
    serve(state, addr, config.max_body_bytes).await?;

    info!("bigo shutdown complete");
    Ok(())
}

/// Plot text needs a font. An explicit `BIGO_FONT_PATH` wins; otherwise the
/// usual system locations are searched. Without one, curves are drawn unlabelled.
fn register_plot_font(config: &Config) {
    if let Some(path) = &config.font_path {
        match register_font_file(Path::new(path)) {
            Ok(()) => return,
            Err(e) => warn!(font = %path, error = %e, "configured plot font unusable, trying system fonts"),
        }
    }

    if register_first_available(default_font_candidates()).is_none() {
        warn!("no plot font found; curves will be rendered without labels");
    }
}
