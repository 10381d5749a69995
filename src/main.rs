//! StreamVis - Main Entry Point
//!
//! Opens a window showing the animated streaming topology background.

use std::path::PathBuf;

use anyhow::anyhow;
use streamvis_rs::{config::BackgroundConfig, frontend::StreamVisApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory for daily rolling log files, if set
const LOG_DIR_ENV: &str = "STREAMVIS_LOG_DIR";

/// Explicit config file path, overriding the data directory
const CONFIG_ENV: &str = "STREAMVIS_CONFIG";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let file_layer = std::env::var_os(LOG_DIR_ENV).map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "streamvis.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
            guard,
        )
    });
    let (file_layer, _log_guard) = match file_layer {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,streamvis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!("Starting StreamVis");

    let config = match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Loading background config from {:?}", path);
            match BackgroundConfig::load_from(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to load config {:?}: {}", path, e);
                    BackgroundConfig::default()
                }
            }
        }
        None => BackgroundConfig::load_or_default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("StreamVis"),
        ..Default::default()
    };

    eframe::run_native(
        "StreamVis",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(StreamVisApp::new(cc, config)))
        }),
    )
    .map_err(|e| anyhow!("eframe error: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}
