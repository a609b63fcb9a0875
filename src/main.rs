//! shellgate - Main Entry Point
//!
//! Loads the configuration, starts file logging, opens the theme store and
//! runs the terminal front end.

use std::process;
use std::sync::Arc;

use shellgate::cli::{App, Shell, TerminalConfig};
use shellgate::relay::{FormspreeClient, SubmitRelay};
use shellgate::theme::{system_preference, ThemeStore};
use shellgate::logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let config = match TerminalConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("\nCheck {}", TerminalConfig::config_path().display());
            eprintln!("or point SHELLGATE_CONFIG at another file.");
            process::exit(1);
        }
    };

    if let Err(e) = logging::init_global(&config.log_path(), &config.log_level) {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let config_path = TerminalConfig::config_path();
    if config_path.exists() {
        info!(path = %config_path.display(), "loaded config");
    } else {
        info!(path = %config_path.display(), "no config file, using defaults");
    }
    info!(endpoint = %config.relay.endpoint, "starting shellgate");

    let theme_path = config.theme_path();
    let theme = ThemeStore::open(&theme_path).unwrap_or_else(|e| {
        warn!(error = %e, path = %theme_path.display(), "theme store unreadable, using default");
        ThemeStore::in_memory(&theme_path, system_preference())
    });

    let relay: Arc<dyn SubmitRelay> = Arc::new(FormspreeClient::new(config.relay.endpoint.clone()));
    let app = App::new(&config, theme);

    let result = match Shell::new(app, config, relay) {
        Ok(mut shell) => shell.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("\nERROR: shellgate encountered an error: {}", e);
        eprintln!("Please check your terminal compatibility and try again.");
        process::exit(1);
    }
}
