//! Process-wide application table
//!
//! Every name maps to one [`Application`] for the lifetime of the process.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dip_application::{Application, ApplicationOptions};
use dip_domain::error::Result;
use dip_infrastructure::config::AppConfig;
use dip_infrastructure::logging::init_logging;
use std::sync::LazyLock;
use tracing::debug;

static APPS: LazyLock<DashMap<String, Application>> = LazyLock::new(DashMap::new);

/// The application registered under `name`, created on first use
pub fn app(name: &str) -> Application {
    app_with_options(name, ApplicationOptions::default())
}

/// Like [`app`]; `options` only apply when this call creates the application
pub fn app_with_options(name: &str, options: ApplicationOptions) -> Application {
    match APPS.entry(name.to_string()) {
        Entry::Occupied(entry) => {
            let app = entry.get().clone();
            if app.options() != &options {
                debug!(app = %name, "Application exists; options ignored");
            }
            app
        }
        Entry::Vacant(slot) => slot
            .insert(Application::with_options(name, options))
            .value()
            .clone(),
    }
}

/// Names of every application created so far
pub fn app_names() -> Vec<String> {
    let mut names: Vec<String> = APPS.iter().map(|entry| entry.key().clone()).collect();
    names.sort();
    names
}

/// Application options carried by a loaded configuration
pub fn options_from_config(config: &AppConfig) -> ApplicationOptions {
    ApplicationOptions {
        scope_module: config.application.scope_module.clone(),
    }
}

/// Install logging from `config` and return the application options it sets
pub fn init(config: &AppConfig) -> Result<ApplicationOptions> {
    init_logging(&config.logging)?;
    Ok(options_from_config(config))
}
