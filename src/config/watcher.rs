//! Configuration file watcher for hot reload.
//!
//! Only the localization section is applied to a running server. Changes to
//! any other section are logged and wait for a restart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServiceConfig;

/// What a reloaded config changes relative to the running one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReloadPlan {
    /// The text catalog must be rebuilt.
    pub texts_changed: bool,
    /// Sections that changed but are only read at startup.
    pub restart_required: Vec<&'static str>,
}

impl ReloadPlan {
    pub fn between(current: &ServiceConfig, next: &ServiceConfig) -> Self {
        let mut restart_required = Vec::new();
        if current.listener != next.listener {
            restart_required.push("listener");
        }
        if current.http != next.http {
            restart_required.push("http");
        }
        if current.timeouts != next.timeouts {
            restart_required.push("timeouts");
        }
        if current.observability != next.observability {
            restart_required.push("observability");
        }
        if current.security != next.security {
            restart_required.push("security");
        }
        if current.seed != next.seed {
            restart_required.push("seed");
        }

        Self {
            texts_changed: current.localization != next.localization,
            restart_required,
        }
    }
}

/// Watches the config file and forwards localization changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: ServiceConfig,
    update_tx: mpsc::UnboundedSender<ServiceConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, starting from the config the server was
    /// launched with. Returns the watcher and a receiver for updates.
    pub fn new(path: &Path, current: ServiceConfig) -> (Self, mpsc::UnboundedReceiver<ServiceConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            current,
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching on notify's background thread. Dropping the returned
    /// watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut current,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    reload(&path, &mut current, &update_tx);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?watched, "Config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, current: &mut ServiceConfig, tx: &mpsc::UnboundedSender<ServiceConfig>) {
    let next = match load_config(path) {
        Ok(next) => next,
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
            return;
        }
    };

    let plan = ReloadPlan::between(current, &next);
    if !plan.restart_required.is_empty() {
        tracing::warn!(
            sections = ?plan.restart_required,
            "Config sections changed that only apply after a restart"
        );
    }
    if plan.texts_changed {
        tracing::info!(culture = %next.localization.culture, "Localization changed, reloading texts");
        if tx.send(next.clone()).is_err() {
            tracing::debug!("Config receiver dropped, ignoring reload");
        }
    } else {
        tracing::debug!("Config change has no reloadable settings");
    }
    *current = next;
}
