//! Settings persistence for the lazysol TUI.
//!
//! Settings are stored as JSON under the user's config directory and
//! cover the selected cluster plus any user-defined custom clusters.
//! Loading never fails hard: a missing or unreadable file falls back to
//! defaults.

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::domain::Cluster;

const CONFIG_DIR_NAME: &str = "lazysol";
const CONFIG_FILE_NAME: &str = "settings.json";

// ============================================================================
// Settings
// ============================================================================

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// The cluster selected at last run.
    pub selected_cluster: Cluster,
    /// User-defined custom clusters. Built-in clusters are implicit.
    pub custom_clusters: VecDeque<Cluster>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selected_cluster: Cluster::MainnetBeta,
            custom_clusters: VecDeque::new(),
        }
    }
}

/// Resolve the settings file path under the user config directory.
fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the application settings.
///
/// Returns default settings if the file does not exist or cannot be
/// parsed; a broken settings file should never block startup.
#[must_use]
pub fn load_settings() -> AppSettings {
    let Some(path) = settings_path() else {
        return AppSettings::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("failed to parse settings, using defaults: {e}");
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves the application settings.
///
/// # Errors
///
/// Returns an error if the config directory cannot be created or the file
/// cannot be written.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    let path = settings_path()
        .ok_or_else(|| color_eyre::eyre::eyre!("could not resolve a config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

/// Updates the selected cluster and saves settings.
///
/// # Errors
///
/// Returns an error if saving fails.
pub fn set_selected_cluster(settings: &mut AppSettings, cluster: Cluster) -> Result<()> {
    settings.selected_cluster = cluster;
    save_settings(settings)
}

/// Adds a custom cluster and saves settings.
///
/// # Errors
///
/// Returns an error if a cluster with the same name already exists or if
/// saving fails.
#[allow(dead_code)] // Custom clusters are added by editing settings today
pub fn add_custom_cluster(
    settings: &mut AppSettings,
    name: String,
    rpc_url: String,
    graphql_url: String,
) -> Result<()> {
    let new_cluster = Cluster::Custom {
        name,
        rpc_url,
        graphql_url,
    };

    if get_available_clusters(settings)
        .iter()
        .any(|c| c.as_str() == new_cluster.as_str())
    {
        color_eyre::eyre::bail!(
            "A cluster named '{}' already exists.",
            new_cluster.as_str()
        );
    }

    settings.custom_clusters.push_back(new_cluster);
    save_settings(settings)
}

/// Returns every selectable cluster: built-in first, then custom.
#[must_use]
pub fn get_available_clusters(settings: &AppSettings) -> Vec<Cluster> {
    let mut clusters = Cluster::builtin();
    clusters.extend(settings.custom_clusters.iter().cloned());
    clusters
}

// ============================================================================
// Tests
// ============================================================================
