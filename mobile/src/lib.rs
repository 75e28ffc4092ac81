#![allow(clippy::new_without_default)]

use eframe::egui;

pub mod models;
pub mod platform_services;
pub mod snapshot_verifier;
pub mod verification_text;

mod dlg_settings;
pub mod dlg_settings_stt;
pub mod dlg_verification_info;
pub mod dlg_verification_info_stt;
pub mod verify_app_screen;
pub mod verify_app_screen_stt;

#[cfg(target_os = "android")]
mod android_clipboard;
#[cfg(target_os = "android")]
mod android_share;

pub mod log_capture;

pub use app_verifier_app::AppVerifierApp;
pub mod app_verifier_app;
pub mod app_verifier_app_stt;

#[cfg(target_os = "android")]
mod main_android;

use anyhow::{Context, Result};
#[cfg(not(target_os = "android"))]
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Case-insensitive; unknown names fall back to `Error`.
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(LogLevel::Error)
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> String {
        self.as_str().to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub show_logs: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_log_level() -> String {
    LogLevel::default().as_str().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_logs: false,
            log_level: default_log_level(),
            language: default_language(),
        }
    }
}

impl Settings {
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level)
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        #[cfg(target_os = "android")]
        {
            let config_dir = PathBuf::from("/data/data/dev.appverifier.mobile/files");
            log::info!("Android config_dir: {:?}", config_dir);
            Self::from_dir(config_dir)
        }

        #[cfg(not(target_os = "android"))]
        {
            let proj_dirs = ProjectDirs::from("dev", "appverifier", "app_verifier")
                .context("Failed to get project directories")?;
            Self::from_dir(proj_dirs.config_dir().to_path_buf())
        }
    }

    /// Use `config_dir` as-is, creating it if needed.
    pub fn from_dir(config_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config dir {:?}", config_dir))?;
        Ok(Config { config_dir })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.config_dir.join(snapshot_verifier::SNAPSHOT_FILE)
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let settings_path = self.config_dir.join("settings.txt");

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents =
            fs::read_to_string(&settings_path).context("Failed to read settings file")?;

        let settings: Settings =
            serde_json::from_str(&contents).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let settings_path = self.config_dir.join("settings.txt");

        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&settings_path, json).context("Failed to write settings file")?;

        tracing::info!("Settings saved to {:?}", settings_path);
        Ok(())
    }
}

/// Log level from saved settings, `error` when nothing usable is stored.
pub fn startup_log_directive() -> String {
    Config::new()
        .and_then(|config| config.load_settings())
        .map(|settings| settings.log_level().filter_directive())
        .unwrap_or_else(|_| LogLevel::default().filter_directive())
}

pub fn init_i18n() {
    let en_us = String::from_utf8_lossy(include_bytes!("../assets/languages/fluent/en-US.ftl"));

    if let Err(e) = egui_i18n::load_translations_from_text("en-US", en_us) {
        log::error!("Failed to load en-US translations: {:?}", e);
    }

    egui_i18n::set_language("en-US");
    egui_i18n::set_fallback("en-US");
}

/// Detect narrow screens.
pub fn is_mobile(ctx: &egui::Context) -> bool {
    let screen_size = ctx.screen_rect().size();
    screen_size.x < 1081.0
}

/// Check if a package ID has at least 2 domain levels (e.g., com.example)
pub fn is_valid_package_id(package_id: &str) -> bool {
    package_id.split('.').count() >= 2 && package_id.split('.').all(|s| !s.is_empty())
}
