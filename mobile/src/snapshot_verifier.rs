use crate::models::{AppIcon, VerificationStatus, VerifyAppInput};
use crate::verification_text::{parse_verification_text, same_fingerprint};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const SNAPSHOT_FILE: &str = "verified_apps.json";

/// Turns clipboard text into a fully resolved view input.
pub trait Verifier {
    /// What the screen shows before anything was pasted.
    fn initial(&self) -> VerifyAppInput;
    fn verify(&self, clipboard_text: &str) -> VerifyAppInput;
}

/// One installed app as resolved by the external signature tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotEntry {
    pub name: String,
    pub package_name: String,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_base64: Option<String>,
}

/// Verifier backed by a JSON list of installed apps and their certificate hashes.
#[derive(Debug, Clone, Default)]
pub struct SnapshotVerifier {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotVerifier {
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    /// A missing file is an empty snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No app snapshot at {:?}", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read app snapshot")?;
        let entries: Vec<SnapshotEntry> =
            serde_json::from_str(&contents).context("Failed to parse app snapshot JSON")?;

        tracing::info!("Loaded {} apps from {:?}", entries.len(), path);
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    fn find(&self, package_name: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.package_name == package_name)
    }

    fn to_input(entry: &SnapshotEntry, verification_status: VerificationStatus) -> VerifyAppInput {
        VerifyAppInput {
            icon: entry
                .icon_base64
                .as_deref()
                .and_then(|data| decode_icon(&entry.package_name, data)),
            name: entry.name.clone(),
            package_name: entry.package_name.clone(),
            hash: entry.hash.clone(),
            verification_status,
            app_not_found: false,
            invalid_format: false,
        }
    }
}

impl Verifier for SnapshotVerifier {
    fn initial(&self) -> VerifyAppInput {
        match self.entries.first() {
            Some(entry) => Self::to_input(entry, VerificationStatus::unverified()),
            None => VerifyAppInput::app_not_found(),
        }
    }

    fn verify(&self, clipboard_text: &str) -> VerifyAppInput {
        let request = match parse_verification_text(clipboard_text) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Clipboard text rejected: {}", e);
                return VerifyAppInput::invalid_format();
            }
        };

        let Some(entry) = self.find(&request.package_name) else {
            tracing::info!("{} is not installed", request.package_name);
            return VerifyAppInput::app_not_found();
        };

        let status = if same_fingerprint(&entry.hash, &request.hash) {
            VerificationStatus::verified()
        } else {
            tracing::warn!("Certificate hash mismatch for {}", request.package_name);
            VerificationStatus::mismatched()
        };
        Self::to_input(entry, status)
    }
}

/// Base64 PNG (optionally a `data:` URI) to an egui image.
pub fn decode_icon(package_name: &str, base64_data: &str) -> Option<AppIcon> {
    use base64::{engine::general_purpose, Engine as _};

    let base64_str = if base64_data.starts_with("data:") {
        base64_data.split(',').nth(1).unwrap_or(base64_data)
    } else {
        base64_data
    };

    let bytes = match general_purpose::STANDARD.decode(base64_str) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("Failed to decode base64 icon for {}: {}", package_name, e);
            return None;
        }
    };

    let image = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Failed to load icon for {}: {}", package_name, e);
            return None;
        }
    };

    let size = [image.width() as _, image.height() as _];
    let image_buffer = image.to_rgba8();
    let pixels = image_buffer.as_flat_samples();

    Some(AppIcon {
        key: package_name.to_string(),
        image: Arc::new(eframe::egui::ColorImage::from_rgba_unmultiplied(
            size,
            pixels.as_slice(),
        )),
    })
}
