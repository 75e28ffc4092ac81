use eframe::egui;
use std::sync::Arc;

/// Coarse outcome of comparing an installed app's signing certificate against an expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleVerificationStatus {
    Verified,
    Unverified,
    Mismatched,
}

impl SimpleVerificationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SimpleVerificationStatus::Verified => "VERIFIED",
            SimpleVerificationStatus::Unverified => "UNVERIFIED",
            SimpleVerificationStatus::Mismatched => "MISMATCHED",
        }
    }

    pub fn color(&self) -> egui::Color32 {
        match self {
            SimpleVerificationStatus::Verified => egui::Color32::from_rgb(56, 142, 60),
            SimpleVerificationStatus::Unverified => egui::Color32::from_rgb(255, 152, 0),
            SimpleVerificationStatus::Mismatched => egui::Color32::from_rgb(211, 47, 47),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationStatus {
    pub category: SimpleVerificationStatus,
    /// Full status name, shown as the info dialog title
    pub name: String,
    pub info: String,
}

impl VerificationStatus {
    pub fn new(category: SimpleVerificationStatus, name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            info: info.into(),
        }
    }

    pub fn unverified() -> Self {
        Self::new(
            SimpleVerificationStatus::Unverified,
            "Unverified",
            "This app has not been compared against a reference hash yet. Copy the package name \
             and hash published by the developer, then tap \"Verify from clipboard\".",
        )
    }

    pub fn verified() -> Self {
        Self::new(
            SimpleVerificationStatus::Verified,
            "Verified",
            "The hash from the clipboard matches the signing certificate hash of the installed app.",
        )
    }

    pub fn mismatched() -> Self {
        Self::new(
            SimpleVerificationStatus::Mismatched,
            "Hash mismatch",
            "The hash from the clipboard does NOT match the signing certificate hash of the \
             installed app. The app may have been signed by someone other than the expected developer.",
        )
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::unverified()
    }
}

/// Decoded app icon. `key` identifies the texture across frames.
#[derive(Debug, Clone)]
pub struct AppIcon {
    pub key: String,
    pub image: Arc<egui::ColorImage>,
}

impl PartialEq for AppIcon {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Everything the verification screen renders. Owned by the coordinator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyAppInput {
    pub icon: Option<AppIcon>,
    pub name: String,
    pub package_name: String,
    pub hash: String,
    pub verification_status: VerificationStatus,
    pub app_not_found: bool,
    pub invalid_format: bool,
}

impl VerifyAppInput {
    pub fn app_not_found() -> Self {
        Self {
            app_not_found: true,
            ..Default::default()
        }
    }

    pub fn invalid_format() -> Self {
        Self {
            invalid_format: true,
            ..Default::default()
        }
    }
}

/// Plain-text share request handed to the platform chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub text: String,
    pub mime_type: &'static str,
}

impl ShareRequest {
    pub const PLAIN_TEXT: &'static str = "text/plain";

    /// Two-line `<package>\n<hash>` payload, the same shape the clipboard verifier reads back.
    pub fn verification_info(package_name: &str, hash: &str) -> Self {
        Self {
            text: format!("{}\n{}", package_name, hash),
            mime_type: Self::PLAIN_TEXT,
        }
    }
}
