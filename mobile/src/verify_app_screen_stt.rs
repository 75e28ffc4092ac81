use crate::dlg_verification_info_stt::DlgVerificationInfo;
use eframe::egui;

/// Which of the three mutually exclusive views is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenBranch {
    AppNotFound,
    InvalidFormat,
    Details,
}

/// One row of the rendered screen, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenElement {
    AppNotFoundMessage,
    InvalidFormatMessage,
    Icon,
    Name(String),
    PackageName(String),
    /// Rendered monospace
    Hash(String),
    ShareButton,
    VerifyFromClipboardButton,
    StatusLabel,
    StatusIndicator {
        label: &'static str,
        color: egui::Color32,
    },
}

/// Things the user did during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Share,
    VerifyFromClipboard,
    OpenInfoDialog,
}

#[derive(Default)]
pub struct VerifyAppScreen {
    pub dlg_verification_info: DlgVerificationInfo,
    /// Texture for the icon currently on screen, keyed by `AppIcon::key`
    pub icon_texture: Option<(String, egui::TextureHandle)>,
    /// A verify-from-clipboard tap is waiting for the platform's clipboard answer
    pub awaiting_clipboard: bool,
}
