use crate::dlg_settings_stt::DlgSettings;
use crate::models::VerifyAppInput;
use crate::platform_services::PlatformServices;
use crate::snapshot_verifier::Verifier;
use crate::verify_app_screen_stt::VerifyAppScreen;
use crate::Config;
use crate::Settings;
use crossbeam_queue::SegQueue;
use std::sync::Arc;

/// Parent coordinator: owns the verification result and feeds it to the screen.
pub struct AppVerifierApp {
    pub config: Option<Config>,
    pub settings: Settings,

    /// What the verification screen renders this frame
    pub input: VerifyAppInput,
    pub screen: VerifyAppScreen,
    pub verifier: Box<dyn Verifier>,
    pub platform: Box<dyn PlatformServices>,

    /// Clipboard texts handed over by the screen, drained once per frame
    pub pending_verifications: Arc<SegQueue<String>>,

    pub dlg_settings: DlgSettings,
}
