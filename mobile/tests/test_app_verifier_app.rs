use app_verifier::models::{ShareRequest, SimpleVerificationStatus, VerificationStatus, VerifyAppInput};
use app_verifier::platform_services::PlatformServices;
use app_verifier::snapshot_verifier::{SnapshotEntry, SnapshotVerifier, Verifier};
use app_verifier::verify_app_screen::{layout, ScreenElement};
use app_verifier::{AppVerifierApp, Config, Settings};

const HASH: &str = "96:C0:2C:55:75:5C:17:1C:68:13:70:29:3B:37:11:2B:4A:5D:F7:B9";

struct NoPlatform;

impl PlatformServices for NoPlatform {
    fn has_clipboard_text(&self) -> bool {
        false
    }

    fn clipboard_text(&self) -> Option<String> {
        None
    }

    fn share_text(&mut self, _request: &ShareRequest) {}
}

/// Clipboard answered synchronously, like the Android ClipboardManager.
struct FixedClipboard(String);

impl PlatformServices for FixedClipboard {
    fn has_clipboard_text(&self) -> bool {
        !self.0.is_empty()
    }

    fn clipboard_text(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn share_text(&mut self, _request: &ShareRequest) {}
}

fn snapshot() -> SnapshotVerifier {
    SnapshotVerifier::new(vec![SnapshotEntry {
        name: "Example".to_string(),
        package_name: "com.example.app".to_string(),
        hash: HASH.to_string(),
        icon_base64: None,
    }])
}

fn app(config: Option<Config>) -> AppVerifierApp {
    AppVerifierApp::new(config, Settings::default(), Box::new(snapshot()), Box::new(NoPlatform))
}

fn category(input: &VerifyAppInput) -> SimpleVerificationStatus {
    input.verification_status.category
}

#[test]
fn test_starts_unverified() {
    let app = app(None);
    assert_eq!(app.input.package_name, "com.example.app");
    assert_eq!(category(&app.input), SimpleVerificationStatus::Unverified);
}

#[test]
fn test_queued_clipboard_text_replaces_input() {
    let mut app = app(None);

    app.pending_verifications.push(format!("com.example.app\n{}", HASH));
    app.process_pending_verifications();
    assert_eq!(category(&app.input), SimpleVerificationStatus::Verified);

    app.pending_verifications.push("garbage".to_string());
    app.process_pending_verifications();
    assert!(app.input.invalid_format);

    app.pending_verifications.push(format!("org.fossify.gallery\n{}", HASH));
    app.process_pending_verifications();
    assert!(app.input.app_not_found);
    assert!(app.pending_verifications.is_empty());
}

#[test]
fn test_last_queued_text_wins() {
    let mut app = app(None);
    app.pending_verifications.push("garbage".to_string());
    app.pending_verifications.push(format!("com.example.app\n{}", HASH.replace("96", "00")));
    app.process_pending_verifications();
    assert_eq!(category(&app.input), SimpleVerificationStatus::Mismatched);
}

#[test]
fn test_apply_settings_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_dir(dir.path().to_path_buf()).unwrap();
    let mut app = app(Some(config.clone()));

    let settings = Settings {
        show_logs: true,
        log_level: "Warn".to_string(),
        ..Default::default()
    };
    app.apply_settings(settings.clone());

    assert_eq!(app.settings, settings);
    assert_eq!(config.load_settings().unwrap(), settings);
}

#[test]
fn test_custom_verifier_drives_input() {
    struct AlwaysMismatched;

    impl Verifier for AlwaysMismatched {
        fn initial(&self) -> VerifyAppInput {
            VerifyAppInput::invalid_format()
        }

        fn verify(&self, clipboard_text: &str) -> VerifyAppInput {
            VerifyAppInput {
                package_name: clipboard_text.to_string(),
                verification_status: VerificationStatus::mismatched(),
                ..Default::default()
            }
        }
    }

    let mut app = AppVerifierApp::new(
        None,
        Settings::default(),
        Box::new(AlwaysMismatched),
        Box::new(NoPlatform),
    );
    assert!(app.input.invalid_format);

    app.pending_verifications.push("x".to_string());
    app.process_pending_verifications();
    assert_eq!(app.input.package_name, "x");
    assert_eq!(category(&app.input), SimpleVerificationStatus::Mismatched);
}

#[test]
fn test_retry_offered_after_bad_paste() {
    let mut app = AppVerifierApp::new(
        None,
        Settings::default(),
        Box::new(snapshot()),
        Box::new(FixedClipboard(format!("com.example.app\n{}", HASH))),
    );
    assert!(!app.needs_retry_action());

    app.pending_verifications.push("typo".to_string());
    app.process_pending_verifications();
    assert_eq!(layout(&app.input), vec![ScreenElement::InvalidFormatMessage]);
    assert!(app.needs_retry_action());

    app.verify_from_clipboard();
    app.process_pending_verifications();
    assert_eq!(category(&app.input), SimpleVerificationStatus::Verified);
    assert!(!app.needs_retry_action());
}

#[test]
fn test_retry_offered_with_empty_snapshot() {
    let mut app = AppVerifierApp::new(
        None,
        Settings::default(),
        Box::new(SnapshotVerifier::default()),
        Box::new(FixedClipboard(format!("com.example.app\n{}", HASH))),
    );
    assert_eq!(layout(&app.input), vec![ScreenElement::AppNotFoundMessage]);
    assert!(app.needs_retry_action());

    app.verify_from_clipboard();
    assert_eq!(app.pending_verifications.len(), 1);
    app.process_pending_verifications();
    assert!(app.input.app_not_found);
    assert!(app.needs_retry_action());
}

#[test]
fn test_retry_with_empty_clipboard_keeps_message() {
    let mut app = AppVerifierApp::new(
        None,
        Settings::default(),
        Box::new(SnapshotVerifier::default()),
        Box::new(FixedClipboard(String::new())),
    );
    app.verify_from_clipboard();
    assert!(app.pending_verifications.is_empty());
    assert!(app.input.app_not_found);
}
