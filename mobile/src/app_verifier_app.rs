pub use crate::app_verifier_app_stt::*;
use crate::dlg_settings_stt::DlgSettings;
use crate::platform_services::PlatformServices;
use crate::snapshot_verifier::{SnapshotVerifier, Verifier};
use crate::verify_app_screen::{self, ScreenAction, ScreenBranch, VerifyAppScreen};
use crate::{log_capture, Config, Settings};
use crossbeam_queue::SegQueue;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::theme::{load_fonts, load_themes, setup_local_theme, update_window_background};
use egui_material3::MaterialButton;
use std::sync::Arc;

/// Initialize app-wide state that does not need an egui context (i18n).
/// Call this early, before the eframe app is created.
pub fn init_common() {
    crate::init_i18n();
}

/// Initialize the egui context with the Material theme.
/// Call this in the eframe app creation callback.
pub fn init_egui(ctx: &egui::Context) {
    setup_local_theme(None);
    load_fonts(ctx);
    load_themes();
    update_window_background(ctx);
}

impl AppVerifierApp {
    pub fn new(
        config: Option<Config>,
        settings: Settings,
        verifier: Box<dyn Verifier>,
        platform: Box<dyn PlatformServices>,
    ) -> Self {
        let input = verifier.initial();
        Self {
            config,
            settings,
            input,
            screen: VerifyAppScreen::new(),
            verifier,
            platform,
            pending_verifications: Arc::new(SegQueue::new()),
            dlg_settings: DlgSettings::new(),
        }
    }

    /// Build the app from saved settings and the on-disk app snapshot.
    pub fn from_context(ctx: &egui::Context) -> Self {
        tracing::info!("OS: {}, Architecture: {}", std::env::consts::OS, std::env::consts::ARCH);

        let config = match Config::new() {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!("Failed to set up config directory: {:#}", e);
                None
            }
        };

        let settings = config
            .as_ref()
            .and_then(|cfg| match cfg.load_settings() {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::error!("Failed to load settings: {:#}", e);
                    None
                }
            })
            .unwrap_or_default();

        let verifier = config
            .as_ref()
            .map(|cfg| {
                SnapshotVerifier::load(&cfg.snapshot_path()).unwrap_or_else(|e| {
                    tracing::error!("Failed to load app snapshot: {:#}", e);
                    SnapshotVerifier::default()
                })
            })
            .unwrap_or_default();

        let mut app = Self::new(config, settings, Box::new(verifier), platform_for(ctx));
        app.apply_runtime_settings();
        app
    }

    /// Replace the view input with the verifier's answer for each queued clipboard text.
    pub fn process_pending_verifications(&mut self) {
        while let Some(text) = self.pending_verifications.pop() {
            tracing::debug!("Verifying clipboard text ({} bytes)", text.len());
            self.input = self.verifier.verify(&text);
        }
    }

    /// The fixed messages have no buttons of their own, so the top bar offers the retry.
    pub fn needs_retry_action(&self) -> bool {
        verify_app_screen::branch(&self.input) != ScreenBranch::Details
    }

    /// Same path as the screen's button: the clipboard text ends up in the queue.
    pub fn verify_from_clipboard(&mut self) {
        let queue = Arc::clone(&self.pending_verifications);
        let mut on_verify_from_clipboard = move |text: String| queue.push(text);
        self.screen.handle_action(
            ScreenAction::VerifyFromClipboard,
            &self.input,
            self.platform.as_mut(),
            &mut on_verify_from_clipboard,
        );
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.apply_runtime_settings();

        if let Some(ref config) = self.config {
            match config.save_settings(&self.settings) {
                Ok(_) => tracing::info!("Settings saved successfully"),
                Err(e) => tracing::error!("Failed to save settings: {:#}", e),
            }
        } else {
            tracing::error!("Config not available, cannot save settings");
        }
    }

    fn apply_runtime_settings(&self) {
        let level = self.settings.log_level();
        log_capture::set_capture_level(level);
        log_capture::update_tracing_level(&level.filter_directive());
        egui_i18n::set_language(&self.settings.language);
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let mut retry_clicked = false;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr!("app-title"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(MaterialButton::outlined(tr!("settings"))).clicked() {
                        self.dlg_settings.open(&self.settings);
                    }
                    if self.needs_retry_action()
                        && ui
                            .add(MaterialButton::filled(tr!("verify-from-clipboard")))
                            .clicked()
                    {
                        retry_clicked = true;
                    }
                });
            });
        });

        if retry_clicked {
            self.verify_from_clipboard();
        }
    }

    fn render_logs(&self, ctx: &egui::Context) {
        let log_text = log_capture::recent_logs();
        egui::TopBottomPanel::bottom("logs_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                ui.label(tr!("logs"));
                egui::ScrollArea::vertical()
                    .id_salt("logs_scroll")
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut log_text.as_str())
                                .desired_width(f32::INFINITY)
                                .font(egui::TextStyle::Monospace)
                                .interactive(false)
                                .desired_rows(8),
                        );
                    });
            });
    }
}

#[cfg(target_os = "android")]
fn platform_for(_ctx: &egui::Context) -> Box<dyn PlatformServices> {
    Box::new(crate::platform_services::AndroidPlatform)
}

#[cfg(not(target_os = "android"))]
fn platform_for(ctx: &egui::Context) -> Box<dyn PlatformServices> {
    Box::new(crate::platform_services::DesktopPlatform::new(ctx.clone()))
}

impl eframe::App for AppVerifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.platform.begin_frame();
        self.process_pending_verifications();

        self.render_top_bar(ctx);
        if self.settings.show_logs {
            self.render_logs(ctx);
        }

        let margin = if crate::is_mobile(ctx) { 8.0 } else { 24.0 };
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(margin))
            .show(ctx, |ui| {
                let queue = Arc::clone(&self.pending_verifications);
                let mut on_verify_from_clipboard = move |text: String| queue.push(text);
                self.screen.show(
                    ui,
                    &self.input,
                    self.platform.as_mut(),
                    &mut on_verify_from_clipboard,
                );
            });

        self.dlg_settings.show(ctx);
        if let Some(saved) = self.dlg_settings.take_saved() {
            self.apply_settings(saved);
        }
    }
}
