use app_verifier::app_verifier_app::{self, AppVerifierApp};
use eframe::egui;

fn main() -> eframe::Result<()> {
    app_verifier::log_capture::init_tracing(&app_verifier::startup_log_directive(), true);

    app_verifier_app::init_common();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "App Verifier",
        options,
        Box::new(|cc| {
            app_verifier_app::init_egui(&cc.egui_ctx);
            Ok(Box::new(AppVerifierApp::from_context(&cc.egui_ctx)))
        }),
    )
}
