use android_activity::AndroidApp;
use eframe::NativeOptions;

use crate::app_verifier_app::{self, AppVerifierApp};
use crate::log_capture;

#[no_mangle]
pub fn android_main(app: AndroidApp) {
    // logcat owns `log` records; it has to be installed before tracing grabs the log bridge
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Trace)
            .with_tag("AppVerifier"),
    );
    log::info!("Android logger initialized");

    log_capture::init_tracing(&crate::startup_log_directive(), false);

    app_verifier_app::init_common();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC OCCURRED: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic location: {}:{}", location.file(), location.line());
        }
    }));

    let options = NativeOptions {
        android_app: Some(app),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    match eframe::run_native(
        "App Verifier",
        options,
        Box::new(|cc| {
            app_verifier_app::init_egui(&cc.egui_ctx);
            Ok(Box::new(AppVerifierApp::from_context(&cc.egui_ctx)))
        }),
    ) {
        Ok(_) => log::info!("AppVerifierApp exited"),
        Err(e) => log::error!("AppVerifierApp failed: {}", e),
    }
}
