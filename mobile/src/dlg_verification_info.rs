pub use crate::dlg_verification_info_stt::*;
use crate::models::VerificationStatus;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::dialog;
use std::cell::Cell;

impl DlgVerificationInfo {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// OK pressed. Only the dialog's own state changes.
    pub fn acknowledge(&mut self) {
        tracing::debug!("Verification info acknowledged");
        self.close();
    }

    /// Renders the modal explanation of `status`. Tapping outside or OK closes it.
    pub fn show(&mut self, ctx: &egui::Context, status: &VerificationStatus) {
        if !self.open {
            return;
        }

        let acknowledged = Cell::new(false);
        let title = tr!("verification-status-title");

        dialog("verification_info_dialog", &title, &mut self.open)
            .content(|ui| {
                ui.set_width(300.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&status.name)
                            .heading()
                            .color(status.category.color()),
                    );
                });
                ui.add_space(8.0);
                ui.add(egui::Label::new(&status.info).wrap());
            })
            .primary_action(tr!("ok"), || {
                acknowledged.set(true);
            })
            .show(ctx);

        if acknowledged.get() {
            self.acknowledge();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close() {
        let mut dlg = DlgVerificationInfo::default();
        assert!(!dlg.is_open());
        dlg.open();
        assert!(dlg.is_open());
        dlg.close();
        assert!(!dlg.is_open());
    }

    #[test]
    fn test_stays_open_until_acknowledged() {
        let ctx = egui::Context::default();
        let status = VerificationStatus::mismatched();
        let mut dlg = DlgVerificationInfo::default();
        dlg.open();

        let _ = ctx.run(egui::RawInput::default(), |ctx| dlg.show(ctx, &status));
        assert!(dlg.is_open());

        dlg.acknowledge();
        assert!(!dlg.is_open());

        // Closed dialogs render nothing and stay closed
        let _ = ctx.run(egui::RawInput::default(), |ctx| dlg.show(ctx, &status));
        assert!(!dlg.is_open());
    }
}
