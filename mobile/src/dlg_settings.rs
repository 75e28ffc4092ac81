pub use crate::dlg_settings_stt::*;
use crate::LogLevel;
use crate::Settings;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;

impl DlgSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, current: &Settings) {
        self.draft = current.clone();
        self.save_clicked = false;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Selected level is kept as its display name, the same form stored in settings.txt
    pub fn select_log_level(&mut self, level: LogLevel) {
        self.draft.log_level = level.as_str().to_string();
    }

    /// Returns the settings to apply when Save was clicked this frame.
    pub fn take_saved(&mut self) -> Option<Settings> {
        if self.save_clicked {
            self.save_clicked = false;
            Some(self.draft.clone())
        } else {
            None
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut close_clicked = false;
        let mut save_clicked = false;

        egui::Window::new(tr!("settings"))
            .id(egui::Id::new("settings_window"))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .max_width(ctx.screen_rect().width() - 40.0)
            .show(ctx, |ui| {
                ui.heading(tr!("settings"));
                ui.add_space(8.0);

                ui.horizontal_wrapped(|ui| {
                    ui.label(tr!("show-logs"));
                    ui.checkbox(&mut self.draft.show_logs, tr!("show"));
                });

                ui.add_space(4.0);

                ui.horizontal_wrapped(|ui| {
                    ui.label(tr!("log-level"));
                    let current_level = self.draft.log_level();
                    for level in LogLevel::ALL {
                        let label = level.as_str().to_uppercase();
                        if ui.selectable_label(current_level == level, label).clicked() {
                            self.select_log_level(level);
                        }
                    }
                });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(MaterialButton::filled(tr!("save"))).clicked() {
                            tracing::info!("Settings dialog Save clicked");
                            save_clicked = true;
                        }
                        if ui.add(MaterialButton::outlined(tr!("cancel"))).clicked() {
                            close_clicked = true;
                        }
                    });
                });
            });

        if save_clicked {
            self.save_clicked = true;
            self.close();
        }
        if close_clicked {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_only_applied_on_save() {
        let current = Settings::default();
        let mut dlg = DlgSettings::new();
        dlg.open(&current);
        dlg.select_log_level(LogLevel::Debug);
        dlg.draft.show_logs = true;
        assert_eq!(dlg.take_saved(), None);

        dlg.save_clicked = true;
        let saved = dlg.take_saved().unwrap();
        assert_eq!(saved.log_level, "Debug");
        assert!(saved.show_logs);
        assert_eq!(dlg.take_saved(), None);
        assert_eq!(current.log_level, "Error");
    }

    #[test]
    fn test_reopen_discards_draft() {
        let current = Settings::default();
        let mut dlg = DlgSettings::new();
        dlg.open(&current);
        dlg.select_log_level(LogLevel::Trace);
        dlg.close();
        dlg.open(&current);
        assert_eq!(dlg.draft, current);
    }
}
