pub use crate::verify_app_screen_stt::*;
use crate::models::{AppIcon, ShareRequest, VerifyAppInput};
use crate::platform_services::{ClipboardRead, PlatformServices};
use crate::verification_text::FORMAT_EXAMPLE;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;

const ICON_SIZE: f32 = 150.0;
const SIDE_MARGIN: f32 = 16.0;

/// `app_not_found` wins over `invalid_format`; both false shows the details panel.
pub fn branch(input: &VerifyAppInput) -> ScreenBranch {
    if input.app_not_found {
        ScreenBranch::AppNotFound
    } else if input.invalid_format {
        ScreenBranch::InvalidFormat
    } else {
        ScreenBranch::Details
    }
}

/// Pure description of what the screen shows for `input`.
pub fn layout(input: &VerifyAppInput) -> Vec<ScreenElement> {
    match branch(input) {
        ScreenBranch::AppNotFound => vec![ScreenElement::AppNotFoundMessage],
        ScreenBranch::InvalidFormat => vec![ScreenElement::InvalidFormatMessage],
        ScreenBranch::Details => {
            let mut elements = Vec::with_capacity(9);
            if input.icon.is_some() {
                elements.push(ScreenElement::Icon);
            }
            let category = input.verification_status.category;
            elements.extend([
                ScreenElement::Name(input.name.clone()),
                ScreenElement::PackageName(input.package_name.clone()),
                ScreenElement::Hash(input.hash.clone()),
                ScreenElement::ShareButton,
                ScreenElement::VerifyFromClipboardButton,
                ScreenElement::StatusLabel,
                ScreenElement::StatusIndicator {
                    label: category.name(),
                    color: category.color(),
                },
            ]);
            elements
        }
    }
}

/// Width left for the centered column, never negative.
fn content_width(available: f32) -> f32 {
    (available - 2.0 * SIDE_MARGIN).max(0.0)
}

impl VerifyAppScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_info_dialog(&mut self) {
        self.dlg_verification_info.open();
    }

    pub fn close_info_dialog(&mut self) {
        self.dlg_verification_info.close();
    }

    pub fn is_info_dialog_open(&self) -> bool {
        self.dlg_verification_info.is_open()
    }

    /// Hand `<package>\n<hash>` to the platform share sheet.
    pub fn share(input: &VerifyAppInput, platform: &mut dyn PlatformServices) {
        let request = ShareRequest::verification_info(&input.package_name, &input.hash);
        tracing::debug!("Sharing verification info for {}", input.package_name);
        platform.share_text(&request);
    }

    /// Forward clipboard text untouched. An empty clipboard is a silent no-op.
    pub fn verify_from_clipboard(
        &mut self,
        platform: &mut dyn PlatformServices,
        on_verify_from_clipboard: &mut dyn FnMut(String),
    ) {
        match platform.request_clipboard() {
            ClipboardRead::Ready => Self::forward_clipboard(platform, on_verify_from_clipboard),
            ClipboardRead::Pending => self.awaiting_clipboard = true,
        }
    }

    /// Finish a clipboard read the platform could not answer in the frame it was asked.
    pub fn poll_clipboard(
        &mut self,
        platform: &dyn PlatformServices,
        on_verify_from_clipboard: &mut dyn FnMut(String),
    ) {
        if self.awaiting_clipboard && !platform.clipboard_pending() {
            self.awaiting_clipboard = false;
            Self::forward_clipboard(platform, on_verify_from_clipboard);
        }
    }

    fn forward_clipboard(
        platform: &dyn PlatformServices,
        on_verify_from_clipboard: &mut dyn FnMut(String),
    ) {
        if !platform.has_clipboard_text() {
            tracing::debug!("Verify from clipboard: clipboard has no text");
            return;
        }
        if let Some(text) = platform.clipboard_text() {
            on_verify_from_clipboard(text);
        }
    }

    pub fn handle_action(
        &mut self,
        action: ScreenAction,
        input: &VerifyAppInput,
        platform: &mut dyn PlatformServices,
        on_verify_from_clipboard: &mut dyn FnMut(String),
    ) {
        match action {
            ScreenAction::Share => Self::share(input, platform),
            ScreenAction::VerifyFromClipboard => {
                self.verify_from_clipboard(platform, on_verify_from_clipboard)
            }
            ScreenAction::OpenInfoDialog => self.open_info_dialog(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        input: &VerifyAppInput,
        platform: &mut dyn PlatformServices,
        on_verify_from_clipboard: &mut dyn FnMut(String),
    ) {
        self.poll_clipboard(platform, on_verify_from_clipboard);

        let action = self.render(ui, input);
        if let Some(action) = action {
            self.handle_action(action, input, platform, on_verify_from_clipboard);
        }

        self.dlg_verification_info
            .show(ui.ctx(), &input.verification_status);
    }

    fn render(&mut self, ui: &mut egui::Ui, input: &VerifyAppInput) -> Option<ScreenAction> {
        let mut action = None;

        egui::ScrollArea::vertical()
            .id_salt("verify_app_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(content_width(ui.available_width()));

                    for element in layout(input) {
                        match element {
                            ScreenElement::AppNotFoundMessage => {
                                ui.heading(tr!("app-not-installed"));
                                ui.add(egui::Label::new(tr!("app-not-installed-description")).wrap());
                            }
                            ScreenElement::InvalidFormatMessage => {
                                ui.heading(tr!("invalid-format"));
                                ui.add(
                                    egui::Label::new(tr!("invalid-format-description", {
                                        example: FORMAT_EXAMPLE
                                    }))
                                    .wrap(),
                                );
                            }
                            ScreenElement::Icon => {
                                if let Some(icon) = &input.icon {
                                    let texture = self.icon_texture(ui.ctx(), icon);
                                    ui.add(
                                        egui::Image::new(&texture)
                                            .fit_to_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE)),
                                    );
                                }
                            }
                            ScreenElement::Name(name) => {
                                ui.label(egui::RichText::new(name).size(22.0).strong());
                            }
                            ScreenElement::PackageName(package_name) => {
                                ui.label(package_name);
                            }
                            ScreenElement::Hash(hash) => {
                                ui.add(egui::Label::new(egui::RichText::new(hash).monospace()).wrap());
                                ui.add_space(8.0);
                            }
                            ScreenElement::ShareButton => {
                                if ui
                                    .add(MaterialButton::filled(tr!("share-verification-info")))
                                    .clicked()
                                {
                                    action = Some(ScreenAction::Share);
                                }
                            }
                            ScreenElement::VerifyFromClipboardButton => {
                                if ui
                                    .add(MaterialButton::filled(tr!("verify-from-clipboard")))
                                    .clicked()
                                {
                                    action = Some(ScreenAction::VerifyFromClipboard);
                                }
                                ui.add_space(8.0);
                            }
                            ScreenElement::StatusLabel => {
                                ui.label(tr!("verification-status-label"));
                            }
                            ScreenElement::StatusIndicator { label, color } => {
                                let button = ui.add(egui::Button::new(
                                    egui::RichText::new(format!("{}  ℹ", label))
                                        .size(28.0)
                                        .strong()
                                        .color(color),
                                ));
                                if button
                                    .on_hover_text(tr!("verification-status-more-info"))
                                    .clicked()
                                {
                                    action = Some(ScreenAction::OpenInfoDialog);
                                }
                            }
                        }
                        ui.add_space(4.0);
                    }
                });
            });

        action
    }

    fn icon_texture(&mut self, ctx: &egui::Context, icon: &AppIcon) -> egui::TextureHandle {
        if let Some((key, texture)) = &self.icon_texture {
            if *key == icon.key {
                return texture.clone();
            }
        }

        let texture = ctx.load_texture(
            format!("icon_{}", icon.key),
            (*icon.image).clone(),
            Default::default(),
        );
        self.icon_texture = Some((icon.key.clone(), texture.clone()));
        texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SimpleVerificationStatus, VerificationStatus};
    use std::sync::Arc;

    fn sample_input() -> VerifyAppInput {
        VerifyAppInput {
            icon: None,
            name: "Example".to_string(),
            package_name: "com.example.app".to_string(),
            hash: "AA:BB".to_string(),
            verification_status: VerificationStatus::verified(),
            app_not_found: false,
            invalid_format: false,
        }
    }

    #[test]
    fn test_branch_priority() {
        let mut input = sample_input();
        assert_eq!(branch(&input), ScreenBranch::Details);

        input.invalid_format = true;
        assert_eq!(branch(&input), ScreenBranch::InvalidFormat);

        input.app_not_found = true;
        assert_eq!(branch(&input), ScreenBranch::AppNotFound);

        input.invalid_format = false;
        assert_eq!(branch(&input), ScreenBranch::AppNotFound);
    }

    #[test]
    fn test_details_order_without_icon() {
        let elements = layout(&sample_input());
        assert_eq!(
            elements,
            vec![
                ScreenElement::Name("Example".to_string()),
                ScreenElement::PackageName("com.example.app".to_string()),
                ScreenElement::Hash("AA:BB".to_string()),
                ScreenElement::ShareButton,
                ScreenElement::VerifyFromClipboardButton,
                ScreenElement::StatusLabel,
                ScreenElement::StatusIndicator {
                    label: "VERIFIED",
                    color: SimpleVerificationStatus::Verified.color(),
                },
            ]
        );
    }

    #[test]
    fn test_icon_comes_first() {
        let mut input = sample_input();
        input.icon = Some(AppIcon {
            key: "com.example.app".to_string(),
            image: Arc::new(egui::ColorImage::from_rgba_unmultiplied([2, 2], &[255u8; 16])),
        });
        assert_eq!(layout(&input).first(), Some(&ScreenElement::Icon));
    }

    #[test]
    fn test_content_width_never_negative() {
        assert_eq!(content_width(400.0), 368.0);
        assert_eq!(content_width(20.0), 0.0);
        assert_eq!(content_width(0.0), 0.0);
    }

    #[test]
    fn test_desktop_clipboard_verify_finishes_next_frame() {
        let ctx = egui::Context::default();
        let mut platform = crate::platform_services::DesktopPlatform::new(ctx.clone());
        let mut screen = VerifyAppScreen::new();
        let input = sample_input();
        let mut received: Vec<String> = Vec::new();

        let output = ctx.run(egui::RawInput::default(), |_ctx| {
            platform.begin_frame();
            screen.handle_action(
                ScreenAction::VerifyFromClipboard,
                &input,
                &mut platform,
                &mut |text| received.push(text),
            );
        });
        assert!(received.is_empty());
        assert!(screen.awaiting_clipboard);
        let requested = output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|vp| {
                vp.commands
                    .iter()
                    .any(|cmd| matches!(cmd, egui::ViewportCommand::RequestPaste))
            });
        assert!(requested);

        let pasted = egui::RawInput {
            events: vec![egui::Event::Paste("com.example.app\nAA:BB".to_string())],
            ..Default::default()
        };
        let _ = ctx.run(pasted, |_ctx| {
            platform.begin_frame();
            screen.poll_clipboard(&platform, &mut |text| received.push(text));
        });

        assert_eq!(received, vec!["com.example.app\nAA:BB".to_string()]);
        assert!(!screen.awaiting_clipboard);
    }

    #[test]
    fn test_desktop_empty_clipboard_stays_silent() {
        let ctx = egui::Context::default();
        let mut platform = crate::platform_services::DesktopPlatform::new(ctx.clone());
        let mut screen = VerifyAppScreen::new();
        let mut calls = 0;

        let _ = ctx.run(egui::RawInput::default(), |_ctx| {
            screen.verify_from_clipboard(&mut platform, &mut |_| calls += 1);
        });
        let _ = ctx.run(egui::RawInput::default(), |_ctx| {
            platform.begin_frame();
            screen.poll_clipboard(&platform, &mut |_| calls += 1);
        });

        assert_eq!(calls, 0);
        assert!(!screen.awaiting_clipboard);
    }

    #[test]
    fn test_open_info_dialog_action() {
        let mut screen = VerifyAppScreen::new();
        let mut platform = crate::platform_services::DesktopPlatform::new(egui::Context::default());
        let mut calls = 0;
        screen.handle_action(
            ScreenAction::OpenInfoDialog,
            &sample_input(),
            &mut platform,
            &mut |_| calls += 1,
        );
        assert!(screen.is_info_dialog_open());
        assert_eq!(calls, 0);
    }
}
