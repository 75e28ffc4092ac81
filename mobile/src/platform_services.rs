use crate::models::ShareRequest;
use eframe::egui;

/// Whether a clipboard read can be answered right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardRead {
    Ready,
    /// The answer shows up in a later frame, see [`PlatformServices::clipboard_pending`].
    Pending,
}

/// Host platform services the verification screen talks to.
pub trait PlatformServices {
    fn has_clipboard_text(&self) -> bool;
    fn clipboard_text(&self) -> Option<String>;
    /// Ask for a fresh read of the system clipboard.
    fn request_clipboard(&mut self) -> ClipboardRead {
        ClipboardRead::Ready
    }
    fn clipboard_pending(&self) -> bool {
        false
    }
    /// Fire-and-forget; the platform owns any failure reporting.
    fn share_text(&mut self, request: &ShareRequest);
    /// Called once at the start of every frame.
    fn begin_frame(&mut self) {}
}

/// ClipboardManager and the share chooser through JNI.
#[cfg(target_os = "android")]
#[derive(Default)]
pub struct AndroidPlatform;

#[cfg(target_os = "android")]
impl PlatformServices for AndroidPlatform {
    fn has_clipboard_text(&self) -> bool {
        match crate::android_clipboard::has_text() {
            Ok(has) => has,
            Err(e) => {
                log::error!("Failed to query clipboard: {}", e);
                false
            }
        }
    }

    fn clipboard_text(&self) -> Option<String> {
        match crate::android_clipboard::get_text() {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to read clipboard: {}", e);
                None
            }
        }
    }

    fn share_text(&mut self, request: &ShareRequest) {
        crate::android_share::share_text(request);
    }
}

/// egui only hands clipboard contents to the app through paste events. A clipboard
/// read sends `RequestPaste`; the windowing backend answers with `Event::Paste` in the
/// next frame, or with nothing when the system clipboard holds no text.
pub struct DesktopPlatform {
    ctx: egui::Context,
    last_clipboard: Option<String>,
    paste_requested: bool,
}

impl DesktopPlatform {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            last_clipboard: None,
            paste_requested: false,
        }
    }

    /// Pick up paste events from the current frame's input. Returns whether one was seen.
    pub fn observe_input(&mut self) -> bool {
        let latest = self.ctx.input(|i| {
            i.events.iter().rev().find_map(|event| match event {
                egui::Event::Paste(text) => Some(text.clone()),
                _ => None,
            })
        });
        match latest {
            Some(text) => {
                tracing::debug!("Clipboard paste observed ({} bytes)", text.len());
                self.last_clipboard = Some(text);
                true
            }
            None => false,
        }
    }
}

impl PlatformServices for DesktopPlatform {
    fn has_clipboard_text(&self) -> bool {
        self.last_clipboard.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn clipboard_text(&self) -> Option<String> {
        self.last_clipboard.clone()
    }

    fn request_clipboard(&mut self) -> ClipboardRead {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::RequestPaste);
        self.ctx.request_repaint();
        self.paste_requested = true;
        ClipboardRead::Pending
    }

    fn clipboard_pending(&self) -> bool {
        self.paste_requested
    }

    fn share_text(&mut self, request: &ShareRequest) {
        // No share sheet on desktop: copy the payload instead.
        self.ctx.copy_text(request.text.clone());
        tracing::info!("Verification info copied to clipboard");
    }

    fn begin_frame(&mut self) {
        let pasted = self.observe_input();
        if self.paste_requested {
            self.paste_requested = false;
            if !pasted {
                tracing::debug!("System clipboard has no text");
                self.last_clipboard = None;
            }
        }
    }
}
