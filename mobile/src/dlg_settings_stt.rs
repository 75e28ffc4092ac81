use crate::Settings;

pub struct DlgSettings {
    pub open: bool,
    /// Working copy, applied only on Save
    pub draft: Settings,
    // Action results
    pub save_clicked: bool,
}

impl Default for DlgSettings {
    fn default() -> Self {
        Self {
            open: false,
            draft: Settings::default(),
            save_clicked: false,
        }
    }
}
