#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DlgVerificationInfo {
    pub open: bool,
}
