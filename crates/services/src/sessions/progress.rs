/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptProgress {
    /// Zero-based index of the question in view.
    pub current_index: usize,
    pub total: usize,
    /// Questions with at least one selected option.
    pub answered: usize,
    pub remaining_seconds: u32,
    pub is_complete: bool,
}
