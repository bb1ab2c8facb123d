use crate::core::LatLng;
use crate::provider::PointerTarget;

/// Operator input, as delivered by the host's UI glue.
#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// The search box now contains this text.
    SearchInput(String),
    SearchFocused,
    HighlightNext,
    HighlightPrevious,
    Highlight(usize),
    /// Enter on the search box: pick the highlighted suggestion, if any.
    ConfirmHighlighted,
    PickSuggestion(usize),
    /// Escape on the search box.
    DismissDropdown,
    PointerDown(PointerTarget),
    MapRightClicked(LatLng),
    Clear,
}

impl UserIntent {
    /// Whether the intent can change the stored value or start a search
    /// that leads to one. Read-only editors drop these.
    pub fn edits_value(&self) -> bool {
        matches!(
            self,
            Self::SearchInput(_)
                | Self::ConfirmHighlighted
                | Self::PickSuggestion(_)
                | Self::MapRightClicked(_)
                | Self::Clear
        )
    }
}
