use thiserror::Error;

/// Non-fatal conditions. The widget keeps working; the affected effect is
/// skipped and the condition is logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Advisory {
    #[error("Custom text array not long enough: no entry for step {position} ({len} entries)")]
    CustomTextTooShort { position: f64, len: usize },
    #[error(
        "No selection listener set. Use set_selection_listener(...) to receive selected values."
    )]
    NoSelectionListener,
}

impl Advisory {
    pub(crate) fn report(self) -> Self {
        log::warn!("{}", self);
        self
    }
}
