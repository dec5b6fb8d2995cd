//! Component health status.

/// Coarse health flags surfaced by a component.
///
/// The warning flag says "the most recent operation failed"; it does not
/// remember why. `failed` is set by the host when `setup` errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentStatus {
    warning: bool,
    failed: bool,
}

impl ComponentStatus {
    pub fn set_warning(&mut self) {
        self.warning = true;
    }

    pub fn clear_warning(&mut self) {
        self.warning = false;
    }

    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.warning
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}
