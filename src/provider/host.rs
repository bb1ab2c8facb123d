use super::Subscription;
use crate::core::RawValue;

/// Where a pointer press landed, relative to the editor's search controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    SearchBox,
    Dropdown,
    Elsewhere,
}

pub trait HostForm {
    /// Receives every value change the operator makes.
    fn set_value(&self, raw: RawValue);

    /// Listens for pointer presses anywhere on the page.
    fn subscribe_pointer_down(
        &self,
        callback: Box<dyn Fn(PointerTarget)>,
    ) -> Box<dyn Subscription>;
}
