/// Custom actions for menu items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    /// Flips whether the item is offered on the ordering page.
    ToggleAvailability,
}
