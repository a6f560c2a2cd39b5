//! Game action definitions

/// Everything the fox can be told to do.
///
/// Default keyboard mapping:
/// - Left arrow = MoveLeft
/// - Right arrow = MoveRight
/// - Space = Jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,

    // Jump (edge-triggered)
    Jump,
}
