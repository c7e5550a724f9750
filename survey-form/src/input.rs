//! Everything a frontend can tell a session.

/// Navigation keys understood by question rows and the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

/// Editing keys for the instruction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The instruction text field.
    Instruction,
    /// One option of a radio or toggle row.
    Option { row: usize, option: usize },
    /// The enhance button.
    Enhance,
    /// The submit button.
    Submit,
    /// Anything that is not an input.
    Background,
}

/// A discrete event for the session to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A navigation key. Routed to the instruction field while it is active.
    Key(NavKey),
    /// An editing key for the instruction field.
    Edit(TextEdit),
    /// A pointer press.
    Click(ClickTarget),
    /// Move keyboard input into the instruction field.
    FocusInstruction,
    /// Leave the instruction field; keys go back to the focused row.
    LeaveInstruction,
    /// Ask the enhancement service for a revised question list.
    Enhance,
    /// Run both health probes.
    CheckHealth,
}
