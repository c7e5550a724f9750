//! Translation of crossterm key events into session inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use survey_form::{Input, NavKey, TextEdit};

/// What the event loop should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Input(Input),
    /// Leave the form normally.
    Quit,
    /// Abort the form (Ctrl+C).
    Cancel,
    Ignore,
}

/// Map a key press. `editing` is true while the instruction field is active.
pub fn map_key(key: KeyEvent, editing: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Action::Cancel,
        KeyCode::Char('e') if ctrl => Action::Input(Input::Enhance),
        KeyCode::F(5) => Action::Input(Input::CheckHealth),
        KeyCode::Tab | KeyCode::Esc if editing => Action::Input(Input::LeaveInstruction),
        KeyCode::Tab => Action::Input(Input::FocusInstruction),
        KeyCode::Esc => Action::Quit,
        KeyCode::Up => Action::Input(Input::Key(NavKey::Up)),
        KeyCode::Down => Action::Input(Input::Key(NavKey::Down)),
        KeyCode::Left => Action::Input(Input::Key(NavKey::Left)),
        KeyCode::Right => Action::Input(Input::Key(NavKey::Right)),
        KeyCode::Enter => Action::Input(Input::Key(NavKey::Enter)),
        _ if !editing => Action::Ignore,
        KeyCode::Char(_) if ctrl => Action::Ignore,
        KeyCode::Char(c) => Action::Input(Input::Edit(TextEdit::Insert(c))),
        KeyCode::Backspace => Action::Input(Input::Edit(TextEdit::Backspace)),
        KeyCode::Delete => Action::Input(Input::Edit(TextEdit::Delete)),
        KeyCode::Home => Action::Input(Input::Edit(TextEdit::Home)),
        KeyCode::End => Action::Input(Input::Edit(TextEdit::End)),
        _ => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn arrows_map_to_navigation() {
        assert_eq!(
            map_key(key(KeyCode::Down), false),
            Action::Input(Input::Key(NavKey::Down))
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), false),
            Action::Input(Input::Key(NavKey::Enter))
        );
        // The session turns these into cursor moves while editing
        assert_eq!(
            map_key(key(KeyCode::Left), true),
            Action::Input(Input::Key(NavKey::Left))
        );
    }

    #[test]
    fn tab_and_esc_depend_on_editing() {
        assert_eq!(
            map_key(key(KeyCode::Tab), false),
            Action::Input(Input::FocusInstruction)
        );
        assert_eq!(
            map_key(key(KeyCode::Tab), true),
            Action::Input(Input::LeaveInstruction)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), true),
            Action::Input(Input::LeaveInstruction)
        );
        assert_eq!(map_key(key(KeyCode::Esc), false), Action::Quit);
    }

    #[test]
    fn characters_only_edit_while_editing() {
        assert_eq!(
            map_key(key(KeyCode::Char('a')), true),
            Action::Input(Input::Edit(TextEdit::Insert('a')))
        );
        assert_eq!(map_key(key(KeyCode::Char('a')), false), Action::Ignore);
        assert_eq!(map_key(key(KeyCode::Backspace), false), Action::Ignore);
        assert_eq!(
            map_key(key(KeyCode::Backspace), true),
            Action::Input(Input::Edit(TextEdit::Backspace))
        );
    }

    #[test]
    fn shortcuts_work_everywhere() {
        for editing in [false, true] {
            assert_eq!(map_key(ctrl('c'), editing), Action::Cancel);
            assert_eq!(map_key(ctrl('e'), editing), Action::Input(Input::Enhance));
            assert_eq!(
                map_key(key(KeyCode::F(5)), editing),
                Action::Input(Input::CheckHealth)
            );
        }
        assert_eq!(map_key(ctrl('x'), true), Action::Ignore);
    }
}
