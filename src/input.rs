use crate::app::InputMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextRoute,
    PrevRoute,
    GoTo(u8),
    Down,
    Up,
    PageDown,
    PageUp,
    Top,
    Bottom,
    ToggleHelp,
    Refresh,
    OpenMenu,
    OpenClusterPicker,
    OpenNamespacePicker,
    StartPrompt,
    DismissNotification,
    Submit,
    Cancel,
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    Newline,
    CursorLeft,
    CursorRight,
    Home,
    End,
    Save,
}

pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    match mode {
        InputMode::Normal => map_normal_mode_key(key),
        InputMode::Menu | InputMode::ClusterPicker | InputMode::NamespacePicker => {
            map_list_mode_key(key)
        }
        InputMode::Prompt => map_prompt_mode_key(key),
        InputMode::Editor => map_editor_mode_key(key),
    }
}

fn map_normal_mode_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(c) if key.modifiers.is_empty() && c.is_ascii_digit() => {
            c.to_digit(10).map(|digit| Action::GoTo(digit as u8))
        }
        KeyCode::Char('j') if key.modifiers.is_empty() => Some(Action::Down),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') if key.modifiers.is_empty() => Some(Action::Up),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Action::PrevRoute),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Action::NextRoute),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::PageDown)
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Enter | KeyCode::Char('m') => Some(Action::OpenMenu),
        KeyCode::Char('c') => Some(Action::OpenClusterPicker),
        KeyCode::Char('n') => Some(Action::OpenNamespacePicker),
        KeyCode::Char(':') => Some(Action::StartPrompt),
        KeyCode::Char(';') if key.modifiers.contains(KeyModifiers::SHIFT) => {
            Some(Action::StartPrompt)
        }
        KeyCode::Char('x') => Some(Action::DismissNotification),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn map_list_mode_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char('m') | KeyCode::Char('j')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Action::Submit)
        }
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

fn map_prompt_mode_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char('m') | KeyCode::Char('j')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Action::Submit)
        }
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

fn map_editor_mode_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Save),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::DismissNotification)
        }
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home => Some(Action::Home),
        KeyCode::End => Some(Action::End),
        KeyCode::Tab => Some(Action::InputChar(' ')),
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, map_key};
    use crate::app::InputMode;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn normal_mode_maps_quit() {
        assert_eq!(
            map_key(InputMode::Normal, press(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn normal_mode_maps_digits_to_routes() {
        assert_eq!(
            map_key(InputMode::Normal, press(KeyCode::Char('3'))),
            Some(Action::GoTo(3))
        );
    }

    #[test]
    fn normal_mode_opens_menu_and_selectors() {
        assert_eq!(
            map_key(InputMode::Normal, press(KeyCode::Enter)),
            Some(Action::OpenMenu)
        );
        assert_eq!(
            map_key(InputMode::Normal, press(KeyCode::Char('c'))),
            Some(Action::OpenClusterPicker)
        );
        assert_eq!(
            map_key(InputMode::Normal, press(KeyCode::Char('n'))),
            Some(Action::OpenNamespacePicker)
        );
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_picks_a_cluster() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Normal, key), Some(Action::Quit));
    }

    #[test]
    fn list_modes_submit_and_cancel() {
        for mode in [
            InputMode::Menu,
            InputMode::ClusterPicker,
            InputMode::NamespacePicker,
        ] {
            assert_eq!(map_key(mode, press(KeyCode::Enter)), Some(Action::Submit));
            assert_eq!(map_key(mode, press(KeyCode::Esc)), Some(Action::Cancel));
            assert_eq!(map_key(mode, press(KeyCode::Char('j'))), Some(Action::Down));
        }
    }

    #[test]
    fn prompt_mode_maps_chars() {
        assert_eq!(
            map_key(InputMode::Prompt, press(KeyCode::Char('a'))),
            Some(Action::InputChar('a'))
        );
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Prompt, key), None);
    }

    #[test]
    fn editor_mode_saves_with_ctrl_s() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Editor, key), Some(Action::Save));
        assert_eq!(
            map_key(InputMode::Editor, press(KeyCode::Char('s'))),
            Some(Action::InputChar('s'))
        );
        assert_eq!(
            map_key(InputMode::Editor, press(KeyCode::Enter)),
            Some(Action::Newline)
        );
        assert_eq!(
            map_key(InputMode::Editor, press(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
    }
}
