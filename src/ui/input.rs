use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// A user request mapped from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserCommand {
    TogglePause,
    Skip,
    Quit,
}

/// Map a terminal event to a user command, if it is bound to one.
pub(crate) fn command_for(event: &Event) -> Option<UserCommand> {
    let key = match event {
        Event::Key(key) => key,
        _ => return None,
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(UserCommand::TogglePause),
        KeyCode::Char('s') => Some(UserCommand::Skip),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),
        _ => None,
    }
}
