//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    MoveUp,
    MoveDown,

    // Selection
    Select,
    ClearUser,

    // Comments
    ToggleCommentForm,
    DeleteComment,

    // Comment form editing
    StartEditing,
    StopEditing,
    NextField,
    CharInput(char),
    Backspace,
    SubmitComment,
    ClearCommentForm,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused panel (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Users,
    Posts,
    Comments,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Users => Panel::Posts,
            Panel::Posts => Panel::Comments,
            Panel::Comments => Panel::Users,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Users => Panel::Comments,
            Panel::Posts => Panel::Users,
            Panel::Comments => Panel::Posts,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Field of the new-comment form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Body,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Body,
            FormField::Body => FormField::Name,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('l') if input_mode == InputMode::Editing => {
                return Some(UiEvent::ClearCommentForm)
            }
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => handle_normal_keys(key, active_panel),
        InputMode::Editing => handle_editing_keys(key),
    }
}

fn handle_normal_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::MoveDown),
        KeyCode::Enter => Some(UiEvent::Select),
        KeyCode::Char('x') if active_panel == Panel::Users => Some(UiEvent::ClearUser),
        KeyCode::Char('n') => Some(UiEvent::ToggleCommentForm),
        KeyCode::Char('e') => Some(UiEvent::StartEditing),
        KeyCode::Char('d') if active_panel == Panel::Comments => Some(UiEvent::DeleteComment),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::Enter => Some(UiEvent::SubmitComment),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
