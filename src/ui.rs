//! Terminal drawing. Pure function of a [`RenderState`].

use ratatui::{prelude::*, widgets::*};

use crate::app::state::CommentForm;
use crate::constants::{COMMENTS_ERROR_TEXT, POSTS_ERROR_TEXT};
use crate::messages::render::{CommentsView, MainContent, SidebarView};
use crate::messages::ui_events::{FormField, InputMode, Panel};
use crate::messages::RenderState;

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let columns = if state.sidebar.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(main_chunks[1])
    };

    let selector_rows = selector_height(state.users.len());
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(selector_rows), Constraint::Min(3)])
        .split(columns[0]);

    draw_user_selector(f, state, left[0]);
    draw_main_content(f, state, left[1]);

    if let Some(sidebar) = &state.sidebar {
        draw_sidebar(f, state, sidebar, columns[1]);
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Rows for the user selector: one per user, between 1 and 8, plus borders
fn selector_height(user_count: usize) -> u16 {
    user_count.clamp(1, 8) as u16 + 2
}

/// Border style for a panel given focus and edit mode
pub fn panel_border(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, is_editing: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(is_focused, is_editing))
        .title(title)
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let who = match &state.selected_user {
        Some(user) => Span::styled(format!(" {} ", user.name), Style::default().fg(Color::Green).bold()),
        None => Span::styled(" Choose a user ", Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(vec![
        Span::styled(" POSTBOARD ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(" "),
        who,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_user_selector(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Users;
    let title = if state.users_loading { " Users (loading...) " } else { " Users " };

    let selected_id = state.selected_user.as_ref().map(|u| u.id);
    let items: Vec<ListItem> = state
        .users
        .iter()
        .map(|u| {
            let marker = if Some(u.id) == selected_id { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, u.name))
        })
        .collect();

    let list = List::new(items)
        .block(panel_block(title, is_focused, false))
        .highlight_style(if is_focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default()
        });

    let mut list_state = ListState::default();
    if !state.users.is_empty() {
        list_state.select(Some(state.users_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_main_content(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Posts;
    let block = panel_block(" Posts ", is_focused, false);

    match &state.main {
        MainContent::Error => {
            let p = Paragraph::new(POSTS_ERROR_TEXT)
                .style(Style::default().fg(Color::White).bg(Color::Red))
                .block(block);
            f.render_widget(p, area);
        }
        MainContent::NoUserSelected => {
            let p = Paragraph::new("No user selected").block(block);
            f.render_widget(p, area);
        }
        MainContent::Loading => {
            let p = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(p, area);
        }
        MainContent::NoPostsYet => {
            let p = Paragraph::new("No posts yet")
                .style(Style::default().fg(Color::Black).bg(Color::Yellow))
                .block(block);
            f.render_widget(p, area);
        }
        MainContent::Posts(posts) => {
            let open_id = state.sidebar.as_ref().map(|s| s.post_id);
            let items: Vec<ListItem> = posts
                .iter()
                .map(|p| {
                    let action = if Some(p.id) == open_id {
                        Span::styled("[Close] ", Style::default().fg(Color::Cyan))
                    } else {
                        Span::styled("[Open]  ", Style::default().fg(Color::DarkGray))
                    };
                    ListItem::new(Line::from(vec![
                        action,
                        Span::styled(format!("{:>3} ", p.id), Style::default().fg(Color::Yellow)),
                        Span::raw(p.title.clone()),
                    ]))
                })
                .collect();

            let list = List::new(items).block(block).highlight_style(if is_focused {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            });
            let mut list_state = ListState::default();
            list_state.select(Some(state.posts_cursor));
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_sidebar(f: &mut Frame, state: &RenderState, sidebar: &SidebarView, area: Rect) {
    let is_focused = state.active_panel == Panel::Comments;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let form_height = if sidebar.composing { 8 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),           // Post details
            Constraint::Min(3),              // Comments
            Constraint::Length(form_height), // Button or form
        ])
        .split(area);

    let (title, body) = match &sidebar.post {
        Some(post) => (format!(" #{}: {} ", post.id, post.title), post.body.clone()),
        None => (format!(" #{} ", sidebar.post_id), String::new()),
    };
    let details = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(details, chunks[0]);

    let comments_block = panel_block(" Comments ", is_focused, false);
    match &sidebar.comments {
        CommentsView::Loading => {
            f.render_widget(Paragraph::new("Loading...").block(comments_block), chunks[1]);
        }
        CommentsView::Error => {
            let p = Paragraph::new(COMMENTS_ERROR_TEXT)
                .style(Style::default().fg(Color::Red))
                .block(comments_block);
            f.render_widget(p, chunks[1]);
        }
        CommentsView::Empty => {
            f.render_widget(Paragraph::new("No comments yet").block(comments_block), chunks[1]);
        }
        CommentsView::List(comments) => {
            let items: Vec<ListItem> = comments
                .iter()
                .map(|c| {
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(c.name.clone(), Style::default().fg(Color::Cyan)),
                            Span::styled(format!(" <{}>", c.email), Style::default().fg(Color::DarkGray)),
                        ]),
                        Line::from(format!("  {}", c.body)),
                    ])
                })
                .collect();
            let list = List::new(items)
                .block(comments_block.title_bottom(Line::from(" d:delete ").right_aligned()))
                .highlight_style(if is_focused && !is_editing {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default()
                });
            let mut list_state = ListState::default();
            list_state.select(Some(state.comments_cursor));
            f.render_stateful_widget(list, chunks[1], &mut list_state);
        }
    }

    if matches!(sidebar.comments, CommentsView::Empty | CommentsView::List(_)) {
        if sidebar.composing {
            draw_comment_form(f, &sidebar.form, is_editing, chunks[2]);
        } else {
            let button = Paragraph::new(Span::styled(
                "[n] Write a comment",
                Style::default().fg(Color::Cyan).bold(),
            ));
            f.render_widget(button, chunks[2]);
        }
    }
}

fn draw_comment_form(f: &mut Frame, form: &CommentForm, is_editing: bool, area: Rect) {
    let title = if form.submitting { " New comment (sending...) " } else { " New comment " };
    let block = panel_block(title, is_editing, is_editing)
        .title_bottom(Line::from(" Enter:submit Ctrl+L:clear Esc:stop ").right_aligned());

    let fields = [
        (FormField::Name, "Author Name", &form.name, form.errors.name, "Name is required"),
        (FormField::Email, "Author Email", &form.email, form.errors.email, "Email is required"),
        (FormField::Body, "Comment Text", &form.body, form.errors.body, "Enter some text"),
    ];

    let lines: Vec<Line> = fields
        .iter()
        .flat_map(|(field, label, value, has_error, message)| {
            let active = is_editing && form.active_field == *field;
            let label_style = if active {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{:<13}", label), label_style),
                Span::raw(value.to_string()),
                Span::raw(if active { "_" } else { "" }),
            ])];
            if *has_error {
                lines.push(Line::from(Span::styled(
                    format!("             {}", message),
                    Style::default().fg(Color::Red),
                )));
            }
            lines
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " Tab:next field | Enter:submit | Ctrl+L:clear | Esc:stop editing "
    } else if state.is_loading() {
        " Loading... "
    } else {
        " Tab:panel | ↑↓:move | Enter:select | x:clear user | n:comment | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 POSTBOARD - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓  (k / j)     Move highlight
   Enter              Select user / open or close post

 USERS
   x                  Clear selected user

 COMMENTS
   n                  Show or hide the comment form
   e                  Edit the comment form
   d                  Delete highlighted comment

 COMMENT FORM
   Tab                Next field
   Enter              Submit
   Ctrl+L             Clear
   Esc                Stop editing

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Post, User};
    use ratatui::backend::TestBackend;

    fn render_text(state: &RenderState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn user() -> User {
        User {
            id: 1,
            name: String::from("Leanne Graham"),
            email: String::from("leanne@example.com"),
            phone: String::from("555-0100"),
        }
    }

    #[test]
    fn test_selector_height_is_capped() {
        assert_eq!(selector_height(0), 3);
        assert_eq!(selector_height(3), 5);
        assert_eq!(selector_height(8), 10);
        // Counts past u16::MAX must not wrap back to a small selector
        assert_eq!(selector_height(65_536), 10);
        assert_eq!(selector_height(usize::MAX), 10);
    }

    #[test]
    fn test_no_user_selected_text() {
        let text = render_text(&RenderState::default());
        assert!(text.contains("No user selected"));
    }

    #[test]
    fn test_error_banner_text() {
        let state = RenderState {
            main: MainContent::Error,
            ..RenderState::default()
        };
        let text = render_text(&state);
        assert!(text.contains(POSTS_ERROR_TEXT));
        assert!(!text.contains("No user selected"));
    }

    #[test]
    fn test_sidebar_with_comment_error() {
        let post = Post {
            id: 5,
            user_id: 1,
            title: String::from("qui est esse"),
            body: String::from("est rerum tempore"),
        };
        let state = RenderState {
            users: vec![user()],
            selected_user: Some(user()),
            main: MainContent::Posts(vec![post.clone()]),
            sidebar: Some(SidebarView {
                post_id: 5,
                post: Some(post),
                comments: CommentsView::Error,
                composing: false,
                form: CommentForm::default(),
            }),
            ..RenderState::default()
        };
        let text = render_text(&state);
        assert!(text.contains("qui est esse"));
        assert!(text.contains(COMMENTS_ERROR_TEXT));
        assert!(text.contains("[Close]"));
        assert!(!text.contains("Write a comment"));
    }

    #[test]
    fn test_form_shows_field_errors() {
        let mut form = CommentForm::default();
        form.errors.name = true;
        let state = RenderState {
            main: MainContent::NoPostsYet,
            selected_user: Some(user()),
            sidebar: Some(SidebarView {
                post_id: 5,
                post: None,
                comments: CommentsView::Empty,
                composing: true,
                form,
            }),
            ..RenderState::default()
        };
        let text = render_text(&state);
        assert!(text.contains("No comments yet"));
        assert!(text.contains("Name is required"));
        assert!(!text.contains("Email is required"));
    }
}
