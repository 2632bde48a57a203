//! App state - pure data structure with no I/O logic
//!
//! Fields are only visible inside the `app` module. Everything else reads
//! the state through [`AppState::to_render_state`] and changes it through
//! the named transitions in `commands.rs`.

use std::collections::HashMap;

use crate::messages::render::{CommentsView, MainContent, RenderState, SidebarView};
use crate::messages::ui_events::{FormField, InputMode, Panel};
use crate::models::{Comment, Post, User};

/// The user list feeding the selector
#[derive(Clone, Debug, PartialEq)]
pub enum UsersState {
    /// Start hook has not run yet
    Idle,
    Loading { request_id: u64 },
    Loaded(Vec<User>),
    Failed,
}

/// Posts of the selected user
#[derive(Clone, Debug, PartialEq)]
pub enum PostsState {
    NoUser,
    Loading { request_id: u64 },
    Loaded(Vec<Post>),
    /// Post-error flag. Also raised when the user list fails.
    Failed,
}

/// Comments of the post targeted by the sidebar
#[derive(Clone, Debug, PartialEq)]
pub enum CommentsState {
    Loading { request_id: u64 },
    Loaded(Vec<Comment>),
    /// Comment-error flag
    Failed,
}

/// Blank-field markers shown under the form inputs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: bool,
    pub email: bool,
    pub body: bool,
}

impl FormErrors {
    pub fn any(&self) -> bool {
        self.name || self.email || self.body
    }
}

/// New-comment form contents
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
    pub active_field: FormField,
    pub errors: FormErrors,
    pub submitting: bool,
}

impl CommentForm {
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Body => &mut self.body,
        }
    }

    pub fn clear_error(&mut self, field: FormField) {
        match field {
            FormField::Name => self.errors.name = false,
            FormField::Email => self.errors.email = false,
            FormField::Body => self.errors.body = false,
        }
    }
}

/// A create or delete request issued from the comment panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Delete { comment_id: u64 },
}

/// Sidebar state; exists only while a post is targeted for comments
#[derive(Clone, Debug, PartialEq)]
pub struct CommentsPanel {
    pub post_id: u64,
    pub comments: CommentsState,
    /// Whether the comment-entry form is shown
    pub composing: bool,
    pub form: CommentForm,
    /// In-flight create/delete requests, keyed by request id
    pub pending_mutations: HashMap<u64, Mutation>,
}

impl CommentsPanel {
    pub fn new(post_id: u64, request_id: u64) -> Self {
        CommentsPanel {
            post_id,
            comments: CommentsState::Loading { request_id },
            composing: false,
            form: CommentForm::default(),
            pending_mutations: HashMap::new(),
        }
    }

    /// The form and mutations are only offered once the comments are in
    pub fn is_loaded(&self) -> bool {
        matches!(self.comments, CommentsState::Loaded(_))
    }

    pub fn is_deleting(&self, comment_id: u64) -> bool {
        self.pending_mutations
            .values()
            .any(|m| *m == Mutation::Delete { comment_id })
    }
}

/// Main application state - pure data, no I/O
#[derive(Debug)]
pub struct AppState {
    pub(super) users: UsersState,
    pub(super) selected_user: Option<User>,
    pub(super) posts: PostsState,
    pub(super) comments_panel: Option<CommentsPanel>,

    // Request ids
    pub(super) next_request_id: u64,

    // UI state
    pub(super) active_panel: Panel,
    pub(super) input_mode: InputMode,
    pub(super) users_cursor: usize,
    pub(super) posts_cursor: usize,
    pub(super) comments_cursor: usize,
    pub(super) show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            users: UsersState::Idle,
            selected_user: None,
            posts: PostsState::NoUser,
            comments_panel: None,
            next_request_id: 1,
            active_panel: Panel::Users,
            input_mode: InputMode::Normal,
            users_cursor: 0,
            posts_cursor: 0,
            comments_cursor: 0,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub(super) fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected_user.as_ref()
    }

    pub fn posts(&self) -> &PostsState {
        &self.posts
    }

    pub fn comments_panel(&self) -> Option<&CommentsPanel> {
        self.comments_panel.as_ref()
    }

    pub fn active_panel(&self) -> Panel {
        self.active_panel
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub(super) fn user_list(&self) -> &[User] {
        match &self.users {
            UsersState::Loaded(users) => users,
            _ => &[],
        }
    }

    pub(super) fn post_list(&self) -> &[Post] {
        match &self.posts {
            PostsState::Loaded(posts) => posts,
            _ => &[],
        }
    }

    pub(super) fn comment_list(&self) -> &[Comment] {
        match self.comments_panel.as_ref().map(|p| &p.comments) {
            Some(CommentsState::Loaded(comments)) => comments,
            _ => &[],
        }
    }

    /// Which view the main region shows.
    ///
    /// Priority: error banner, no user, spinner, list, empty notice.
    pub fn main_content(&self) -> MainContent {
        match (&self.posts, &self.selected_user) {
            (PostsState::Failed, _) => MainContent::Error,
            (_, None) | (PostsState::NoUser, _) => MainContent::NoUserSelected,
            (PostsState::Loading { .. }, Some(_)) => MainContent::Loading,
            (PostsState::Loaded(posts), Some(_)) if posts.is_empty() => MainContent::NoPostsYet,
            (PostsState::Loaded(posts), Some(_)) => MainContent::Posts(posts.clone()),
        }
    }

    fn sidebar(&self) -> Option<SidebarView> {
        self.comments_panel.as_ref().map(|panel| {
            let comments = match &panel.comments {
                CommentsState::Loading { .. } => CommentsView::Loading,
                CommentsState::Failed => CommentsView::Error,
                CommentsState::Loaded(list) if list.is_empty() => CommentsView::Empty,
                CommentsState::Loaded(list) => CommentsView::List(list.clone()),
            };
            SidebarView {
                post_id: panel.post_id,
                post: self.post_list().iter().find(|p| p.id == panel.post_id).cloned(),
                comments,
                composing: panel.composing,
                form: panel.form.clone(),
            }
        })
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            users: self.user_list().to_vec(),
            users_loading: matches!(self.users, UsersState::Loading { .. }),
            selected_user: self.selected_user.clone(),
            main: self.main_content(),
            sidebar: self.sidebar(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            users_cursor: self.users_cursor,
            posts_cursor: self.posts_cursor,
            comments_cursor: self.comments_cursor,
            show_help: self.show_help,
        }
    }
}
