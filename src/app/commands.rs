//! Command handlers - the named transitions of the selection state machine
//!
//! Transitions that start a request return the `NetworkCommand` to send.
//! The caller sends it; nothing here does I/O.

use crate::app::state::{AppState, CommentsPanel, CommentsState, Mutation, PostsState, UsersState};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{CommentData, User};

impl AppState {
    // ========================
    // Start hook
    // ========================

    /// Request the user list. Only the first call issues a request.
    pub fn start(&mut self) -> Option<NetworkCommand> {
        if self.users != UsersState::Idle {
            return None;
        }
        let id = self.next_id();
        self.users = UsersState::Loading { request_id: id };
        Some(NetworkCommand::FetchUsers { id })
    }

    // ========================
    // Selection
    // ========================

    /// Select a user, or clear the selection with `None`.
    ///
    /// Either way the comment panel closes and any post error is reset,
    /// except the banner for a failed user list, which has no retry.
    pub fn select_user(&mut self, user: Option<User>) -> Option<NetworkCommand> {
        self.close_comments();
        self.posts_cursor = 0;

        match user {
            None => {
                tracing::debug!("User selection cleared");
                self.selected_user = None;
                self.posts = if self.users == UsersState::Failed {
                    PostsState::Failed
                } else {
                    PostsState::NoUser
                };
                None
            }
            Some(user) => {
                let id = self.next_id();
                tracing::debug!(id, user_id = user.id, "User selected");
                let user_id = user.id;
                self.selected_user = Some(user);
                self.posts = PostsState::Loading { request_id: id };
                Some(NetworkCommand::FetchPosts { id, user_id })
            }
        }
    }

    /// Target a post for comments. Targeting the open post closes the panel.
    pub fn select_post(&mut self, post_id: u64) -> Option<NetworkCommand> {
        if self.comments_panel.as_ref().map(|p| p.post_id) == Some(post_id) {
            self.close_comments();
            return None;
        }

        let id = self.next_id();
        tracing::debug!(id, post_id, "Post targeted for comments");
        self.comments_panel = Some(CommentsPanel::new(post_id, id));
        self.comments_cursor = 0;
        self.input_mode = InputMode::Normal;
        Some(NetworkCommand::FetchComments { id, post_id })
    }

    pub fn close_comments(&mut self) {
        self.comments_panel = None;
        self.comments_cursor = 0;
        self.input_mode = InputMode::Normal;
        if self.active_panel == Panel::Comments {
            self.active_panel = Panel::Posts;
        }
    }

    /// Act on the highlighted row of the focused panel
    pub fn select_highlighted(&mut self) -> Option<NetworkCommand> {
        match self.active_panel {
            Panel::Users => {
                let user = self.user_list().get(self.users_cursor).cloned()?;
                self.select_user(Some(user))
            }
            Panel::Posts => {
                let post_id = self.post_list().get(self.posts_cursor).map(|p| p.id)?;
                self.select_post(post_id)
            }
            Panel::Comments => None,
        }
    }

    // ========================
    // Comment form
    // ========================

    /// Flip the form flag. The form is drawn only once the comments have loaded.
    pub fn toggle_comment_form(&mut self) {
        if let Some(panel) = self.comments_panel.as_mut() {
            panel.composing = !panel.composing;
            if !panel.composing {
                self.input_mode = InputMode::Normal;
            }
        }
    }

    /// Focus the form for typing, opening it if needed. Does nothing until
    /// the comments have loaded, since the form is not drawn before that.
    pub fn start_editing(&mut self) {
        if let Some(panel) = self.comments_panel.as_mut().filter(|p| p.is_loaded()) {
            panel.composing = true;
            self.active_panel = Panel::Comments;
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        if let Some(panel) = self.comments_panel.as_mut() {
            panel.form.active_field = panel.form.active_field.next();
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(panel) = self.comments_panel.as_mut() {
            let field = panel.form.active_field;
            panel.form.field_mut(field).push(c);
            panel.form.clear_error(field);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(panel) = self.comments_panel.as_mut() {
            let field = panel.form.active_field;
            panel.form.field_mut(field).pop();
        }
    }

    pub fn clear_comment_form(&mut self) {
        if let Some(panel) = self.comments_panel.as_mut() {
            let submitting = panel.form.submitting;
            panel.form = Default::default();
            panel.form.submitting = submitting;
        }
    }

    /// Validate the form and, when every field is filled in, post it
    pub fn submit_comment(&mut self) -> Option<NetworkCommand> {
        let post_id = {
            let panel = self.comments_panel.as_mut().filter(|p| p.is_loaded())?;
            let form = &mut panel.form;
            if form.submitting {
                return None;
            }
            form.errors.name = form.name.trim().is_empty();
            form.errors.email = form.email.trim().is_empty();
            form.errors.body = form.body.trim().is_empty();
            if form.errors.any() {
                tracing::debug!(errors = ?form.errors, "Comment form rejected");
                return None;
            }
            panel.post_id
        };

        let id = self.next_id();
        let panel = self.comments_panel.as_mut()?;
        panel.form.submitting = true;
        panel.pending_mutations.insert(id, Mutation::Create);
        let data = CommentData {
            post_id,
            name: panel.form.name.trim().to_string(),
            email: panel.form.email.trim().to_string(),
            body: panel.form.body.trim().to_string(),
        };
        Some(NetworkCommand::CreateComment { id, data })
    }

    /// Ask the server to delete the highlighted comment
    pub fn delete_highlighted_comment(&mut self) -> Option<NetworkCommand> {
        let comment_id = self.comment_list().get(self.comments_cursor).map(|c| c.id)?;
        self.delete_comment(comment_id)
    }

    /// Ask the server to delete a listed comment. A second request for a
    /// comment that is already being deleted is not sent.
    pub fn delete_comment(&mut self, comment_id: u64) -> Option<NetworkCommand> {
        if !self.comment_list().iter().any(|c| c.id == comment_id) {
            return None;
        }
        if self.comments_panel.as_ref()?.is_deleting(comment_id) {
            tracing::debug!(comment_id, "Delete already in flight");
            return None;
        }
        let id = self.next_id();
        self.comments_panel
            .as_mut()?
            .pending_mutations
            .insert(id, Mutation::Delete { comment_id });
        Some(NetworkCommand::DeleteComment { id, comment_id })
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
        if self.active_panel == Panel::Comments && self.comments_panel.is_none() {
            self.active_panel = self.active_panel.next();
        }
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
        if self.active_panel == Panel::Comments && self.comments_panel.is_none() {
            self.active_panel = self.active_panel.prev();
        }
    }

    pub fn move_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = match self.active_panel {
            Panel::Users => self.user_list().len(),
            Panel::Posts => self.post_list().len(),
            Panel::Comments => self.comment_list().len(),
        };
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.active_panel {
            Panel::Users => &mut self.users_cursor,
            Panel::Posts => &mut self.posts_cursor,
            Panel::Comments => &mut self.comments_cursor,
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a response. Responses to requests that are no longer
    /// awaited are dropped.
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();

        match response {
            NetworkResponse::Users { id, result } => {
                if self.users != (UsersState::Loading { request_id: id }) {
                    return self.discard(response_id);
                }
                match result {
                    Ok(users) => {
                        tracing::debug!(count = users.len(), "Users loaded");
                        self.users = UsersState::Loaded(users);
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Failed to load users");
                        self.users = UsersState::Failed;
                        self.posts = PostsState::Failed;
                    }
                }
            }

            NetworkResponse::Posts { id, user_id, result } => {
                if self.posts != (PostsState::Loading { request_id: id }) {
                    return self.discard(response_id);
                }
                match result {
                    Ok(posts) => {
                        tracing::debug!(user_id, count = posts.len(), "Posts loaded");
                        self.posts = PostsState::Loaded(posts);
                    }
                    Err(e) => {
                        tracing::warn!(id, user_id, error = %e, "Failed to load posts");
                        self.posts = PostsState::Failed;
                    }
                }
            }

            NetworkResponse::Comments { id, post_id, result } => {
                let Some(panel) = self.comments_panel.as_mut() else {
                    return self.discard(response_id);
                };
                if panel.comments != (CommentsState::Loading { request_id: id }) {
                    return self.discard(response_id);
                }
                match result {
                    Ok(comments) => {
                        tracing::debug!(post_id, count = comments.len(), "Comments loaded");
                        panel.comments = CommentsState::Loaded(comments);
                    }
                    Err(e) => {
                        tracing::warn!(id, post_id, error = %e, "Failed to load comments");
                        panel.comments = CommentsState::Failed;
                    }
                }
            }

            NetworkResponse::CommentCreated { id, result } => {
                let Some(panel) = self.comments_panel.as_mut() else {
                    return self.discard(response_id);
                };
                if panel.pending_mutations.remove(&id) != Some(Mutation::Create) {
                    return self.discard(response_id);
                }
                panel.form.submitting = false;
                match result {
                    Ok(comment) => {
                        tracing::debug!(comment_id = comment.id, "Comment created");
                        if let CommentsState::Loaded(comments) = &mut panel.comments {
                            comments.push(comment);
                        }
                        panel.form.body.clear();
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Failed to create comment");
                        panel.comments = CommentsState::Failed;
                        panel.composing = false;
                        self.input_mode = InputMode::Normal;
                    }
                }
            }

            NetworkResponse::CommentDeleted { id, comment_id, result } => {
                let Some(panel) = self.comments_panel.as_mut() else {
                    return self.discard(response_id);
                };
                if panel.pending_mutations.remove(&id) != Some(Mutation::Delete { comment_id }) {
                    return self.discard(response_id);
                }
                match result {
                    Ok(()) => {
                        tracing::debug!(comment_id, "Comment deleted");
                        if let CommentsState::Loaded(comments) = &mut panel.comments {
                            comments.retain(|c| c.id != comment_id);
                            let len = comments.len();
                            self.comments_cursor = self.comments_cursor.min(len.saturating_sub(1));
                        }
                    }
                    Err(e) => {
                        tracing::warn!(id, comment_id, error = %e, "Failed to delete comment");
                        panel.comments = CommentsState::Failed;
                        panel.composing = false;
                        self.input_mode = InputMode::Normal;
                    }
                }
            }
        }
    }

    fn discard(&self, id: u64) {
        tracing::warn!(id, "Discarding stale response");
    }
}
