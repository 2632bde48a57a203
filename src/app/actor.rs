//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns the state and processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop.
    ///
    /// The user list is requested once, before the first event is handled.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        if let Some(cmd) = self.state.start() {
            self.send(cmd);
        }
        self.publish();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::error!("Network actor is gone; command dropped");
        }
    }

    fn publish(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let cmd = match event {
            // Navigation
            UiEvent::NextPanel => {
                self.state.next_panel();
                None
            }
            UiEvent::PrevPanel => {
                self.state.prev_panel();
                None
            }
            UiEvent::MoveUp => {
                self.state.move_up();
                None
            }
            UiEvent::MoveDown => {
                self.state.move_down();
                None
            }

            // Selection
            UiEvent::Select => self.state.select_highlighted(),
            UiEvent::ClearUser => self.state.select_user(None),

            // Comments
            UiEvent::ToggleCommentForm => {
                self.state.toggle_comment_form();
                None
            }
            UiEvent::DeleteComment => self.state.delete_highlighted_comment(),

            // Form editing
            UiEvent::StartEditing => {
                self.state.start_editing();
                None
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                None
            }
            UiEvent::NextField => {
                self.state.next_field();
                None
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                None
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                None
            }
            UiEvent::SubmitComment => self.state.submit_comment(),
            UiEvent::ClearCommentForm => {
                self.state.clear_comment_form();
                None
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            self.send(cmd);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Region;
    use crate::models::{Post, User};

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        net_tx: mpsc::UnboundedSender<NetworkResponse>,
        cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        handle: tokio::task::JoinHandle<()>,
    }

    fn spawn_actor() -> Harness {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, net_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_rx));
        Harness { ui_tx, net_tx, cmd_rx, render_rx, handle }
    }

    fn user(id: u64) -> User {
        User {
            id,
            name: format!("User {}", id),
            email: String::from("user@example.com"),
            phone: String::from("555-0100"),
        }
    }

    #[tokio::test]
    async fn test_startup_fetches_users_then_selects() {
        let mut h = spawn_actor();

        let users_id = match h.cmd_rx.recv().await {
            Some(NetworkCommand::FetchUsers { id }) => id,
            other => panic!("expected FetchUsers, got {:?}", other),
        };
        let initial = h.render_rx.recv().await.unwrap();
        assert!(initial.users_loading);
        assert!(initial.shows(Region::NoSelectedUser));

        h.net_tx.send(NetworkResponse::Users { id: users_id, result: Ok(vec![user(1)]) }).unwrap();
        let loaded = h.render_rx.recv().await.unwrap();
        assert_eq!(loaded.users.len(), 1);

        h.ui_tx.send(UiEvent::Select).unwrap();
        let posts_id = match h.cmd_rx.recv().await {
            Some(NetworkCommand::FetchPosts { id, user_id: 1 }) => id,
            other => panic!("expected FetchPosts, got {:?}", other),
        };
        assert!(h.render_rx.recv().await.unwrap().shows(Region::Loader));

        let posts = vec![Post { id: 5, user_id: 1, title: String::from("t"), body: String::from("b") }];
        h.net_tx.send(NetworkResponse::Posts { id: posts_id, user_id: 1, result: Ok(posts) }).unwrap();
        assert!(h.render_rx.recv().await.unwrap().shows(Region::PostsList));

        h.ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(h.cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        h.handle.await.unwrap();
    }
}
