//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that turns commands into API calls.
///
/// Requests are never cancelled; the App layer drops responses it no
/// longer waits for.
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                if let Some(response) = execute(&client, cmd).await {
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Reap finished tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Execute one command against the API
pub async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchUsers { id } => {
            tracing::info!(id, path = "/users", "Fetching users");
            NetworkResponse::Users {
                id,
                result: client.fetch_all_users().await,
            }
        }
        NetworkCommand::FetchPosts { id, user_id } => {
            tracing::info!(id, user_id, path = "/posts", "Fetching posts");
            NetworkResponse::Posts {
                id,
                user_id,
                result: client.fetch_posts_for_user(user_id).await,
            }
        }
        NetworkCommand::FetchComments { id, post_id } => {
            tracing::info!(id, post_id, path = "/comments", "Fetching comments");
            NetworkResponse::Comments {
                id,
                post_id,
                result: client.fetch_comments_for_post(post_id).await,
            }
        }
        NetworkCommand::CreateComment { id, data } => {
            tracing::info!(id, post_id = data.post_id, path = "/comments", "Creating comment");
            NetworkResponse::CommentCreated {
                id,
                result: client.create_comment(&data).await,
            }
        }
        NetworkCommand::DeleteComment { id, comment_id } => {
            tracing::info!(id, comment_id, path = "/comments", "Deleting comment");
            NetworkResponse::CommentDeleted {
                id,
                comment_id,
                result: client.delete_comment(comment_id).await,
            }
        }
        NetworkCommand::Shutdown => return None,
    };

    tracing::info!(id = response.id(), ok = response.is_ok(), "Request completed");
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ApiError;

    fn unreachable_client() -> ApiClient {
        // Port 9 (discard) on loopback; nothing listens there in test environments
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::from_parts(http, "http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_failure_is_reported_with_request_id() {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let actor = NetworkActor::new(unreachable_client(), resp_tx);
        let handle = tokio::spawn(actor.run(cmd_rx));

        cmd_tx.send(NetworkCommand::FetchPosts { id: 7, user_id: 1 }).unwrap();
        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response.id(), 7);
        match response {
            NetworkResponse::Posts { user_id, result, .. } => {
                assert_eq!(user_id, 1);
                assert!(matches!(result, Err(ApiError::Transport(_))));
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_has_no_response() {
        assert!(execute(&unreachable_client(), NetworkCommand::Shutdown).await.is_none());
    }
}
