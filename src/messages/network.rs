//! Network messages - communication between App and Network layers

use crate::models::{Comment, CommentData, Post, User};
use crate::network::ApiError;

/// Commands sent from App layer to Network layer.
///
/// Every command carries the request id the App layer will match the
/// response against.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load the full user list
    FetchUsers { id: u64 },
    /// Load the posts owned by a user
    FetchPosts { id: u64, user_id: u64 },
    /// Load the comments on a post
    FetchComments { id: u64, post_id: u64 },
    /// Store a new comment
    CreateComment { id: u64, data: CommentData },
    /// Remove a comment
    DeleteComment { id: u64, comment_id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Request id, if the command expects a response
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkCommand::FetchUsers { id }
            | NetworkCommand::FetchPosts { id, .. }
            | NetworkCommand::FetchComments { id, .. }
            | NetworkCommand::CreateComment { id, .. }
            | NetworkCommand::DeleteComment { id, .. } => Some(*id),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Users {
        id: u64,
        result: Result<Vec<User>, ApiError>,
    },
    Posts {
        id: u64,
        user_id: u64,
        result: Result<Vec<Post>, ApiError>,
    },
    Comments {
        id: u64,
        post_id: u64,
        result: Result<Vec<Comment>, ApiError>,
    },
    CommentCreated {
        id: u64,
        result: Result<Comment, ApiError>,
    },
    CommentDeleted {
        id: u64,
        comment_id: u64,
        result: Result<(), ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Users { id, .. } => *id,
            NetworkResponse::Posts { id, .. } => *id,
            NetworkResponse::Comments { id, .. } => *id,
            NetworkResponse::CommentCreated { id, .. } => *id,
            NetworkResponse::CommentDeleted { id, .. } => *id,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            NetworkResponse::Users { result, .. } => result.is_ok(),
            NetworkResponse::Posts { result, .. } => result.is_ok(),
            NetworkResponse::Comments { result, .. } => result.is_ok(),
            NetworkResponse::CommentCreated { result, .. } => result.is_ok(),
            NetworkResponse::CommentDeleted { result, .. } => result.is_ok(),
        }
    }
}
