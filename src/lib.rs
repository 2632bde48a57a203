//! # Postboard
//!
//! A terminal client for a users/posts/comments REST API.
//!
//! ## Features
//! - Pick a user and browse their posts
//! - Open a post's comments in a sidebar
//! - Write and delete comments
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, Region, RenderState, UiEvent};
pub use models::{Comment, CommentData, Post, User};
pub use network::{ApiClient, ApiError, NetworkActor};
