//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the users/posts/comments API
pub const DEFAULT_API_BASE_URL: &str = "https://mate.academy/students-api";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "postboard.log";

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".postboard";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "POSTBOARD_API_URL";

/// Environment variable setting a request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "POSTBOARD_TIMEOUT_SECS";

/// Banner shown when posts (or the user list) fail to load
pub const POSTS_ERROR_TEXT: &str = "Something went wrong!";

/// Inline message shown in the sidebar when comments fail
pub const COMMENTS_ERROR_TEXT: &str = "Something went wrong";
