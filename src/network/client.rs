//! HTTP client wrapper and the typed data accessors built on it

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::models::{Comment, CommentData, Post, User};
use crate::network::error::ApiError;

/// Thin JSON client bound to one API base URL.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(create_client(config), &config.api_base_url)
    }

    /// Bind an already configured `reqwest::Client` to a base URL
    pub fn from_parts(http: reqwest::Client, base_url: &str) -> Self {
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.http.get(self.url(path)).send().await?;
        decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(self.url(path)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// `GET /users`
    pub async fn fetch_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").await
    }

    /// `GET /posts?userId={id}`
    pub async fn fetch_posts_for_user(&self, user_id: u64) -> Result<Vec<Post>, ApiError> {
        self.get(&format!("/posts?userId={}", user_id)).await
    }

    /// `GET /comments?postId={id}`
    pub async fn fetch_comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        self.get(&format!("/comments?postId={}", post_id)).await
    }

    /// `POST /comments`, returning the stored comment with its new id
    pub async fn create_comment(&self, data: &CommentData) -> Result<Comment, ApiError> {
        self.post("/comments", data).await
    }

    /// `DELETE /comments/{id}`
    pub async fn delete_comment(&self, comment_id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/comments/{}", comment_id)).await
    }
}

/// Check the status, then parse the body as `T`
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Create an HTTP client from the configuration
pub fn create_client(config: &Config) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve one canned HTTP response on a loopback port.
    /// Resolves the returned receiver with the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(head_end) = find_head_end(&buf) {
                    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                    let content_length = head
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn find_head_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Loopback client that ignores any proxy set in the environment
    fn client_for(base_url: &str) -> ApiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::from_parts(http, &format!("{}/", base_url))
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:3000");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/users"), "http://localhost:3000/users");
    }

    #[tokio::test]
    async fn test_fetch_posts_hits_filtered_endpoint() {
        let (base, request) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"id":5,"userId":1,"title":"t","body":"b"}]"#,
        )
        .await;

        let posts = client_for(&base).fetch_posts_for_user(1).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, 1);

        let head = request.await.unwrap();
        assert!(head.starts_with("GET /posts?userId=1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_empty_posts_is_not_an_error() {
        let (base, _request) = serve_once("HTTP/1.1 200 OK", "[]").await;
        let posts = client_for(&base).fetch_posts_for_user(1).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (base, _request) = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let err = client_for(&base).fetch_comments_for_post(5).await.unwrap_err();
        assert_eq!(err, ApiError::Status(500));
    }

    #[tokio::test]
    async fn test_wrong_shape_maps_to_decode() {
        let (base, _request) = serve_once("HTTP/1.1 200 OK", r#"{"error":"nope"}"#).await;
        let err = client_for(&base).fetch_all_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_comment_posts_json() {
        let (base, request) = serve_once(
            "HTTP/1.1 201 Created",
            r#"{"id":9,"postId":5,"name":"Ann","email":"ann@example.com","body":"Hi"}"#,
        )
        .await;

        let data = CommentData {
            post_id: 5,
            name: String::from("Ann"),
            email: String::from("ann@example.com"),
            body: String::from("Hi"),
        };
        let comment = client_for(&base).create_comment(&data).await.unwrap();
        assert_eq!(comment.id, 9);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /comments HTTP/1.1"));
        assert!(raw.contains(r#""postId":5"#));
    }

    #[tokio::test]
    async fn test_delete_comment_accepts_empty_body() {
        let (base, request) = serve_once("HTTP/1.1 200 OK", "").await;
        client_for(&base).delete_comment(9).await.unwrap();
        assert!(request.await.unwrap().starts_with("DELETE /comments/9 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .fetch_all_users()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
