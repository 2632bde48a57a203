use serde::{Deserialize, Serialize};

/// A person who owns posts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A post written by a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment left on a post
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Payload for creating a comment; the server assigns the id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_uses_camel_case_owner() {
        let json = r#"{"id":5,"userId":1,"title":"qui est esse","body":"est rerum"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.title, "qui est esse");
    }

    #[test]
    fn test_comment_data_serializes_post_id() {
        let data = CommentData {
            post_id: 5,
            name: String::from("Leanne"),
            email: String::from("leanne@example.com"),
            body: String::from("Nice"),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["postId"], 5);
        assert!(value.get("id").is_none());
    }
}
