//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::CommentForm;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{Comment, Post, User};

/// What the main region shows, already resolved by priority
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MainContent {
    Error,
    #[default]
    NoUserSelected,
    Loading,
    Posts(Vec<Post>),
    NoPostsYet,
}

/// What the sidebar shows where the comment list goes
#[derive(Debug, Clone, PartialEq)]
pub enum CommentsView {
    Loading,
    Error,
    Empty,
    List(Vec<Comment>),
}

/// Sidebar snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarView {
    pub post_id: u64,
    /// The targeted post, when it is in the current list
    pub post: Option<Post>,
    pub comments: CommentsView,
    pub composing: bool,
    pub form: CommentForm,
}

/// Stable region markers. Tests and the log refer to regions by these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    UserSelector,
    MainContent,
    PostsLoadingError,
    NoSelectedUser,
    Loader,
    PostsList,
    NoPostsYet,
    Sidebar,
    PostDetails,
    CommentsError,
    NoCommentsMessage,
    Comment,
    WriteCommentButton,
    NewCommentForm,
}

impl Region {
    pub fn marker(&self) -> &'static str {
        match self {
            Region::UserSelector => "UserSelector",
            Region::MainContent => "MainContent",
            Region::PostsLoadingError => "PostsLoadingError",
            Region::NoSelectedUser => "NoSelectedUser",
            Region::Loader => "Loader",
            Region::PostsList => "PostsList",
            Region::NoPostsYet => "NoPostsYet",
            Region::Sidebar => "Sidebar",
            Region::PostDetails => "PostDetails",
            Region::CommentsError => "CommentsError",
            Region::NoCommentsMessage => "NoCommentsMessage",
            Region::Comment => "Comment",
            Region::WriteCommentButton => "WriteCommentButton",
            Region::NewCommentForm => "NewCommentForm",
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Selector
    pub users: Vec<User>,
    pub users_loading: bool,
    pub selected_user: Option<User>,

    // Main region
    pub main: MainContent,

    // Comment sidebar
    pub sidebar: Option<SidebarView>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub users_cursor: usize,
    pub posts_cursor: usize,
    pub comments_cursor: usize,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    /// Regions visible in this snapshot, outermost first
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = vec![Region::UserSelector, Region::MainContent];

        regions.push(match self.main {
            MainContent::Error => Region::PostsLoadingError,
            MainContent::NoUserSelected => Region::NoSelectedUser,
            MainContent::Loading => Region::Loader,
            MainContent::Posts(_) => Region::PostsList,
            MainContent::NoPostsYet => Region::NoPostsYet,
        });

        if let Some(sidebar) = &self.sidebar {
            regions.push(Region::Sidebar);
            regions.push(Region::PostDetails);
            match &sidebar.comments {
                CommentsView::Loading => regions.push(Region::Loader),
                CommentsView::Error => regions.push(Region::CommentsError),
                CommentsView::Empty => regions.push(Region::NoCommentsMessage),
                CommentsView::List(comments) => {
                    regions.extend(comments.iter().map(|_| Region::Comment));
                }
            }
            if matches!(sidebar.comments, CommentsView::Empty | CommentsView::List(_)) {
                regions.push(if sidebar.composing {
                    Region::NewCommentForm
                } else {
                    Region::WriteCommentButton
                });
            }
        }

        regions
    }

    pub fn shows(&self, region: Region) -> bool {
        self.regions().contains(&region)
    }

    pub fn is_loading(&self) -> bool {
        self.users_loading
            || self.main == MainContent::Loading
            || matches!(
                self.sidebar.as_ref().map(|s| &s.comments),
                Some(CommentsView::Loading)
            )
    }
}
