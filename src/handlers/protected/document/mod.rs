pub mod comments;
pub mod list;

pub use comments::{comment_post, comments_get};
pub use list::documents_get;
