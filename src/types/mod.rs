pub mod post;

pub use post::{CONTENT_FORMAT_TEXT, GeneratedPost, PostValidationError};
