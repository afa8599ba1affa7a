pub mod feed_repository;
pub mod source_repository;

pub use feed_repository::{FeedRepository, HttpFeedRepository, DEFAULT_FETCH_TIMEOUT};
pub use source_repository::{FileSourceRepository, HardcodedSourceRepository, SourceFileError};
