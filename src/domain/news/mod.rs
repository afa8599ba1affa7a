pub mod error;
pub mod fallback;
pub mod model;
pub mod normalizer;
pub mod pagination;
pub mod recency;
pub mod service;
pub mod text;

pub use error::{FeedError, NewsServiceError};
pub use model::{Enclosure, MediaRef, NewsItem, PaginatedResult, Pagination, RawEntry};
pub use service::{NewsQuery, NewsService, NewsServiceApi};
