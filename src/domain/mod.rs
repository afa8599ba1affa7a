pub mod news;
pub mod source;
