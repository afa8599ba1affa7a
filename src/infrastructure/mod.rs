pub mod config;
pub mod feed;
pub mod http;
pub mod middleware;
pub mod repositories;
