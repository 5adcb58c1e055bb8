//! Page retrieval for brandlens: polite sequential HTTP fetching with retry,
//! and conversion of HTML bodies into plain text for the analysis engine.

pub mod client;
pub mod error;
pub mod html;
mod rate_limit;

pub use client::{FetchedPage, PageClient};
pub use error::ScraperError;
pub use html::html_to_text;
