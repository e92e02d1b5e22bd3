//! Handlers for crawler-facing documents.

mod sitemap;

pub use sitemap::sitemap_handler;
