pub mod api;
pub mod config;
pub mod content;
pub mod draft;
pub mod seo;
pub mod submission;
pub mod text;
