// src/lib.rs
// Website SEO report service

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod webhook;

pub use error::{Result, SeoError};
pub use report::{AnalyzeRequest, Grade, SeoReport};
