//! Confluence exporter library
//!
//! This library provides functionality to export Confluence pages and page
//! trees to Markdown.

pub mod auth;
pub mod cli;
pub mod color;
pub mod config;
pub mod confluence;
pub mod export;
pub mod markdown;
