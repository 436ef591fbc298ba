//! Startpage - the feed panel of a personal browser start page
//!
//! This crate aggregates headlines from RSS/Atom feeds and community boards
//! into one list and serves it as a paginated web page.

pub mod aggregator;
pub mod board;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod page;
pub mod routes;
pub mod source;
