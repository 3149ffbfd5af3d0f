//! Cat caption maker.
//!
//! Turns an English caption into a captioned cat image from cataas.com and
//! keeps a locally persisted, deduplicated list of favorite images.

pub mod contexts;
pub mod data;
pub mod validation;
