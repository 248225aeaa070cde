//! Core domain layer for noteshare.
//!
//! Pure types, traits and error definitions shared by every backend
//! implementation. No I/O happens in this crate.

pub mod cache;
pub mod note;
pub mod storage;
