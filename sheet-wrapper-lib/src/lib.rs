//! Sheet wrapper library
//!
//! Field-aware access to hosted spreadsheets: maps sheet rows to records,
//! caches sheet snapshots, and batches row hide/show into one call per
//! contiguous block.
//!
//! The pure parts ([`mapper`], [`blocks`]) work on plain tables and need no
//! host. [`SheetWrapper`] ties them to a [`host::SpreadsheetHost`].

pub mod blocks;
pub mod cache;
pub mod error;
pub mod host;
pub mod mapper;
pub mod model;

mod config;
mod wrapper;

pub use config::*;
pub use error::Error;
pub use error::Result;
pub use wrapper::*;
