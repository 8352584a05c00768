//! # Needledrop Dataset
//!
//! Persistence for collected reviews: the flat row format of the published
//! dataset (genres joined with `;`), CSV, JSON Lines and JSON array readers
//! and writers, idempotent single-review append, and video dump loading.

pub mod error;
pub mod row;
pub mod store;

pub use error::{DatasetError, Result};
pub use row::{CSV_HEADER, GENRE_DELIMITER, ReviewRow};
pub use store::{
    append_csv, append_json_line, append_review, contains_review, read_csv, read_json,
    read_json_lines, read_videos, write_csv, write_json, write_json_lines,
};
