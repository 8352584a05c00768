//! # Needledrop Core
//!
//! Classification and extraction engine for theneedledrop review uploads.
//! Decides which videos are rated album reviews and pulls artist, work
//! title, rating and genre tags out of their titles and descriptions.
//!
//! ## Quick Start
//!
//! ```rust
//! use needledrop_core::parser::Collator;
//! use needledrop_core::types::VideoRecord;
//!
//! let video = VideoRecord::parse(
//!     "abc123",
//!     "2010-05-05T18:34:43Z",
//!     "Flying Lotus- Cosmogramma ALBUM REVIEW",
//!     "FLYING LOTUS - COSMOGRAMMA / 2010 / WARP / EXPERIMENTAL HIP HOP\n\n8/10",
//! )
//! .unwrap();
//!
//! let collator = Collator::default().unwrap();
//! let review = collator.process_one(&video).unwrap().unwrap();
//!
//! assert_eq!(review.artist, "Flying Lotus");
//! assert_eq!(review.work_title, "Cosmogramma");
//! assert_eq!(review.rating, Some(8));
//! assert_eq!(review.genres, vec!["experimental hip hop"]);
//! ```
pub mod error;
pub mod grammar;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{NeedledropError, Result};
pub use grammar::{EdgeCase, Era, TitleGrammar};
pub use parser::{Classification, Classifier, Collator, Collection, Extractor, SkippedVideo};
pub use types::{ReviewRecord, VideoRecord};
