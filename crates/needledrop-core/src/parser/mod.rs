pub mod classifier;
pub mod collator;
pub mod extractor;
pub mod genres;
pub mod rating;
pub mod title;

pub use classifier::{Classification, Classifier};
pub use collator::{Collator, Collection, SkippedVideo, collect};
pub use extractor::Extractor;
pub use genres::GenrePattern;
pub use rating::RatingPattern;
pub use title::{TitleMatch, TitleMatchers, TitleShape};
