pub mod review;
pub mod video;

pub use review::{MAX_RATING, ReviewRecord};
pub use video::{VideoRecord, format_timestamp, parse_timestamp};
