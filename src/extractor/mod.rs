//! Field extractors.
//!
//! Each extractor derives one field (or field group) from a single candidate
//! region. They are independent of each other and total: when a heuristic
//! finds nothing the field is `None`, never an error.
//!
//! # Module Structure
//!
//! - `permalink`: post URL and numeric post id
//! - `text`: message body
//! - `link`: first external link shared in the post
//! - `engagement`: likes, comments and shares counts
//! - `time`: display label and epoch-millisecond timestamp

pub mod engagement;
pub mod link;
pub mod permalink;
pub mod text;
pub mod time;

pub use engagement::{extract_engagement, Engagement};
pub use link::extract_external_link;
pub use permalink::{extract_permalink, Permalink};
pub use text::extract_text;
pub use time::{extract_time, PostTime};
