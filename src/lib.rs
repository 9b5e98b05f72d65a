// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Devotional Email Segmentation
//!
//! A segmentation engine that turns one raw devotional message (HTML or
//! plain text, with a decade's worth of inconsistent heading spellings)
//! into a normalized record of its scripture verse, reflection, and prayer,
//! plus an optional reading reference.
//!
//! # Features
//!
//! - Unicode and HTML normalization that preserves line structure
//! - Heading classification tolerant of emphasis markers and spelling drift
//! - Strict verse < reflection < prayer ordering
//! - Prayer inference from opener phrases, sign-offs, and trailing "Amen"
//! - Profile discovery: cluster a sample corpus by heading signature and
//!   derive reusable parsing profiles for whole message eras
//!
//! # Example
//!
//! ```rust
//! use devotional_extract::{parse_message, RawMessage};
//!
//! let msg = RawMessage {
//!     message_id: "17a2b3c4d5".into(),
//!     subject: "THE LISTENING PRAYER (read Ps. 86:1-12)".into(),
//!     date: "2021-06-06T11:30:00+00:00".into(),
//!     body_html: None,
//!     body_plain: Some(
//!         "Today's Verse: John 3:16\n\
//!          For God so loved the world.\n\
//!          Today's Reflection:\n\
//!          God's love is not earned.\n\
//!          Dear Heavenly Father, thank you for your love. Amen.\n\
//!          Pastor Al"
//!             .into(),
//!     ),
//! };
//!
//! let record = parse_message(&msg);
//! assert!(record.identified);
//! assert_eq!(record.subject, "THE LISTENING PRAYER");
//! assert_eq!(record.reading.as_deref(), Some("Ps. 86:1-12"));
//! assert_eq!(
//!     record.prayer,
//!     "Dear Heavenly Father, thank you for your love. Amen."
//! );
//! ```

mod corpus;
mod error;
mod heading;
mod locate;
mod normalize;
mod parser;
mod profile;
mod reading;
mod refs;
mod scrub;
mod slice;
mod types;
mod validate;

pub use corpus::*;
pub use error::{ParseError, Result};
pub use heading::*;
pub use locate::*;
pub use normalize::*;
pub use parser::*;
pub use profile::*;
pub use reading::*;
pub use refs::*;
pub use scrub::*;
pub use slice::*;
pub use types::*;
pub use validate::*;
