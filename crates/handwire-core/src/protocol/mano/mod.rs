//! MANO hand-pose packet decoding.
//!
//! The parser turns one complete framed buffer into a `Landmarks` message.
//! Two wire variants exist across producer revisions: an opaque-header form
//! (12 ignored bytes) and a timestamped form (sequence, seconds, nanoseconds).
//! The caller selects the variant; the parser never auto-detects, since a
//! timestamped buffer can be a byte-valid opaque buffer and vice versa.
//!
//! The point region is validated exactly: the declared count must account
//! for every remaining byte. A short decode that silently drops trailing
//! points would be worse than an explicit error. Byte offsets live in
//! `layout`, safe reads in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::ManoError;
pub use parser::{WireVariant, encode_landmarks, parse_landmarks};
