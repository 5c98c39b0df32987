//! Wire-format decoding modules.
//!
//! Each packet family follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and wire conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; framing and transport are handled by
//! the collaborator supplying the buffer.

pub mod mano;
