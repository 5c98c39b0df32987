//! HandWire core library for hand-pose packet bridging.
//!
//! This crate implements the decoding and dispatch core used by the CLI and
//! by endpoint daemons: raw framed buffers feed the MANO packet decoder
//! (layout/reader/parser), and decoded landmark messages are routed through
//! a publisher registry to an external publish sink. Parsing is
//! byte-oriented and side-effect free; transport, topic lifecycle, and
//! process wiring live outside this crate.
//!
//! Invariants:
//! - Decoding either fully succeeds or fails with a classified error; no
//!   truncated or best-effort result exists.
//! - Landmark order is wire order; position encodes landmark identity.
//! - The registry is built once at startup and read-only afterwards.
//!
//! # Examples
//! ```
//! use handwire_core::{WireVariant, parse_landmarks};
//!
//! let mut packet = vec![0u8; 12];
//! packet.extend_from_slice(&4u32.to_le_bytes());
//! packet.extend_from_slice(b"palm");
//! packet.extend_from_slice(&0u32.to_le_bytes());
//!
//! let landmarks = parse_landmarks(&packet, WireVariant::Opaque)?;
//! assert_eq!(landmarks.header.frame_id, "palm");
//! assert!(landmarks.points.is_empty());
//! # Ok::<(), handwire_core::ManoError>(())
//! ```

use serde::{Deserialize, Serialize};

mod protocol;
mod publish;

pub use protocol::mano::{ManoError, WireVariant, encode_landmarks, parse_landmarks};
pub use publish::{
    DispatchError, Dispatcher, GenericDecodeError, GenericDecoder, HandPoseHandler,
    HandlerConfig, HandlerFactory, HandlerStatus, MANO_LANDMARKS, MessageKind, PacketHandler,
    PublishSink, PublisherRegistry,
};

/// Current decode-report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the wire variant carries no clock.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// A single 3D landmark, exactly 24 bytes on the wire (three LE doubles).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Wire timestamp split into seconds and nanoseconds, both u32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub secs: u32,
    pub nanos: u32,
}

/// Decoded packet header.
///
/// `sequence` and `stamp` are present only for the timestamped wire variant;
/// the opaque-header variant carries no decodable clock. `frame_id` names the
/// reference coordinate frame and may contain replacement characters when the
/// wire bytes were not valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseHeader {
    /// Wire sequence number (timestamped variant only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// Wire timestamp (timestamped variant only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp: Option<Stamp>,
    /// Reference coordinate frame label.
    pub frame_id: String,
}

/// Decoded hand-pose message: header plus ordered landmark points.
///
/// The declared wire count is enforced at decode time, so `points.len()` is
/// authoritative and no separate count field is stored.
///
/// # Examples
/// ```
/// use handwire_core::{Landmarks, Point3D, PoseHeader};
///
/// let msg = Landmarks {
///     header: PoseHeader {
///         sequence: None,
///         stamp: None,
///         frame_id: "wrist".to_string(),
///     },
///     points: vec![Point3D { x: 0.0, y: 0.0, z: 0.0 }],
/// };
/// assert_eq!(msg.points.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    pub header: PoseHeader,
    pub points: Vec<Point3D>,
}

/// Tool metadata embedded in decode reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "handwire").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in decode reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Versioned JSON envelope produced by the CLI for one decoded packet.
///
/// # Examples
/// ```
/// use handwire_core::{Landmarks, make_decode_report};
///
/// let report = make_decode_report("frame.mano", 20, "opaque", Landmarks::default());
/// assert_eq!(report.report_version, handwire_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp; the decoded wire stamp when present, else epoch.
    pub generated_at: String,
    /// Input file metadata.
    pub input: InputInfo,
    /// Wire variant the packet was decoded as ("opaque" or "timestamped").
    pub variant: String,
    /// The decoded message.
    pub landmarks: Landmarks,
}

/// Build a decode report with base fields filled from the decode outcome.
pub fn make_decode_report(
    input_path: &str,
    input_bytes: u64,
    variant: &str,
    landmarks: Landmarks,
) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "handwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        variant: variant.to_string(),
        landmarks,
    }
}
