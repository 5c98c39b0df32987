use super::error::ManoError;
use super::layout;
use super::reader::ManoReader;
use crate::{Landmarks, Point3D, PoseHeader, Stamp};

/// Wire layout selector, chosen by caller context and never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireVariant {
    /// `[12 ignored bytes][u32 frame_id_len][frame_id][u32 N][N x 24B]`.
    /// Carries no decodable timestamp.
    Opaque,
    /// `[u32 sequence][u32 secs][u32 nanos][u32 frame_id_len][frame_id]
    /// [u32 N][N x 24B]`.
    Timestamped,
}

/// Decode one complete framed MANO packet into a `Landmarks` message.
///
/// Either fully succeeds or fails with a classified [`ManoError`]; there is
/// no partial result. Landmark order is wire order.
pub fn parse_landmarks(payload: &[u8], variant: WireVariant) -> Result<Landmarks, ManoError> {
    let reader = ManoReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let frame_id_len = reader.read_u32_le(layout::FRAME_ID_LEN_RANGE)?;
    let count_offset = layout::FRAME_ID_OFFSET + frame_id_len as usize;
    let points_offset = count_offset + layout::COUNT_SIZE;
    if payload.len() < points_offset {
        return Err(ManoError::TooSmallForFrame {
            frame_id_len,
            needed: points_offset,
            actual: payload.len(),
        });
    }

    let frame_id = reader.read_lossy_string(layout::FRAME_ID_OFFSET..count_offset)?;
    let count = reader.read_u32_le(count_offset..points_offset)?;

    let expected = count as usize * layout::POINT_SIZE;
    let remaining = payload.len() - points_offset;
    if remaining != expected {
        return Err(ManoError::SizeMismatch {
            count,
            remaining,
            expected,
        });
    }

    let mut points = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let base = points_offset + index * layout::POINT_SIZE;
        points.push(Point3D {
            x: reader.read_f64_le(base)?,
            y: reader.read_f64_le(base + 8)?,
            z: reader.read_f64_le(base + 16)?,
        });
    }

    let header = match variant {
        WireVariant::Opaque => PoseHeader {
            sequence: None,
            stamp: None,
            frame_id,
        },
        WireVariant::Timestamped => PoseHeader {
            sequence: Some(reader.read_u32_le(layout::SEQUENCE_RANGE)?),
            stamp: Some(Stamp {
                secs: reader.read_u32_le(layout::SECONDS_RANGE)?,
                nanos: reader.read_u32_le(layout::NANOS_RANGE)?,
            }),
            frame_id,
        },
    };

    Ok(Landmarks { header, points })
}

/// Encode a `Landmarks` message into the given wire variant.
///
/// Exact inverse of [`parse_landmarks`] for this one packet family; used by
/// the fixture generator and tests, not a general serializer. For the opaque
/// variant the 12 header bytes are written as zero and any sequence or stamp
/// on the message is not representable.
pub fn encode_landmarks(msg: &Landmarks, variant: WireVariant) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        layout::MIN_LEN + msg.header.frame_id.len() + msg.points.len() * layout::POINT_SIZE,
    );
    match variant {
        WireVariant::Opaque => out.extend_from_slice(&[0u8; layout::OPAQUE_HEADER_LEN]),
        WireVariant::Timestamped => {
            let stamp = msg.header.stamp.unwrap_or_default();
            out.extend_from_slice(&msg.header.sequence.unwrap_or(0).to_le_bytes());
            out.extend_from_slice(&stamp.secs.to_le_bytes());
            out.extend_from_slice(&stamp.nanos.to_le_bytes());
        }
    }
    out.extend_from_slice(&(msg.header.frame_id.len() as u32).to_le_bytes());
    out.extend_from_slice(msg.header.frame_id.as_bytes());
    out.extend_from_slice(&(msg.points.len() as u32).to_le_bytes());
    for point in &msg.points {
        out.extend_from_slice(&point.x.to_le_bytes());
        out.extend_from_slice(&point.y.to_le_bytes());
        out.extend_from_slice(&point.z.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{WireVariant, encode_landmarks, parse_landmarks};
    use crate::protocol::mano::error::ManoError;
    use crate::protocol::mano::layout;
    use crate::{Landmarks, Point3D, PoseHeader, Stamp};

    fn opaque_packet(frame_id: &[u8], points: &[(f64, f64, f64)]) -> Vec<u8> {
        let mut payload = vec![0u8; layout::OPAQUE_HEADER_LEN];
        payload.extend_from_slice(&(frame_id.len() as u32).to_le_bytes());
        payload.extend_from_slice(frame_id);
        payload.extend_from_slice(&(points.len() as u32).to_le_bytes());
        for (x, y, z) in points {
            payload.extend_from_slice(&x.to_le_bytes());
            payload.extend_from_slice(&y.to_le_bytes());
            payload.extend_from_slice(&z.to_le_bytes());
        }
        payload
    }

    #[test]
    fn parse_valid_opaque() {
        let payload = opaque_packet(b"foo", &[(1.0, 2.0, 3.0), (4.0, 5.0, 6.0)]);

        let parsed = parse_landmarks(&payload, WireVariant::Opaque).unwrap();
        assert_eq!(parsed.header.frame_id, "foo");
        assert_eq!(parsed.header.sequence, None);
        assert_eq!(parsed.header.stamp, None);
        assert_eq!(
            parsed.points,
            vec![
                Point3D {
                    x: 1.0,
                    y: 2.0,
                    z: 3.0
                },
                Point3D {
                    x: 4.0,
                    y: 5.0,
                    z: 6.0
                },
            ]
        );
    }

    #[test]
    fn parse_valid_timestamped() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&9u32.to_le_bytes());
        payload.extend_from_slice(&1_700_000_000u32.to_le_bytes());
        payload.extend_from_slice(&500_000_000u32.to_le_bytes());
        payload.extend_from_slice(&4u32.to_le_bytes());
        payload.extend_from_slice(b"hand");
        payload.extend_from_slice(&1u32.to_le_bytes());
        payload.extend_from_slice(&0.5f64.to_le_bytes());
        payload.extend_from_slice(&(-0.25f64).to_le_bytes());
        payload.extend_from_slice(&2.0f64.to_le_bytes());

        let parsed = parse_landmarks(&payload, WireVariant::Timestamped).unwrap();
        assert_eq!(parsed.header.sequence, Some(9));
        assert_eq!(
            parsed.header.stamp,
            Some(Stamp {
                secs: 1_700_000_000,
                nanos: 500_000_000,
            })
        );
        assert_eq!(parsed.header.frame_id, "hand");
        assert_eq!(
            parsed.points,
            vec![Point3D {
                x: 0.5,
                y: -0.25,
                z: 2.0
            }]
        );
    }

    #[test]
    fn parse_too_small() {
        let payload = vec![0u8; layout::MIN_LEN - 1];
        let err = parse_landmarks(&payload, WireVariant::Opaque).unwrap_err();
        assert!(matches!(err, ManoError::TooSmall { actual: 19 }));
    }

    #[test]
    fn parse_empty_never_panics() {
        let err = parse_landmarks(&[], WireVariant::Timestamped).unwrap_err();
        assert!(matches!(err, ManoError::TooSmall { actual: 0 }));
    }

    #[test]
    fn parse_too_small_for_frame_and_count() {
        // Declares a 100-byte frame id the buffer cannot hold.
        let mut payload = vec![0u8; layout::OPAQUE_HEADER_LEN];
        payload.extend_from_slice(&100u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 8]);

        let err = parse_landmarks(&payload, WireVariant::Opaque).unwrap_err();
        match err {
            ManoError::TooSmallForFrame {
                frame_id_len,
                needed,
                actual,
            } => {
                assert_eq!(frame_id_len, 100);
                assert_eq!(needed, layout::FRAME_ID_OFFSET + 100 + layout::COUNT_SIZE);
                assert_eq!(actual, payload.len());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_size_mismatch_reports_exact_values() {
        // Count says 3 but only 2 points' worth of bytes follow.
        let mut payload = opaque_packet(b"foo", &[(1.0, 2.0, 3.0), (4.0, 5.0, 6.0)]);
        let count_offset = layout::FRAME_ID_OFFSET + 3;
        payload[count_offset..count_offset + 4].copy_from_slice(&3u32.to_le_bytes());

        let err = parse_landmarks(&payload, WireVariant::Opaque).unwrap_err();
        match err {
            ManoError::SizeMismatch {
                count,
                remaining,
                expected,
            } => {
                assert_eq!(count, 3);
                assert_eq!(remaining, 48);
                assert_eq!(expected, 72);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_surplus_bytes() {
        // Excess trailing bytes are a hard failure, not ignored padding.
        let mut payload = opaque_packet(b"foo", &[(1.0, 2.0, 3.0)]);
        payload.push(0);

        let err = parse_landmarks(&payload, WireVariant::Opaque).unwrap_err();
        assert!(matches!(
            err,
            ManoError::SizeMismatch {
                count: 1,
                remaining: 25,
                expected: 24,
            }
        ));
    }

    #[test]
    fn parse_invalid_utf8_frame_id_is_lossy() {
        let payload = opaque_packet(&[b'f', 0xff, b'o'], &[(1.0, 2.0, 3.0)]);
        let parsed = parse_landmarks(&payload, WireVariant::Opaque).unwrap();
        assert_eq!(parsed.header.frame_id, "f\u{fffd}o");
        assert_eq!(parsed.points.len(), 1);
    }

    #[test]
    fn parse_zero_points() {
        let payload = opaque_packet(b"empty", &[]);
        let parsed = parse_landmarks(&payload, WireVariant::Opaque).unwrap();
        assert!(parsed.points.is_empty());
    }

    #[test]
    fn encode_parse_roundtrip_timestamped() {
        let msg = Landmarks {
            header: PoseHeader {
                sequence: Some(42),
                stamp: Some(Stamp {
                    secs: 1_690_000_123,
                    nanos: 456_789,
                }),
                frame_id: "mano_root".to_string(),
            },
            points: vec![
                Point3D {
                    x: 0.1,
                    y: -0.2,
                    z: 0.3,
                },
                Point3D {
                    x: 1e-9,
                    y: 2e9,
                    z: -3.5,
                },
            ],
        };

        let wire = encode_landmarks(&msg, WireVariant::Timestamped);
        let back = parse_landmarks(&wire, WireVariant::Timestamped).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn encode_parse_roundtrip_opaque_drops_stamp() {
        let msg = Landmarks {
            header: PoseHeader {
                sequence: None,
                stamp: None,
                frame_id: "palm".to_string(),
            },
            points: vec![Point3D {
                x: 7.0,
                y: 8.0,
                z: 9.0,
            }],
        };

        let wire = encode_landmarks(&msg, WireVariant::Opaque);
        let back = parse_landmarks(&wire, WireVariant::Opaque).unwrap();
        assert_eq!(back, msg);
    }
}
