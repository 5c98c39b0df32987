use std::fs;
use std::path::{Path, PathBuf};

use handwire_core::{Landmarks, ManoError, WireVariant, parse_landmarks};

fn golden_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join("mano")
}

fn load_fixture(name: &str) -> Vec<u8> {
    let path = golden_root().join(name);
    fs::read(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

fn load_expected(name: &str) -> Landmarks {
    let path = golden_root().join(name);
    let json = fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
    serde_json::from_str(&json).expect("parse expected landmarks")
}

#[test]
fn golden_variant_a() {
    let bytes = load_fixture("variant_a.mano");
    let expected = load_expected("expected_variant_a.json");

    let actual = parse_landmarks(&bytes, WireVariant::Opaque).expect("decode variant a");
    assert_eq!(actual, expected);
}

#[test]
fn golden_variant_b() {
    let bytes = load_fixture("variant_b.mano");
    let expected = load_expected("expected_variant_b.json");

    let actual = parse_landmarks(&bytes, WireVariant::Timestamped).expect("decode variant b");
    assert_eq!(actual, expected);
}

#[test]
fn golden_variant_a_concrete_values() {
    let bytes = load_fixture("variant_a.mano");
    let actual = parse_landmarks(&bytes, WireVariant::Opaque).expect("decode variant a");

    assert_eq!(actual.header.frame_id, "foo");
    assert_eq!(actual.points.len(), 2);
    assert_eq!(
        (actual.points[0].x, actual.points[0].y, actual.points[0].z),
        (1.0, 2.0, 3.0)
    );
    assert_eq!(
        (actual.points[1].x, actual.points[1].y, actual.points[1].z),
        (4.0, 5.0, 6.0)
    );
}

#[test]
fn golden_size_mismatch_is_classified() {
    let bytes = load_fixture("size_mismatch.mano");

    let err = parse_landmarks(&bytes, WireVariant::Opaque).expect_err("decode must fail");
    assert!(matches!(
        err,
        ManoError::SizeMismatch {
            count: 3,
            remaining: 48,
            expected: 72,
        }
    ));
}
