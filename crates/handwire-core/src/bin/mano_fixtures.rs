//! Regenerates the binary golden fixtures under `tests/golden/mano/`.
//!
//! Run from the repository root:
//! `cargo run -p handwire-core --bin mano_fixtures`

use std::fs;
use std::path::{Path, PathBuf};

use handwire_core::{
    Landmarks, Point3D, PoseHeader, Stamp, WireVariant, encode_landmarks,
};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden/mano");
    fs::create_dir_all(&root).map_err(|err| format!("create {}: {err}", root.display()))?;

    write_fixture(&root, "variant_a.mano", &opaque_fixture_bytes())?;
    write_fixture(
        &root,
        "variant_b.mano",
        &encode_landmarks(&timestamped_fixture(), WireVariant::Timestamped),
    )?;
    write_fixture(&root, "size_mismatch.mano", &size_mismatch_bytes())?;

    println!("fixtures written to {}", root.display());
    Ok(())
}

/// The opaque-header fixture: 12 zero bytes, frame id "foo", two points.
fn opaque_fixture() -> Landmarks {
    Landmarks {
        header: PoseHeader {
            sequence: None,
            stamp: None,
            frame_id: "foo".to_string(),
        },
        points: vec![
            Point3D {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
            Point3D {
                x: 4.0,
                y: 5.0,
                z: 6.0,
            },
        ],
    }
}

fn opaque_fixture_bytes() -> Vec<u8> {
    encode_landmarks(&opaque_fixture(), WireVariant::Opaque)
}

fn timestamped_fixture() -> Landmarks {
    Landmarks {
        header: PoseHeader {
            sequence: Some(7),
            stamp: Some(Stamp {
                secs: 1_700_000_000,
                nanos: 500_000_000,
            }),
            frame_id: "hand_root".to_string(),
        },
        points: vec![
            Point3D {
                x: 0.125,
                y: -0.25,
                z: 0.5,
            },
            Point3D {
                x: 1.0,
                y: 2.0,
                z: -3.0,
            },
            Point3D {
                x: 0.0,
                y: 0.0,
                z: 4.5,
            },
        ],
    }
}

/// The opaque fixture with the count field patched to 3 while only 2 points'
/// worth of bytes follow.
fn size_mismatch_bytes() -> Vec<u8> {
    let mut bytes = opaque_fixture_bytes();
    let count_offset = 12 + 4 + "foo".len();
    bytes[count_offset..count_offset + 4].copy_from_slice(&3u32.to_le_bytes());
    bytes
}

fn write_fixture(root: &Path, name: &str, bytes: &[u8]) -> Result<(), String> {
    let path = root.join(name);
    fs::write(&path, bytes).map_err(|err| format!("write {}: {err}", path.display()))
}
