// Host-side tests for load-progress bookkeeping and GLB decoding.

use glam::Vec3;
use showcase_core::asset::decode_glb;
use showcase_core::error::AssetError;
use showcase_core::loader::{reserve_hint, LoadProgress, LoadState, MAX_RESERVE_BYTES};

#[test]
fn progress_is_monotonic_and_below_one() {
    let mut p = LoadProgress::new();
    assert_eq!(p.state(), &LoadState::Pending);

    assert_eq!(p.on_progress(10, 100), Some(0.1));
    assert_eq!(p.state(), &LoadState::Loading);
    // stale or repeated events never move the bar backwards
    assert_eq!(p.on_progress(5, 100), None);
    assert_eq!(p.on_progress(10, 100), None);

    let full = p.on_progress(100, 100);
    assert!(matches!(full, Some(r) if r < 1.0 && r > 0.99));
    assert_eq!(p.on_progress(200, 100), None);
    assert!(p.ratio() < 1.0);
}

#[test]
fn unknown_length_reports_nothing() {
    let mut p = LoadProgress::new();
    assert_eq!(p.on_progress(4096, 0), None);
    assert_eq!(p.ratio(), 0.0);
    assert_eq!(p.state(), &LoadState::Loading);
}

#[test]
fn completion_reports_one_exactly_once() {
    let mut p = LoadProgress::new();
    p.on_progress(50, 100);
    assert_eq!(p.complete(), Some(1.0));
    assert_eq!(p.complete(), None);
    assert_eq!(p.on_progress(99, 100), None);
    assert_eq!(p.ratio(), 1.0);
    assert!(p.is_finished());
}

#[test]
fn failure_is_terminal() {
    let mut p = LoadProgress::new();
    p.on_progress(1, 2);
    p.fail("HTTP 404");
    assert_eq!(p.state(), &LoadState::Failed("HTTP 404".to_string()));
    assert!(p.is_finished());
    assert_eq!(p.complete(), None);
    assert_eq!(p.on_progress(2, 2), None);
}

#[test]
fn reservation_ignores_oversized_content_length() {
    assert_eq!(reserve_hint(0), 0);
    assert_eq!(reserve_hint(1234), 1234);
    assert_eq!(reserve_hint(u64::MAX), MAX_RESERVE_BYTES as usize);
    assert_eq!(reserve_hint(MAX_RESERVE_BYTES + 1), MAX_RESERVE_BYTES as usize);
}

fn pad_to_four(bytes: &mut Vec<u8>, fill: u8) {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
}

// Single triangle in the XY plane with an optional node translation.
fn triangle_glb(translation: Option<[f32; 3]>) -> Vec<u8> {
    let node = match translation {
        Some([x, y, z]) => format!(r#"{{"mesh":0,"translation":[{},{},{}]}}"#, x, y, z),
        None => r#"{"mesh":0}"#.to_string(),
    };
    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"nodes":[{}],"meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}}}}]}}],"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}}],"bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}}],"buffers":[{{"byteLength":36}}]}}"#,
        node
    );
    let mut json = json.into_bytes();
    pad_to_four(&mut json, b' ');

    let mut bin = Vec::new();
    for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        bin.extend_from_slice(&v.to_le_bytes());
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

#[test]
fn decodes_single_triangle() {
    let mesh = decode_glb(&triangle_glb(None)).unwrap();
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
    for v in &mesh.vertices {
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
    }
    assert_eq!(mesh.bounds.min, Vec3::ZERO);
    assert_eq!(mesh.bounds.max, Vec3::new(1.0, 1.0, 0.0));
    assert!(mesh.camera.is_none());
}

#[test]
fn node_transform_is_baked_into_vertices() {
    let mesh = decode_glb(&triangle_glb(Some([1.0, 2.0, 3.0]))).unwrap();
    assert_eq!(mesh.vertices[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(mesh.bounds.min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(mesh.bounds.max, Vec3::new(2.0, 3.0, 3.0));
}

#[test]
fn garbage_is_malformed() {
    let result = decode_glb(b"definitely not a glb file");
    assert!(matches!(result, Err(AssetError::Malformed(_))));
}

#[test]
fn document_without_meshes_has_no_geometry() {
    let json = br#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[]}]}"#;
    assert!(matches!(decode_glb(json), Err(AssetError::NoGeometry)));
}
