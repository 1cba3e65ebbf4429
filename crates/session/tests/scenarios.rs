//! End-to-end tests for the session entry points.
//!
//! Each test drives a [`Session`] the way a host editor would: ingest raw
//! RGBA8 buffers, run operations against layer ids, then composite the stack
//! back into a caller-owned buffer.

use ps_session::{GrayscaleMethod, LayerId, Operation, Outcome, Session, SessionError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn solid(width: usize, height: usize, px: [u8; 4]) -> Vec<u8> {
    px.repeat(width * height)
}

fn pixels(buf: &[u8]) -> Vec<[u8; 4]> {
    buf.chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect()
}

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];

// ---------------------------------------------------------------------------
// Compositing
// ---------------------------------------------------------------------------

#[test]
fn red_layer_composites_to_red_canvas() {
    let mut session = Session::new();
    session.ingest(&solid(4, 4, RED), 4, 4, LayerId(1)).unwrap();

    let mut out = vec![0u8; 4 * 4 * 4];
    session.composite(&mut out, 4, 4, &[LayerId(1)]).unwrap();
    assert_eq!(pixels(&out), vec![RED; 16]);
}

#[test]
fn average_grayscale_then_composite() {
    let mut session = Session::new();
    session.ingest(&solid(4, 4, RED), 4, 4, LayerId(1)).unwrap();

    assert_eq!(
        session.grayscale(GrayscaleMethod::Average, LayerId(1)),
        Outcome::Applied
    );
    let out = session.render(&[LayerId(1)], 4, 4).unwrap();
    assert_eq!(pixels(&out), vec![[85, 85, 85, 255]; 16]);
}

#[test]
fn stack_order_is_bottom_first() {
    let mut session = Session::new();
    session.ingest(&solid(2, 2, RED), 2, 2, LayerId(1)).unwrap();
    session.ingest(&solid(1, 1, GREEN), 1, 1, LayerId(2)).unwrap();

    let out = session.render(&[LayerId(1), LayerId(2)], 2, 2).unwrap();
    assert_eq!(pixels(&out), vec![GREEN, RED, RED, RED]);

    let out = session.render(&[LayerId(2), LayerId(1)], 2, 2).unwrap();
    assert_eq!(pixels(&out), vec![RED; 4]);
}

#[test]
fn transparent_layer_never_changes_result() {
    let mut session = Session::new();
    let mut gradient = Vec::new();
    for i in 0..9u8 {
        gradient.extend_from_slice(&[i * 28, 255 - i * 20, 60, 100 + i * 17]);
    }
    session.ingest(&gradient, 3, 3, LayerId(1)).unwrap();
    session.ingest(&solid(3, 3, [40, 40, 200, 128]), 3, 3, LayerId(2)).unwrap();
    session.ingest(&solid(3, 3, [255, 255, 255, 0]), 3, 3, LayerId(3)).unwrap();

    let base = session.render(&[LayerId(1), LayerId(2)], 3, 3).unwrap();
    for order in [
        [LayerId(3), LayerId(1), LayerId(2)],
        [LayerId(1), LayerId(3), LayerId(2)],
        [LayerId(1), LayerId(2), LayerId(3)],
    ] {
        assert_eq!(session.render(&order, 3, 3).unwrap(), base);
    }
}

#[test]
fn wrong_output_size_is_reported() {
    let session = Session::new();
    let mut out = vec![0u8; 10];
    assert!(matches!(
        session.composite(&mut out, 2, 2, &[]),
        Err(SessionError::Compositor(_))
    ));
}

// ---------------------------------------------------------------------------
// Flood fill
// ---------------------------------------------------------------------------

#[test]
fn flood_fill_uniform_two_by_two() {
    let mut session = Session::new();
    session
        .ingest(&solid(2, 2, [10, 10, 10, 255]), 2, 2, LayerId(1))
        .unwrap();

    let outcome = session.flood_fill(LayerId(1), 0, 0, 0, 255, 0, 255, 0.0);
    assert_eq!(outcome, Outcome::Applied);
    let out = session.render(&[LayerId(1)], 2, 2).unwrap();
    assert_eq!(pixels(&out), vec![GREEN; 4]);
}

#[test]
fn flood_fill_full_threshold_covers_region() {
    let mut session = Session::new();
    let mut bytes = Vec::new();
    for i in 0..12u8 {
        bytes.extend_from_slice(&[i * 20, i * 3, 255 - i * 10, 255]);
    }
    session.ingest(&bytes, 4, 3, LayerId(1)).unwrap();
    session.flood_fill(LayerId(1), 1, 1, 0, 255, 0, 255, 100.0);
    assert_eq!(session.store().export(LayerId(1)), Some(solid(4, 3, GREEN)));
}

#[test]
fn flood_fill_out_of_bounds_is_noop() {
    let mut session = Session::new();
    session.ingest(&solid(2, 2, RED), 2, 2, LayerId(1)).unwrap();
    assert_eq!(
        session.flood_fill(LayerId(1), 5, 0, 0, 255, 0, 255, 50.0),
        Outcome::OutOfBounds
    );
    assert_eq!(session.store().export(LayerId(1)), Some(solid(2, 2, RED)));
}

// ---------------------------------------------------------------------------
// Quad compression
// ---------------------------------------------------------------------------

#[test]
fn uniform_layer_compression_roundtrip() {
    let color = [17, 99, 201, 255];
    for (tw, th) in [(6, 4), (3, 2), (1, 1), (5, 3)] {
        let mut session = Session::new();
        session.ingest(&solid(6, 4, color), 6, 4, LayerId(1)).unwrap();
        assert_eq!(session.quad_compress(LayerId(1), tw, th), Outcome::Applied);

        let dims = session.store().dimensions(LayerId(1)).unwrap();
        assert_eq!((dims.width as i64, dims.height as i64), (tw, th));
        assert_eq!(
            session.store().export(LayerId(1)),
            Some(solid(tw as usize, th as usize, color))
        );
    }
}

#[test]
fn compression_larger_than_source_is_noop() {
    let mut session = Session::new();
    session.ingest(&solid(2, 2, RED), 2, 2, LayerId(1)).unwrap();
    assert_eq!(session.quad_compress(LayerId(1), 4, 1), Outcome::OutOfBounds);
    assert_eq!(session.store().export(LayerId(1)), Some(solid(2, 2, RED)));
}

#[test]
fn compressed_layer_composites_under_same_id() {
    let mut session = Session::new();
    session.ingest(&solid(8, 8, RED), 8, 8, LayerId(4)).unwrap();
    session.quad_compress(LayerId(4), 2, 2);
    let out = session.render(&[LayerId(4)], 4, 4).unwrap();
    let px = pixels(&out);
    // The 2x2 layer covers only the top-left corner of the canvas.
    assert_eq!(px[0], RED);
    assert_eq!(px[5], RED);
    assert_eq!(px[2], [0, 0, 0, 0]);
    assert_eq!(px[8], [0, 0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Unknown layers and malformed buffers
// ---------------------------------------------------------------------------

#[test]
fn unknown_layer_leaves_output_untouched() {
    let mut session = Session::new();
    session.ingest(&solid(2, 2, RED), 2, 2, LayerId(1)).unwrap();

    let mut out = vec![0u8; 16];
    session.composite(&mut out, 2, 2, &[LayerId(1)]).unwrap();
    let before = out.clone();

    let op = Operation::EdgeLaplacian {
        layer_id: LayerId(77),
    };
    let outcome = session
        .apply_and_composite(&op, &[LayerId(1)], &mut out, 2, 2)
        .unwrap();
    assert_eq!(outcome, Outcome::UnknownLayer(LayerId(77)));
    assert_eq!(out, before);
}

#[test]
fn malformed_ingest_fails_loudly() {
    let mut session = Session::new();
    let err = session.ingest(&[0; 15], 2, 2, LayerId(1)).unwrap_err();
    assert!(matches!(err, SessionError::Buffer(_)));
    assert!(session.store().is_empty());
}

#[test]
fn clear_all_resets_session() {
    let mut session = Session::new();
    session.ingest(&solid(1, 1, RED), 1, 1, LayerId(1)).unwrap();
    session.ingest(&solid(1, 1, GREEN), 1, 1, LayerId(2)).unwrap();
    session.clear_all();
    let out = session.render(&[LayerId(1), LayerId(2)], 1, 1).unwrap();
    assert_eq!(out, vec![0, 0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Serialized operations
// ---------------------------------------------------------------------------

#[test]
fn replayed_json_operations_match_typed_calls() {
    let ops_json = r#"[
        {"type": "monochrome_itu", "layer_id": 1},
        {"type": "gaussian_blur", "layer_id": 1, "sigma": 1.0, "kernel_size": 3},
        {"type": "edge_sobel", "layer_id": 1},
        {"type": "bucket_fill", "layer_id": 1, "x": 0, "y": 0, "color": [0, 0, 255, 128], "threshold": 20.0}
    ]"#;
    let ops: Vec<Operation> = serde_json::from_str(ops_json).unwrap();

    let mut bytes = Vec::new();
    for i in 0..25u8 {
        let v = if i % 5 < 2 { 30 } else { 220 };
        bytes.extend_from_slice(&[v, v / 2, 255 - v, 255]);
    }

    let mut replayed = Session::new();
    replayed.ingest(&bytes, 5, 5, LayerId(1)).unwrap();
    let mut out = vec![0u8; 5 * 5 * 4];
    for op in &ops {
        let outcome = replayed
            .apply_and_composite(op, &[LayerId(1)], &mut out, 5, 5)
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
    }

    let mut typed = Session::new();
    typed.ingest(&bytes, 5, 5, LayerId(1)).unwrap();
    typed.grayscale(GrayscaleMethod::Itu, LayerId(1));
    typed.blur(LayerId(1), 1.0, 3);
    typed.edge_sobel(LayerId(1));
    typed.flood_fill(LayerId(1), 0, 0, 0, 0, 255, 128, 20.0);

    assert_eq!(out, typed.render(&[LayerId(1)], 5, 5).unwrap());
}

#[test]
fn unknown_effect_name_is_rejected() {
    let err = serde_json::from_str::<Operation>(r#"{"type": "emboss", "layer_id": 1}"#);
    assert!(err.is_err());
}
