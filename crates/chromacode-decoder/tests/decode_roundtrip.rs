//! End-to-end pipeline tests against synthetically rendered markers.

use chromacode_core::RgbImageView;
use chromacode_decoder::{DecoderParams, FrameDecoder};
use chromacode_frame::{paint_marker, render_grid, CellColor, Resolution};

const FRAME_SIDE: usize = 540;
const CELL_PX: usize = 24;

fn test_chunks(resolution: Resolution) -> Vec<u16> {
    (0..resolution.content_chunks())
        .map(|i| ((i * 929 + 101) % 4096) as u16)
        .collect()
}

/// Paint the marker centered on a white canvas.
fn canvas_with_grid(grid: &[CellColor], resolution: Resolution) -> Vec<u8> {
    let marker = paint_marker(grid, resolution, CELL_PX, 0);
    assert!(marker.width < FRAME_SIDE);

    let mut canvas = vec![255u8; FRAME_SIDE * FRAME_SIDE * 3];
    let offset = (FRAME_SIDE - marker.width) / 2;
    for y in 0..marker.height {
        for x in 0..marker.width {
            let src = (y * marker.width + x) * 3;
            let dst = ((y + offset) * FRAME_SIDE + (x + offset)) * 3;
            canvas[dst..dst + 3].copy_from_slice(&marker.data[src..src + 3]);
        }
    }
    canvas
}

fn rotate90(canvas: &[u8], side: usize) -> Vec<u8> {
    let mut out = vec![0u8; canvas.len()];
    for y in 0..side {
        for x in 0..side {
            let src = (y * side + x) * 3;
            let dst = ((side - 1 - x) * side + y) * 3;
            out[dst..dst + 3].copy_from_slice(&canvas[src..src + 3]);
        }
    }
    out
}

fn mirror(canvas: &[u8], side: usize) -> Vec<u8> {
    let mut out = vec![0u8; canvas.len()];
    for y in 0..side {
        for x in 0..side {
            let src = (y * side + x) * 3;
            let dst = (y * side + (side - 1 - x)) * 3;
            out[dst..dst + 3].copy_from_slice(&canvas[src..src + 3]);
        }
    }
    out
}

fn decoder() -> FrameDecoder {
    FrameDecoder::new(DecoderParams::new(FRAME_SIDE, FRAME_SIDE)).expect("decoder")
}

fn view(canvas: &[u8]) -> RgbImageView<'_> {
    RgbImageView {
        width: FRAME_SIDE,
        height: FRAME_SIDE,
        data: canvas,
    }
}

#[test]
fn decode_recovers_the_rendered_payload() {
    let resolution = Resolution::R16;
    let chunks = test_chunks(resolution);
    let grid = render_grid(&chunks, resolution).expect("render");
    let canvas = canvas_with_grid(&grid, resolution);

    let report = decoder().process(&view(&canvas)).expect("process");
    assert_eq!(report.decoded.len(), 1, "report: {report:?}");
    assert_eq!(report.decoded[0].resolution, resolution);
    assert_eq!(report.decoded[0].chunks, chunks);
}

#[test]
fn decode_is_invariant_under_rotation_and_mirroring() {
    let resolution = Resolution::R16;
    let chunks = test_chunks(resolution);
    let grid = render_grid(&chunks, resolution).expect("render");
    let upright = canvas_with_grid(&grid, resolution);

    let mut decoder = decoder();
    for mirrored in [false, true] {
        let mut canvas = if mirrored {
            mirror(&upright, FRAME_SIDE)
        } else {
            upright.clone()
        };
        for quarter_turns in 0..4 {
            let decoded = decoder.decode(&view(&canvas)).expect("decode");
            assert_eq!(
                decoded.len(),
                1,
                "mirrored={mirrored} quarter_turns={quarter_turns}"
            );
            assert_eq!(decoded[0].resolution, resolution);
            assert_eq!(
                decoded[0].chunks, chunks,
                "mirrored={mirrored} quarter_turns={quarter_turns}"
            );
            canvas = rotate90(&canvas, FRAME_SIDE);
        }
    }
}

#[test]
fn decode_a_coarser_resolution() {
    let resolution = Resolution::R12;
    let chunks = test_chunks(resolution);
    let grid = render_grid(&chunks, resolution).expect("render");
    let canvas = canvas_with_grid(&grid, resolution);

    let decoded = decoder().decode(&view(&canvas)).expect("decode");
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].resolution, resolution);
    assert_eq!(decoded[0].chunks, chunks);
}

#[test]
fn tampered_corner_template_is_rejected() {
    let resolution = Resolution::R16;
    let r = resolution.value();
    let chunks = test_chunks(resolution);
    let mut grid = render_grid(&chunks, resolution).expect("render");
    // white is a legal corner color but does not oppose the white top-left
    grid[(r - 1) * r + (r - 1)] = CellColor::White;
    let canvas = canvas_with_grid(&grid, resolution);

    let report = decoder().process(&view(&canvas)).expect("process");
    assert!(report.decoded.is_empty());
    assert!(report.rejected_template >= 1, "report: {report:?}");
}

#[test]
fn blank_and_noisy_frames_decode_to_nothing() {
    let mut decoder = decoder();

    let blank = vec![255u8; FRAME_SIDE * FRAME_SIDE * 3];
    assert!(decoder.decode(&view(&blank)).expect("decode").is_empty());

    let mut noisy = Vec::with_capacity(FRAME_SIDE * FRAME_SIDE * 3);
    let mut state = 0x2545f4914f6cdd1du64;
    for _ in 0..FRAME_SIDE * FRAME_SIDE * 3 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        noisy.push((state >> 32) as u8);
    }
    assert!(decoder.decode(&view(&noisy)).expect("decode").is_empty());
}
