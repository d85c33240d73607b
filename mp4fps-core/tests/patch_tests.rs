// mp4fps-core/tests/patch_tests.rs

use mp4fps_core::layout::{DURATION_OFFSET, MDHD, MVHD, TIMESCALE_OFFSET, read_u32_be};
use mp4fps_core::{CoreError, compute_scale, patch_atom, patch_container, parse_fps_text};

/// Minimal ftyp box followed by a moov box holding one mvhd and one mdhd.
fn sample_container(timescale: u32, duration: u32) -> (Vec<u8>, usize, usize) {
    let mut buf = Vec::new();
    buf.extend_from_slice(&[0, 0, 0, 16]);
    buf.extend_from_slice(b"ftypisom");
    buf.extend_from_slice(&[0, 0, 2, 0]);

    buf.extend_from_slice(&[0, 0, 0, 72]);
    buf.extend_from_slice(b"moov");

    let mvhd_at = push_header(&mut buf, &MVHD, timescale, duration);
    let mdhd_at = push_header(&mut buf, &MDHD, timescale, duration);
    (buf, mvhd_at, mdhd_at)
}

fn push_header(buf: &mut Vec<u8>, tag: &[u8; 4], timescale: u32, duration: u32) -> usize {
    buf.extend_from_slice(&[0, 0, 0, 32]);
    let at = buf.len();
    buf.extend_from_slice(tag);
    buf.extend_from_slice(&[0; 8]);
    buf.extend_from_slice(&timescale.to_be_bytes());
    buf.extend_from_slice(&duration.to_be_bytes());
    buf.extend_from_slice(&[0; 8]);
    at
}

fn fields(buf: &[u8], at: usize) -> (u32, u32) {
    (
        read_u32_be(buf, at + TIMESCALE_OFFSET).unwrap(),
        read_u32_be(buf, at + DURATION_OFFSET).unwrap(),
    )
}

#[test]
fn test_thirty_to_sixty_fps_halves_headers() {
    let (input, mvhd_at, mdhd_at) = sample_container(30000, 90000);
    let len = input.len();

    let original_fps = 30.0;
    let desired_fps = parse_fps_text("60").unwrap();
    let scale = compute_scale(original_fps, desired_fps).unwrap();
    assert_eq!(scale, 0.5);

    let patched = patch_container(input, scale).unwrap();
    assert_eq!(patched.bytes.len(), len);
    assert_eq!(patched.matched_count(), 2);
    assert_eq!(fields(&patched.bytes, mvhd_at), (15000, 45000));
    assert_eq!(fields(&patched.bytes, mdhd_at), (15000, 45000));
}

#[test]
fn test_only_header_fields_change() {
    let (input, mvhd_at, mdhd_at) = sample_container(600, 1800);
    let patched = patch_container(input.clone(), 2.0).unwrap();

    let changed: Vec<usize> = input
        .iter()
        .zip(&patched.bytes)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    let allowed = |i: usize| {
        [mvhd_at, mdhd_at]
            .iter()
            .any(|at| (at + TIMESCALE_OFFSET..at + DURATION_OFFSET + 4).contains(&i))
    };
    assert!(!changed.is_empty());
    assert!(changed.into_iter().all(allowed));
}

#[test]
fn test_zero_scale_counts_without_mutating() {
    let (input, _, _) = sample_container(30000, 90000);
    let patched = patch_container(input.clone(), 0.0).unwrap();
    assert_eq!(patched.bytes, input);
    assert_eq!(patched.matched_count(), 2);
}

#[test]
fn test_buffer_without_headers_is_unchanged() {
    let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let patched = patch_container(input.clone(), 3.0).unwrap();
    assert_eq!(patched.bytes, input);
    assert_eq!(patched.matched_count(), 0);
}

#[test]
fn test_truncated_tail_match_is_malformed_but_not_fatal() {
    let (mut input, mvhd_at, _) = sample_container(1000, 4000);
    input.extend_from_slice(&[0, 0, 0, 8]);
    input.extend_from_slice(&MVHD);
    input.extend_from_slice(&[1, 2, 3]);
    let len = input.len();

    let patched = patch_container(input, 2.0).unwrap();
    assert_eq!(patched.bytes.len(), len);
    assert_eq!(patched.matched_count(), 2);
    assert_eq!(fields(&patched.bytes, mvhd_at), (2000, 8000));
    assert_eq!(&patched.bytes[len - 3..], &[1, 2, 3]);

    let skipped: Vec<_> = patched.skipped().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].offset, len - 7);
}

#[test]
fn test_two_passes_approximate_product_scale() {
    let (input, mvhd_at, _) = sample_container(30000, 90000);

    let mut twice = input.clone();
    patch_atom(&mut twice, &MVHD, 0.5);
    patch_atom(&mut twice, &MVHD, 4.0);

    let mut once = input;
    patch_atom(&mut once, &MVHD, 2.0);

    assert_eq!(fields(&twice, mvhd_at), fields(&once, mvhd_at));
}

#[test]
fn test_invalid_fps_text_never_defaults() {
    for text in ["", "abc", "0", "fps"] {
        assert!(matches!(parse_fps_text(text), Err(CoreError::InvalidInput(_))));
    }
    assert!(matches!(compute_scale(0.0, 60.0), Err(CoreError::InvalidInput(_))));
    assert!(matches!(compute_scale(30.0, -60.0), Err(CoreError::InvalidInput(_))));
}
