// ============================================================================
// mp4fps-core/src/patcher.rs
// ============================================================================
//
// ATOM PATCHER: In-Place Rewriting of Header Timescale and Duration
//
// The patcher treats the container as a flat byte stream. It searches for the
// literal `mvhd` and `mdhd` tags and, for each hit, rewrites the 32-bit
// timescale and duration fields found at fixed offsets after the tag. No box
// tree is parsed, no bytes are inserted or removed, so every size field in the
// file stays valid.
//
// KNOWN LIMITATION:
// The offsets assume version-0 headers. A version-1 header (64-bit fields) is
// patched at the same offsets and ends up corrupted unless the caller opts
// into `VersionPolicy::SkipVersion1`.

use log::{debug, warn};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::layout::{
    DURATION_OFFSET, HEADER_TAGS, REQUIRED_SPAN, SIZE_FIELD_LEN, TAG_LEN, TIMESCALE_OFFSET,
    VERSION_OFFSET, find_tag, read_u32_be, tag_name, write_u32_be,
};
use crate::scale::is_noop_scale;

/// How header versions are treated during a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Patch every match at the version-0 offsets.
    #[default]
    Ignore,
    /// Leave matches whose version byte is 1 untouched.
    SkipVersion1,
}

/// Why an occurrence was not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The tag starts inside the first four bytes, so it has no size field.
    LeadingBoundary,
    /// The buffer ends before the duration field does.
    Truncated,
    /// Version-1 header skipped under [`VersionPolicy::SkipVersion1`].
    Version1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBox {
    pub tag: String,
    pub offset: usize,
    pub reason: SkipReason,
}

/// Outcome of scanning a buffer for one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AtomPatchReport {
    pub tag: String,
    /// Occurrences that were counted (and rewritten unless the scale was a no-op).
    pub matched: usize,
    pub skipped: Vec<SkippedBox>,
    /// Fields whose scaled value did not fit in 32 bits and were clamped.
    pub saturated: usize,
}

/// A fully patched container buffer.
#[derive(Debug, Clone)]
pub struct PatchedContainer {
    pub bytes: Vec<u8>,
    pub reports: Vec<AtomPatchReport>,
}

impl PatchedContainer {
    /// Total counted occurrences across all tags.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.reports.iter().map(|r| r.matched).sum()
    }

    /// Every skipped occurrence across all tags.
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedBox> {
        self.reports.iter().flat_map(|r| r.skipped.iter())
    }
}

/// Rewrites every occurrence of `tag` in `buf` and returns the match count.
///
/// A NaN, infinite or negative `scale` is treated as count-only: matches are
/// counted and nothing is written. [`patch_container`] rejects such values.
pub fn patch_atom(buf: &mut [u8], tag: &[u8; 4], scale: f64) -> usize {
    patch_atom_with(buf, tag, scale, VersionPolicy::Ignore).matched
}

/// Same as [`patch_atom`], with a version policy and a detailed report.
pub fn patch_atom_with(
    buf: &mut [u8],
    tag: &[u8; 4],
    scale: f64,
    policy: VersionPolicy,
) -> AtomPatchReport {
    let name = tag_name(tag);
    let usable = is_usable_scale(scale);
    if !usable {
        warn!("Scale {scale} is not a finite non-negative number; counting '{name}' only");
    }
    let mutate = usable && !is_noop_scale(scale);
    let mut report = AtomPatchReport {
        tag: name.clone(),
        ..Default::default()
    };

    let mut cursor = 0;
    while let Some(found) = find_tag(buf, tag, cursor) {
        cursor = found + TAG_LEN;

        if found < SIZE_FIELD_LEN {
            debug!("Skipping '{name}' at offset {found}: no room for a size field");
            report.skipped.push(skipped(&name, found, SkipReason::LeadingBoundary));
            continue;
        }

        let (timescale, duration) = match header_fields(buf, &name, found) {
            Ok(fields) => fields,
            Err(err) => {
                warn!("{err}; skipping occurrence");
                report.skipped.push(skipped(&name, found, SkipReason::Truncated));
                continue;
            }
        };

        if policy == VersionPolicy::SkipVersion1 && buf[found + VERSION_OFFSET] == 1 {
            warn!("Skipping version-1 '{name}' at offset {found}");
            report.skipped.push(skipped(&name, found, SkipReason::Version1));
            continue;
        }

        if mutate {
            let (new_timescale, ts_clamped) = scale_field(timescale, scale);
            let (new_duration, dur_clamped) = scale_field(duration, scale);
            if ts_clamped || dur_clamped {
                warn!("Scaled '{name}' fields at offset {found} exceed 32 bits; clamped");
            }
            report.saturated += usize::from(ts_clamped) + usize::from(dur_clamped);

            write_u32_be(buf, found + TIMESCALE_OFFSET, new_timescale);
            write_u32_be(buf, found + DURATION_OFFSET, new_duration);
            debug!(
                "Patched '{name}' at offset {found}: timescale {timescale} -> {new_timescale}, duration {duration} -> {new_duration}"
            );
        } else {
            debug!("Counted '{name}' at offset {found} (timescale {timescale}, duration {duration})");
        }
        report.matched += 1;
    }

    report
}

/// Patches `mvhd` then `mdhd` over an owned buffer.
///
/// The returned bytes always have the same length as `input`.
pub fn patch_container(input: Vec<u8>, scale: f64) -> CoreResult<PatchedContainer> {
    patch_container_with(input, scale, VersionPolicy::Ignore)
}

/// [`patch_container`] with an explicit version policy.
pub fn patch_container_with(
    mut input: Vec<u8>,
    scale: f64,
    policy: VersionPolicy,
) -> CoreResult<PatchedContainer> {
    if !is_usable_scale(scale) {
        return Err(CoreError::InvalidInput(format!(
            "scale factor must be a finite non-negative number, got {scale}"
        )));
    }

    let reports = HEADER_TAGS
        .iter()
        .map(|tag| patch_atom_with(&mut input, tag, scale, policy))
        .collect();

    Ok(PatchedContainer {
        bytes: input,
        reports,
    })
}

fn is_usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale >= 0.0
}

/// Reads the timescale and duration that follow a tag at `found`.
fn header_fields(buf: &[u8], name: &str, found: usize) -> CoreResult<(u32, u32)> {
    let malformed = || CoreError::MalformedContainer {
        tag: name.to_string(),
        offset: found,
        needed: found.saturating_add(REQUIRED_SPAN),
        len: buf.len(),
    };
    let timescale = read_u32_be(buf, found + TIMESCALE_OFFSET).ok_or_else(malformed)?;
    let duration = read_u32_be(buf, found + DURATION_OFFSET).ok_or_else(malformed)?;
    Ok((timescale, duration))
}

/// Multiplies and truncates toward zero, clamping to `u32::MAX`.
fn scale_field(value: u32, scale: f64) -> (u32, bool) {
    let scaled = (f64::from(value) * scale).trunc();
    if scaled > f64::from(u32::MAX) {
        (u32::MAX, true)
    } else {
        (scaled as u32, false)
    }
}

fn skipped(tag: &str, offset: usize, reason: SkipReason) -> SkippedBox {
    SkippedBox {
        tag: tag.to_string(),
        offset,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MDHD, MVHD};

    /// Size field, tag, eight filler bytes, timescale, duration, trailer.
    fn header(tag: &[u8; 4], timescale: u32, duration: u32) -> Vec<u8> {
        let mut buf = vec![0, 0, 0, 32];
        buf.extend_from_slice(tag);
        buf.extend_from_slice(&[0; 8]);
        buf.extend_from_slice(&timescale.to_be_bytes());
        buf.extend_from_slice(&duration.to_be_bytes());
        buf.extend_from_slice(&[0; 8]);
        buf
    }

    fn fields(buf: &[u8], found: usize) -> (u32, u32) {
        (
            read_u32_be(buf, found + TIMESCALE_OFFSET).unwrap(),
            read_u32_be(buf, found + DURATION_OFFSET).unwrap(),
        )
    }

    #[test]
    fn test_scale_by_two_doubles_fields() {
        let mut buf = header(&MVHD, 600, 1234);
        assert_eq!(patch_atom(&mut buf, &MVHD, 2.0), 1);
        assert_eq!(fields(&buf, 4), (1200, 2468));
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut buf = header(&MDHD, 1001, 3);
        patch_atom(&mut buf, &MDHD, 0.5);
        assert_eq!(fields(&buf, 4), (500, 1));
    }

    #[test]
    fn test_noop_scales_only_count() {
        for scale in [0.0, 1.0] {
            let original = [header(&MVHD, 90000, 270000), header(&MVHD, 1, 2)].concat();
            let mut buf = original.clone();
            assert_eq!(patch_atom(&mut buf, &MVHD, scale), 2);
            assert_eq!(buf, original);
        }
    }

    #[test]
    fn test_no_match_leaves_buffer_alone() {
        let original = b"ftypisomfree\0\0\0\0moov".to_vec();
        let mut buf = original.clone();
        assert_eq!(patch_atom(&mut buf, &MVHD, 2.0), 0);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_leading_match_is_skipped_without_error() {
        let mut buf = b"mvhd".to_vec();
        buf.extend_from_slice(&[0xFF; 32]);
        let original = buf.clone();
        let report = patch_atom_with(&mut buf, &MVHD, 2.0, VersionPolicy::Ignore);
        assert_eq!(report.matched, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::LeadingBoundary);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_truncated_match_is_skipped_and_scan_continues() {
        let mut buf = header(&MVHD, 100, 200);
        // Tag with only twelve bytes after it.
        buf.extend_from_slice(&[0, 0, 0, 8]);
        buf.extend_from_slice(&MVHD);
        buf.extend_from_slice(&[0xEE; 12]);
        let len = buf.len();

        let report = patch_atom_with(&mut buf, &MVHD, 2.0, VersionPolicy::Ignore);
        assert_eq!(report.matched, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Truncated);
        assert_eq!(fields(&buf, 4), (200, 400));
        assert_eq!(buf.len(), len);
        assert!(buf[len - 12..].iter().all(|b| *b == 0xEE));
    }

    #[test]
    fn test_unusable_scales_only_count() {
        for scale in [f64::NAN, -1.0, f64::INFINITY] {
            let original = header(&MVHD, 30000, 90000);
            let mut buf = original.clone();
            let report = patch_atom_with(&mut buf, &MVHD, scale, VersionPolicy::Ignore);
            assert_eq!(report.matched, 1, "{scale}");
            assert_eq!(report.saturated, 0);
            assert_eq!(buf, original, "{scale}");
            assert_eq!(patch_atom(&mut buf, &MVHD, scale), 1);
            assert_eq!(fields(&buf, 4), (30000, 90000));
        }
    }

    #[test]
    fn test_tags_in_first_four_bytes_are_skipped() {
        for offset in 0..SIZE_FIELD_LEN {
            let mut buf = vec![0xFFu8; offset];
            buf.extend_from_slice(&MVHD);
            buf.extend_from_slice(&[0x11; 32]);
            let original = buf.clone();

            let report = patch_atom_with(&mut buf, &MVHD, 2.0, VersionPolicy::Ignore);
            assert_eq!(report.matched, 0, "offset {offset}");
            assert_eq!(report.skipped[0].offset, offset);
            assert_eq!(report.skipped[0].reason, SkipReason::LeadingBoundary);
            assert_eq!(buf, original);
        }
    }

    #[test]
    fn test_exact_fit_is_counted_and_one_byte_short_is_not() {
        // Tag at 4, duration ends at 4 + 20 == len.
        let mut exact = header(&MDHD, 100, 200);
        exact.truncate(4 + REQUIRED_SPAN);
        assert_eq!(patch_atom(&mut exact, &MDHD, 2.0), 1);
        assert_eq!(fields(&exact, 4), (200, 400));

        let mut short = header(&MDHD, 100, 200);
        short.truncate(4 + REQUIRED_SPAN - 1);
        let original = short.clone();
        let report = patch_atom_with(&mut short, &MDHD, 2.0, VersionPolicy::Ignore);
        assert_eq!(report.matched, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::Truncated);
        assert_eq!(short, original);
    }

    #[test]
    fn test_version1_policy() {
        let mut v1 = header(&MDHD, 48000, 96000);
        v1[4 + VERSION_OFFSET] = 1;
        let original = v1.clone();

        let report = patch_atom_with(&mut v1, &MDHD, 2.0, VersionPolicy::SkipVersion1);
        assert_eq!(report.matched, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::Version1);
        assert_eq!(v1, original);

        assert_eq!(patch_atom(&mut v1, &MDHD, 2.0), 1);
        assert_ne!(v1, original);
    }

    #[test]
    fn test_overflow_is_clamped() {
        let mut buf = header(&MVHD, u32::MAX - 1, 10);
        let report = patch_atom_with(&mut buf, &MVHD, 4.0, VersionPolicy::Ignore);
        assert_eq!(report.saturated, 1);
        assert_eq!(fields(&buf, 4), (u32::MAX, 40));
    }

    #[test]
    fn test_patch_container_covers_both_tags() {
        let input = [header(&MVHD, 1000, 5000), header(&MDHD, 30000, 90000)].concat();
        let len = input.len();
        let patched = patch_container(input, 0.5).unwrap();
        assert_eq!(patched.bytes.len(), len);
        assert_eq!(patched.matched_count(), 2);
        assert_eq!(fields(&patched.bytes, 4), (500, 2500));
        assert_eq!(fields(&patched.bytes, 32 + 4), (15000, 45000));
    }

    #[test]
    fn test_patch_container_rejects_bad_scale() {
        for scale in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                patch_container(vec![0; 8], scale),
                Err(CoreError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_repeated_scans_count_the_same() {
        let mut buf = [header(&MVHD, 1, 1), header(&MVHD, 2, 2)].concat();
        assert_eq!(patch_atom(&mut buf, &MVHD, 0.0), 2);
        assert_eq!(patch_atom(&mut buf, &MVHD, 0.0), 2);
    }
}
