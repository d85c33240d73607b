//! Byte layout of the header boxes touched by the patcher.
//!
//! Offsets are measured from the first byte of the four-character tag, not
//! from the start of the box. Only the version-0 layout is described here;
//! version-1 headers carry 64-bit fields and do not match these offsets.

/// Movie header box tag.
pub const MVHD: [u8; 4] = *b"mvhd";

/// Media header box tag.
pub const MDHD: [u8; 4] = *b"mdhd";

/// Tags rewritten by a full container patch, in the order they are applied.
pub const HEADER_TAGS: [[u8; 4]; 2] = [MVHD, MDHD];

/// Length of a box tag.
pub const TAG_LEN: usize = 4;

/// Width of the box size field that precedes every tag.
pub const SIZE_FIELD_LEN: usize = 4;

/// Offset of the full-box version byte.
pub const VERSION_OFFSET: usize = TAG_LEN;

/// Offset of the 32-bit timescale field.
pub const TIMESCALE_OFFSET: usize = 12;

/// Offset of the 32-bit duration field.
pub const DURATION_OFFSET: usize = 16;

/// Bytes that must follow the start of a tag for both fields to be present.
pub const REQUIRED_SPAN: usize = DURATION_OFFSET + 4;

/// Reads a big-endian `u32` at `offset`, or `None` if it would run past the end.
#[must_use]
pub fn read_u32_be(buf: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes: [u8; 4] = buf.get(offset..end)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Writes `value` big-endian at `offset`. Returns `false` without touching the
/// buffer if the field would run past the end.
pub fn write_u32_be(buf: &mut [u8], offset: usize, value: u32) -> bool {
    let Some(end) = offset.checked_add(4) else {
        return false;
    };
    match buf.get_mut(offset..end) {
        Some(slot) => {
            slot.copy_from_slice(&value.to_be_bytes());
            true
        }
        None => false,
    }
}

/// Finds the next occurrence of `tag` at or after `from`.
#[must_use]
pub fn find_tag(buf: &[u8], tag: &[u8; 4], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(TAG_LEN)
        .position(|window| window == tag)
        .map(|pos| from + pos)
}

/// Renders a tag for logs and error messages.
#[must_use]
pub fn tag_name(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}
