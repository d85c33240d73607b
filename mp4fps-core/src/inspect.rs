//! Read-only listing of header occurrences.
//!
//! Uses the same literal search and offsets as the patcher, so what is listed
//! here is exactly what a patch would touch.

use serde::Serialize;

use crate::layout::{
    DURATION_OFFSET, HEADER_TAGS, SIZE_FIELD_LEN, TAG_LEN, TIMESCALE_OFFSET, VERSION_OFFSET,
    find_tag, read_u32_be, tag_name,
};

/// One `mvhd` or `mdhd` match and the values at the fixed header offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub tag: String,
    pub offset: usize,
    /// Declared box size, absent when the tag sits in the first four bytes.
    pub box_size: Option<u32>,
    pub version: Option<u8>,
    pub timescale: Option<u32>,
    pub duration: Option<u32>,
}

impl HeaderInfo {
    /// Duration in seconds, when both fields are readable and the timescale is non-zero.
    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        match (self.timescale, self.duration) {
            (Some(ts), Some(dur)) if ts > 0 => Some(f64::from(dur) / f64::from(ts)),
            _ => None,
        }
    }

    /// True when the patcher would count this occurrence.
    #[must_use]
    pub fn is_patchable(&self) -> bool {
        self.box_size.is_some() && self.timescale.is_some() && self.duration.is_some()
    }
}

/// Lists every header occurrence in file order.
#[must_use]
pub fn inspect_container(buf: &[u8]) -> Vec<HeaderInfo> {
    let mut headers: Vec<HeaderInfo> = HEADER_TAGS
        .iter()
        .flat_map(|tag| inspect_tag(buf, tag))
        .collect();
    headers.sort_by_key(|h| h.offset);
    headers
}

fn inspect_tag(buf: &[u8], tag: &[u8; 4]) -> Vec<HeaderInfo> {
    let mut found_headers = Vec::new();
    let mut cursor = 0;
    while let Some(found) = find_tag(buf, tag, cursor) {
        cursor = found + TAG_LEN;
        let box_size = found
            .checked_sub(SIZE_FIELD_LEN)
            .and_then(|size_offset| read_u32_be(buf, size_offset));
        found_headers.push(HeaderInfo {
            tag: tag_name(tag),
            offset: found,
            box_size,
            version: buf.get(found + VERSION_OFFSET).copied(),
            timescale: read_u32_be(buf, found + TIMESCALE_OFFSET),
            duration: read_u32_be(buf, found + DURATION_OFFSET),
        });
    }
    found_headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_headers_in_file_order() {
        let mut buf = vec![0, 0, 0, 32];
        buf.extend_from_slice(b"mdhd");
        buf.extend_from_slice(&[0; 8]);
        buf.extend_from_slice(&30000u32.to_be_bytes());
        buf.extend_from_slice(&90000u32.to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 24]);
        buf.extend_from_slice(b"mvhd");
        buf.extend_from_slice(&[0; 4]);

        let headers = inspect_container(&buf);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].tag, "mdhd");
        assert_eq!(headers[0].box_size, Some(32));
        assert_eq!(headers[0].duration_secs(), Some(3.0));
        assert!(headers[0].is_patchable());

        assert_eq!(headers[1].tag, "mvhd");
        assert_eq!(headers[1].version, Some(0));
        assert_eq!(headers[1].timescale, None);
        assert!(!headers[1].is_patchable());
    }
}
