//! # Tag Reader
//!
//! Splits a byte region into tagged chunks. A tag is a 4-byte ASCII label followed by its
//! payload. Most tags carry a little-endian `u16` length after the label; a few have a
//! fixed payload and no length field. The reader knows nothing about what a payload means.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{FormatError, FormatResult};

/// Byte length of a tag label.
pub const LABEL_SIZE: usize = 4;

/// Byte length of a label plus its `u16` length field.
pub const SIZED_HEADER_SIZE: usize = LABEL_SIZE + 2;

/// How a tag's payload is delimited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagFraming {
    /// A `u16` length follows the label.
    Sized,
    /// The payload has a fixed size and no length field.
    Fixed(usize),
}

/// One tag occurrence inside a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Raw label bytes.
    pub label: [u8; LABEL_SIZE],
    /// Payload bytes, excluding the header.
    pub payload: &'a [u8],
    /// Offset of the label within the buffer.
    pub offset: usize,
    /// Offset of the byte following the payload, where the next tag starts.
    pub next_offset: usize,
}

impl<'a> Tag<'a> {
    /// Total bytes this tag spans, header included.
    pub fn consumed(&self) -> usize {
        self.next_offset - self.offset
    }
}

/// Renders label bytes for diagnostics.
pub fn label_lossy(label: &[u8]) -> String {
    String::from_utf8_lossy(label).into_owned()
}

/// Borrows `len` bytes at `offset`, failing if `buffer` is too short.
pub fn take(buffer: &[u8], offset: usize, len: usize) -> FormatResult<&[u8]> {
    let available = buffer.len().saturating_sub(offset);
    if len > available {
        return Err(FormatError::UnexpectedEof {
            offset,
            needed: len,
            available,
        });
    }
    Ok(&buffer[offset..offset + len])
}

/// Reads the 4-byte label at `offset` without consuming anything else.
pub fn peek_label(buffer: &[u8], offset: usize) -> FormatResult<[u8; LABEL_SIZE]> {
    let bytes = take(buffer, offset, LABEL_SIZE)?;
    let mut label = [0u8; LABEL_SIZE];
    label.copy_from_slice(bytes);
    Ok(label)
}

/// Reads the tag starting at `offset` using the given framing.
///
/// # Arguments
/// * `buffer` - The region the tag must fit in entirely
/// * `offset` - Offset of the tag label within `buffer`
/// * `framing` - How the payload length is determined
///
/// # Returns
/// The tag with its payload span and the offset of the following tag, or
/// `FormatError::UnexpectedEof` if the header or payload runs past `buffer`.
pub fn read_tag(buffer: &[u8], offset: usize, framing: TagFraming) -> FormatResult<Tag<'_>> {
    let label = peek_label(buffer, offset)?;
    let (payload_start, payload_len) = match framing {
        TagFraming::Sized => {
            let size_bytes = take(buffer, offset + LABEL_SIZE, 2)?;
            (
                offset + SIZED_HEADER_SIZE,
                LittleEndian::read_u16(size_bytes) as usize,
            )
        }
        TagFraming::Fixed(len) => (offset + LABEL_SIZE, len),
    };
    let payload = take(buffer, payload_start, payload_len)?;

    Ok(Tag {
        label,
        payload,
        offset,
        next_offset: payload_start + payload_len,
    })
}

/// Reads a sized tag and checks that its label is `expected`.
pub fn expect_tag<'a>(
    buffer: &'a [u8],
    offset: usize,
    expected: &'static str,
) -> FormatResult<Tag<'a>> {
    let label = peek_label(buffer, offset)?;
    if label != expected.as_bytes() {
        return Err(FormatError::UnexpectedTag {
            expected,
            found: label_lossy(&label),
            offset,
        });
    }
    read_tag(buffer, offset, TagFraming::Sized)
}
