//! In-memory transfer channels.

use std::ops::Range;

use bytes::{Bytes, BytesMut};

use super::{TransferSink, TransferSource};
use crate::error::TransferError;

/// Maps `offset..offset + len` onto a buffer of `available` bytes.
fn checked_range(offset: u64, len: usize, available: usize) -> Result<Range<usize>, TransferError> {
    let out_of_range = || TransferError::OutOfRange {
        offset,
        len,
        available: available as u64,
    };
    let start = usize::try_from(offset).map_err(|_| out_of_range())?;
    let end = start.checked_add(len).ok_or_else(out_of_range)?;
    if end > available {
        return Err(out_of_range());
    }
    Ok(start..end)
}

fn copy_from_slice(data: &[u8], offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
    let range = checked_range(offset, buf.len(), data.len())?;
    buf.copy_from_slice(&data[range]);
    Ok(())
}

impl TransferSource for [u8] {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        copy_from_slice(self, offset, buf)
    }
}

impl TransferSource for Vec<u8> {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        copy_from_slice(self, offset, buf)
    }
}

impl TransferSource for Bytes {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        copy_from_slice(self, offset, buf)
    }
}

/// Fixed-size destination: writes past the end are rejected.
impl TransferSink for [u8] {
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError> {
        let range = checked_range(offset, buf.len(), self.len())?;
        self[range].copy_from_slice(buf);
        Ok(())
    }
}

/// Growable destination: zero-fills any gap before `offset`.
impl TransferSink for BytesMut {
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError> {
        let range = checked_range(offset, buf.len(), usize::MAX)?;
        if self.len() < range.end {
            self.resize(range.end, 0);
        }
        self[range].copy_from_slice(buf);
        Ok(())
    }
}

impl TransferSink for Vec<u8> {
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError> {
        let range = checked_range(offset, buf.len(), usize::MAX)?;
        if self.len() < range.end {
            self.resize(range.end, 0);
        }
        self[range].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source() {
        let data = b"hello world".to_vec();
        let mut buf = [0u8; 5];
        data.clone().copy_into(6, &mut buf).unwrap();
        assert_eq!(&buf, b"world");
    }

    #[test]
    fn test_source_out_of_range() {
        let mut data = Bytes::from_static(b"short");
        let mut buf = [0u8; 4];
        let err = data.copy_into(3, &mut buf).unwrap_err();
        assert!(matches!(
            err,
            TransferError::OutOfRange {
                offset: 3,
                len: 4,
                available: 5
            }
        ));
    }

    #[test]
    fn test_source_offset_overflow() {
        let mut data = vec![0u8; 4];
        let mut buf = [0u8; 2];
        assert!(data.copy_into(u64::MAX, &mut buf).is_err());
    }

    #[test]
    fn test_fixed_sink_rejects_overflow() {
        let mut dest = [0u8; 7];
        let err = dest[..].copy_out_of(0, b"024d0127").unwrap_err();
        assert!(matches!(err, TransferError::OutOfRange { .. }));
        assert_eq!(dest, [0u8; 7]);
    }

    #[test]
    fn test_fixed_sink() {
        let mut dest = [b'x'; 10];
        dest[..].copy_out_of(1, b"abc").unwrap();
        assert_eq!(&dest, b"xabcxxxxxx");
    }

    #[test]
    fn test_growable_sink() {
        let mut dest = BytesMut::new();
        dest.copy_out_of(2, b"ab").unwrap();
        assert_eq!(&dest[..], b"\0\0ab");

        dest.copy_out_of(0, b"xy").unwrap();
        assert_eq!(&dest[..], b"xyab");
    }
}
