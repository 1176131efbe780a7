//! Fixed-width digest rendering.

use std::fmt;

/// Number of bytes a rendered digest occupies.
pub const DIGEST_LEN: usize = 8;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// A packed accumulator value rendered as 8 lowercase hex digits.
///
/// The digest is a plain byte array, not a terminated string: exactly
/// [`DIGEST_LEN`] bytes are ever handed to a caller.
///
/// # Example
///
/// ```
/// use adlersum::Digest;
///
/// let digest = Digest::from_packed(0x024d_0127);
/// assert_eq!(digest.as_bytes(), b"024d0127");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Renders a packed value, most significant nibble first.
    pub const fn from_packed(value: u32) -> Self {
        let mut out = [0u8; DIGEST_LEN];
        let mut i = 0;
        while i < DIGEST_LEN {
            let shift = ((DIGEST_LEN - 1 - i) * 4) as u32;
            out[i] = HEX[((value >> shift) & 0xf) as usize];
            i += 1;
        }
        Self(out)
    }

    /// Creates a digest from a slice of rendered hex digits.
    ///
    /// Returns `None` unless the slice is exactly 8 lowercase hex digits.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; DIGEST_LEN] = slice.try_into().ok()?;
        if !bytes.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return None;
        }
        Some(Self(bytes))
    }

    /// Returns the rendered bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Returns the digest as text.
    pub fn as_str(&self) -> &str {
        // Always ASCII hex digits.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Parses the digest back into the packed value.
    pub fn to_packed(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, &digit| {
            let nibble = match digit {
                b'0'..=b'9' => digit - b'0',
                _ => digit - b'a' + 10,
            };
            (acc << 4) | u32::from(nibble)
        })
    }
}

impl From<u32> for Digest {
    fn from(value: u32) -> Self {
        Self::from_packed(value)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
