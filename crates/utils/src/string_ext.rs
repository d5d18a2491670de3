/// Extends string types with fixed-width field conversions
pub trait StringExt {
    /// Blank pad or truncate to exactly `N` bytes
    ///
    /// Binary formats written by fortran codes store text as fixed-width
    /// character buffers padded with spaces rather than null terminated.
    ///
    /// ```rust
    /// # use hydromesh_utils::StringExt;
    /// assert_eq!(&"DEPTH".to_fixed_bytes::<8>(), b"DEPTH   ");
    /// assert_eq!(&"WAVE HEIGHT".to_fixed_bytes::<4>(), b"WAVE");
    /// ```
    fn to_fixed_bytes<const N: usize>(&self) -> [u8; N];
}

impl<T: AsRef<str>> StringExt for T {
    fn to_fixed_bytes<const N: usize>(&self) -> [u8; N] {
        let mut field = [b' '; N];
        let bytes = self.as_ref().as_bytes();
        let n = bytes.len().min(N);
        field[..n].copy_from_slice(&bytes[..n]);
        field
    }
}

/// Readable text from a fixed-width field
///
/// Trailing blanks and nulls are removed, invalid UTF-8 is replaced rather
/// than rejected.
///
/// ```rust
/// # use hydromesh_utils::trim_fixed;
/// assert_eq!(trim_fixed(b"M               "), "M");
/// assert_eq!(trim_fixed(b"BOTTOM\0\0"), "BOTTOM");
/// ```
pub fn trim_fixed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches([' ', '\0'])
        .to_string()
}
