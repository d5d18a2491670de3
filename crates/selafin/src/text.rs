// hydromesh modules
use hydromesh_utils::{trim_fixed, StringExt};

// external crates
use serde::{Serialize, Serializer};

/// Fixed-width, blank padded text field
///
/// Holds the raw bytes exactly as stored so that a file read and written back
/// is identical, while [text()](FixedText::text) gives the readable value.
///
/// ```rust
/// # use hydromesh_selafin::FixedText;
/// let name = FixedText::<16>::new("VELOCITY U");
/// assert_eq!(name.as_bytes(), b"VELOCITY U      ");
/// assert_eq!(name.text(), "VELOCITY U");
///
/// // anything longer is truncated to the field width
/// let unit = FixedText::<4>::new("M/S2 ");
/// assert_eq!(unit.text(), "M/S2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize>([u8; N]);

impl<const N: usize> FixedText<N> {
    /// Blank pad or truncate `text` to the field width
    pub fn new(text: &str) -> Self {
        Self(text.to_fixed_bytes::<N>())
    }

    /// Wrap raw bytes as found in a file
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Raw field bytes
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Field content without the trailing blanks
    pub fn text(&self) -> String {
        trim_fixed(&self.0)
    }
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self([b' '; N])
    }
}

impl<const N: usize> From<&str> for FixedText<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<const N: usize> std::fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl<const N: usize> std::fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl<const N: usize> Serialize for FixedText<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text())
    }
}
