// crate modules
use crate::error::{Error, Result};
use crate::text::FixedText;

// external crates
use serde::Serialize;

/// Floating point width of every real value in the file
///
/// Precision is declared by whoever opens the file. The 8-byte marker after
/// the title conventionally reads `"SERAFIN "` for single precision and
/// `"SERAFIND"` for double precision, but plenty of tools write other markers
/// so it is only used as a hint.
///
/// ```rust
/// # use hydromesh_selafin::Precision;
/// let precision: Precision = "double".parse().unwrap();
/// assert_eq!(precision.width(), 8);
/// assert_eq!(precision.marker().as_bytes(), b"SERAFIND");
///
/// assert!("half".parse::<Precision>().is_err());
/// assert!(Precision::from_width(2).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 4-byte floats
    #[default]
    Single,
    /// 8-byte floats
    Double,
}

impl Precision {
    /// Number of bytes per float
    pub fn width(&self) -> usize {
        match self {
            Precision::Single => std::mem::size_of::<f32>(),
            Precision::Double => std::mem::size_of::<f64>(),
        }
    }

    /// Precision from a number of bytes per float
    pub fn from_width(width: usize) -> Result<Self> {
        match width {
            4 => Ok(Precision::Single),
            8 => Ok(Precision::Double),
            _ => Err(Error::UnsupportedPrecision(width.to_string())),
        }
    }

    /// Conventional marker written after the title
    pub fn marker(&self) -> FixedText<8> {
        match self {
            Precision::Single => FixedText::new("SERAFIN "),
            Precision::Double => FixedText::new("SERAFIND"),
        }
    }

    /// Precision implied by a marker, if it is one of the conventional two
    pub fn from_marker(marker: &FixedText<8>) -> Option<Self> {
        match marker.as_bytes() {
            b"SERAFIN " => Some(Precision::Single),
            b"SERAFIND" => Some(Precision::Double),
            _ => None,
        }
    }

    /// Encode a value at this width, big endian
    pub(crate) fn put(&self, value: f64, buffer: &mut Vec<u8>) {
        match self {
            Precision::Single => buffer.extend_from_slice(&(value as f32).to_be_bytes()),
            Precision::Double => buffer.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Decode a value of this width, big endian
    ///
    /// The slice must be exactly [width()](Precision::width) bytes long.
    pub(crate) fn get(&self, bytes: &[u8]) -> f64 {
        match self {
            Precision::Single => {
                let mut b = [0u8; 4];
                b.copy_from_slice(bytes);
                f32::from_be_bytes(b) as f64
            }
            Precision::Double => {
                let mut b = [0u8; 8];
                b.copy_from_slice(bytes);
                f64::from_be_bytes(b)
            }
        }
    }
}

impl std::str::FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "float" | "f" | "4" => Ok(Precision::Single),
            "double" | "d" | "8" => Ok(Precision::Double),
            _ => Err(Error::UnsupportedPrecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Precision::Single => write!(f, "single"),
            Precision::Double => write!(f, "double"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round_trip() {
        for p in [Precision::Single, Precision::Double] {
            assert_eq!(Precision::from_marker(&p.marker()), Some(p));
        }
        assert_eq!(Precision::from_marker(&FixedText::new("SERAPHIN")), None);
    }

    #[test]
    fn big_endian_values() {
        let mut buffer = Vec::new();
        Precision::Single.put(1.0, &mut buffer);
        assert_eq!(buffer, vec![0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(Precision::Single.get(&buffer), 1.0);

        buffer.clear();
        Precision::Double.put(-2.5, &mut buffer);
        assert_eq!(buffer.len(), 8);
        assert_eq!(Precision::Double.get(&buffer), -2.5);
    }

    #[test]
    fn unsupported_widths() {
        assert!(matches!(
            Precision::from_width(16),
            Err(Error::UnsupportedPrecision(_))
        ));
        assert_eq!(Precision::from_width(4).unwrap(), Precision::Single);
    }
}
