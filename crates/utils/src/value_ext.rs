use crate::f;

/// Extends numbers with text mesh formatting
pub trait ValueExt {
    /// Fixed decimal formatting without negative zero
    ///
    /// Text mesh formats round coordinates to a few decimals, and tiny
    /// negative values would otherwise come out as `-0.000`.
    ///
    /// ```rust
    /// # use hydromesh_utils::ValueExt;
    /// assert_eq!((1.23456).fixed(3), "1.235".to_string());
    /// assert_eq!((-0.0001).fixed(3), "0.000".to_string());
    /// ```
    fn fixed(&self, decimals: usize) -> String;
}

impl<T: std::fmt::Display> ValueExt for T {
    fn fixed(&self, decimals: usize) -> String {
        let s = f!("{:.decimals$}", &self, decimals = decimals);
        match s.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => s,
        }
    }
}
