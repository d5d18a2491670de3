use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Better option outputs
    ///
    /// Generic over anything that implements `Display`, this will either be the
    /// value contained within `Some()` or "none" for the `None` variant. Handy
    /// for optional header blocks such as a SELAFIN date.
    ///
    /// ```rust
    /// # use hydromesh_utils::OptionExt;
    /// let steps: Option<usize> = Some(12);
    /// assert_eq!(steps.display(), "12");
    ///
    /// let date: Option<&str> = None;
    /// assert_eq!(date.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
