use crate::f;

/// Extends floats with the token formatting used in ASCII grid files
pub trait NumFormat {
    /// Shortest decimal token that reads back to the same value
    ///
    /// Plain notation is used for magnitudes in `[1e-4, 1e16)` and scientific
    /// notation outside of it, so neither tiny densities nor large radii blow
    /// up into hundreds of digits. Both forms are the shortest representation
    /// that round-trips exactly through `str::parse::<f64>()`.
    ///
    /// ```rust
    /// # use zpolaris_utils::NumFormat;
    /// assert_eq!((0.01_f64).token(), "0.01");
    /// assert_eq!((3.0_f64).token(), "3");
    /// assert_eq!((0.0_f64).token(), "0");
    /// assert_eq!((1e-5_f64).token(), "1e-5");
    /// assert_eq!((-2.5e16_f64).token(), "-2.5e16");
    /// ```
    fn token(&self) -> String;
}

impl NumFormat for f64 {
    fn token(&self) -> String {
        let magnitude = self.abs();
        if magnitude == 0.0 || !self.is_finite() || (1e-4..1e16).contains(&magnitude) {
            f!("{self}")
        } else {
            f!("{self:e}")
        }
    }
}
