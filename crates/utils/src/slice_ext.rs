/// Extends functionality for slices of float arrays
pub trait SliceExt {
    /// Consecutive differences between neighbouring values
    ///
    /// The result has one value fewer than the slice, and is empty for slices
    /// with fewer than two values.
    ///
    /// ```rust
    /// # use zpolaris_utils::SliceExt;
    /// let edges: [f64; 4] = [1.0, 1.5, 2.5, 4.5];
    /// assert_eq!(edges.differences(), vec![0.5, 1.0, 2.0]);
    /// assert!([3.0_f64].differences().is_empty());
    /// ```
    fn differences(&self) -> Vec<f64>;

    /// Check every value is larger than the one before it
    ///
    /// NaN values are never part of an increasing sequence.
    ///
    /// ```rust
    /// # use zpolaris_utils::SliceExt;
    /// assert!([0.1_f64, 0.2, 0.3].is_strictly_increasing());
    /// assert!(![0.1_f64, 0.1, 0.3].is_strictly_increasing());
    /// assert!(![0.1_f64, f64::NAN].is_strictly_increasing());
    /// ```
    fn is_strictly_increasing(&self) -> bool;
}

impl SliceExt for [f64] {
    fn differences(&self) -> Vec<f64> {
        self.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    fn is_strictly_increasing(&self) -> bool {
        self.windows(2).all(|pair| pair[0] < pair[1])
    }
}
