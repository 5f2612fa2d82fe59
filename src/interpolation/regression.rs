//! Least-squares line fit used to extrapolate past the last known value.
//!
//! ```text
//! m = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! b = (Σy − m·Σx) / n
//! v(t) = b + m·t
//! ```
//!
//! A fit needs at least two distinct positions; anything else is treated as
//! "no value available" rather than an error.

/// First-order trend of a feature along one grid line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFit {
    /// Value change per cell
    pub slope: f64,
    /// Value at position 0
    pub intercept: f64,
    /// Number of samples the fit was computed from
    pub samples: usize,
}

impl LineFit {
    /// Ordinary least-squares fit over `(position, value)` samples.
    ///
    /// Returns `None` when there are no samples or every sample sits at the
    /// same position (zero variance).
    pub fn fit<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, f32)>,
    {
        let mut n = 0usize;
        let (mut sx, mut sy, mut sxy, mut sxx) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

        for (pos, value) in samples {
            let x = pos as f64;
            let y = value as f64;
            n += 1;
            sx += x;
            sy += y;
            sxy += x * y;
            sxx += x * x;
        }

        if n == 0 {
            return None;
        }

        let nf = n as f64;
        let denom = nf * sxx - sx * sx;
        if denom == 0.0 {
            return None;
        }

        let slope = (nf * sxy - sx * sy) / denom;
        let intercept = (sy - slope * sx) / nf;
        if !slope.is_finite() || !intercept.is_finite() {
            return None;
        }

        Some(Self {
            slope,
            intercept,
            samples: n,
        })
    }

    /// Raw value of the trend line at `position`.
    #[inline]
    pub fn evaluate(&self, position: i32) -> f64 {
        self.intercept + self.slope * position as f64
    }

    /// Trend value at `position`, if it is a usable signal difference.
    ///
    /// NaN, infinite and non-positive results are rejected.
    pub fn extrapolate(&self, position: i32) -> Option<f32> {
        let value = self.evaluate(position) as f32;
        (value.is_finite() && value > 0.0).then_some(value)
    }
}
