/// Errors that can occur when parsing a [`Score`] from text.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The input was not a finite decimal number.
    #[error("score is not a finite number: {0}")]
    NotFinite(String),
}

/// A priority score held as integer centipoints (hundredths of a point).
///
/// Queue scores are defined to two decimal places, and queue ordering uses a
/// 0.1-point tolerance band. Holding the value as whole centipoints makes both
/// exact: two scores that print the same compare the same, and the tolerance
/// band never shifts with floating-point representation.
///
/// Higher scores sort earlier in the queue. The value may be negative when a
/// negative manual override outweighs every other term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i64);

impl Score {
    /// The zero score.
    pub const ZERO: Score = Score(0);

    /// Creates a score from whole centipoints.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the score as whole centipoints.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Creates a score from a decimal point value, rounding to the nearest
    /// centipoint (half away from zero).
    ///
    /// Non-finite input saturates to zero; use [`std::str::FromStr`] when the
    /// input must be validated.
    pub fn from_points(points: f64) -> Self {
        if !points.is_finite() {
            return Self::ZERO;
        }
        Self((points * 100.0).round() as i64)
    }

    /// Returns the score as a decimal point value.
    pub fn as_points(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Adds two scores without overflow.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Returns the absolute difference between two scores, saturating when
    /// the true difference does not fit in centipoints.
    pub const fn abs_diff(self, other: Self) -> Self {
        let diff = self.0.abs_diff(other.0);
        if diff > i64::MAX as u64 {
            Self(i64::MAX)
        } else {
            Self(diff as i64)
        }
    }

    /// Returns true when two scores differ by no more than `tolerance`.
    pub const fn within(self, other: Self, tolerance: Self) -> bool {
        self.abs_diff(other).0 <= tolerance.0
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.as_points())
    }
}

impl std::str::FromStr for Score {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let points = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ScoreError::NotFinite(s.to_owned()))?;
        if !points.is_finite() {
            return Err(ScoreError::NotFinite(s.to_owned()));
        }
        Ok(Self::from_points(points))
    }
}

impl serde::Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_points())
    }
}

impl<'de> serde::Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = f64::deserialize(deserializer)?;
        if !points.is_finite() {
            return Err(serde::de::Error::custom("score must be a finite number"));
        }
        Ok(Score::from_points(points))
    }
}
