//! Score normalization.
//!
//! Vulnerability sources do not agree on how a score is represented: some
//! send a JSON number, some a string such as `"7.5"`, and many omit it
//! entirely. [`Score`] captures those shapes explicitly and
//! [`Score::normalize`] turns any of them into a finite, non-negative `f64`.
//!
//! # Example
//!
//! ```
//! use vulntrack::Score;
//!
//! assert_eq!(Score::from("7.5").normalize(), 7.5);
//! assert_eq!(Score::from("invalid").normalize(), 0.0);
//! assert_eq!(Score::Absent.normalize(), 0.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A raw score as received from a vulnerability source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Score {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

impl Score {
    /// Converts the score into a finite, non-negative number.
    ///
    /// Anything that cannot be read as such a number (non-numeric text,
    /// `NaN`, infinities, negative values, a missing score) becomes `0.0`.
    /// Normalizing an already-normalized score returns the same value.
    pub fn normalize(&self) -> f64 {
        let value = match self {
            Score::Number(n) => *n,
            Score::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Score::Absent => 0.0,
        };

        if value.is_finite() && value >= 0.0 {
            value
        } else {
            0.0
        }
    }

    /// Returns the normalized form of this score as a [`Score::Number`].
    pub fn normalized(&self) -> Score {
        Score::Number(self.normalize())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Score::Absent)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score::Number(value)
    }
}

impl From<&str> for Score {
    fn from(value: &str) -> Self {
        Score::Text(value.to_string())
    }
}

impl From<String> for Score {
    fn from(value: String) -> Self {
        Score::Text(value)
    }
}

impl<T: Into<Score>> From<Option<T>> for Score {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Score::Absent)
    }
}

impl From<&Value> for Score {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Score::Number).unwrap_or(Score::Absent),
            Value::String(s) => Score::Text(s.clone()),
            // Booleans, arrays and objects carry no usable score
            _ => Score::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Score::from(&value))
    }
}

impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Score::Number(n) => serializer.serialize_f64(*n),
            Score::Text(s) => serializer.serialize_str(s),
            Score::Absent => serializer.serialize_none(),
        }
    }
}
