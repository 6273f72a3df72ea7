use crate::score::Score;
use serde::{Deserialize, Serialize};

/// Lowest score that classifies as [`Severity::High`].
const HIGH_THRESHOLD: f64 = 7.0;

/// Lowest score that classifies as [`Severity::Medium`].
const MEDIUM_THRESHOLD: f64 = 5.0;

/// Aggregated risk level of a set of vulnerabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Classifies a single normalized score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= HIGH_THRESHOLD => Severity::High,
            s if s >= MEDIUM_THRESHOLD => Severity::Medium,
            s if s > 0.0 => Severity::Low,
            _ => Severity::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reduces a set of scores to a single severity based on the highest one.
///
/// Scores may be raw (strings, missing) or already normalized; each one is
/// passed through [`Score::normalize`] first. An empty set is `None`.
///
/// # Example
///
/// ```
/// use vulntrack::severity::classify;
/// use vulntrack::{Score, Severity};
///
/// assert_eq!(classify(Vec::<f64>::new()), Severity::None);
/// assert_eq!(classify([3.5, 5.0]), Severity::Medium);
/// assert_eq!(classify([Score::from("7.5")]), Severity::High);
/// ```
pub fn classify<I, S>(scores: I) -> Severity
where
    I: IntoIterator<Item = S>,
    S: Into<Score>,
{
    let max = scores
        .into_iter()
        .map(|score| score.into().normalize())
        .fold(0.0_f64, f64::max);

    Severity::from_score(max)
}
