use crate::score::Score;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vulnerability data returned for one dependency identifier.
///
/// Fields other than `vulns` are kept as-is in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityPayload {
    #[serde(default)]
    pub vulns: Vec<VulnerabilityRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VulnerabilityPayload {
    /// The "no known vulnerabilities" payload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vulns.is_empty()
    }

    /// Replaces every record's score with its normalized form.
    pub fn normalize_scores(&mut self) {
        for record in &mut self.vulns {
            record.score = record.score.normalized();
        }
    }
}

/// One vulnerability entry. Unknown fields pass through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Score::is_absent")]
    pub score: Score,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VulnerabilityRecord {
    pub fn new(id: impl Into<String>, score: impl Into<Score>) -> Self {
        Self {
            id: id.into(),
            score: score.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_vulns_is_empty() {
        let payload: VulnerabilityPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload, VulnerabilityPayload::empty());
    }

    #[test]
    fn test_record_keeps_extra_fields() {
        let json = r#"{"id": "GHSA-m2qf-hxjv-5gpq", "score": 7.5, "summary": "Cookie leak", "aliases": ["CVE-2023-30861"]}"#;
        let record: VulnerabilityRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "GHSA-m2qf-hxjv-5gpq");
        assert_eq!(record.score, Score::Number(7.5));
        assert_eq!(record.extra["summary"], "Cookie leak");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["aliases"][0], "CVE-2023-30861");
    }

    #[test]
    fn test_record_without_score() {
        let record: VulnerabilityRecord =
            serde_json::from_str(r#"{"id": "PYSEC-2021-1"}"#).unwrap();
        assert_eq!(record.score, Score::Absent);

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("score").is_none());
    }

    #[test]
    fn test_normalize_scores() {
        let mut payload = VulnerabilityPayload {
            vulns: vec![
                VulnerabilityRecord::new("A", "9.1"),
                VulnerabilityRecord::new("B", "bogus"),
                VulnerabilityRecord::new("C", Score::Absent),
            ],
            extra: Map::new(),
        };

        payload.normalize_scores();

        let scores: Vec<Score> = payload.vulns.iter().map(|v| v.score.clone()).collect();
        assert_eq!(
            scores,
            vec![Score::Number(9.1), Score::Number(0.0), Score::Number(0.0)]
        );
    }
}
