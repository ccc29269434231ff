//! Measurement records and the mock detector output.

use chrono::{DateTime, Duration, Utc};
use harmony_traits::RandomSource;
use serde::{Deserialize, Serialize};

use crate::util::{clamp_unit, round_tenth};

/// One body measurement as produced by the (mocked) detector.
///
/// Treated as immutable: display code derives copies via [`Measurement::derive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// Simulated detector certainty in [0, 1].
    pub confidence: f64,
    /// Capture timestamp.
    pub date: DateTime<Utc>,
}

impl Measurement {
    /// Build a measurement stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            unit: unit.into(),
            confidence,
            date: Utc::now(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Copy with a new value and confidence; confidence is clamped into [0, 1].
    pub fn derive(&self, value: f64, confidence: f64) -> Self {
        Self {
            value,
            confidence: clamp_unit(confidence),
            ..self.clone()
        }
    }
}

const MOCK_TABLE: [(&str, &str, f64, f64); 12] = [
    ("1", "Shoulder Width", 45.2, 0.92),
    ("2", "Hip Width", 42.8, 0.89),
    ("3", "Torso Length", 60.3, 0.95),
    ("4", "Left Leg Length", 90.1, 0.91),
    ("5", "Right Leg Length", 90.3, 0.90),
    ("6", "Left Arm Length", 72.5, 0.93),
    ("7", "Right Arm Length", 72.7, 0.94),
    ("8", "Chest Width", 102.4, 0.87),
    ("9", "Waist Width", 88.6, 0.88),
    ("10", "Inseam Length", 80.2, 0.89),
    ("11", "Sleeve Length", 62.0, 0.91),
    ("12", "Neck Length", 38.4, 0.85),
];

/// The fixed demo measurement set, stamped at `at`.
pub fn mock_measurements(at: DateTime<Utc>) -> Vec<Measurement> {
    MOCK_TABLE
        .iter()
        .map(|&(id, name, value, confidence)| Measurement {
            id: id.to_string(),
            name: name.to_string(),
            value,
            unit: "cm".to_string(),
            confidence,
            date: at,
        })
        .collect()
}

/// Fabricate `days` days of history ending at `today`, oldest first.
///
/// Each day holds one copy of every base measurement with id `<id>-<days_ago>`,
/// value perturbed by ±3 % (one decimal) and confidence by ±5 % (capped at 0.99).
pub fn generate_history<R: RandomSource + ?Sized>(
    base: &[Measurement],
    days: u32,
    today: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Measurement> {
    let mut out = Vec::with_capacity(base.len() * days as usize);
    for days_ago in (0..days).rev() {
        let date = today - Duration::days(i64::from(days_ago));
        for m in base {
            let variation = rng.uniform(-0.03, 0.03);
            let value = round_tenth(m.value * (1.0 + variation));
            let jitter = rng.uniform(-0.05, 0.05);
            let confidence = (m.confidence * (1.0 + jitter)).min(0.99);
            out.push(Measurement {
                id: format!("{}-{}", m.id, days_ago),
                name: m.name.clone(),
                value,
                unit: m.unit.clone(),
                confidence: clamp_unit(confidence),
                date,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn mock_set_is_complete() {
        let ms = mock_measurements(Utc::now());
        assert_eq!(ms.len(), 12);
        assert_eq!(ms[0].name, "Shoulder Width");
        assert!(ms.iter().all(|m| m.unit == "cm"));
    }

    #[test]
    fn derive_clamps_confidence() {
        let m = Measurement::new("1", "Shoulder Width", 45.2, "cm", 0.92);
        let d = m.derive(10.0, 1.7);
        assert_eq!(d.value, 10.0);
        assert_eq!(d.confidence, 1.0);
        assert_eq!(d.id, m.id);
        assert_eq!(m.value, 45.2);
    }

    #[test]
    fn history_has_one_copy_per_day() {
        let today = Utc::now();
        let base = mock_measurements(today);
        let mut rng = SeededRandom::seeded(7);
        let hist = generate_history(&base, 7, today, &mut rng);
        assert_eq!(hist.len(), 7 * 12);
        // Oldest day first
        assert_eq!(hist[0].id, "1-6");
        assert_eq!(hist.last().map(|m| m.id.as_str()), Some("12-0"));
        for m in &hist {
            assert!(m.confidence <= 0.99);
        }
    }

    #[test]
    fn history_values_stay_within_three_percent() {
        let today = Utc::now();
        let base = mock_measurements(today);
        let mut rng = SeededRandom::seeded(11);
        let hist = generate_history(&base, 3, today, &mut rng);
        for (i, m) in hist.iter().enumerate() {
            let orig = &base[i % base.len()];
            // one-decimal rounding adds at most 0.05
            assert!((m.value - orig.value).abs() <= orig.value * 0.03 + 0.051);
        }
    }
}
