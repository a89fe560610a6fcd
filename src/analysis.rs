// src/analysis.rs - Per-frame analysis output record
use crate::phase::Phase;
use serde::Serialize;
use std::collections::HashMap;

/// Message carried by the canonical failure result.
pub const NOT_DETECTED_MESSAGE: &str = "Pose not detected";

/// Result of analyzing one landmark frame against one exercise.
///
/// Created fresh per call and handed straight to the feedback layer or an
/// external aggregator; the maps are complete and read-only once returned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    /// Joint label -> measured angle in degrees (0..180).
    pub angles: HashMap<String, f64>,
    /// Criterion label -> score (0..100).
    pub scores: HashMap<String, f64>,
    /// Mean of `scores` values, 0 when the map is empty.
    pub overall_score: f64,
    pub feedback: Vec<String>,
    /// Machine-readable correction codes, distinct from `feedback` text.
    pub corrections: Vec<String>,
    pub is_in_position: bool,
    /// Set only by composite evaluators (burpee).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

impl AnalysisResult {
    /// The single "no signal" sentinel: returned when the detector produced
    /// too few landmarks or a required landmark is absent for the chosen
    /// exercise. Never an error; partial detection is a steady-state
    /// condition during live capture.
    pub fn not_detected() -> Self {
        Self {
            feedback: vec![NOT_DETECTED_MESSAGE.to_string()],
            ..Self::default()
        }
    }

    /// Recomputes `overall_score` from the current score map.
    pub(crate) fn finish(mut self) -> Self {
        self.overall_score = overall_from_scores(&self.scores);
        self
    }
}

/// Arithmetic mean of the score map values; 0 for an empty map.
pub fn overall_from_scores(scores: &HashMap<String, f64>) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.values().sum::<f64>() / scores.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_detected_shape() {
        let result = AnalysisResult::not_detected();
        assert!(result.angles.is_empty());
        assert!(result.scores.is_empty());
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.feedback, vec![NOT_DETECTED_MESSAGE.to_string()]);
        assert!(result.corrections.is_empty());
        assert!(!result.is_in_position);
        assert!(result.phase.is_none());
    }

    #[test]
    fn test_overall_is_mean() {
        let mut scores = HashMap::new();
        scores.insert("knee".to_string(), 100.0);
        scores.insert("knee_position".to_string(), 70.0);
        assert!((overall_from_scores(&scores) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_empty_is_zero() {
        assert_eq!(overall_from_scores(&HashMap::new()), 0.0);
    }

    #[test]
    fn test_serializes_flat() {
        let mut result = AnalysisResult::default();
        result.scores.insert("general".to_string(), 80.0);
        result.overall_score = 80.0;
        result.is_in_position = true;
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overall_score"], 80.0);
        assert_eq!(json["scores"]["general"], 80.0);
        assert_eq!(json["is_in_position"], true);
        // phase is omitted entirely for single-posture evaluators
        assert!(json.get("phase").is_none());
    }
}
