// src/exercise.rs - Exercise identity resolution and evaluator dispatch
use crate::analysis::AnalysisResult;
use crate::evaluator;
use crate::landmark::{LandmarkFrame, LandmarkPoint, POSE_LANDMARK_COUNT};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The closed set of supported exercises. Unrecognized identifiers resolve
/// to `Generic` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    PushUp,
    Plank,
    Lunge,
    Burpee,
    Generic,
}

/// Exact lowercase identifiers, localized primary name first.
static ALIAS_LOOKUP: Lazy<HashMap<&'static str, ExerciseKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (kind, aliases) in SUBSTRING_ALIASES {
        for alias in *aliases {
            table.insert(*alias, *kind);
        }
    }
    table
});

/// Fallback patterns for loosely-formatted identifiers ("Push-up (knees)",
/// "스쿼트 기본" and the like). Order matters: "push" must come after the
/// more specific spellings.
const SUBSTRING_ALIASES: &[(ExerciseKind, &[&str])] = &[
    (ExerciseKind::Squat, &["스쿼트", "squat"]),
    (ExerciseKind::PushUp, &["푸쉬업", "pushup", "push"]),
    (ExerciseKind::Plank, &["플랭크", "plank"]),
    (ExerciseKind::Lunge, &["런지", "lunge"]),
    (ExerciseKind::Burpee, &["버피", "burpee"]),
];

impl ExerciseKind {
    /// Resolves an exercise identifier case-insensitively against the
    /// localized primary names and ASCII aliases, defaulting to `Generic`.
    pub fn resolve(name: &str) -> ExerciseKind {
        let lowered = name.trim().to_lowercase();
        if let Some(kind) = ALIAS_LOOKUP.get(lowered.as_str()) {
            return *kind;
        }
        for (kind, aliases) in SUBSTRING_ALIASES {
            if aliases.iter().any(|alias| lowered.contains(alias)) {
                return *kind;
            }
        }
        debug!(name, "unrecognized exercise, falling back to generic");
        ExerciseKind::Generic
    }

    /// Runs this exercise's evaluator over one frame.
    pub fn evaluate(self, frame: &LandmarkFrame) -> AnalysisResult {
        evaluator::evaluate(self, frame)
    }
}

/// Per-frame entry point: enforces the 33-landmark input contract, resolves
/// the exercise once at the boundary, and dispatches to its evaluator.
///
/// Sequences shorter than 33 points mean the detector did not produce a
/// full pose; the canonical empty result is returned without evaluation.
pub fn analyze_frame(points: &[LandmarkPoint], exercise_name: &str) -> AnalysisResult {
    if points.len() < POSE_LANDMARK_COUNT {
        debug!(
            count = points.len(),
            "frame below landmark count, returning empty result"
        );
        return AnalysisResult::not_detected();
    }
    let kind = ExerciseKind::resolve(exercise_name);
    let frame = LandmarkFrame::from_points(points);
    kind.evaluate(&frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_ascii_aliases() {
        assert_eq!(ExerciseKind::resolve("squat"), ExerciseKind::Squat);
        assert_eq!(ExerciseKind::resolve("pushup"), ExerciseKind::PushUp);
        assert_eq!(ExerciseKind::resolve("plank"), ExerciseKind::Plank);
        assert_eq!(ExerciseKind::resolve("lunge"), ExerciseKind::Lunge);
        assert_eq!(ExerciseKind::resolve("burpee"), ExerciseKind::Burpee);
    }

    #[test]
    fn test_resolves_localized_names() {
        assert_eq!(ExerciseKind::resolve("스쿼트"), ExerciseKind::Squat);
        assert_eq!(ExerciseKind::resolve("푸쉬업"), ExerciseKind::PushUp);
        assert_eq!(ExerciseKind::resolve("플랭크"), ExerciseKind::Plank);
        assert_eq!(ExerciseKind::resolve("런지"), ExerciseKind::Lunge);
        assert_eq!(ExerciseKind::resolve("버피"), ExerciseKind::Burpee);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(ExerciseKind::resolve("SQUAT"), ExerciseKind::Squat);
        assert_eq!(ExerciseKind::resolve("Push-Up"), ExerciseKind::PushUp);
    }

    #[test]
    fn test_resolves_loose_identifiers() {
        assert_eq!(ExerciseKind::resolve("스쿼트 기본"), ExerciseKind::Squat);
        assert_eq!(ExerciseKind::resolve("wide push up"), ExerciseKind::PushUp);
        assert_eq!(ExerciseKind::resolve("  Plank hold "), ExerciseKind::Plank);
    }

    #[test]
    fn test_unknown_falls_back_to_generic() {
        assert_eq!(ExerciseKind::resolve("jumping jacks"), ExerciseKind::Generic);
        assert_eq!(ExerciseKind::resolve(""), ExerciseKind::Generic);
    }

    #[test]
    fn test_short_frame_is_not_detected() {
        let points = vec![LandmarkPoint::new(0.5, 0.5, 0.0, 1.0); 20];
        let result = analyze_frame(&points, "squat");
        assert_eq!(result.overall_score, 0.0);
        assert!(result.scores.is_empty());
        assert!(!result.is_in_position);
    }
}
