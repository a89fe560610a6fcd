// src/phase.rs - Coarse sub-posture classification for multi-phase movements
use serde::Serialize;

/// Sub-posture of a burpee, bucketed from the hip's normalized vertical
/// coordinate (larger `y` sits lower in the image).
///
/// Three buckets is intentionally coarse: a burpee is a continuous movement
/// and per-frame estimates are noisy, so the classifier trades precision
/// for robustness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Standing,
    Squat,
    Plank,
}

impl Phase {
    /// Hip `y` above this is the upright ready position.
    pub const STANDING_HIP_Y: f64 = 0.6;
    /// Hip `y` above this (and not standing) is the crouch.
    pub const SQUAT_HIP_Y: f64 = 0.3;

    pub fn classify(hip_y: f64) -> Phase {
        if hip_y > Self::STANDING_HIP_Y {
            Phase::Standing
        } else if hip_y > Self::SQUAT_HIP_Y {
            Phase::Squat
        } else {
            Phase::Plank
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Standing => "standing",
            Phase::Squat => "squat",
            Phase::Plank => "plank",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(Phase::classify(0.9), Phase::Standing);
        assert_eq!(Phase::classify(0.7), Phase::Standing);
        assert_eq!(Phase::classify(0.5), Phase::Squat);
        assert_eq!(Phase::classify(0.2), Phase::Plank);
        assert_eq!(Phase::classify(0.0), Phase::Plank);
    }

    #[test]
    fn test_boundaries_fall_downward() {
        // Thresholds are strict: exactly 0.6 is not standing, 0.3 not squat.
        assert_eq!(Phase::classify(0.6), Phase::Squat);
        assert_eq!(Phase::classify(0.3), Phase::Plank);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Phase::Standing).unwrap(),
            "\"standing\""
        );
        assert_eq!(Phase::Plank.to_string(), "plank");
    }
}
