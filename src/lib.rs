// src/lib.rs - Exercise form analysis from pose landmarks
//! Turns one frame of normalized pose landmarks into an explainable form
//! assessment: per-joint angles, per-criterion scores, correction codes,
//! and an in-position flag, plus a feedback layer that renders results and
//! session aggregates into user-facing messages and an audio cue.
//!
//! The crate is a pure library. Pose detection, video handling, and
//! persistence live with the caller; every entry point here is a pure
//! function of its inputs and is safe to call from any number of threads.
//!
//! ```
//! use form_analyzer::{analyze_frame, FeedbackGenerator, LandmarkPoint};
//!
//! let points = vec![LandmarkPoint::new(0.5, 0.5, 0.0, 1.0); 33];
//! let result = analyze_frame(&points, "squat");
//! let feedback = FeedbackGenerator::new().generate(&result, form_analyzer::ExerciseKind::Squat);
//! assert_eq!(feedback.score, result.overall_score);
//! ```

pub mod analysis;
pub mod evaluator;
pub mod exercise;
pub mod feedback;
pub mod geometry;
pub mod landmark;
pub mod phase;

pub use analysis::{AnalysisResult, NOT_DETECTED_MESSAGE};
pub use exercise::{analyze_frame, ExerciseKind};
pub use feedback::{
    AudioCue, FeedbackGenerator, RealtimeFeedback, SessionStatistics, SessionSummary,
};
pub use landmark::{LandmarkFrame, LandmarkName, LandmarkPoint, POSE_LANDMARK_COUNT};
pub use phase::Phase;
