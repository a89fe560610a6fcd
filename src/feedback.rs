// src/feedback.rs - User-facing messages, audio cues, and session summaries
use crate::analysis::AnalysisResult;
use crate::exercise::ExerciseKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Equivalent-meaning praise lines for high-scoring frames. Which one is
/// shown does not matter; the pool just keeps repeated frames from sounding
/// robotic.
const AFFIRMATIONS: &[&str] = &[
    "Great form, keep it up!",
    "Excellent, keep going!",
    "Perfect posture",
    "Very nice, great focus",
    "Spot-on movement",
];

/// Coarse four-state classification of frame quality, used to trigger
/// non-verbal feedback. Total over (score, correction count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    Success,
    Good,
    Warning,
    Neutral,
}

impl AudioCue {
    /// Bands are checked in order, so the four states are exhaustive and
    /// mutually exclusive.
    pub fn from_frame(score: f64, correction_count: usize) -> AudioCue {
        if score >= 90.0 {
            AudioCue::Success
        } else if score >= 70.0 {
            AudioCue::Good
        } else if correction_count > 2 {
            AudioCue::Warning
        } else {
            AudioCue::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AudioCue::Success => "success",
            AudioCue::Good => "good",
            AudioCue::Warning => "warning",
            AudioCue::Neutral => "neutral",
        }
    }
}

/// Real-time feedback for one analyzed frame.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeFeedback {
    pub messages: Vec<String>,
    /// Echo of the frame's overall score.
    pub score: f64,
    pub corrections_needed: bool,
    pub audio_cue: AudioCue,
}

/// Aggregates over a completed session, supplied by the caller. Scores are
/// 0..100, duration is seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub average_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub duration: f64,
}

/// Qualitative session summary: narrative plus three advice lists.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub overall_performance: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Turns analysis results into user-facing feedback.
///
/// The affirmation pick is injectable so tests can pin it down; the default
/// rotates through the pool with an atomic counter, which keeps the
/// generator shareable across threads.
pub struct FeedbackGenerator {
    selector: Box<dyn Fn(usize) -> usize + Send + Sync>,
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackGenerator {
    pub fn new() -> Self {
        let counter = AtomicUsize::new(0);
        Self::with_selector(move |len| counter.fetch_add(1, Ordering::Relaxed) % len)
    }

    /// `selector` receives the pool size and returns the index to use.
    pub fn with_selector(selector: impl Fn(usize) -> usize + Send + Sync + 'static) -> Self {
        Self {
            selector: Box::new(selector),
        }
    }

    /// Builds the real-time message list and audio cue for one frame.
    pub fn generate(&self, result: &AnalysisResult, exercise: ExerciseKind) -> RealtimeFeedback {
        let score = result.overall_score;
        let mut messages = Vec::new();

        if score >= 90.0 {
            messages.push(self.pick_affirmation().to_string());
        } else if score >= 70.0 {
            messages.push("Good form, just a little more focus".to_string());
        } else {
            messages.push("Adjust your form".to_string());
        }

        // At most two evaluator lines, verbatim, to keep the overlay short.
        messages.extend(result.feedback.iter().take(2).cloned());
        messages.extend(self.exercise_specific(exercise, result));

        RealtimeFeedback {
            messages,
            score,
            corrections_needed: !result.corrections.is_empty(),
            audio_cue: AudioCue::from_frame(score, result.corrections.len()),
        }
    }

    fn pick_affirmation(&self) -> &'static str {
        let index = (self.selector)(AFFIRMATIONS.len()).min(AFFIRMATIONS.len() - 1);
        AFFIRMATIONS[index]
    }

    fn exercise_specific(&self, exercise: ExerciseKind, result: &AnalysisResult) -> Vec<String> {
        let mut messages = Vec::new();
        match exercise {
            ExerciseKind::Squat => {
                if let Some(knee_score) = result.scores.get("knee") {
                    if *knee_score < 60.0 {
                        messages
                            .push("Watch that your knees do not pass your toes".to_string());
                    } else if *knee_score < 80.0 {
                        messages.push("Sink a little deeper into the squat".to_string());
                    }
                }
            }
            ExerciseKind::PushUp => {
                if let Some(body_score) = result.scores.get("body") {
                    if *body_score < 70.0 {
                        messages.push("Keep your torso in one straight line".to_string());
                    }
                }
            }
            ExerciseKind::Plank => {
                // Holding the position is the whole exercise.
                if result.is_in_position {
                    messages.push("Hold it there, and keep breathing".to_string());
                }
            }
            ExerciseKind::Lunge | ExerciseKind::Burpee | ExerciseKind::Generic => {}
        }
        messages
    }

    /// Builds the qualitative summary for a completed session.
    pub fn summarize(&self, stats: &SessionStatistics) -> SessionSummary {
        let overall_performance = if stats.average_score >= 90.0 {
            "Outstanding workout! You held nearly perfect form throughout.".to_string()
        } else if stats.average_score >= 75.0 {
            "Good workout. Polish a few details and it will be even better.".to_string()
        } else if stats.average_score >= 60.0 {
            "A decent start. Steady practice will get you there quickly.".to_string()
        } else {
            "Let's build up from the basics, one step at a time. Don't give up!".to_string()
        };

        let mut strengths = Vec::new();
        if stats.max_score >= 85.0 {
            strengths.push("Your best frames score high, which shows real potential".to_string());
        }
        if stats.duration > 300.0 {
            strengths.push("Good endurance over a long session".to_string());
        }

        let mut improvements = Vec::new();
        if stats.min_score < 60.0 {
            improvements.push("Work on holding your form consistently".to_string());
        }
        if stats.average_score < 70.0 {
            improvements.push("Keep practicing the basic position".to_string());
        }

        let next_steps = if stats.average_score >= 85.0 {
            vec![
                "Try a harder variation".to_string(),
                "Add another set".to_string(),
            ]
        } else {
            vec![
                "Repeat the same exercise to build consistency".to_string(),
                "Check your form in a mirror while practicing".to_string(),
            ]
        };

        SessionSummary {
            overall_performance,
            strengths,
            improvements,
            next_steps,
        }
    }
}
