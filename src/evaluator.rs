// src/evaluator.rs - Per-exercise scoring rule sets
//
// Every evaluator follows the same contract: verify its required landmarks,
// short-circuit to the canonical empty result if any is absent, then build
// the angle and score maps. Scores share one explainable law: linear
// falloff from the ideal angle, floored at 0, so feedback text can be read
// directly off which side of the ideal the measurement fell.
use crate::analysis::AnalysisResult;
use crate::exercise::ExerciseKind;
use crate::geometry;
use crate::landmark::{LandmarkFrame, LandmarkName, LandmarkPoint};
use crate::phase::Phase;
use thiserror::Error;
use tracing::debug;

/// Tolerance for the knee-past-toes check, in normalized x units.
const KNEE_FORWARD_MARGIN: f64 = 0.05;

/// Elbows may sit this far from directly under the shoulders in a plank.
const SHOULDER_STACK_MARGIN: f64 = 0.1;

#[derive(Debug, Error)]
enum EvalError {
    #[error("required landmark missing: {0}")]
    MissingLandmark(LandmarkName),
}

/// Dispatches one frame to the evaluator for `kind`. A missing required
/// landmark is an expected steady-state condition, not an error: it
/// collapses to the canonical empty result here.
pub fn evaluate(kind: ExerciseKind, frame: &LandmarkFrame) -> AnalysisResult {
    let outcome = match kind {
        ExerciseKind::Squat => evaluate_squat(frame),
        ExerciseKind::PushUp => evaluate_pushup(frame),
        ExerciseKind::Plank => evaluate_plank(frame),
        ExerciseKind::Lunge => evaluate_lunge(frame),
        ExerciseKind::Burpee => evaluate_burpee(frame),
        ExerciseKind::Generic => Ok(evaluate_generic()),
    };
    match outcome {
        Ok(result) => result,
        Err(EvalError::MissingLandmark(name)) => {
            debug!(exercise = ?kind, landmark = %name, "missing landmark, pose not detected");
            AnalysisResult::not_detected()
        }
    }
}

fn required(frame: &LandmarkFrame, name: LandmarkName) -> Result<&LandmarkPoint, EvalError> {
    frame.get(name).ok_or(EvalError::MissingLandmark(name))
}

/// `max(0, 100 - |ideal - measured| * penalty)`.
fn angle_score(ideal: f64, measured: f64, penalty: f64) -> f64 {
    (100.0 - (ideal - measured).abs() * penalty).max(0.0)
}

fn evaluate_squat(frame: &LandmarkFrame) -> Result<AnalysisResult, EvalError> {
    let left_hip = required(frame, LandmarkName::LeftHip)?;
    let left_knee = required(frame, LandmarkName::LeftKnee)?;
    let left_ankle = required(frame, LandmarkName::LeftAnkle)?;
    let right_hip = required(frame, LandmarkName::RightHip)?;
    let right_knee = required(frame, LandmarkName::RightKnee)?;
    let right_ankle = required(frame, LandmarkName::RightAnkle)?;

    let mut result = AnalysisResult::default();

    let left_knee_angle = geometry::angle(left_hip, left_knee, left_ankle);
    let right_knee_angle = geometry::angle(right_hip, right_knee, right_ankle);
    result.angles.insert("left_knee".to_string(), left_knee_angle);
    result.angles.insert("right_knee".to_string(), right_knee_angle);

    // Hip angles are informational only; shoulders may be out of frame.
    if let (Some(left_shoulder), Some(right_shoulder)) = (
        frame.get(LandmarkName::LeftShoulder),
        frame.get(LandmarkName::RightShoulder),
    ) {
        result.angles.insert(
            "left_hip".to_string(),
            geometry::angle(left_shoulder, left_hip, left_knee),
        );
        result.angles.insert(
            "right_hip".to_string(),
            geometry::angle(right_shoulder, right_hip, right_knee),
        );
    }

    let avg_knee_angle = (left_knee_angle + right_knee_angle) / 2.0;
    let knee_score = angle_score(90.0, avg_knee_angle, 2.0);
    result.scores.insert("knee".to_string(), knee_score);

    if knee_score < 70.0 {
        if avg_knee_angle > 90.0 {
            result.feedback.push("Bend your knees deeper".to_string());
            result.corrections.push("depth".to_string());
        } else {
            result.feedback.push("You went down too deep".to_string());
            result.corrections.push("too_deep".to_string());
        }
    } else {
        result.feedback.push("Good squat form!".to_string());
    }

    let left_knee_forward = left_knee.x > left_ankle.x + KNEE_FORWARD_MARGIN;
    let right_knee_forward = right_knee.x > right_ankle.x + KNEE_FORWARD_MARGIN;
    if left_knee_forward || right_knee_forward {
        result
            .feedback
            .push("Keep your knees behind your toes".to_string());
        result.corrections.push("knee_position".to_string());
        result.scores.insert("knee_position".to_string(), 70.0);
    } else {
        result.scores.insert("knee_position".to_string(), 100.0);
    }

    result.is_in_position =
        knee_score > 60.0 && (left_knee_angle - right_knee_angle).abs() < 15.0;
    Ok(result.finish())
}

fn evaluate_pushup(frame: &LandmarkFrame) -> Result<AnalysisResult, EvalError> {
    let left_shoulder = required(frame, LandmarkName::LeftShoulder)?;
    let left_elbow = required(frame, LandmarkName::LeftElbow)?;
    let left_wrist = required(frame, LandmarkName::LeftWrist)?;
    let right_shoulder = required(frame, LandmarkName::RightShoulder)?;
    let right_elbow = required(frame, LandmarkName::RightElbow)?;
    let right_wrist = required(frame, LandmarkName::RightWrist)?;
    let left_hip = required(frame, LandmarkName::LeftHip)?;
    let left_ankle = required(frame, LandmarkName::LeftAnkle)?;

    let mut result = AnalysisResult::default();

    let left_elbow_angle = geometry::angle(left_shoulder, left_elbow, left_wrist);
    let right_elbow_angle = geometry::angle(right_shoulder, right_elbow, right_wrist);
    result.angles.insert("left_elbow".to_string(), left_elbow_angle);
    result.angles.insert("right_elbow".to_string(), right_elbow_angle);

    // Shoulder-hip-ankle line, 180 when the body is straight.
    let body_angle = geometry::angle(left_shoulder, left_hip, left_ankle);
    result.angles.insert("body".to_string(), body_angle);

    let avg_elbow_angle = (left_elbow_angle + right_elbow_angle) / 2.0;
    let elbow_score = angle_score(90.0, avg_elbow_angle, 2.0);
    result.scores.insert("elbow".to_string(), elbow_score);

    let body_score = angle_score(180.0, body_angle, 2.0);
    result.scores.insert("body".to_string(), body_score);

    if body_score < 80.0 {
        if body_angle < 170.0 {
            result.feedback.push("Your hips are too high".to_string());
            result.corrections.push("hips_high".to_string());
        } else {
            result.feedback.push("Your hips are sagging".to_string());
            result.corrections.push("hips_low".to_string());
        }
    } else {
        result.feedback.push("Good push-up form!".to_string());
    }

    result.is_in_position = elbow_score > 60.0 && body_score > 70.0;
    Ok(result.finish())
}

fn evaluate_plank(frame: &LandmarkFrame) -> Result<AnalysisResult, EvalError> {
    let left_shoulder = required(frame, LandmarkName::LeftShoulder)?;
    let left_hip = required(frame, LandmarkName::LeftHip)?;
    let left_ankle = required(frame, LandmarkName::LeftAnkle)?;
    let left_elbow = required(frame, LandmarkName::LeftElbow)?;

    let mut result = AnalysisResult::default();

    let body_angle = geometry::angle(left_shoulder, left_hip, left_ankle);
    result.angles.insert("body".to_string(), body_angle);

    if let Some(left_wrist) = frame.get(LandmarkName::LeftWrist) {
        result.angles.insert(
            "left_elbow".to_string(),
            geometry::angle(left_shoulder, left_elbow, left_wrist),
        );
    }

    // Holding a line matters more here than in a push-up, hence the
    // steeper penalty.
    let body_score = angle_score(180.0, body_angle, 3.0);
    result.scores.insert("body".to_string(), body_score);

    if body_score < 80.0 {
        if body_angle < 170.0 {
            result
                .feedback
                .push("Lower your hips and hold a straight line".to_string());
            result.corrections.push("hips_high".to_string());
        } else {
            result
                .feedback
                .push("Engage your core and lift your hips slightly".to_string());
            result.corrections.push("hips_low".to_string());
        }
    } else {
        result.feedback.push("Perfect plank form!".to_string());
    }

    if (left_elbow.x - left_shoulder.x).abs() > SHOULDER_STACK_MARGIN {
        result
            .feedback
            .push("Stack your shoulders directly above your elbows".to_string());
        result.scores.insert("shoulder".to_string(), 80.0);
    } else {
        result.scores.insert("shoulder".to_string(), 100.0);
    }

    result.is_in_position = body_score > 70.0;
    Ok(result.finish())
}

fn evaluate_lunge(frame: &LandmarkFrame) -> Result<AnalysisResult, EvalError> {
    let left_hip = required(frame, LandmarkName::LeftHip)?;
    let left_knee = required(frame, LandmarkName::LeftKnee)?;
    let left_ankle = required(frame, LandmarkName::LeftAnkle)?;
    let right_hip = required(frame, LandmarkName::RightHip)?;
    let right_knee = required(frame, LandmarkName::RightKnee)?;
    let right_ankle = required(frame, LandmarkName::RightAnkle)?;

    let mut result = AnalysisResult::default();

    // Convention: left leg leads, right leg trails.
    let front_knee_angle = geometry::angle(left_hip, left_knee, left_ankle);
    let back_knee_angle = geometry::angle(right_hip, right_knee, right_ankle);
    result.angles.insert("front_knee".to_string(), front_knee_angle);
    result.angles.insert("back_knee".to_string(), back_knee_angle);

    let front_knee_score = angle_score(90.0, front_knee_angle, 2.0);
    result.scores.insert("front_knee".to_string(), front_knee_score);

    let back_knee_score = angle_score(90.0, back_knee_angle, 2.0);
    result.scores.insert("back_knee".to_string(), back_knee_score);

    if front_knee_score < 70.0 {
        result
            .feedback
            .push("Bend your front knee to 90 degrees".to_string());
        result.corrections.push("front_knee_angle".to_string());
    }
    if back_knee_score < 70.0 {
        result
            .feedback
            .push("Drop your back knee closer to the floor".to_string());
        result.corrections.push("back_knee_angle".to_string());
    }
    if front_knee_score >= 70.0 && back_knee_score >= 70.0 {
        result.feedback.push("Great lunge form!".to_string());
    }

    if left_knee.x > left_ankle.x + KNEE_FORWARD_MARGIN {
        result
            .feedback
            .push("Keep your front knee behind your toes".to_string());
        result.scores.insert("knee_position".to_string(), 70.0);
    } else {
        result.scores.insert("knee_position".to_string(), 100.0);
    }

    result.is_in_position = front_knee_score > 60.0 && back_knee_score > 60.0;
    Ok(result.finish())
}

/// Burpees pass through discrete sub-postures, so the frame is first
/// bucketed by hip height and then scored with the matching rule. When the
/// joints a bucket wants are out of frame the posture falls back to a flat
/// 80 instead of failing the whole frame.
fn evaluate_burpee(frame: &LandmarkFrame) -> Result<AnalysisResult, EvalError> {
    let left_hip = required(frame, LandmarkName::LeftHip)?;
    let left_shoulder = required(frame, LandmarkName::LeftShoulder)?;

    let mut result = AnalysisResult::default();

    let phase = Phase::classify(left_hip.y);
    let posture_score = match phase {
        Phase::Standing => 100.0,
        Phase::Squat => {
            match (
                frame.get(LandmarkName::LeftKnee),
                frame.get(LandmarkName::LeftAnkle),
            ) {
                (Some(left_knee), Some(left_ankle)) => {
                    let knee_angle = geometry::angle(left_hip, left_knee, left_ankle);
                    result.angles.insert("knee".to_string(), knee_angle);
                    angle_score(90.0, knee_angle, 2.0)
                }
                _ => 80.0,
            }
        }
        Phase::Plank => match frame.get(LandmarkName::LeftAnkle) {
            Some(left_ankle) => {
                let body_angle = geometry::angle(left_shoulder, left_hip, left_ankle);
                result.angles.insert("body".to_string(), body_angle);
                angle_score(180.0, body_angle, 2.0)
            }
            None => 80.0,
        },
    };
    result.scores.insert("posture".to_string(), posture_score);

    if posture_score < 70.0 {
        match phase {
            Phase::Squat => result
                .feedback
                .push("Hold a clean squat in the crouch".to_string()),
            Phase::Plank => result
                .feedback
                .push("Keep your body straight in the plank".to_string()),
            Phase::Standing => {}
        }
    }

    result.phase = Some(phase);
    result.is_in_position = posture_score > 60.0;
    Ok(result.finish())
}

/// Fallback for exercises without a dedicated rule set.
fn evaluate_generic() -> AnalysisResult {
    let mut result = AnalysisResult::default();
    result.scores.insert("general".to_string(), 80.0);
    result.feedback.push("Hold your position".to_string());
    result.is_in_position = true;
    result.finish()
}
