//! Mastery Calculator
//!
//! Pure update function mapping a prior skill state plus one practice
//! attempt outcome to an updated mastery level, SRS parameters, and next
//! review date.
//!
//! Contract:
//! - A correct answer raises mastery and grows the interval (growth
//!   factor > 1 applied to the prior interval, capped at the maximum).
//! - An incorrect answer lowers mastery and resets the interval to the
//!   1-day minimum.
//! - Hints and slow responses dampen the positive adjustment but never
//!   turn a correct answer into a mastery decrease.
//! - The mastery level is clamped to [0, 100] on every update.

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    AttemptOutcome, MasteryUpdate, SkillProgress, SrsState, MAX_EASE_FACTOR, MAX_INTERVAL_DAYS,
    MAX_MASTERY_LEVEL, MIN_EASE_FACTOR, MIN_INTERVAL_DAYS, MIN_MASTERY_LEVEL,
};

/// Mastery points gained by a full-quality correct answer
const BASE_GAIN: f64 = 12.0;

/// Floor for the gain on any correct answer
const MIN_GAIN: f64 = 2.0;

/// Mastery points lost on an incorrect answer
const BASE_LOSS: i32 = 15;

/// Response-time thresholds (milliseconds) for quality scaling
const FAST_RT_MS: i64 = 3000;
const MODERATE_RT_MS: i64 = 6000;
const SLOW_RT_MS: i64 = 12000;

/// Ease drift per update
const EASE_GAIN: f64 = 0.08;
const EASE_LOSS: f64 = 0.2;

/// Compute the updated `(masteryLevel, srs, nextReviewAt)` triple for one
/// attempt. Pure: no clock reads, no state beyond the arguments.
pub fn compute_mastery_update(
    prior: &SkillProgress,
    outcome: &AttemptOutcome,
    now: DateTime<Utc>,
) -> MasteryUpdate {
    let level = prior
        .mastery_level
        .clamp(MIN_MASTERY_LEVEL, MAX_MASTERY_LEVEL);
    let srs = &prior.srs;

    let (new_level, new_srs) = if outcome.correct {
        let quality = answer_quality(outcome);
        let gain = (BASE_GAIN * quality).max(MIN_GAIN).round() as i32;

        let ease = (srs.ease_factor + EASE_GAIN * quality).clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR);
        let interval = next_interval(srs, ease, quality);

        (
            (level + gain).min(MAX_MASTERY_LEVEL),
            SrsState {
                ease_factor: ease,
                interval_days: interval,
                reps: srs.reps + 1,
                lapses: srs.lapses,
            },
        )
    } else {
        let ease = (srs.ease_factor - EASE_LOSS).max(MIN_EASE_FACTOR);

        (
            (level - BASE_LOSS).max(MIN_MASTERY_LEVEL),
            SrsState {
                ease_factor: ease,
                interval_days: MIN_INTERVAL_DAYS,
                reps: srs.reps + 1,
                lapses: srs.lapses + 1,
            },
        )
    };

    let next_review_at = now + Duration::days(new_srs.interval_days.ceil() as i64);

    MasteryUpdate {
        mastery_level: new_level,
        srs: new_srs,
        next_review_at,
    }
}

/// Quality of a correct answer in (0, 1]: full credit for a fast,
/// hint-free response, damped by slowness and hint usage.
fn answer_quality(outcome: &AttemptOutcome) -> f64 {
    let speed_factor = if outcome.response_time_ms < FAST_RT_MS {
        1.0
    } else if outcome.response_time_ms < MODERATE_RT_MS {
        0.85
    } else if outcome.response_time_ms < SLOW_RT_MS {
        0.7
    } else {
        0.5
    };

    let hint_factor = 1.0 / (1.0 + outcome.hints_used.max(0) as f64 * 0.4);

    speed_factor * hint_factor
}

/// Next interval after a correct answer. The growth factor stays above
/// 1 even at the lowest quality, so the interval never shrinks on a
/// correct answer; the first practice always schedules the minimum.
fn next_interval(srs: &SrsState, ease: f64, quality: f64) -> f64 {
    if srs.is_new() || srs.interval_days < MIN_INTERVAL_DAYS {
        return MIN_INTERVAL_DAYS;
    }
    let growth = 1.0 + (ease - 1.0) * quality;
    (srs.interval_days * growth).clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MasteryBand;
    use chrono::TimeZone;

    fn sample_progress(level: i32, srs: SrsState) -> SkillProgress {
        SkillProgress {
            skill_id: "addition-two-digit".to_string(),
            skill_name: None,
            competency_area_id: None,
            mastery_level: level,
            srs,
            next_review_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            last_practiced_at: None,
        }
    }

    fn fast_correct() -> AttemptOutcome {
        AttemptOutcome {
            correct: true,
            response_time_ms: 1500,
            hints_used: 0,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_correct_answer_raises_mastery_and_interval() {
        let prior = sample_progress(
            40,
            SrsState {
                ease_factor: 2.5,
                interval_days: 4.0,
                reps: 3,
                lapses: 0,
            },
        );
        let update = compute_mastery_update(&prior, &fast_correct(), now());

        assert!(update.mastery_level > 40);
        assert!(
            update.srs.interval_days > 4.0,
            "interval should grow on a correct answer, got {}",
            update.srs.interval_days
        );
        assert_eq!(update.srs.reps, 4);
        assert_eq!(update.srs.lapses, 0);
    }

    #[test]
    fn test_incorrect_answer_lowers_mastery_and_resets_interval() {
        let prior = sample_progress(
            60,
            SrsState {
                ease_factor: 2.5,
                interval_days: 12.0,
                reps: 6,
                lapses: 1,
            },
        );
        let outcome = AttemptOutcome {
            correct: false,
            response_time_ms: 8000,
            hints_used: 2,
        };
        let update = compute_mastery_update(&prior, &outcome, now());

        assert_eq!(update.mastery_level, 45);
        assert_eq!(update.srs.interval_days, MIN_INTERVAL_DAYS);
        assert_eq!(update.srs.lapses, 2);
        assert!(update.srs.ease_factor < 2.5);
        assert_eq!(update.next_review_at, now() + Duration::days(1));
    }

    #[test]
    fn test_hints_dampen_but_never_flip_gain() {
        let prior = sample_progress(
            50,
            SrsState {
                ease_factor: 2.5,
                interval_days: 6.0,
                reps: 4,
                lapses: 0,
            },
        );
        let hinted = AttemptOutcome {
            correct: true,
            response_time_ms: 15000,
            hints_used: 5,
        };
        let clean = compute_mastery_update(&prior, &fast_correct(), now());
        let damped = compute_mastery_update(&prior, &hinted, now());

        assert!(damped.mastery_level > 50, "correct answer must never lose mastery");
        assert!(
            damped.mastery_level < clean.mastery_level,
            "hints and slowness should dampen the gain ({} vs {})",
            damped.mastery_level,
            clean.mastery_level
        );
        assert!(
            damped.srs.interval_days > 6.0,
            "interval still grows on a damped correct answer"
        );
    }

    #[test]
    fn test_mastery_clamped_at_bounds() {
        let top = sample_progress(98, SrsState::default());
        let update = compute_mastery_update(&top, &fast_correct(), now());
        assert_eq!(update.mastery_level, 100);

        let bottom = sample_progress(5, SrsState::default());
        let miss = AttemptOutcome {
            correct: false,
            response_time_ms: 4000,
            hints_used: 0,
        };
        let update = compute_mastery_update(&bottom, &miss, now());
        assert_eq!(update.mastery_level, 0);
    }

    #[test]
    fn test_out_of_range_input_level_is_clamped() {
        let broken = sample_progress(300, SrsState::default());
        let update = compute_mastery_update(&broken, &fast_correct(), now());
        assert!(update.mastery_level <= 100);

        let negative = sample_progress(-40, SrsState::default());
        let update = compute_mastery_update(&negative, &fast_correct(), now());
        assert!(update.mastery_level >= 0);
    }

    #[test]
    fn test_first_practice_schedules_minimum_interval() {
        let prior = sample_progress(0, SrsState::default());
        let update = compute_mastery_update(&prior, &fast_correct(), now());
        assert_eq!(update.srs.interval_days, MIN_INTERVAL_DAYS);
        assert_eq!(update.next_review_at, now() + Duration::days(1));
    }

    #[test]
    fn test_interval_capped_at_maximum() {
        let prior = sample_progress(
            95,
            SrsState {
                ease_factor: 2.8,
                interval_days: 170.0,
                reps: 20,
                lapses: 0,
            },
        );
        let update = compute_mastery_update(&prior, &fast_correct(), now());
        assert_eq!(update.srs.interval_days, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn test_band_is_pure_function_of_level() {
        let prior = sample_progress(
            75,
            SrsState {
                ease_factor: 2.5,
                interval_days: 8.0,
                reps: 5,
                lapses: 0,
            },
        );
        let update = compute_mastery_update(&prior, &fast_correct(), now());
        assert_eq!(
            MasteryBand::from_level(update.mastery_level),
            MasteryBand::Mastered
        );
    }

    #[test]
    fn test_quality_monotone_in_hints() {
        let base = AttemptOutcome {
            correct: true,
            response_time_ms: 2000,
            hints_used: 0,
        };
        let mut prev = answer_quality(&base);
        for hints in 1..5 {
            let q = answer_quality(&AttemptOutcome {
                hints_used: hints,
                ..base.clone()
            });
            assert!(q < prev, "quality should strictly drop per hint");
            prev = q;
        }
    }
}
