//! Review Scheduler
//!
//! Turns progress records plus "now" into an urgency-classified, sorted
//! review list, and renders human-relative due-date labels.
//!
//! All comparisons use calendar-date differences, not fixed 24-hour
//! multiples, so boundary crossings at midnight classify correctly
//! regardless of time-of-day.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{ScheduledReview, SkillProgress, Urgency, MAX_MASTERY_LEVEL, MIN_MASTERY_LEVEL};

/// Reviews due within this many calendar days count as "this week"
const THIS_WEEK_DAYS: i64 = 7;

/// Whole calendar days from `from` to `to` (negative when `to` is
/// earlier).
fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Classify a due date against today. Returns the urgency bucket and,
/// for overdue reviews only, the number of whole days overdue (>= 1).
pub fn classify_urgency(due: NaiveDate, today: NaiveDate) -> (Urgency, Option<i64>) {
    let days_ahead = calendar_days_between(today, due);
    if days_ahead < 0 {
        (Urgency::Overdue, Some(-days_ahead))
    } else if days_ahead == 0 {
        (Urgency::Today, None)
    } else if days_ahead <= THIS_WEEK_DAYS {
        (Urgency::ThisWeek, None)
    } else {
        (Urgency::Upcoming, None)
    }
}

/// Project progress records into scheduled reviews, soonest due first.
///
/// Classification and ordering run over the full record set; `limit`
/// truncates only afterwards, so a capped call still returns the
/// globally soonest reviews.
pub fn get_upcoming_reviews(
    records: &[SkillProgress],
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Vec<ScheduledReview> {
    let today = now.date_naive();

    let mut reviews: Vec<ScheduledReview> = records
        .iter()
        .map(|record| {
            let (urgency, days_overdue) = classify_urgency(record.next_review_at.date_naive(), today);
            ScheduledReview {
                skill_id: record.skill_id.clone(),
                skill_name: record.skill_name.clone(),
                competency_area_id: record.competency_area_id.clone(),
                mastery_level: record
                    .mastery_level
                    .clamp(MIN_MASTERY_LEVEL, MAX_MASTERY_LEVEL),
                next_review_at: record.next_review_at,
                urgency,
                days_overdue,
                last_practiced: record.last_practiced_at,
            }
        })
        .collect();

    reviews.sort_by_key(|r| r.next_review_at);

    if let Some(limit) = limit {
        reviews.truncate(limit);
    }
    reviews
}

/// Render a date relative to `now`: "today", "tomorrow", "in 3 days",
/// "in 2 weeks", "in 1 month", "yesterday", "4 days ago", and so on.
pub fn format_review_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = calendar_days_between(now.date_naive(), date.date_naive());

    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        2..=6 => format!("in {days} days"),
        -6..=-2 => format!("{} days ago", -days),
        7..=29 => {
            let weeks = days / 7;
            if weeks == 1 {
                "in 1 week".to_string()
            } else {
                format!("in {weeks} weeks")
            }
        }
        -29..=-7 => {
            let weeks = -days / 7;
            if weeks == 1 {
                "1 week ago".to_string()
            } else {
                format!("{weeks} weeks ago")
            }
        }
        30.. => {
            let months = days / 30;
            if months == 1 {
                "in 1 month".to_string()
            } else {
                format!("in {months} months")
            }
        }
        _ => {
            let months = -days / 30;
            if months == 1 {
                "1 month ago".to_string()
            } else {
                format!("{months} months ago")
            }
        }
    }
}
