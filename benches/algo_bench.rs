//! Benchmark suite for numi-algo
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use numi_algo::{
    compute_mastery_update, get_upcoming_reviews, AttemptOutcome, ContextSelector, Locale,
    SkillProgress, SrsState,
};

fn bench_mastery_update(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let prior = SkillProgress {
        skill_id: "addition-two-digit".to_string(),
        skill_name: None,
        competency_area_id: None,
        mastery_level: 55,
        srs: SrsState {
            ease_factor: 2.4,
            interval_days: 6.0,
            reps: 8,
            lapses: 1,
        },
        next_review_at: now,
        last_practiced_at: None,
    };
    let outcome = AttemptOutcome {
        correct: true,
        response_time_ms: 2800,
        hints_used: 1,
    };

    c.bench_function("compute_mastery_update", |b| {
        b.iter(|| compute_mastery_update(&prior, &outcome, now))
    });
}

fn bench_selection(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut selector = ContextSelector::with_seed(Locale::En, 42);
    runtime.block_on(selector.load_context_pool()).unwrap();

    c.bench_function("select_name", |b| b.iter(|| selector.select_name(None).unwrap()));
    c.bench_function("select_items_3", |b| {
        b.iter(|| selector.select_items("food", 3).unwrap())
    });
}

fn bench_upcoming_reviews(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let records: Vec<SkillProgress> = (0..200)
        .map(|i| SkillProgress {
            skill_id: format!("skill-{i}"),
            skill_name: None,
            competency_area_id: None,
            mastery_level: (i * 7 % 101) as i32,
            srs: SrsState::default(),
            next_review_at: now + chrono::Duration::days((i % 40) as i64 - 10),
            last_practiced_at: None,
        })
        .collect();

    c.bench_function("get_upcoming_reviews_200", |b| {
        b.iter(|| get_upcoming_reviews(&records, now, Some(20)))
    });
}

criterion_group!(benches, bench_mastery_update, bench_selection, bench_upcoming_reviews);
criterion_main!(benches);
