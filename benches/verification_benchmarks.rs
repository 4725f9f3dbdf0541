//! Performance benchmarks for the verification pipeline.
//!
//! This benchmark suite verifies that clock-event verification meets
//! performance targets:
//! - Single face match against one enrollment: < 50μs mean
//! - Face match with 100 enrolled rivals: < 5ms mean
//! - Geofence validation: < 1μs mean
//! - Full verified clock-in through the engine: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use attendance_engine::config::ConfigLoader;
use attendance_engine::engine::AttendanceEngine;
use attendance_engine::models::{Embedding, Employee, FaceEnrollment};
use attendance_engine::scheduling::StaticHolidayCalendar;
use attendance_engine::store::RecordStore;
use attendance_engine::verification::{FaceMatcher, GeofenceValidator};

const DIM: usize = 512;
const HQ_LAT: f64 = 19.0760;
const HQ_LON: f64 = 72.8777;

/// A deterministic pseudo-random unit-ish embedding.
fn embedding(seed: u64) -> Embedding {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let values = (0..DIM)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f32 / u32::MAX as f32) - 0.5
        })
        .collect();
    Embedding::new(values)
}

fn enrollment(employee_id: &str, seed: u64) -> FaceEnrollment {
    FaceEnrollment {
        employee_id: employee_id.to_string(),
        embeddings: (0..4).map(|i| embedding(seed + i)).collect(),
    }
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

/// Benchmark: probe against a single enrollment, no rivals.
///
/// Target: < 50μs mean
fn bench_face_match_single(c: &mut Criterion) {
    let config = load_config();
    let matcher = FaceMatcher::new(config.settings().face.clone());
    let claimed = enrollment("emp_001", 1);
    let probe = embedding(1);

    c.bench_function("face_match_single", |b| {
        b.iter(|| black_box(matcher.match_probe(&claimed, &[], &probe).unwrap()))
    });
}

/// Benchmark: cross-check scaling with the number of enrolled rivals.
///
/// Target: < 5ms mean at 100 rivals
fn bench_face_match_rival_scaling(c: &mut Criterion) {
    let config = load_config();
    let matcher = FaceMatcher::new(config.settings().face.clone());
    let claimed = enrollment("emp_001", 1);
    let probe = embedding(1);

    let mut group = c.benchmark_group("face_match_rivals");
    for rival_count in [1usize, 10, 100] {
        let rivals: Vec<FaceEnrollment> = (0..rival_count)
            .map(|i| enrollment(&format!("emp_{i:03}"), 1000 + i as u64 * 7))
            .collect();
        let rival_refs: Vec<&FaceEnrollment> = rivals.iter().collect();

        group.throughput(Throughput::Elements(rival_count as u64));
        group.bench_with_input(
            BenchmarkId::new("rivals", rival_count),
            &rival_refs,
            |b, rival_refs| {
                b.iter(|| black_box(matcher.match_probe(&claimed, rival_refs, &probe).unwrap()))
            },
        );
    }
    group.finish();
}

/// Benchmark: geofence validation of a coordinate near the site edge.
///
/// Target: < 1μs mean
fn bench_geofence_validate(c: &mut Criterion) {
    let config = load_config();
    let validator = GeofenceValidator::new(&config);

    c.bench_function("geofence_validate", |b| {
        b.iter(|| black_box(validator.validate("hq", HQ_LAT + 0.0003, HQ_LON).unwrap()))
    });
}

/// Benchmark: a full verified clock-in through the engine, including
/// the day lock, the verification timeout, and status derivation.
///
/// Target: < 1ms mean
fn bench_engine_clock_in(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = load_config();
    let store = Arc::new(RecordStore::new());
    store.put_employee(Employee {
        id: "emp_001".to_string(),
        name: "Bench Employee".to_string(),
        shift_template: "general".to_string(),
        site_id: "hq".to_string(),
        manager_id: None,
        weekly_off: vec![Weekday::Sat, Weekday::Sun],
        active: true,
    });
    let engine = Arc::new(AttendanceEngine::with_manager_chain(
        &config,
        store,
        Arc::new(StaticHolidayCalendar::default()),
    ));
    engine
        .enroll_faces("emp_001", (0u64..4).map(embedding).collect())
        .unwrap();

    let probe = embedding(0);
    let base = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    // Each iteration clocks in on a fresh date so no event is a
    // duplicate.
    let counter = Arc::new(AtomicI64::new(0));

    c.bench_function("engine_clock_in", |b| {
        b.to_async(&rt).iter(|| {
            let engine = Arc::clone(&engine);
            let counter = Arc::clone(&counter);
            let probe = probe.clone();
            async move {
                let offset = counter.fetch_add(1, Ordering::Relaxed);
                let timestamp = (base + Duration::days(offset))
                    .and_hms_opt(9, 0, 0)
                    .unwrap();
                let day = engine
                    .clock_in("emp_001", timestamp, &probe, HQ_LAT, HQ_LON, None)
                    .await
                    .unwrap();
                black_box(day)
            }
        })
    });
}

criterion_group!(
    benches,
    bench_face_match_single,
    bench_face_match_rival_scaling,
    bench_geofence_validate,
    bench_engine_clock_in,
);
criterion_main!(benches);
