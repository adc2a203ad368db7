use criterion::{black_box, criterion_group, criterion_main, Criterion};

use studytrack_core::model::{Activity, Chapter, Status};
use studytrack_core::ProgressEngine;

fn make_chapter(id: u32, names: &[String], seed: usize) -> Chapter {
    let ladder = [Status::NotStarted, Status::InProgress, Status::Done];
    Chapter {
        id,
        name: format!("Chapter {id}"),
        activities: names
            .iter()
            .enumerate()
            .map(|(i, name)| Activity::new(name.clone(), ladder[(i + seed) % ladder.len()]))
            .collect(),
    }
}

fn bench_score_chapter(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_chapter");
    let engine = ProgressEngine::builtin();

    for subject_id in ["physics1st", "highermath1st", "english1st"] {
        let subject = engine.repository().subject(subject_id).unwrap();
        let config = engine.resolve_config(subject_id);
        let chapter = make_chapter(1, &subject.activities, 0);
        group.bench_function(subject_id, |b| {
            b.iter(|| engine.score_chapter(black_box(config), black_box(&chapter)))
        });
    }

    group.bench_function("legacy_names", |b| {
        let config = engine.resolve_config("physics1st");
        let chapter = Chapter {
            id: 1,
            name: "legacy".into(),
            activities: vec![
                Activity::new("Lecture Video", Status::Done),
                Activity::new("Class Notes", Status::Done),
                Activity::new("Typewise CQ", Status::InProgress),
                Activity::new("MCQ Solve", Status::Done),
            ],
        };
        b.iter(|| engine.score_chapter(black_box(config), black_box(&chapter)))
    });

    group.finish();
}

fn bench_score_subject(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_subject");
    let engine = ProgressEngine::builtin();
    let subject = engine.repository().subject("biology1st").unwrap();
    let config = engine.resolve_config(&subject.id);

    for count in [12u32, 120] {
        let chapters: Vec<Chapter> = (1..=count)
            .map(|i| make_chapter(i, &subject.activities, i as usize))
            .collect();
        group.bench_function(format!("{count}_chapters"), |b| {
            b.iter(|| engine.score_subject(black_box(config), black_box(&chapters)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_chapter, bench_score_subject);
criterion_main!(benches);
