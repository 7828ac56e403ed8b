use artcodes_vote::{EmissionPolicy, VoteEngine, VoteParams};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_stream(frames: usize) -> Vec<Vec<String>> {
    (0..frames)
        .map(|i| {
            let mut codes = vec!["1:1:2:3:5".to_string(); 2];
            if i % 3 != 0 {
                codes.push(format!("1:2:{}", i % 7));
            }
            if i % 11 == 0 {
                codes.clear();
            }
            codes
        })
        .collect()
}

fn bench_observe_frame(c: &mut Criterion) {
    let stream = synthetic_stream(1024);
    let params = VoteParams::default().with_emission(EmissionPolicy::OncePerEpisode);

    c.bench_function("observe_frame_1024", |b| {
        b.iter(|| {
            let mut engine = VoteEngine::detached(params).expect("valid params");
            let mut emitted = 0usize;
            for codes in &stream {
                if engine.observe_frame(codes.iter()).emitted {
                    emitted += 1;
                }
            }
            black_box(emitted)
        })
    });
}

criterion_group!(benches, bench_observe_frame);
criterion_main!(benches);
