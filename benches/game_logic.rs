use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flap_combat::core::{GameSnapshot, GameState};
use flap_combat::term::{FrameBuffer, GameView, Viewport};
use flap_combat::types::GameStatus;

/// A running game a few seconds in, with gates on screen.
fn busy_game() -> GameState {
    let mut state = GameState::new(12345);
    state.frame(0);
    state.flap();
    let mut now = 0;
    for i in 0..200u64 {
        now += 16;
        if i % 22 == 0 {
            state.flap();
        }
        state.frame(now);
    }
    state
}

fn bench_update(c: &mut Criterion) {
    let mut state = busy_game();

    c.bench_function("game_update_16ms", |b| {
        b.iter(|| {
            if state.status() != GameStatus::Running {
                state.flap();
            }
            state.update(black_box(0.016));
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut state = busy_game();
    let mut now = 10_000u64;

    c.bench_function("game_frame", |b| {
        b.iter(|| {
            now += 16;
            if state.status() != GameStatus::Running {
                state.flap();
            }
            state.frame(black_box(now));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = busy_game();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.fingerprint());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let snap = busy_game().snapshot();
    let mut view = GameView::new();
    let vp = Viewport::new(120, 60);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_into_120x60", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), vp, &mut fb);
        })
    });
}

criterion_group!(benches, bench_update, bench_frame, bench_snapshot, bench_render);
criterion_main!(benches);
