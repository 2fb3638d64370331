use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mcu_tetris::engine::GameLoop;
use mcu_tetris::input::{EscapeDecoder, InputMultiplexer, QueuedInputs};
use mcu_tetris::trace::{replay, ScriptedBoard, ScriptedBoardConfig, ScriptedPlatform, Trace};
use mcu_tetris::types::ButtonId;

fn bench_idle_step(c: &mut Criterion) {
    let mut platform = ScriptedPlatform::new();
    let mut board = ScriptedBoard::new(ScriptedBoardConfig::default());
    let mut game = GameLoop::new();
    game.new_game(&mut platform, &mut board);

    c.bench_function("step_idle", |b| {
        b.iter(|| {
            platform.advance(1);
            black_box(game.step(&mut platform, &mut board));
            if game.state().is_over() {
                game.new_game(&mut platform, &mut board);
            }
        })
    });
}

fn bench_button_step(c: &mut Criterion) {
    let mut platform = ScriptedPlatform::new();
    let mut board = ScriptedBoard::new(ScriptedBoardConfig::default());
    let mut game = GameLoop::new();
    game.new_game(&mut platform, &mut board);

    c.bench_function("step_hard_drop", |b| {
        b.iter(|| {
            platform.advance(1);
            platform.press_button(ButtonId::new(1));
            black_box(game.step(&mut platform, &mut board));
            if game.state().is_over() {
                game.new_game(&mut platform, &mut board);
            }
        })
    });
}

fn bench_escape_decode(c: &mut Criterion) {
    let bytes = b"\x1b[A\x1b[B\x1b[C\x1b[D p";
    c.bench_function("escape_decode", |b| {
        b.iter(|| {
            let mut decoder = EscapeDecoder::new();
            for &byte in black_box(bytes) {
                black_box(decoder.feed(byte));
            }
        })
    });
}

fn bench_resolve_serial(c: &mut Criterion) {
    let mut mux = InputMultiplexer::new();
    let mut inputs = QueuedInputs::new();
    let mut now = 0u64;

    c.bench_function("resolve_serial_byte", |b| {
        b.iter(|| {
            now += 1;
            inputs.push_serial(b" ");
            black_box(mux.resolve_command(&mut inputs, now, false));
        })
    });
}

fn bench_replay(c: &mut Criterion) {
    let trace = Trace::from_json(
        r#"{"end_tick": 5000, "events": [
            {"at": 100, "type": "joystick", "x": 900, "y": 500},
            {"at": 1000, "type": "serial", "text": "\u001b[D\u001b[D "},
            {"at": 2000, "type": "button", "id": 1}
        ]}"#,
    )
    .unwrap();

    c.bench_function("replay_5000_ticks", |b| {
        b.iter(|| black_box(replay(&trace).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_idle_step,
    bench_button_step,
    bench_escape_decode,
    bench_resolve_serial,
    bench_replay
);
criterion_main!(benches);
