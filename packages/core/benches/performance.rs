//! Performance benchmarks for the outline engine
//!
//! Run with: `cargo bench -p storyloom-core`
//!
//! These benchmarks measure the operations the editor runs on every frame or drop:
//! - Flattening a large manuscript (sidebar render)
//! - Drag-and-drop moves within and across parts
//! - Cascade delete of a part
//! - History replay through a session

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storyloom_core::outline::{delete_node, flatten, flatten_with_depth, move_node};
use storyloom_core::{
    DropPosition, NodeKind, Outline, OutlineConfig, OutlineNode, OutlineOperation, OutlineSession,
};

/// Generate an outline of `parts` parts with `chapters` chapters each
fn generate_outline(parts: usize, chapters: usize) -> Outline {
    let mut nodes = Vec::with_capacity(parts * (chapters + 1));
    for p in 0..parts {
        let part_id = format!("p{p}");
        nodes.push(OutlineNode::new_with_id(
            part_id.clone(),
            NodeKind::Part,
            format!("Part {}", p + 1),
            None,
            p,
        ));
        for c in 0..chapters {
            nodes.push(OutlineNode::new_with_id(
                format!("p{p}c{c}"),
                NodeKind::Chapter,
                format!("Chapter {}", c + 1),
                Some(part_id.clone()),
                c,
            ));
        }
    }
    Outline::from_nodes(nodes)
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for (parts, chapters) in [(10, 10), (50, 40), (200, 50)] {
        let outline = generate_outline(parts, chapters);
        let label = format!("{}_nodes", outline.len());

        group.bench_with_input(BenchmarkId::new("visible", &label), &outline, |b, o| {
            b.iter(|| flatten(black_box(o)))
        });
        group.bench_with_input(BenchmarkId::new("with_depth", &label), &outline, |b, o| {
            b.iter(|| flatten_with_depth(black_box(o)))
        });
    }

    group.finish();
}

fn bench_move(c: &mut Criterion) {
    let outline = generate_outline(50, 40);
    let mut group = c.benchmark_group("move");

    group.bench_function("within_part", |b| {
        b.iter(|| {
            move_node(
                black_box(&outline),
                "p10c0",
                "p10c39",
                DropPosition::After,
            )
        })
    });

    group.bench_function("across_parts", |b| {
        b.iter(|| {
            move_node(
                black_box(&outline),
                "p3c5",
                "p40",
                DropPosition::Inside,
            )
        })
    });

    group.bench_function("part_with_children", |b| {
        b.iter(|| move_node(black_box(&outline), "p0", "p49", DropPosition::After))
    });

    group.bench_function("rejected", |b| {
        b.iter(|| move_node(black_box(&outline), "p0", "p1", DropPosition::Inside))
    });

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let outline = generate_outline(50, 40);

    c.bench_function("delete_part_cascade", |b| {
        b.iter(|| delete_node(black_box(&outline), "p25"))
    });
}

/// Measures a burst of edits followed by a full undo, as after a long drag session
fn bench_session_history(c: &mut Criterion) {
    let outline = generate_outline(20, 20);
    let mut group = c.benchmark_group("session");
    group.sample_size(20);

    group.bench_function("100_moves_then_undo", |b| {
        b.iter(|| {
            let mut session = OutlineSession::new(outline.clone(), &OutlineConfig::default());
            for i in 0..100 {
                session.apply(OutlineOperation::Move {
                    active_id: format!("p{}c{}", i % 20, i % 7),
                    target_id: format!("p{}", (i + 1) % 20),
                    position: DropPosition::Inside,
                });
            }
            while session.undo() {}
            black_box(session.outline().len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_flatten,
    bench_move,
    bench_delete,
    bench_session_history
);
criterion_main!(benches);
