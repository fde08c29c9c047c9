// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::{Tree, TreeNode, substring_method};
use arbor_view::{MovePolicy, SearchOptions, TreeView, Viewport};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;

fn subtree(levels: usize, fanout: usize, n: &mut u32) -> TreeNode<String> {
    *n += 1;
    let node = TreeNode::new(format!("node-{n}")).with_expanded(true);
    if levels == 0 {
        node
    } else {
        node.with_children(
            (0..fanout)
                .map(|_| subtree(levels - 1, fanout, n))
                .collect(),
        )
    }
}

fn build_forest(roots: usize, levels: usize, fanout: usize) -> Tree<String> {
    let mut n = 0;
    Tree::from_roots((0..roots).map(|_| subtree(levels, fanout, &mut n)).collect())
}

fn node_count(roots: usize, levels: usize, fanout: usize) -> usize {
    let mut per_root = 1;
    let mut level = 1;
    for _ in 0..levels {
        level *= fanout;
        per_root += level;
    }
    roots * per_root
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_index(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for &(roots, levels, fanout) in &[(10usize, 2usize, 10usize), (10, 3, 10), (10, 4, 10)] {
        let count = node_count(roots, levels, fanout);
        let tree = build_forest(roots, levels, fanout);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("rows_n{}", count), |b| {
            b.iter(|| black_box(tree.rows().len()))
        });
        group.bench_function(format!("row_count_n{}", count), |b| {
            b.iter(|| black_box(tree.row_count()))
        });
    }
    group.finish();
}

fn bench_row_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_at");
    let tree = build_forest(10, 3, 10);
    let rows = tree.row_count();
    let mut rng = Rng::new(0xA11C_E5ED_5EED_0001);
    let probes: Vec<usize> = (0..256).map(|_| rng.next_index(rows)).collect();
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("random_probes_n11110", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for &i in &probes {
                acc += tree.row_at(i).map_or(0, |r| r.depth);
            }
            black_box(acc)
        })
    });
    group.finish();
}

fn bench_visible_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_window");
    let tree = build_forest(10, 4, 10);
    let viewport = Viewport::new(16.0).with_size(Size::new(900.0, 800.0));
    let mut view = TreeView::with_tree(tree, viewport);
    let max = view.viewport().max_scroll(view.row_count());
    let mut rng = Rng::new(0xD00D_F1E1_D000_0002);
    let tops: Vec<f64> = (0..256).map(|_| rng.next_f64() * max).collect();
    group.throughput(Throughput::Elements(tops.len() as u64));
    group.bench_function("scroll_and_materialize_n111110", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for &top in &tops {
                view.set_scroll_top(top);
                for i in view.visible_range(8) {
                    acc += view.row(i).map_or(0, |r| r.depth);
                }
            }
            black_box(acc)
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let tree = build_forest(10, 3, 10);
    group.throughput(Throughput::Elements(tree.len() as u64));
    group.bench_function("find_substring_n11110", |b| {
        b.iter(|| black_box(tree.find("77", substring_method(|d: &String| d.as_str())).len()))
    });
    let viewport = Viewport::new(16.0).with_size(Size::new(900.0, 800.0));
    group.bench_function("set_query_narrowing_n11110", |b| {
        b.iter_batched(
            || TreeView::with_tree(tree.clone(), viewport),
            |mut view| {
                let options = SearchOptions {
                    only_expand_matches: true,
                    ..SearchOptions::default()
                };
                let event = view.set_query(
                    "node-77",
                    substring_method(|d: &String| d.as_str()),
                    &options,
                );
                black_box(event);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let tree = build_forest(10, 3, 10);
    let rows = tree.row_count();
    group.throughput(Throughput::Elements(64));
    group.bench_function("insert_then_remove_n11110", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut t| {
                for k in 0..64usize {
                    let node = TreeNode::new(String::from("probe"));
                    if let Ok(slot) = t.insert_at_depth(k % 4, (k * 131) % rows, node) {
                        let _ = t.remove(&slot.path);
                    }
                }
                black_box(t.len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_move_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_node");
    let tree = build_forest(10, 2, 10);
    let viewport = Viewport::new(16.0).with_size(Size::new(900.0, 800.0));
    let policy = MovePolicy::<String>::new();
    group.throughput(Throughput::Elements(8));
    group.bench_function("reparent_n1110", |b| {
        b.iter_batched(
            || TreeView::with_tree(tree.clone(), viewport),
            |mut view| {
                for k in 0..8usize {
                    let _ = view.move_node(&[0, 0], &[9], k % 10, &policy);
                }
                black_box(view.row_count())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_flatten,
    bench_row_at,
    bench_visible_window,
    bench_search,
    bench_churn,
    bench_move_node,
);
criterion_main!(benches);
