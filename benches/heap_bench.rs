//! Indexed heap and shortest-path benchmarks
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_bench
//!
//! # Only the heap primitives
//! cargo bench --bench heap_bench -- 'heap_ops/'
//! ```
//!
//! ## DIMACS road graphs
//!
//! If `data/USA-road-d.NY.gr` exists, the `dimacs` group also runs random
//! queries on it. Download from:
//! <http://www.diag.uniroma1.it/challenge9/download.shtml>
//!
//! ```sh
//! mkdir -p data && cd data
//! wget http://www.diag.uniroma1.it/challenge9/data/USA-road-d/USA-road-d.NY.gr.gz
//! gunzip USA-road-d.NY.gr.gz
//! ```
//!
//! ## DIMACS .gr format
//!
//! - Lines starting with 'c' are comments
//! - Line 'p sp n m' defines problem: n nodes, m edges
//! - Lines 'a u v w' define edge from node u to node v with weight w (1-based ids)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_indexed_heap::pathfinding::{dijkstra, shortest_path, Graph};
use rust_indexed_heap::IndexedBinaryHeap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// ============================================================================
// Simple PRNG for reproducible benchmarks
// ============================================================================

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 33
    }

    fn next_below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

// ============================================================================
// Graph construction
// ============================================================================

/// 4-connected grid with unit costs
fn synthetic_grid(width: usize, height: usize) -> Graph<u32> {
    let mut graph = Graph::new(width * height);
    for y in 0..height {
        for x in 0..width {
            let node = y * width + x;
            if x + 1 < width {
                graph.add_undirected_edge(node, node + 1, 1).unwrap();
            }
            if y + 1 < height {
                graph.add_undirected_edge(node, node + width, 1).unwrap();
            }
        }
    }
    graph
}

/// Sparse random digraph with costs in `1..=100`
fn synthetic_sparse(num_nodes: usize, avg_degree: usize, seed: u64) -> Graph<u32> {
    let mut graph = Graph::new(num_nodes);
    let mut rng = Lcg::new(seed);
    for node in 0..num_nodes {
        let degree = avg_degree + rng.next_below(3);
        for _ in 0..degree {
            let target = rng.next_below(num_nodes);
            if target != node {
                let cost = (rng.next() % 100 + 1) as u32;
                graph.add_edge(node, target, cost).unwrap();
            }
        }
    }
    graph
}

/// Parse a DIMACS .gr file, shifting ids to start at 0
fn load_dimacs<P: AsRef<Path>>(path: P) -> std::io::Result<Graph<u32>> {
    let reader = BufReader::new(File::open(path)?);
    let mut graph = Graph::new(0);

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["p", "sp", nodes, _] => {
                graph = Graph::new(nodes.parse().unwrap_or(0));
            }
            ["a", from, to, weight] => {
                let from: usize = from.parse().unwrap_or(0);
                let to: usize = to.parse().unwrap_or(0);
                let weight: u32 = weight.parse().unwrap_or(1);
                if from > 0 && to > 0 {
                    let _ = graph.add_edge(from - 1, to - 1, weight);
                }
            }
            _ => {}
        }
    }
    Ok(graph)
}

fn random_queries(num_nodes: usize, count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| (rng.next_below(num_nodes), rng.next_below(num_nodes)))
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn benchmark_heap_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_ops");

    for &n in &[1_000usize, 10_000, 100_000] {
        let priorities: Vec<u64> = {
            let mut rng = Lcg::new(n as u64);
            (0..n).map(|_| rng.next()).collect()
        };

        group.bench_with_input(BenchmarkId::new("insert_extract", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = IndexedBinaryHeap::new(n);
                for (id, &priority) in priorities.iter().enumerate() {
                    heap.insert(priority, id).unwrap();
                }
                while let Ok(node) = heap.extract_min() {
                    black_box(node);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("decrease_priority", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = IndexedBinaryHeap::new(n);
                for (id, &priority) in priorities.iter().enumerate() {
                    heap.insert(priority, id).unwrap();
                }
                for (id, &priority) in priorities.iter().enumerate() {
                    black_box(heap.decrease_priority(id, priority / 2));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_graph_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    group.sample_size(20);

    for &side in &[32usize, 128, 512] {
        let graph = synthetic_grid(side, side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &graph, |b, graph| {
            b.iter(|| black_box(dijkstra(graph, 0).unwrap().reachable_count()))
        });
    }

    group.finish();
}

fn benchmark_random_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_queries");
    group.sample_size(20);

    let graph = synthetic_sparse(10_000, 6, 12345);
    let queries = random_queries(graph.num_nodes(), 100, 54321);

    group.bench_function("sparse_10k", |b| {
        b.iter(|| {
            queries
                .iter()
                .filter(|&&(source, target)| {
                    matches!(shortest_path(&graph, source, target), Ok(Some(_)))
                })
                .count()
        })
    });

    group.finish();
}

fn benchmark_real_dimacs(c: &mut Criterion) {
    let path = Path::new("data/USA-road-d.NY.gr");
    if !path.exists() {
        eprintln!("Skipping DIMACS benchmark: {} not found", path.display());
        return;
    }
    let graph = match load_dimacs(path) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Skipping DIMACS benchmark: {}", err);
            return;
        }
    };

    let mut group = c.benchmark_group("dimacs");
    group.sample_size(10);
    let queries = random_queries(graph.num_nodes(), 20, 98765);

    group.bench_function("ny_random_queries", |b| {
        b.iter(|| {
            queries
                .iter()
                .filter(|&&(source, target)| {
                    matches!(shortest_path(&graph, source, target), Ok(Some(_)))
                })
                .count()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_heap_ops,
    benchmark_graph_scale,
    benchmark_random_queries,
    benchmark_real_dimacs
);
criterion_main!(benches);
