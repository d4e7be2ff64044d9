use criterion::*;
use karger_mincut::graph::karger::{run_trial, KargerBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

criterion_main!(benches);
criterion_group!(benches, single_trial, clique_chain, parallel_trials);

fn single_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("SingleTrial");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);
    const SIZES: &[usize] = &[25usize, 50usize, 100usize, 200usize];
    let mut rng = StdRng::seed_from_u64(3407);
    for n in SIZES.iter() {
        let edges = gen_random_graph(&mut rng, *n, *n * 4);
        group.bench_with_input(BenchmarkId::new("Contract", n), n, |b, _| {
            let mut trial = 0;
            b.iter(|| {
                trial += 1;
                black_box(run_trial(&edges, 7, trial).unwrap())
            })
        });
    }
    group.finish();
}

fn clique_chain(c: &mut Criterion) {
    const N: usize = 8;
    const M: &[usize] = &[4usize, 8usize, 16usize];
    let mut group = c.benchmark_group("CliqueChain");
    for m in M.iter() {
        let edges = gen_clique_chain(N, *m);
        let karger = KargerBuilder::new().trials(10).seed(1).build().unwrap();
        group.bench_with_input(BenchmarkId::new("TenTrials", m), m, |b, _| {
            b.iter(|| black_box(karger.run(&edges).unwrap()))
        });
    }
    group.finish();
}

fn parallel_trials(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let edges = gen_random_graph(&mut rng, 80, 400);
    let mut group = c.benchmark_group("Trials");
    for parallel in [false, true] {
        let karger = KargerBuilder::new()
            .trials(32)
            .seed(5)
            .parallel(parallel)
            .build()
            .unwrap();
        let name = if parallel { "Parallel" } else { "Sequential" };
        group.bench_function(name, |b| b.iter(|| black_box(karger.run(&edges).unwrap())));
    }
    group.finish();
}

/// A spanning path plus random extra edges, so the graph is connected.
fn gen_random_graph<R: Rng>(rng: &mut R, v_n: usize, e_n: usize) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = (1..v_n).map(|v| (v - 1, v)).collect();
    while edges.len() < e_n {
        let u = rng.gen_range(0..v_n);
        let v = rng.gen_range(0..v_n);
        if u != v {
            edges.push((u, v));
        }
    }
    edges
}

/// `m` cliques of size `n`, consecutive cliques joined by one edge.
fn gen_clique_chain(n: usize, m: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for k in 0..m {
        let base = k * n;
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((base + u, base + v));
            }
        }
        if k > 0 {
            edges.push((base - 1, base));
        }
    }
    edges
}
