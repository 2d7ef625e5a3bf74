//! Measures reading a directory of benchmark logs into measurement series.

#[macro_use]
extern crate criterion;
extern crate rand;
extern crate sift_perf_plots;
extern crate tempfile;

use criterion::{black_box, Criterion};
use rand::Rng;
use sift_perf_plots::flops::Stage;
use sift_perf_plots::logs::{read_logs, ReadOptions};
use sift_perf_plots::resolution::Resolution;
use std::fs;
use tempfile::TempDir;

const SAMPLE_SIZE: usize = 50;
const NOISE_THRESHOLD: f64 = 0.05;
const LIBRARIES: [&str; 4] = ["eth", "ez", "opencv", "vlfeat"];

/// Writes one log per library and resolution with every stage measured.
fn write_logs() -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix("sift-perf-plots-bench-")
        .tempdir()
        .unwrap();

    let mut rng = rand::thread_rng();
    for library in LIBRARIES.iter() {
        for res in Resolution::ALL.iter() {
            let mut contents = String::from("function,median,stddev\n");
            for stage in Stage::ALL.iter() {
                let median = res.pixels() as f64 * rng.gen_range(0.5..4.0);
                contents.push_str(&format!(
                    "{}_{},{:.0},{:.3}\n",
                    library,
                    stage,
                    median,
                    median * 0.01
                ));
            }
            fs::write(dir.path().join(format!("{}-{}_bench.csv", library, res)), contents).unwrap();
        }
    }
    dir
}

fn bench_read_logs(c: &mut Criterion) {
    let dir = write_logs();
    let options = ReadOptions::default();
    c.bench_function("read-logs", |b| {
        b.iter(|| read_logs(black_box(dir.path()), &options).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(SAMPLE_SIZE).noise_threshold(NOISE_THRESHOLD);
    targets = bench_read_logs
}
criterion_main!(benches);
