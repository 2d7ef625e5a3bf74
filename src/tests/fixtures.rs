#![allow(dead_code)]
use rand::Rng;
use std::fs;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// A scratch directory named after the test, removed on drop.
pub fn temp_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("sift-perf-plots-{}-", name))
        .tempdir()
        .unwrap()
}

/// Writes `lines` into `dir/name` and returns the file's path.
pub fn write_log(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Writes a log per resolution with every stage measured for `libraries`, with runtimes that
/// grow with the image size and a little noise. The file names carry the libraries, so calls
/// with different libraries do not overwrite each other.
pub fn write_synthetic_logs(dir: &TempDir, libraries: &[&str], stages: &[&str]) {
    let mut rng = rand::thread_rng();
    for &resolution in crate::resolution::Resolution::ALL.iter() {
        let mut lines = vec!["function,median,stddev".to_owned()];
        for library in libraries {
            for stage in stages {
                let median = resolution.pixels() as f64 * rng.gen_range(0.5..4.0);
                let std_dev = median * rng.gen_range(0.0..0.1);
                lines.push(format!("{}_{},{:.0},{:.3}", library, stage, median, std_dev));
            }
        }
        let lines = lines.iter().map(String::as_str).collect::<Vec<_>>();
        let name = format!("{}-{}_synthetic.csv", libraries.join("+"), resolution);
        write_log(dir, &name, &lines);
    }
}
