use super::*;
use crate::arch::SKYLAKE_3700;
use crate::tests::fixtures::*;
use crate::resolution::Resolution::*;

const HEADER: &str = "function,median,stddev";

#[test]
fn record_splits_library_from_function() {
    let record = Record::parse("eth_GradientAndRotationPyramids,123456,78.5").unwrap();
    assert_eq!(record.library, "eth");
    assert_eq!(record.function, "GradientAndRotationPyramids");
    assert_eq!(record.median, 123456.0);
    assert_eq!(record.std_dev, 78.5);

    // Only the first underscore separates the library
    let record = Record::parse("ez_Some_Function, 10 , 1").unwrap();
    assert_eq!(record.function, "Some_Function");
    assert_eq!(record.median, 10.0);
}

#[test]
fn malformed_records_are_rejected() {
    assert!(Record::parse("Downscale,10,1").is_err());
    assert!(Record::parse("eth_Downscale,10").is_err());
    assert!(Record::parse("eth_Downscale,ten,1").is_err());
    assert!(Record::parse("eth_Downscale,-10,1").is_err());
    assert!(Record::parse("eth_Downscale,10,nan").is_err());
    assert!(Record::parse("").is_err());
}

#[test]
fn parse_errors_carry_file_and_line() {
    let dir = temp_dir("parse-errors");
    let path = write_log(
        &dir,
        "eth-240p_avx.csv",
        &[HEADER, "eth_Downscale,10,1", "", "eth_Convolution,oops,1"],
    );
    match read_log_file(&path) {
        Err(Error::Parse { path: p, line, .. }) => {
            assert_eq!(p, path);
            assert_eq!(line, 4);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn series_stay_ordered_by_resolution() {
    let dir = temp_dir("ordering");
    // Sorted by name, 1080p is read before 240p
    write_log(&dir, "eth-1080p_avx.csv", &[HEADER, "eth_Convolution,2000,20"]);
    write_log(&dir, "eth-240p_avx.csv", &[HEADER, "eth_Convolution,100,1"]);
    write_log(&dir, "eth-480p_avx.csv", &[HEADER, "eth_Convolution,400,4"]);

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    let series = measurements.series(Stage::Convolution, "eth").unwrap();
    let resolutions = series
        .points()
        .iter()
        .map(|p| p.resolution)
        .collect::<Vec<_>>();
    assert_eq!(resolutions, vec![R240p, R480p, R1080p]);
}

#[test]
fn performance_normalizes_cycles_by_flops() {
    let dir = temp_dir("performance");
    write_log(&dir, "eth-720p_avx.csv", &[HEADER, "eth_Convolution,1000000,50000"]);

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    let point = measurements
        .series(Stage::Convolution, "eth")
        .and_then(|s| s.get(R720p))
        .unwrap()
        .clone();
    let flops = FlopModel::Counted.flops(Stage::Convolution, R720p);
    assert_eq!(point.performance(), flops / 1e6);
    assert_eq!(point.cycles_per_flop(), 1e6 / flops);
    // 5% relative deviation carries over
    assert!((point.performance_std() - 0.05 * point.performance()).abs() < 1e-9);
}

#[test]
fn chrono_microseconds_become_cycles() {
    let dir = temp_dir("chrono");
    write_log(&dir, "ez-360p.csv", &[HEADER, "ez_Histogram,10,2"]);

    let options = ReadOptions {
        method: MeasurementMethod::Chrono,
        arch: SKYLAKE_3700,
        ..ReadOptions::default()
    };
    let measurements = read_logs(dir.path(), &options).unwrap();
    let point = &measurements.series(Stage::Histogram, "ez").unwrap().points()[0];
    assert_eq!(point.runtime, 10.0);
    assert_eq!(point.cycles, 37000.0);
    assert_eq!(point.cycles_std, 7400.0);
    assert_eq!(measurements.method(), MeasurementMethod::Chrono);
}

#[test]
fn unusable_files_and_records_are_skipped() {
    let dir = temp_dir("skipping");
    write_log(&dir, "README.md", &["# not a log"]);
    write_log(
        &dir,
        "eth-240p_avx.csv",
        &[HEADER, "eth_Downscale,10,1", "eth_Unheardof,10,1"],
    );

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    assert_eq!(measurements.functions().collect::<Vec<_>>(), vec![Stage::Downscale]);
}

#[test]
fn unreadable_files_are_skipped() {
    let dir = temp_dir("unreadable");
    std::fs::write(dir.path().join("ez-240p_bad.csv"), [0xff, 0xfe, 0x00, 0x2c]).unwrap();
    write_log(&dir, "eth-240p_avx.csv", &[HEADER, "eth_Downscale,10,1"]);

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    assert_eq!(measurements.libraries(), vec!["eth"]);
}

#[test]
fn version_filters_file_names() {
    let dir = temp_dir("version");
    write_log(&dir, "eth-240p_v1.csv", &[HEADER, "eth_Downscale,10,1"]);
    write_log(&dir, "eth-240p_v2.csv", &[HEADER, "eth_Downscale,20,1"]);

    let options = ReadOptions {
        version: Some("v2".to_owned()),
        ..ReadOptions::default()
    };
    let measurements = read_logs(dir.path(), &options).unwrap();
    let series = measurements.series(Stage::Downscale, "eth").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.points()[0].runtime, 20.0);
}

#[test]
fn later_duplicates_replace_earlier_ones() {
    let dir = temp_dir("duplicates");
    write_log(&dir, "eth-240p_a.csv", &[HEADER, "eth_Downscale,10,1"]);
    write_log(&dir, "eth-240p_b.csv", &[HEADER, "eth_Downscale,30,1"]);

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    let series = measurements.series(Stage::Downscale, "eth").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.points()[0].runtime, 30.0);
}

#[test]
fn totals_leave_out_the_full_pipeline() {
    let dir = temp_dir("totals");
    write_log(
        &dir,
        "eth-240p_avx.csv",
        &[
            HEADER,
            "eth_Downscale,10,1",
            "eth_Convolution,30,1",
            "eth_MeasureFull,1000,1",
            "ez_Downscale,5,1",
        ],
    );
    write_log(&dir, "eth-360p_avx.csv", &[HEADER, "eth_Downscale,20,1"]);

    let measurements = read_logs(dir.path(), &ReadOptions::default()).unwrap();
    let totals = measurements.total_runtimes("eth");
    assert_eq!(totals.get(&R240p), Some(&40.0));
    assert_eq!(totals.get(&R360p), Some(&20.0));
    assert_eq!(measurements.libraries(), vec!["eth", "ez"]);
    assert_eq!(measurements.longest_runtime(), 1000.0);
}

#[test]
fn empty_directories_are_an_error() {
    let dir = temp_dir("empty");
    write_log(&dir, "notes.txt", &["nothing to see"]);
    match read_logs(dir.path(), &ReadOptions::default()) {
        Err(Error::NoMeasurements(_)) => {}
        other => panic!("expected no measurements, got {:?}", other),
    }
}
