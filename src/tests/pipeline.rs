use super::fixtures::*;
use crate::config::RunConfig;
use crate::error::Error;
use crate::flops::Stage;
use crate::plot::{ImageFormat, PlotMode};
use std::collections::HashMap;
use std::path::PathBuf;

const LIBRARIES: [&str; 2] = ["eth", "ez"];
const STAGES: [&str; 4] = ["Downscale", "Convolution", "GaussianPyramid", "MeasureFull"];

fn config_for(logs: &TempDir, plots: &TempDir, vars: &[(&str, &str)]) -> RunConfig {
    let mut vars = vars
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect::<HashMap<_, _>>();
    vars.insert("LOGS".to_owned(), logs.path().display().to_string());
    vars.insert("PLOTS_DIR".to_owned(), plots.path().display().to_string());
    RunConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names = paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn all_modes_write_their_plots() {
    let logs = temp_dir("pipeline-logs");
    let plots = temp_dir("pipeline-plots");
    write_synthetic_logs(&logs, &LIBRARIES, &STAGES);

    let config = config_for(&logs, &plots, &[]);
    let written = crate::run(&config).unwrap();

    let mut expected = STAGES
        .iter()
        .map(|s| format!("perfplot_{}.png", s.to_lowercase()))
        .collect::<Vec<_>>();
    expected.push("runtimeplot_all_functions.png".to_owned());
    expected.push("stackedplot_stacked_proportional_runtime_eth.png".to_owned());
    expected.push("stackedplot_stacked_proportional_runtime_ez.png".to_owned());
    expected.push("rooflineplot_all_functions.png".to_owned());
    expected.sort();
    assert_eq!(file_names(&written), expected);

    let (width, height) = config.arch.figure_size;
    for path in written.iter() {
        assert!(path.starts_with(plots.path()));
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (width, height));
    }
}

#[test]
fn single_mode_writes_svg() {
    let logs = temp_dir("svg-logs");
    let plots = temp_dir("svg-plots");
    write_synthetic_logs(&logs, &["eth"], &["Histogram", "ExtractDescriptor"]);

    let config = config_for(
        &logs,
        &plots,
        &[("PLOT_MODE", "roofline"), ("IMG_FORMAT", "svg")],
    );
    assert_eq!(config.modes, vec![PlotMode::Roofline]);
    assert_eq!(config.format, ImageFormat::Svg);

    let written = crate::run(&config).unwrap();
    assert_eq!(file_names(&written), vec!["rooflineplot_all_functions.svg"]);
    let svg = std::fs::read_to_string(&written[0]).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("ethSIFT Histogram"));
}

#[test]
fn missing_plot_directory_is_created() {
    let logs = temp_dir("mkdir-logs");
    let plots = temp_dir("mkdir-plots");
    write_synthetic_logs(&logs, &["ez"], &["DOGPyramid"]);

    let mut config = config_for(&logs, &plots, &[("PLOT_MODE", "runtime")]);
    config.plots_dir = plots.path().join("nested").join("out");
    let written = crate::run(&config).unwrap();
    assert_eq!(written, vec![config.plots_dir.join("runtimeplot_all_functions.png")]);
    assert!(written[0].is_file());
}

#[test]
fn library_with_only_the_full_pipeline_gets_no_stacked_plot() {
    let logs = temp_dir("stacked-logs");
    let plots = temp_dir("stacked-plots");
    write_synthetic_logs(&logs, &["eth"], &["Octaves"]);
    write_synthetic_logs(&logs, &["ez"], &[Stage::MeasureFull.name()]);

    let config = config_for(&logs, &plots, &[("PLOT_MODE", "stacked_runtime")]);
    let written = crate::run(&config).unwrap();
    assert_eq!(
        file_names(&written),
        vec!["stackedplot_stacked_proportional_runtime_eth.png"]
    );
}

#[test]
fn empty_log_directory_fails_the_run() {
    let logs = temp_dir("no-logs");
    let plots = temp_dir("no-plots");
    let config = config_for(&logs, &plots, &[]);
    match crate::run(&config) {
        Err(Error::NoMeasurements(dir)) => assert_eq!(dir, logs.path()),
        other => panic!("expected no measurements, got {:?}", other),
    }
}
