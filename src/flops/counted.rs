//! Operation and compulsory-traffic counts derived from the loop structure of each stage.
//!
//! Every image is `f32`, and traffic counts each image read or written once per pass.
use super::{Estimate, PyramidParams, Stage};
use crate::geometry::ImageGeometry;

const FLOAT_BYTES: f64 = 4.0;

// Stages that only move memory still report one flop so that ratios stay finite
const NOMINAL_FLOPS: f64 = 1.0;

// one add and one mult per kernel tap
const CONV_TAP: f64 = 2.0;
// coefficient: div, 2 mults, exp, div, add, mult, accumulate; then the normalising div
const KERNEL_TAP: f64 = 9.0;
const DOG_PIXEL: f64 = 1.0;
// 2 subs, 2 mults, add, sqrt and the 7-flop atan2 approximation
const GRAD_ROT_PIXEL: f64 = 13.0;

const HIST_WINDOW_PIXEL: f64 = 17.0;
const HIST_SMOOTH_BIN: f64 = 10.0;
const HIST_PEAK_BIN: f64 = 1.0;
const HIST_SETUP: f64 = 10.0;

// derivatives (6), hessian (21) and the 3x3 solve (60)
const REFINE_STEP: f64 = 6.0 + 21.0 + 60.0;
// contrast and edge response checks
const REFINE_CHECKS: f64 = 21.0;
// voxels of the 3x3x3 neighbourhood read per interpolation step
const REFINE_STEP_VOXELS: f64 = 27.0;

const DETECT_PIXEL: f64 = 1.0;
// three comparisons per bin plus one parabola fit
const PEAK_FIT_BIN: f64 = 3.0;
const PEAK_FIT: f64 = 8.0;

const DESCR_WINDOW_PIXEL: f64 = 10.0;
// trilinear binning of the samples that land in the descriptor grid
const DESCR_BINNING: f64 = 33.0;
const DESCR_NORMALISE: f64 = 8.0;
const DESCR_SETUP: f64 = 12.0;

pub fn estimate(stage: Stage, params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    use super::Stage::*;
    match stage {
        Downscale => downscale(geom),
        Convolution => convolution(geom, params.conv_kernel_size),
        Octaves => octaves(params, geom),
        GaussianKernelGeneration => kernel_generation(params),
        GaussianPyramid => gaussian_pyramid(params, geom),
        DOGPyramid => dog_pyramid(params, geom),
        GradientAndRotationPyramids => grad_rot_pyramids(params, geom),
        Histogram => histogram(params),
        ExtremaRefinement => refinement(params),
        KeypointDetection => keypoint_detection(params, geom),
        ExtractDescriptor => extract_descriptor(params, geom),
        MeasureFull => full_pipeline(geom),
    }
}

fn pixels(geom: ImageGeometry) -> f64 {
    geom.num_pixels() as f64
}

fn downscale(geom: ImageGeometry) -> Estimate {
    // 1 read / 1 write per output pixel
    Estimate::new(NOMINAL_FLOPS, 2.0 * pixels(geom.halved()) * FLOAT_BYTES)
}

fn convolution(geom: ImageGeometry, kernel_size: usize) -> Estimate {
    // A row filter followed by a transpose, done twice
    let passes = 2.0;
    Estimate::new(
        passes * pixels(geom) * kernel_size as f64 * CONV_TAP,
        passes * 2.0 * pixels(geom) * FLOAT_BYTES,
    )
}

fn octaves(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    // The first octave is a copy, the rest are downscales of the previous one
    let bytes = geom
        .octaves(params.octave_count)
        .map(|octave| 2.0 * pixels(octave) * FLOAT_BYTES)
        .sum();
    Estimate::new(NOMINAL_FLOPS, bytes)
}

fn kernel_generation(params: &PyramidParams) -> Estimate {
    let taps = params.kernel_sizes().iter().sum::<usize>() as f64;
    Estimate::new(KERNEL_TAP * taps, 3.0 * taps * FLOAT_BYTES)
}

fn gaussian_pyramid(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    let kernels = params.kernel_sizes();
    geom.octaves(params.octave_count)
        .enumerate()
        .map(|(o, octave)| {
            // Later octaves start from a downscaled layer of the previous octave instead of
            // blurring with the first kernel
            let (first, start) = if o == 0 {
                (Estimate::default(), 0)
            } else {
                (downscale(geom.octave(o - 1)), 1)
            };
            kernels[start..]
                .iter()
                .map(|&k| convolution(octave, k))
                .fold(Estimate::new(0.0, first.bytes), |acc, e| acc + e)
        })
        .fold(Estimate::default(), |acc, e| acc + e)
}

fn dog_pyramid(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    geom.octaves(params.octave_count)
        .map(|octave| {
            let layers = params.dog_count as f64;
            // 2 reads / 1 write per difference
            Estimate::new(
                layers * pixels(octave) * DOG_PIXEL,
                layers * 3.0 * pixels(octave) * FLOAT_BYTES,
            )
        })
        .fold(Estimate::default(), |acc, e| acc + e)
}

fn grad_rot_pyramids(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    geom.octaves(params.octave_count)
        .map(|octave| {
            let layers = params.grad_rot_layers as f64;
            // 1 read / 2 writes per pixel
            Estimate::new(
                layers * pixels(octave) * GRAD_ROT_PIXEL,
                layers * 3.0 * pixels(octave) * FLOAT_BYTES,
            )
        })
        .fold(Estimate::default(), |acc, e| acc + e)
}

fn histogram(params: &PyramidParams) -> Estimate {
    let radius = (params.ori_radius_factor * params.nominal_keypoint_scale()).floor();
    let window = (2.0 * radius + 1.0).powi(2);
    let bins = params.ori_hist_bins as f64;
    Estimate::new(
        window * HIST_WINDOW_PIXEL + bins * (HIST_SMOOTH_BIN + HIST_PEAK_BIN) + HIST_SETUP,
        // magnitude and angle per window pixel, and the temporary histogram
        window * 2.0 * FLOAT_BYTES + bins * 2.0 * FLOAT_BYTES,
    )
}

fn refinement(params: &PyramidParams) -> Estimate {
    let steps = params.max_interp_steps as f64;
    Estimate::new(
        steps * REFINE_STEP + REFINE_CHECKS,
        steps * REFINE_STEP_VOXELS * FLOAT_BYTES,
    )
}

fn peak_fit(params: &PyramidParams) -> Estimate {
    Estimate::new(
        params.ori_hist_bins as f64 * PEAK_FIT_BIN + PEAK_FIT,
        params.ori_hist_bins as f64 * FLOAT_BYTES,
    )
}

fn keypoint_detection(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    let scan = geom
        .octaves(params.octave_count)
        .map(|octave| {
            let layers = params.dog_count.saturating_sub(2) as f64;
            let interior = octave.interior(params.image_border) as f64;
            // every DoG layer of the octave is streamed once
            Estimate::new(
                layers * interior * DETECT_PIXEL,
                params.dog_count as f64 * pixels(octave) * FLOAT_BYTES,
            )
        })
        .fold(Estimate::default(), |acc, e| acc + e);
    let per_keypoint = refinement(params) + histogram(params) + peak_fit(params);
    scan + per_keypoint * params.expected_keypoints(geom)
}

fn descriptor(params: &PyramidParams) -> Estimate {
    let scale = params.nominal_keypoint_scale();
    let subregion_width = params.descr_scale_factor * scale;
    let win_size = (std::f64::consts::SQRT_2
        * subregion_width
        * (params.descr_width + 1) as f64
        * 0.5
        + 0.5)
        .floor();
    let window = (2.0 * win_size + 1.0).powi(2);
    let grid = (params.descr_width as f64 * subregion_width).powi(2).min(window);
    let len = params.descriptor_len() as f64;
    Estimate::new(
        window * DESCR_WINDOW_PIXEL + grid * DESCR_BINNING + len * DESCR_NORMALISE + DESCR_SETUP,
        window * 2.0 * FLOAT_BYTES + len * FLOAT_BYTES,
    )
}

fn extract_descriptor(params: &PyramidParams, geom: ImageGeometry) -> Estimate {
    descriptor(params) * params.expected_keypoints(geom)
}

fn full_pipeline(geom: ImageGeometry) -> Estimate {
    let params = PyramidParams::for_image(geom);
    gaussian_pyramid(&params, geom)
        + dog_pyramid(&params, geom)
        + grad_rot_pyramids(&params, geom)
        + keypoint_detection(&params, geom)
        + extract_descriptor(&params, geom)
}
