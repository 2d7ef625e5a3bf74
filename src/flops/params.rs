use crate::geometry::ImageGeometry;

/// Parameters of the scale-space pyramid the benchmarked pipeline builds.
#[derive(Clone, Debug, PartialEq)]
pub struct PyramidParams {
    /// Sampled intervals per octave; `s` in the SIFT paper.
    pub intervals: usize,
    /// Gaussian blurred images per octave
    pub gaussian_count: usize,
    /// Difference-of-gaussian images per octave
    pub dog_count: usize,
    pub grad_rot_layers: usize,
    pub octave_count: usize,
    /// Sigma of the initial smoothing
    pub sigma: f64,
    /// Blur assumed to be present in the input image
    pub init_sigma: f64,
    /// Gaussian kernel radius as a multiple of sigma
    pub kernel_radius_factor: f64,
    /// Tap count of the kernel in the stand-alone convolution benchmark
    pub conv_kernel_size: usize,
    pub image_border: usize,
    pub ori_hist_bins: usize,
    pub ori_radius_factor: f64,
    pub descr_width: usize,
    pub descr_hist_bins: usize,
    pub descr_scale_factor: f64,
    pub max_interp_steps: usize,
    pub max_keypoints: usize,
    /// Keypoints found per input pixel
    pub keypoint_density: f64,
}

// 136 keypoints are found in the 512x512 reference image
const REFERENCE_KEYPOINTS: f64 = 136.0;
const REFERENCE_PIXELS: f64 = 512.0 * 512.0;

/// The parameters the per-stage benchmarks run with.
pub const BENCHMARK_PARAMS: PyramidParams = PyramidParams {
    intervals: 3,
    gaussian_count: 6,
    dog_count: 5,
    grad_rot_layers: 3,
    octave_count: 6,
    sigma: 1.6,
    init_sigma: 0.5,
    kernel_radius_factor: 3.0,
    conv_kernel_size: 9,
    image_border: 5,
    ori_hist_bins: 36,
    ori_radius_factor: 3.0 * 1.5,
    descr_width: 4,
    descr_hist_bins: 8,
    descr_scale_factor: 3.0,
    max_interp_steps: 5,
    max_keypoints: 1000,
    keypoint_density: REFERENCE_KEYPOINTS / REFERENCE_PIXELS,
};

impl PyramidParams {
    /// Parameters for a full pipeline run, where the octave count follows from the image size.
    pub fn for_image(geom: ImageGeometry) -> PyramidParams {
        PyramidParams {
            octave_count: full_octave_count(geom),
            ..BENCHMARK_PARAMS
        }
    }

    /// Sigma of every gaussian layer relative to the previous layer of the octave.
    pub fn layer_sigmas(&self) -> Vec<f64> {
        let k = 2f64.powf(1.0 / self.intervals as f64);
        let mut sigmas = Vec::with_capacity(self.gaussian_count);
        sigmas.push((self.sigma * self.sigma - self.init_sigma * self.init_sigma).sqrt());
        for i in 1..self.gaussian_count {
            let prev = k.powi(i as i32 - 1) * self.sigma;
            let total = prev * k;
            sigmas.push((total * total - prev * prev).sqrt());
        }
        sigmas
    }

    /// Tap count of each gaussian layer's kernel.
    pub fn kernel_sizes(&self) -> Vec<usize> {
        self.layer_sigmas()
            .into_iter()
            .map(|sigma| 2 * (self.kernel_radius_factor * sigma).ceil() as usize + 1)
            .collect()
    }

    /// Scale of a keypoint found on the first layer of an octave.
    pub fn nominal_keypoint_scale(&self) -> f64 {
        self.sigma * 2f64.powf(1.0 / self.intervals as f64)
    }

    /// Expected number of keypoints for an image, capped at the keypoint budget.
    pub fn expected_keypoints(&self, geom: ImageGeometry) -> f64 {
        (self.keypoint_density * geom.num_pixels() as f64).min(self.max_keypoints as f64)
    }

    /// Elements in one descriptor vector.
    pub fn descriptor_len(&self) -> usize {
        self.descr_width * self.descr_width * self.descr_hist_bins
    }
}

/// `log2(short side) - 3`, but never less than one octave.
fn full_octave_count(geom: ImageGeometry) -> usize {
    let short = geom.short_side().max(1) as f64;
    (short.log2().floor() as usize).saturating_sub(3).max(1)
}
