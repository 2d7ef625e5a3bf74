//! Analytical estimates of the floating point work and memory traffic of every pipeline stage.
mod counted;
mod params;

pub use self::params::*;
use crate::geometry::ImageGeometry;
use crate::resolution::Resolution;
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A benchmarked function of the feature-extraction pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Downscale,
    Convolution,
    Octaves,
    GaussianKernelGeneration,
    GaussianPyramid,
    DOGPyramid,
    GradientAndRotationPyramids,
    Histogram,
    ExtremaRefinement,
    KeypointDetection,
    ExtractDescriptor,
    /// The whole pipeline from input image to descriptors
    MeasureFull,
}

impl Stage {
    pub const ALL: [Stage; 12] = [
        Stage::Downscale,
        Stage::Convolution,
        Stage::Octaves,
        Stage::GaussianKernelGeneration,
        Stage::GaussianPyramid,
        Stage::DOGPyramid,
        Stage::GradientAndRotationPyramids,
        Stage::Histogram,
        Stage::ExtremaRefinement,
        Stage::KeypointDetection,
        Stage::ExtractDescriptor,
        Stage::MeasureFull,
    ];

    /// The function name as it appears in the logs.
    pub fn name(self) -> &'static str {
        use self::Stage::*;
        match self {
            Downscale => "Downscale",
            Convolution => "Convolution",
            Octaves => "Octaves",
            GaussianKernelGeneration => "GaussianKernelGeneration",
            GaussianPyramid => "GaussianPyramid",
            DOGPyramid => "DOGPyramid",
            GradientAndRotationPyramids => "GradientAndRotationPyramids",
            Histogram => "Histogram",
            ExtremaRefinement => "ExtremaRefinement",
            KeypointDetection => "KeypointDetection",
            ExtractDescriptor => "ExtractDescriptor",
            MeasureFull => "MeasureFull",
        }
    }

    /// Whether the stage's runtime already contains the other stages.
    pub fn is_aggregate(self) -> bool {
        self == Stage::MeasureFull
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Stage {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Stage, &'static str> {
        if s == "ComputeKeypoints" {
            return Ok(Stage::MeasureFull);
        }
        Stage::ALL
            .iter()
            .cloned()
            .find(|stage| stage.name() == s)
            .ok_or("cannot convert input to any pipeline stage")
    }
}

/// Estimated floating point operations and bytes moved.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Estimate {
    pub flops: f64,
    pub bytes: f64,
}

impl Estimate {
    pub fn new(flops: f64, bytes: f64) -> Estimate {
        Estimate { flops, bytes }
    }
    /// Operational intensity in flops/byte.
    pub fn intensity(&self) -> f64 {
        if self.bytes > 0.0 {
            self.flops / self.bytes
        } else {
            0.0
        }
    }
}

impl Add for Estimate {
    type Output = Estimate;

    fn add(self, other: Estimate) -> Estimate {
        Estimate::new(self.flops + other.flops, self.bytes + other.bytes)
    }
}

impl Mul<f64> for Estimate {
    type Output = Estimate;

    fn mul(self, factor: f64) -> Estimate {
        Estimate::new(self.flops * factor, self.bytes * factor)
    }
}

/// Which flop count to normalize the measured cycles with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlopModel {
    /// Every stage costs one flop per pixel, except the downscale copy.
    PixelCount,
    /// Per-stage counts that iterate the pyramid octaves.
    Counted,
}

impl FlopModel {
    pub fn estimate(self, stage: Stage, resolution: Resolution) -> Estimate {
        self.estimate_geometry(stage, resolution.geometry())
    }

    pub fn estimate_geometry(self, stage: Stage, geom: ImageGeometry) -> Estimate {
        let counted = counted::estimate(stage, &BENCHMARK_PARAMS, geom);
        match self {
            FlopModel::Counted => counted,
            FlopModel::PixelCount => {
                let flops = match stage {
                    // Conducts only memcpy
                    Stage::Downscale => 1.0,
                    _ => geom.num_pixels() as f64,
                };
                Estimate::new(flops, counted.bytes)
            }
        }
    }

    pub fn flops(self, stage: Stage, resolution: Resolution) -> f64 {
        self.estimate(stage, resolution).flops
    }
}

impl Default for FlopModel {
    fn default() -> FlopModel {
        FlopModel::Counted
    }
}

impl fmt::Display for FlopModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let m = match *self {
            FlopModel::PixelCount => "pixels",
            FlopModel::Counted => "counted",
        };
        write!(f, "{}", m)
    }
}

impl FromStr for FlopModel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<FlopModel, &'static str> {
        match s {
            "pixels" | "1" => Ok(FlopModel::PixelCount),
            "counted" | "2" => Ok(FlopModel::Counted),
            _ => Err("cannot convert input to a flop model"),
        }
    }
}
