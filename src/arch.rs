/// Peak throughput and memory bandwidth of the machine the benchmarks were run on.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchConfig {
    pub name: &'static str,
    pub fixed_cpu_frequency: &'static str,
    /// Core frequency in Hz, used to turn microseconds into cycles
    pub frequency: f64,
    // peak flops/cycle per instruction mix
    pub maxflops_sisd: f64,
    pub maxflops_simd: f64,
    pub maxflops_sisd_fma: f64,
    pub maxflops_simd_fma: f64,
    /// Memory bandwidth in bytes/cycle
    pub roofline_beta: f64,
    /// Output image size in pixels
    pub figure_size: (u32, u32),
}

pub const SKYLAKE_2900: ArchConfig = ArchConfig {
    name: "skylake-2900",
    fixed_cpu_frequency: "@ 2900 MHz",
    frequency: 2.9e9,
    maxflops_sisd: 2.0,
    maxflops_simd: 16.0,
    maxflops_sisd_fma: 4.0,
    maxflops_simd_fma: 32.0,
    // According to WikiChip (Skylake)
    roofline_beta: 64.0,
    figure_size: (2000, 900),
};

pub const SKYLAKE_3700: ArchConfig = ArchConfig {
    name: "skylake-3700",
    fixed_cpu_frequency: "@ 3700 MHz",
    frequency: 3.7e9,
    maxflops_sisd: 2.0,
    maxflops_simd: 16.0,
    maxflops_sisd_fma: 4.0,
    maxflops_simd_fma: 32.0,
    roofline_beta: 64.0,
    figure_size: (2000, 900),
};

impl ArchConfig {
    pub fn from_name(name: &str) -> Option<ArchConfig> {
        [SKYLAKE_2900, SKYLAKE_3700]
            .iter()
            .find(|arch| arch.name == name)
            .cloned()
    }

    /// Converts a duration in microseconds into core cycles.
    pub fn micros_to_cycles(&self, micros: f64) -> f64 {
        micros * self.frequency / 1e6
    }
}

impl Default for ArchConfig {
    fn default() -> ArchConfig {
        SKYLAKE_2900
    }
}
