use crate::geometry::ImageGeometry;
use std::fmt;
use std::str::FromStr;

/// The resolution buckets the benchmarks were run at.
///
/// The variants are declared in ascending pixel count, so the derived ordering sorts by image size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    R240p,
    R360p,
    R480p,
    R720p,
    R1080p,
    R2160p,
    R4320p,
}

impl Resolution {
    pub const ALL: [Resolution; 7] = [
        Resolution::R240p,
        Resolution::R360p,
        Resolution::R480p,
        Resolution::R720p,
        Resolution::R1080p,
        Resolution::R2160p,
        Resolution::R4320p,
    ];

    pub fn label(self) -> &'static str {
        use self::Resolution::*;
        match self {
            R240p => "240p",
            R360p => "360p",
            R480p => "480p",
            R720p => "720p",
            R1080p => "1080p",
            R2160p => "2160p",
            R4320p => "4320p",
        }
    }

    // The benchmark images are portrait, so the label names the width.
    pub fn width(self) -> usize {
        use self::Resolution::*;
        match self {
            R240p => 240,
            R360p => 360,
            R480p => 480,
            R720p => 720,
            R1080p => 1080,
            R2160p => 2160,
            R4320p => 4320,
        }
    }

    pub fn height(self) -> usize {
        use self::Resolution::*;
        match self {
            R240p => 427,
            R360p => 640,
            R480p => 853,
            R720p => 1280,
            R1080p => 1920,
            R2160p => 3840,
            R4320p => 7680,
        }
    }

    pub fn pixels(self) -> usize {
        self.width() * self.height()
    }

    pub fn geometry(self) -> ImageGeometry {
        ImageGeometry::new(self.width(), self.height())
    }

    /// Extracts the resolution from a log file name such as `eth-1080p_avx.csv`.
    ///
    /// The label sits between the first `-` and the following `_` or `.`.
    pub fn from_file_name(name: &str) -> Option<Resolution> {
        let after_dash = name.splitn(2, '-').nth(1)?;
        let label = after_dash.split(|c| c == '_' || c == '.').next()?;
        label.parse().ok()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Resolution {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Resolution, &'static str> {
        Resolution::ALL
            .iter()
            .cloned()
            .find(|r| r.label() == s)
            .ok_or("cannot convert input to any known resolution")
    }
}
