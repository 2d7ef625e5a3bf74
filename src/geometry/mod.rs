/// A descriptor for the size of an image or a pyramid level
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageGeometry {
    width: usize,
    height: usize,
}

impl ImageGeometry {
    pub fn new(width: usize, height: usize) -> ImageGeometry {
        ImageGeometry { width, height }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
    /// Returns the geometry of the image downscaled by half, truncating odd sides.
    pub fn halved(&self) -> ImageGeometry {
        self.octave(1)
    }
    /// Returns the geometry of the `i`th octave, ie. the image halved `i` times.
    pub fn octave(&self, i: usize) -> ImageGeometry {
        if i >= usize::BITS as usize {
            return ImageGeometry::new(0, 0);
        }
        ImageGeometry {
            width: self.width >> i,
            height: self.height >> i,
        }
    }
    /// Iterates the geometries of the first `count` octaves, starting from the full image.
    pub fn octaves(&self, count: usize) -> impl Iterator<Item = ImageGeometry> {
        let base = *self;
        (0..count).map(move |i| base.octave(i))
    }
    /// Number of pixels at least `border` pixels away from every edge.
    pub fn interior(&self, border: usize) -> usize {
        let w = self.width.saturating_sub(2 * border);
        let h = self.height.saturating_sub(2 * border);
        w * h
    }
    /// The length of the shorter side.
    pub fn short_side(&self) -> usize {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn octaves_halve_with_truncation() {
        let geom = ImageGeometry::new(427, 240);
        let octaves = geom.octaves(4).collect::<Vec<_>>();
        assert_eq!(
            octaves,
            vec![
                ImageGeometry::new(427, 240),
                ImageGeometry::new(213, 120),
                ImageGeometry::new(106, 60),
                ImageGeometry::new(53, 30),
            ]
        );
        assert_eq!(geom.halved(), octaves[1]);
    }

    #[test]
    fn interior_saturates_for_small_images() {
        assert_eq!(ImageGeometry::new(20, 30).interior(5), 10 * 20);
        assert_eq!(ImageGeometry::new(7, 13).interior(5), 0);
    }
}
