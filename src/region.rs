//! Label maps, region masks, and masked statistical sampling
//!
//! A [`LabelMap`] is the per-pixel class grid produced by the external
//! segmentation network. A [`RegionMask`] selects the pixels of one region of
//! interest, either by class equality on a label map or by an arbitrary pixel
//! predicate. The sampling functions aggregate image pixels under a mask.

use crate::{
    constants::segmentation,
    error::{AnalysisError, Result},
};
use image::RgbImage;

/// Per-pixel semantic class grid, same spatial dimensions as its source image
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LabelMap {
    /// Create a label map from row-major class indices
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` if the buffer length does not match the
    /// dimensions or any class index exceeds the segmentation contract.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(AnalysisError::invalid_image(format!(
                "label map buffer has {} entries, expected {}x{}={}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        if let Some(&bad) = data.iter().find(|&&c| c > segmentation::MAX_CLASS_INDEX) {
            return Err(AnalysisError::invalid_image(format!(
                "label map contains class {} outside contract range 0..={}",
                bad,
                segmentation::MAX_CLASS_INDEX
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Class index at a pixel coordinate
    pub fn class_at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Build the mask of pixels belonging to one class
    pub fn mask_for_class(&self, class: u8) -> RegionMask {
        RegionMask {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&c| c == class).collect(),
        }
    }
}

/// Boolean grid marking the pixels of a region of interest
#[derive(Debug, Clone)]
pub struct RegionMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl RegionMask {
    /// Build a mask by evaluating a predicate at every coordinate
    pub fn from_fn(width: u32, height: u32, mut pred: impl FnMut(u32, u32) -> bool) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(pred(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Build a mask from a per-pixel predicate over an image
    pub fn from_pixels(image: &RgbImage, mut pred: impl FnMut([u8; 3]) -> bool) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            pred(image.get_pixel(x, y).0)
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at a coordinate belongs to the region
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of selected pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.contains(&true)
    }

    /// Mask with every selected pixel deselected and vice versa
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&b| !b).collect(),
        }
    }
}

fn check_dimensions(image: &RgbImage, mask: &RegionMask) -> Result<()> {
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(AnalysisError::invalid_image(format!(
            "mask dimensions {}x{} do not match image {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Collect the pixels an image holds under a mask
pub fn masked_pixels(image: &RgbImage, mask: &RegionMask) -> Result<Vec<[u8; 3]>> {
    check_dimensions(image, mask)?;
    let mut pixels = Vec::with_capacity(mask.count());
    for y in 0..image.height() {
        for x in 0..image.width() {
            if mask.contains(x, y) {
                pixels.push(image.get_pixel(x, y).0);
            }
        }
    }
    Ok(pixels)
}

/// Per-channel median color over a masked region
///
/// Channels are aggregated independently; for even pixel counts the two
/// middle values are averaged, so the result is not necessarily a pixel that
/// occurs in the image.
///
/// # Errors
///
/// Returns `EmptyRegion` when the mask selects zero pixels and `InvalidImage`
/// on a dimension mismatch. An empty mask is never papered over with a
/// placeholder color.
pub fn median_color(image: &RgbImage, mask: &RegionMask, region: &str) -> Result<[u8; 3]> {
    let pixels = masked_pixels(image, mask)?;
    if pixels.is_empty() {
        return Err(AnalysisError::empty_region(region));
    }

    let mut out = [0u8; 3];
    let mut channel = Vec::with_capacity(pixels.len());
    for (c, slot) in out.iter_mut().enumerate() {
        channel.clear();
        channel.extend(pixels.iter().map(|p| p[c]));
        channel.sort_unstable();

        let mid = channel.len() / 2;
        let median = if channel.len() % 2 == 1 {
            channel[mid] as f32
        } else {
            (channel[mid - 1] as f32 + channel[mid] as f32) / 2.0
        };
        *slot = median.round() as u8;
    }
    Ok(out)
}

/// Scalar statistics over a single channel of a sampled region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub mean: f32,
    pub std_dev: f32,
    pub min: u8,
    pub max: u8,
}

impl ChannelStats {
    /// Compute mean, population standard deviation, min, and max
    ///
    /// # Errors
    ///
    /// Returns `EmptyRegion` for an empty value slice.
    pub fn from_values(values: &[u8], region: &str) -> Result<Self> {
        if values.is_empty() {
            return Err(AnalysisError::empty_region(region));
        }

        let n = values.len() as f32;
        let mean = values.iter().map(|&v| v as f32).sum::<f32>() / n;
        let variance = values
            .iter()
            .map(|&v| {
                let d = v as f32 - mean;
                d * d
            })
            .sum::<f32>()
            / n;

        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }

        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(rgb))
    }

    #[test]
    fn test_label_map_rejects_bad_buffer() {
        let result = LabelMap::new(4, 4, vec![0; 15]);
        assert!(matches!(
            result.unwrap_err(),
            AnalysisError::InvalidImage { .. }
        ));
    }

    #[test]
    fn test_label_map_rejects_out_of_contract_class() {
        let mut data = vec![0u8; 16];
        data[5] = 19;
        let result = LabelMap::new(4, 4, data);
        assert!(result.is_err());
    }

    #[test]
    fn test_mask_for_class() {
        let mut data = vec![0u8; 16];
        data[0] = 17;
        data[5] = 17;
        let map = LabelMap::new(4, 4, data).unwrap();

        let mask = map.mask_for_class(17);
        assert_eq!(mask.count(), 2);
        assert!(mask.contains(0, 0));
        assert!(mask.contains(1, 1));
        assert!(!mask.contains(2, 2));
    }

    #[test]
    fn test_empty_mask_fails_not_defaults() {
        let img = solid_image(4, 4, [10, 20, 30]);
        let mask = RegionMask::from_fn(4, 4, |_, _| false);

        let err = median_color(&img, &mask, "hair").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyRegion { .. }));
        assert!(err.to_string().contains("hair"));
    }

    #[test]
    fn test_median_solid_region() {
        let img = solid_image(8, 8, [40, 90, 200]);
        let mask = RegionMask::from_fn(8, 8, |x, _| x < 4);

        assert_eq!(median_color(&img, &mask, "skin").unwrap(), [40, 90, 200]);
    }

    #[test]
    fn test_median_even_count_averages_middles() {
        // Two pixels selected with distinct values: median is their midpoint
        let mut img = solid_image(2, 1, [0, 0, 0]);
        img.put_pixel(0, 0, image::Rgb([10, 100, 0]));
        img.put_pixel(1, 0, image::Rgb([20, 101, 255]));
        let mask = RegionMask::from_fn(2, 1, |_, _| true);

        let median = median_color(&img, &mask, "test").unwrap();
        assert_eq!(median[0], 15);
        assert_eq!(median[1], 101); // 100.5 rounds up
        assert_eq!(median[2], 128);
    }

    #[test]
    fn test_median_dimension_mismatch() {
        let img = solid_image(4, 4, [0, 0, 0]);
        let mask = RegionMask::from_fn(2, 2, |_, _| true);

        assert!(matches!(
            median_color(&img, &mask, "test").unwrap_err(),
            AnalysisError::InvalidImage { .. }
        ));
    }

    #[test]
    fn test_mask_from_pixels_and_invert() {
        let mut img = solid_image(3, 1, [255, 255, 255]);
        img.put_pixel(1, 0, image::Rgb([200, 10, 10]));

        let background = RegionMask::from_pixels(&img, |p| p.iter().all(|&c| c >= 250));
        assert_eq!(background.count(), 2);

        let subject = background.inverted();
        assert_eq!(subject.count(), 1);
        assert!(subject.contains(1, 0));
    }

    #[test]
    fn test_channel_stats() {
        let stats = ChannelStats::from_values(&[10, 20, 30, 40], "l-channel").unwrap();
        assert!((stats.mean - 25.0).abs() < 0.001);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 40);
        // population std dev of {10,20,30,40} = sqrt(125)
        assert!((stats.std_dev - 125.0f32.sqrt()).abs() < 0.001);
    }

    #[test]
    fn test_channel_stats_empty_fails() {
        assert!(matches!(
            ChannelStats::from_values(&[], "l-channel").unwrap_err(),
            AnalysisError::EmptyRegion { .. }
        ));
    }
}
