//! Boolean threshold masks over the world grid.

use crate::noise::NoiseField;

/// `mask(x, y) = noise(x, y, frequency) > threshold` over a `width` x `height` area.
#[derive(Clone, Debug)]
pub struct MaskField {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl MaskField {
    pub fn build(noise: &NoiseField, frequency: f32, threshold: f32, width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut bits = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                bits.push(noise.sample_cell(x, y, frequency) > threshold);
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Out-of-range cells read as `false`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if !(0..self.width).contains(&x) || !(0..self.height).contains(&y) {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}
