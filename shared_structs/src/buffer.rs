use crate::color::Color;

/// Two logical layers over the full image: a linear-precision accumulation
/// buffer keyed by (x,y), and an 8-bit tone-mapped mirror written only
/// after gamma correction. Invariant: the accumulation buffer's pixel
/// equals the running mean of all completed samples at that pixel.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    accumulation: Vec<Color>,
    tone_mapped: Vec<[u8; 3]>,
}

impl RenderBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            accumulation: vec![Color::BLACK; len],
            tone_mapped: vec![[0, 0, 0]; len],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn mean(&self, x: u32, y: u32) -> Color {
        self.accumulation[self.index(x, y)]
    }

    pub fn tone_mapped(&self, x: u32, y: u32) -> [u8; 3] {
        self.tone_mapped[self.index(x, y)]
    }

    /// Folds `sample` into the running mean at `(x, y)` for the `sample_pass`'th
    /// sample (1-indexed), and refreshes the tone-mapped mirror.
    pub fn accumulate(&mut self, x: u32, y: u32, sample_pass: u32, sample: Color) {
        let idx = self.index(x, y);
        let prev = self.accumulation[idx];
        let s = sample_pass as f32;
        let mean = (prev * (s - 1.0) + sample) * (1.0 / s);
        self.accumulation[idx] = mean;
        self.tone_mapped[idx] = mean.to_srgb().to_rgb8();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progressive_mean_matches_arithmetic_mean() {
        let mut buf = RenderBuffer::new(1, 1);
        let samples = [0.2f32, 0.8, 0.4, 0.6, 1.0];
        for (i, &s) in samples.iter().enumerate() {
            buf.accumulate(0, 0, (i + 1) as u32, Color::splat3(s, s, s));
        }
        let expected: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!((buf.mean(0, 0).r - expected).abs() < 1e-5);
    }
}
