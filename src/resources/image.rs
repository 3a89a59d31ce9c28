/// Decoded RGBA8 pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first.
    pub data: Vec<u8>,
}

impl Image {
    #[must_use]
    pub fn new(label: impl Into<String>, width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            label: label.into(),
            width,
            height,
            data,
        }
    }

    /// 1x1 opaque white.
    #[must_use]
    pub fn white() -> Self {
        Self::new("white", 1, 1, vec![255; 4])
    }

    /// White disc with a one-pixel soft edge on a transparent background.
    ///
    /// Stands in for the usual `disc.png` point sprite.
    #[must_use]
    pub fn disc(size: u32) -> Self {
        let size = size.max(2);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let center = size as f32 * 0.5;
        let radius = center - 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                let d = (dx * dx + dy * dy).sqrt();
                let alpha = (radius - d + 0.5).clamp(0.0, 1.0);
                data.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
            }
        }
        Self::new("disc", size, size, data)
    }

    /// Alpha of the pixel at `(x, y)`.
    #[must_use]
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(((y * self.width + x) * 4 + 3) as usize).copied()
    }
}
