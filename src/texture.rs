//! CPU-procedural textures.

/// RGBA8 texture generated on the CPU and uploaded once at startup
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Yellow/blue checkerboard, one cell per texel
    pub fn checkerboard(width: u32, height: u32) -> Self {
        const YELLOW: [u8; 4] = [255, 255, 0, 255];
        const BLUE: [u8; 4] = [0, 0, 255, 255];

        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let color = if ((x & 1) ^ (y & 1)) == 1 { YELLOW } else { BLUE };
                pixels.extend_from_slice(&color);
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_pattern() {
        let tex = Texture::checkerboard(4, 4);
        assert_eq!(tex.pixels.len(), 4 * 4 * 4);

        let texel = |x: usize, y: usize| &tex.pixels[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(texel(0, 0), &[0, 0, 255, 255]); // blue
        assert_eq!(texel(1, 0), &[255, 255, 0, 255]); // yellow
        assert_eq!(texel(0, 1), &[255, 255, 0, 255]);
        assert_eq!(texel(1, 1), &[0, 0, 255, 255]);
    }
}
