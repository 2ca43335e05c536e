//=========================================================================
// Raster
//=========================================================================
//
// CPU-side pixel storage shared by the bundled backends.
//
// - `Bitmap`: decoded media resource (the backends' `Platform::Media`)
// - `Framebuffer`: the drawable surface draw callbacks paint into
//
// Pixels are packed `0xAARRGGBB`. Blits are opaque copies: only the
// destination offset is honoured and the copy is clipped to both the
// source and the framebuffer, like an unscaled surface blit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::{centered_boundary_rects, Canvas, Rect};

//=== Color ===============================================================

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xFFRRGGBB`.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

//=== Bitmap ==============================================================

/// Decoded image with packed ARGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Builds a bitmap from row-major packed pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel count must match bitmap dimensions"
        );
        Self { width, height, pixels }
    }

    /// Loads and decodes an image file.
    ///
    /// Returns `None` if the file does not exist or cannot be decoded.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            warn!(target: "platform", "Media not found: {}", path.display());
            return None;
        }

        let decoded = image::ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.decode());

        match decoded {
            Ok(image) => {
                let rgba = image.to_rgba8();
                let (width, height) = rgba.dimensions();
                let pixels = rgba
                    .pixels()
                    .map(|p| {
                        let [r, g, b, a] = p.0;
                        (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
                    })
                    .collect();

                debug!(
                    target: "platform",
                    "Loaded media {} ({}x{})",
                    path.display(),
                    width,
                    height
                );
                Some(Self { width, height, pixels })
            }
            Err(e) => {
                warn!(target: "platform", "Cannot decode {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y * self.width + x) as usize])
    }
}

//=== Framebuffer =========================================================

/// CPU drawable surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill.to_argb(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major packed pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y * self.width + x) as usize])
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Reallocates to the new size, painting every pixel with `fill`.
    pub fn resize(&mut self, width: u32, height: u32, fill: Color) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, fill.to_argb());
    }

    /// Copies `src` from `bitmap` so that its top-left corner lands on
    /// `(dst.x, dst.y)`. `dst.w`/`dst.h` are ignored; the copy is clipped
    /// to the bitmap and to the framebuffer.
    pub fn blit(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) {
        if src.is_empty() {
            return;
        }

        // Clip the source rectangle against the bitmap.
        let sx0 = src.x.max(0);
        let sy0 = src.y.max(0);
        let sx1 = (src.x + src.w).min(bitmap.width as i32);
        let sy1 = (src.y + src.h).min(bitmap.height as i32);
        if sx0 >= sx1 || sy0 >= sy1 {
            return;
        }

        // Destination origin of the (clipped) source's top-left pixel.
        let ox = dst.x + (sx0 - src.x);
        let oy = dst.y + (sy0 - src.y);

        let dx0 = ox.max(0);
        let dy0 = oy.max(0);
        let dx1 = (ox + (sx1 - sx0)).min(self.width as i32);
        let dy1 = (oy + (sy1 - sy0)).min(self.height as i32);
        if dx0 >= dx1 || dy0 >= dy1 {
            return;
        }

        let span = (dx1 - dx0) as usize;
        for dy in dy0..dy1 {
            let sy = sy0 + (dy - oy);
            let sx = sx0 + (dx0 - ox);

            let src_start = (sy as u32 * bitmap.width + sx as u32) as usize;
            let dst_start = (dy as u32 * self.width + dx0 as u32) as usize;

            self.pixels[dst_start..dst_start + span]
                .copy_from_slice(&bitmap.pixels[src_start..src_start + span]);
        }
    }
}

impl Canvas for Framebuffer {
    type Media = Bitmap;

    fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    fn show_centered_image(&mut self, media: Option<&Bitmap>) {
        let Some(bitmap) = media else { return };

        let (media_rect, screen_rect) = centered_boundary_rects(bitmap.bounds(), self.bounds());
        self.blit(bitmap, media_rect, screen_rect);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF_0000;
    const WHITE: u32 = 0xFFFF_FFFF;

    fn solid(width: u32, height: u32, argb: u32) -> Bitmap {
        Bitmap::from_pixels(width, height, vec![argb; (width * height) as usize])
    }

    fn count(fb: &Framebuffer, argb: u32) -> usize {
        fb.pixels().iter().filter(|&&p| p == argb).count()
    }

    //=====================================================================
    // Color Tests
    //=====================================================================

    #[test]
    fn color_packs_as_opaque_argb() {
        assert_eq!(Color::WHITE.to_argb(), WHITE);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_argb(), 0xFF12_3456);
    }

    //=====================================================================
    // Framebuffer Tests
    //=====================================================================

    #[test]
    fn centered_image_lands_at_leading_margin() {
        let mut fb = Framebuffer::new(100, 60, Color::WHITE);
        fb.show_centered_image(Some(&solid(40, 30, RED)));

        assert_eq!(fb.pixel(30, 15), Some(RED), "Top-left of media");
        assert_eq!(fb.pixel(69, 44), Some(RED), "Bottom-right of media");
        assert_eq!(fb.pixel(29, 15), Some(WHITE));
        assert_eq!(fb.pixel(70, 44), Some(WHITE));
        assert_eq!(fb.pixel(30, 45), Some(WHITE));
        assert_eq!(count(&fb, RED), 40 * 30);
    }

    #[test]
    fn centered_image_with_odd_delta_uses_floor_offset() {
        let mut fb = Framebuffer::new(101, 30, Color::WHITE);
        fb.show_centered_image(Some(&solid(40, 30, RED)));

        assert_eq!(fb.pixel(29, 0), Some(WHITE));
        assert_eq!(fb.pixel(30, 0), Some(RED));
        assert_eq!(fb.pixel(69, 0), Some(RED));
        assert_eq!(fb.pixel(70, 0), Some(WHITE), "31 px trailing margin");
    }

    #[test]
    fn oversized_image_is_cropped_around_center() {
        let mut pixels = vec![RED; 6];
        pixels[1] = 0xFF00_FF00;
        let bitmap = Bitmap::from_pixels(6, 1, pixels);

        // delta = 2 - 6 = -4 → offset -2, so bitmap columns 2..4 are visible.
        let mut fb = Framebuffer::new(2, 1, Color::WHITE);
        fb.show_centered_image(Some(&bitmap));

        assert_eq!(fb.pixels(), &[RED, RED]);

        let mut marker = vec![RED; 6];
        marker[2] = 0xFF00_00FF;
        fb.show_centered_image(Some(&Bitmap::from_pixels(6, 1, marker)));
        assert_eq!(fb.pixel(0, 0), Some(0xFF00_00FF));
    }

    #[test]
    fn empty_media_has_no_effect() {
        let mut fb = Framebuffer::new(8, 8, Color::BLACK);
        let before = fb.clone();

        fb.show_centered_image(None);
        fb.show_centered_image(None);

        assert_eq!(fb, before);
    }

    #[test]
    fn blit_with_empty_source_is_ignored() {
        let mut fb = Framebuffer::new(4, 4, Color::WHITE);
        let bitmap = solid(4, 4, RED);

        fb.blit(&bitmap, Rect::new(0, 0, 0, 4), Rect::from_size(4, 4));
        fb.blit(&bitmap, Rect::new(1, 1, 3, -2), Rect::from_size(4, 4));

        assert_eq!(count(&fb, WHITE), 16);
    }

    #[test]
    fn zero_sized_surfaces_do_not_panic() {
        let mut empty_fb = Framebuffer::new(0, 0, Color::WHITE);
        empty_fb.show_centered_image(Some(&solid(3, 3, RED)));
        assert!(empty_fb.pixels().is_empty());

        let mut fb = Framebuffer::new(3, 3, Color::WHITE);
        fb.show_centered_image(Some(&Bitmap::from_pixels(0, 0, Vec::new())));
        assert_eq!(count(&fb, WHITE), 9);
    }

    #[test]
    fn blit_outside_surface_is_ignored() {
        let mut fb = Framebuffer::new(4, 4, Color::WHITE);
        let bitmap = solid(2, 2, RED);

        fb.blit(&bitmap, bitmap.bounds(), Rect::new(10, 10, 2, 2));
        fb.blit(&bitmap, bitmap.bounds(), Rect::new(-5, 0, 2, 2));

        assert_eq!(count(&fb, RED), 0);
    }

    #[test]
    fn blit_is_clipped_at_edges() {
        let mut fb = Framebuffer::new(4, 4, Color::WHITE);
        let bitmap = solid(3, 3, RED);

        fb.blit(&bitmap, bitmap.bounds(), Rect::new(2, -1, 0, 0));

        // Visible part: columns 2..4, rows 0..2.
        assert_eq!(count(&fb, RED), 2 * 2);
        assert_eq!(fb.pixel(2, 0), Some(RED));
        assert_eq!(fb.pixel(3, 1), Some(RED));
        assert_eq!(fb.pixel(3, 2), Some(WHITE));
    }

    #[test]
    fn fill_and_resize_repaint_everything() {
        let mut fb = Framebuffer::new(3, 2, Color::BLACK);
        fb.fill(Color::WHITE);
        assert_eq!(count(&fb, WHITE), 6);

        fb.resize(5, 4, Color::BLACK);
        assert_eq!((fb.width(), fb.height()), (5, 4));
        assert_eq!(count(&fb, Color::BLACK.to_argb()), 20);
    }

    //=====================================================================
    // Bitmap Tests
    //=====================================================================

    #[test]
    fn missing_file_yields_none() {
        assert!(Bitmap::load(Path::new("/definitely/not/here.bmp")).is_none());
    }

    #[test]
    fn undecodable_file_yields_none() {
        let path = std::env::temp_dir().join(format!("pong_engine_garbage_{}.bmp", std::process::id()));
        std::fs::write(&path, b"not an image").expect("write temp file");

        let loaded = Bitmap::load(&path);
        let _ = std::fs::remove_file(&path);

        assert!(loaded.is_none());
    }

    #[test]
    fn bmp_file_is_decoded_to_argb() {
        let path = std::env::temp_dir().join(format!("pong_engine_paddle_{}.bmp", std::process::id()));
        image::RgbImage::from_pixel(4, 2, image::Rgb([0xFF, 0x00, 0x00]))
            .save(&path)
            .expect("encode bmp");

        let loaded = Bitmap::load(&path);
        let _ = std::fs::remove_file(&path);

        let bitmap = loaded.expect("bmp should decode");
        assert_eq!((bitmap.width(), bitmap.height()), (4, 2));
        assert_eq!(bitmap.pixel(3, 1), Some(RED));
        assert_eq!(bitmap.pixel(4, 0), None);
    }

    #[test]
    #[should_panic(expected = "Pixel count must match")]
    fn from_pixels_rejects_wrong_length() {
        Bitmap::from_pixels(2, 2, vec![0; 3]);
    }
}
