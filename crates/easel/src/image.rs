use std::path::Path;

use easel_engine::backend::Backend;
use easel_engine::coords::Rect;
use easel_engine::paint::Color;
use easel_engine::texture::{TextureData, TextureId};

use crate::canvas::Canvas;

/// A texture loaded by [`Canvas::load_image`].
///
/// Owned manually: dropping an `Image` does not release its texture; call
/// [`Canvas::unload_image`]. A failed load yields the invalid image
/// (null texture, 0 x 0).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Image {
    texture: TextureId,
    width: u32,
    height: u32,
}

impl Image {
    /// The invalid image.
    pub const fn invalid() -> Self {
        Self {
            texture: TextureId::NULL,
            width: 0,
            height: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.texture.is_null()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }
}

impl<B: Backend> Canvas<B> {
    /// Decodes `path` and uploads it. Failures are logged and return the
    /// invalid image.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Image {
        let path = path.as_ref();
        let data = match TextureData::load(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("load_image: {e}");
                return Image::invalid();
            }
        };

        match self.backend.create_texture(&data) {
            Ok(texture) => {
                log::debug!(
                    "loaded {} ({}x{}) as {texture:?}",
                    path.display(),
                    data.width,
                    data.height
                );
                Image {
                    texture,
                    width: data.width,
                    height: data.height,
                }
            }
            Err(e) => {
                log::warn!("load_image: {}: {e}", path.display());
                Image::invalid()
            }
        }
    }

    /// Releases the image's texture and invalidates it. Calling it again, or
    /// on an invalid image, does nothing.
    pub fn unload_image(&mut self, img: &mut Image) {
        if !img.is_valid() {
            return;
        }
        self.backend.destroy_texture(img.texture);
        *img = Image::invalid();
    }

    /// Draws the whole image stretched into `x, y, w, h`.
    pub fn image(&mut self, img: &Image, x: f32, y: f32, w: f32, h: f32) {
        if !img.is_valid() {
            return;
        }
        let src = Rect::new(0.0, 0.0, img.width as f32, img.height as f32);
        self.backend.draw_texture(
            self.transform.current(),
            img.texture,
            src,
            Rect::new(x, y, w, h),
            Color::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use easel_engine::backend::{BackendCall, HeadlessBackend};
    use easel_engine::coords::Affine;
    use easel_engine::window::WindowConfig;

    use super::*;

    fn open_canvas() -> Canvas<HeadlessBackend> {
        let mut b = HeadlessBackend::new();
        b.open_window(&WindowConfig::default()).unwrap();
        Canvas::new(b)
    }

    fn write_png(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("easel-{}-{name}.png", std::process::id()));
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_invalid_image() {
        let mut c = open_canvas();
        let img = c.load_image("/definitely/not/here.png");
        assert!(!img.is_valid());
        assert_eq!((img.width(), img.height()), (0, 0));
        assert_eq!(img, Image::invalid());
    }

    #[test]
    fn garbage_bytes_yield_invalid_image() {
        let path = std::env::temp_dir().join(format!("easel-{}-garbage.png", std::process::id()));
        std::fs::write(&path, b"not an image").unwrap();
        let mut c = open_canvas();
        assert!(!c.load_image(&path).is_valid());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn valid_file_loads_with_dimensions() {
        let path = write_png("valid", 3, 2);
        let mut c = open_canvas();
        let img = c.load_image(&path);
        assert!(img.is_valid());
        assert_eq!((img.width(), img.height()), (3, 2));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn load_without_a_window_yields_invalid_image() {
        let path = write_png("nowindow", 1, 1);
        let mut c = Canvas::new(HeadlessBackend::new());
        assert!(!c.load_image(&path).is_valid());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn images_left_loaded_are_released_when_the_sketch_ends() {
        struct Holder {
            path: PathBuf,
            image: Image,
        }

        impl crate::Sketch<HeadlessBackend> for Holder {
            fn setup(&mut self, c: &mut Canvas<HeadlessBackend>) {
                self.image = c.load_image(&self.path);
            }

            fn draw(&mut self, _c: &mut Canvas<HeadlessBackend>) {}
        }

        let path = write_png("leftover", 2, 2);
        let mut sketch = Holder { path: path.clone(), image: Image::invalid() };
        let mut c = Canvas::new(HeadlessBackend::new().close_after_frames(2));
        c.run(&mut sketch).unwrap();

        assert!(sketch.image.is_valid());
        assert_eq!(c.backend().live_textures(), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn double_unload_releases_once() {
        let path = write_png("unload", 2, 2);
        let mut c = open_canvas();
        let mut img = c.load_image(&path);
        assert_eq!(c.backend().live_textures(), 1);

        c.unload_image(&mut img);
        c.unload_image(&mut img);
        assert!(!img.is_valid());
        assert_eq!(c.backend().live_textures(), 0);

        let destroys = c
            .backend()
            .calls()
            .iter()
            .filter(|call| matches!(call, BackendCall::DestroyTexture(_)))
            .count();
        assert_eq!(destroys, 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unload_of_invalid_image_is_a_no_op() {
        let mut c = open_canvas();
        let mut img = Image::invalid();
        c.unload_image(&mut img);
        assert!(!c
            .backend()
            .calls()
            .iter()
            .any(|call| matches!(call, BackendCall::DestroyTexture(_))));
    }

    #[test]
    fn image_blits_full_source_with_white_tint() {
        let path = write_png("blit", 4, 8);
        let mut c = open_canvas();
        let img = c.load_image(&path);
        c.backend_mut().take_calls();

        c.image(&img, 10.0, 20.0, 40.0, 80.0);
        assert_eq!(
            c.backend().calls(),
            &[BackendCall::DrawTexture {
                xf: Affine::IDENTITY,
                id: img.texture(),
                src: Rect::new(0.0, 0.0, 4.0, 8.0),
                dst: Rect::new(10.0, 20.0, 40.0, 80.0),
                tint: Color::WHITE,
            }]
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_image_draws_nothing() {
        let mut c = open_canvas();
        c.backend_mut().take_calls();
        c.image(&Image::invalid(), 0.0, 0.0, 10.0, 10.0);
        assert!(c.backend().calls().is_empty());
    }
}
