//! Interactive demo: orbiting shapes, a trail that follows the pointer and an
//! optional image given as the first argument.
//!
//! Controls: hold a mouse button to change the trail color, any key to
//! freeze the orbit, `Escape` to quit.

use easel::prelude::*;

const TRAIL_LEN: usize = 48;

struct Demo {
    image_path: Option<String>,
    image: Image,
    trail: Vec<(f32, f32)>,
    angle: f32,
}

impl Demo {
    fn new(image_path: Option<String>) -> Self {
        Self {
            image_path,
            image: Image::invalid(),
            trail: Vec::with_capacity(TRAIL_LEN),
            angle: 0.0,
        }
    }

    fn unload(&mut self, c: &mut Canvas) {
        c.unload_image(&mut self.image);
    }
}

impl Sketch for Demo {
    fn setup(&mut self, c: &mut Canvas) {
        c.size((960, 540, "easel demo"));
        c.random_seed(7);

        if let Some(path) = self.image_path.as_deref() {
            self.image = c.load_image(path);
            if !self.image.is_valid() {
                log::warn!("continuing without an image");
            }
        }
    }

    fn draw(&mut self, c: &mut Canvas) {
        // Closing the window frees every texture with it; Escape releases
        // the image explicitly first.
        if c.key_down(Key::Escape) {
            self.unload(c);
            c.exit();
            return;
        }

        c.background((18, 18, 24));

        let (w, h) = (c.width() as f32, c.height() as f32);

        // Static grid of points.
        c.stroke((70, 70, 90));
        for gx in (0..c.width()).step_by(24) {
            for gy in (0..c.height()).step_by(24) {
                c.point(gx as f32, gy as f32);
            }
        }

        if self.image.is_valid() {
            let aspect = self.image.height() as f32 / self.image.width() as f32;
            c.image(&self.image, 16.0, 16.0, 160.0, 160.0 * aspect);
        }

        // Orbiting shapes around the center.
        if !c.key_pressed() {
            self.angle += 1.5;
        }
        c.push_matrix();
        c.translate(w * 0.5, h * 0.5);
        c.rotate(self.angle);

        c.rect_mode(AnchorMode::Center);
        c.fill((230, 90, 60));
        c.stroke(255);
        c.rect(0.0, 0.0, 80.0, 80.0);

        for i in 0..6 {
            c.push_matrix();
            c.rotate(i as f32 * 60.0);
            c.translate(160.0, 0.0);
            c.scale(1.0 + 0.25 * (i % 2) as f32, 1.0);
            c.no_stroke();
            c.fill((60, 160 + i * 15, 220, 200));
            c.ellipse(0.0, 0.0, 24.0, 16.0);
            c.pop_matrix();
        }

        c.no_fill();
        c.stroke((255, 255, 255, 120));
        c.triangle(0.0, -120.0, 104.0, 60.0, -104.0, 60.0);
        c.pop_matrix();
        c.rect_mode(AnchorMode::Corner);

        // Pointer trail.
        self.trail.push((c.mouse_x(), c.mouse_y()));
        if self.trail.len() > TRAIL_LEN {
            self.trail.remove(0);
        }
        let trail_color = match c.mouse_button() {
            PointerButton::Left => Color::rgb(255, 200, 40),
            PointerButton::Right => Color::rgb(120, 255, 120),
            PointerButton::Middle => Color::rgb(200, 120, 255),
            PointerButton::None => Color::rgb(200, 200, 200),
        };
        c.stroke(trail_color);
        for pair in self.trail.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            c.line(x1, y1, x2, y2);
        }
        c.line(c.pmouse_x() as f32, c.pmouse_y() as f32, c.mouse_x(), c.mouse_y());

        // Sparks.
        if c.mouse_pressed() {
            c.no_stroke();
            c.fill(trail_color);
            for _ in 0..8 {
                let dx = c.random(-20.0, 20.0);
                let dy = c.random(-20.0, 20.0);
                c.rect(c.mouse_x() + dx, c.mouse_y() + dy, 3.0, 3.0);
            }
        }

        if c.frame_count() % 300 == 0 {
            log::info!("frame {} at {} ms", c.frame_count(), c.millis());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut demo = Demo::new(std::env::args().nth(1));
    easel::run(&mut demo)
}
