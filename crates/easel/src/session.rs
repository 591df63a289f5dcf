use easel_engine::backend::Backend;
use easel_engine::window::WindowConfig;

use crate::canvas::Canvas;
use crate::overload::SizeArgs;

pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 450;
pub const DEFAULT_TITLE: &str = "easel";

/// Window session: the requested size and title, and whether the window
/// has been realized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    width: i32,
    height: i32,
    title: String,
    realized: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            realized: false,
        }
    }
}

impl Session {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Stores each positive dimension and a non-empty title; everything else
    /// is ignored. Returns whether the stored size changed.
    pub fn configure(&mut self, width: i32, height: i32, title: Option<&str>) -> bool {
        let before = (self.width, self.height);
        if width > 0 {
            self.width = width;
        }
        if height > 0 {
            self.height = height;
        }
        if let Some(t) = title.filter(|t| !t.is_empty()) {
            self.title = t.to_string();
        }
        before != (self.width, self.height)
    }

    pub(crate) fn mark_realized(&mut self) {
        self.realized = true;
    }

    pub(crate) fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width as u32,
            height: self.height as u32,
        }
    }
}

impl<B: Backend> Canvas<B> {
    /// Sets the window size, optionally with a title: `size((w, h))` or
    /// `size((w, h, "title"))`.
    ///
    /// Non-positive dimensions and empty titles are ignored. Once the window
    /// is open a size change resizes it; a title change is stored only.
    pub fn size<'a>(&mut self, args: impl SizeArgs<'a>) {
        let req = args.into_request();
        let changed = self.session.configure(req.width, req.height, req.title);
        if changed && self.session.is_realized() {
            log::debug!(
                "resizing live window to {}x{}",
                self.session.width,
                self.session.height
            );
            self.backend
                .resize_window(self.session.width as u32, self.session.height as u32);
        }
    }

    pub fn width(&self) -> i32 {
        self.session.width
    }

    pub fn height(&self) -> i32 {
        self.session.height
    }

    pub fn title(&self) -> &str {
        &self.session.title
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::backend::{BackendCall, HeadlessBackend};

    use super::*;

    #[test]
    fn defaults() {
        let s = Session::default();
        assert_eq!((s.width(), s.height(), s.title()), (800, 450, "easel"));
        assert!(!s.is_realized());
    }

    #[test]
    fn non_positive_components_are_ignored_independently() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.size((0, -5));
        assert_eq!((c.width(), c.height()), (800, 450));

        c.size((-1, 300));
        assert_eq!((c.width(), c.height()), (800, 300));

        c.size((640, 0));
        assert_eq!((c.width(), c.height()), (640, 300));
    }

    #[test]
    fn empty_title_keeps_previous() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.size((100, 100, "first"));
        c.size((100, 100, ""));
        assert_eq!(c.title(), "first");
    }

    #[test]
    fn repeated_configuration_is_idempotent() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.size((320, 240, "t"));
        let once = c.session().clone();
        c.size((320, 240, "t"));
        assert_eq!(c.session(), &once);
    }

    #[test]
    fn configure_reports_size_changes_only() {
        let mut s = Session::default();
        assert!(!s.configure(800, 450, Some("new title")));
        assert!(s.configure(801, 450, None));
        assert!(!s.configure(-1, -1, None));
    }

    #[test]
    fn resize_before_realization_does_not_touch_the_backend() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.size((200, 100));
        assert!(c.backend().calls().is_empty());
    }

    #[test]
    fn resize_after_realization_resizes_the_window() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.session.mark_realized();
        c.size((200, 100));
        c.size((200, 100));
        assert_eq!(
            c.backend().calls(),
            &[BackendCall::ResizeWindow { width: 200, height: 100 }]
        );
    }
}
