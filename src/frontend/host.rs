//! [`Host`] implementation for an eframe window
//!
//! eframe repaints on demand, so a frame request is a repaint request and a
//! cancelled token is simply forgotten. Resize events are synthesized by
//! comparing the panel rect against the last viewport seen.

use egui::Rect;

use crate::animation::{FrameToken, Host, ListenerId};
use crate::error::Result;
use crate::types::Viewport;

/// Viewport assumed when the context has no usable content area yet
pub const INITIAL_VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

fn viewport_of(rect: Rect) -> Viewport {
    Viewport::new(rect.width() as f64, rect.height() as f64)
}

pub struct EguiHost {
    ctx: egui::Context,
    viewport: Viewport,
    next_token: u64,
    pending: Option<FrameToken>,
    next_listener: u64,
    resize_listener: Option<ListenerId>,
}

impl EguiHost {
    pub fn new(ctx: egui::Context) -> Self {
        Self::with_viewport(ctx, INITIAL_VIEWPORT)
    }

    /// Host seeded with the context's content area, so the first panel
    /// rect matches and does not trigger a rebuild
    pub fn from_context(ctx: egui::Context) -> Self {
        let viewport = viewport_of(ctx.content_rect());
        if viewport.is_degenerate() {
            return Self::new(ctx);
        }
        Self::with_viewport(ctx, viewport)
    }

    pub fn with_viewport(ctx: egui::Context, viewport: Viewport) -> Self {
        Self {
            ctx,
            viewport,
            next_token: 0,
            pending: None,
            next_listener: 0,
            resize_listener: None,
        }
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    pub fn has_resize_listener(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Record the panel rect for this frame.
    ///
    /// Returns the new viewport when the size changed and someone is
    /// listening for resizes.
    pub fn observe_viewport(&mut self, rect: Rect) -> Option<Viewport> {
        let viewport = viewport_of(rect);
        if viewport == self.viewport {
            return None;
        }
        self.viewport = viewport;
        self.resize_listener.map(|_| viewport)
    }
}

impl Host for EguiHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn acquire_drawing_context(&mut self) -> Result<()> {
        // The painter is always available inside an eframe update
        Ok(())
    }

    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.pending = Some(token);
        self.ctx.request_repaint();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.resize_listener = Some(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        if self.resize_listener == Some(id) {
            self.resize_listener = None;
        }
    }
}
