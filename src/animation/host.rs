//! Host trait for frame scheduling and lifecycle hooks
//!
//! This is the seam between the animation loop and whatever drives it: an
//! eframe window in the binary, a mock in tests. The host owns the display
//! refresh notification and the resize events; the loop only asks for the
//! next frame and registers interest in resizes.

use std::fmt;

use crate::error::Result;
use crate::types::Viewport;

/// Handle for a requested frame callback
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

impl fmt::Debug for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameToken({})", self.0)
    }
}

/// Handle for a registered resize listener
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({})", self.0)
    }
}

/// Environment the animation runs in
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Current drawing area size
    fn viewport(&self) -> Viewport;

    /// Check that a 2D drawing context can be obtained
    fn acquire_drawing_context(&mut self) -> Result<()>;

    /// Ask for one frame callback at the next display refresh
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a pending frame request
    fn cancel_frame(&mut self, token: FrameToken);

    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);
}
