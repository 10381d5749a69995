//! Mock construction helpers

use mockall::mock;
use streamvis_rs::animation::{FrameToken, Host as HostTrait, ListenerId};
use streamvis_rs::error::Result;
use streamvis_rs::types::Viewport;

use super::REFERENCE_VIEWPORT;

mock! {
    pub Host {}

    impl HostTrait for Host {
        fn viewport(&self) -> Viewport;
        fn acquire_drawing_context(&mut self) -> Result<()>;
        fn request_frame(&mut self) -> FrameToken;
        fn cancel_frame(&mut self, token: FrameToken);
        fn add_resize_listener(&mut self) -> ListenerId;
        fn remove_resize_listener(&mut self, id: ListenerId);
    }
}

/// Host with a drawing context at the reference viewport.
///
/// Frame tokens count up from 1 on every request.
pub fn create_running_host() -> MockHost {
    let mut host = MockHost::new();
    host.expect_viewport().return_const(REFERENCE_VIEWPORT);
    host.expect_acquire_drawing_context().returning(|| Ok(()));
    host.expect_add_resize_listener()
        .return_const(ListenerId(1));

    let mut next = 0;
    host.expect_request_frame().returning(move || {
        next += 1;
        FrameToken(next)
    });
    host
}
