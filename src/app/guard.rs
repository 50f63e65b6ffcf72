//! Shutdown on every exit path.
//!
//! [`ShutdownGuard`] lends the service and its output adapters to the
//! tick loop.  Dropping it runs [`AppService::shutdown`], so the buzzer,
//! indicator and display go inert whether the loop returns, bails out
//! with `?`, or unwinds from a panic.

use log::error;

use super::ports::{FramebufferPort, OutputPort};
use super::service::AppService;

pub struct ShutdownGuard<'a, H: OutputPort, F: FramebufferPort> {
    pub app: &'a mut AppService,
    pub hw: &'a mut H,
    pub fb: &'a mut F,
}

impl<'a, H: OutputPort, F: FramebufferPort> ShutdownGuard<'a, H, F> {
    pub fn new(app: &'a mut AppService, hw: &'a mut H, fb: &'a mut F) -> Self {
        Self { app, hw, fb }
    }
}

impl<H: OutputPort, F: FramebufferPort> Drop for ShutdownGuard<'_, H, F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!("unwinding: driving outputs inert");
        }
        self.app.shutdown(&mut *self.hw, &mut *self.fb);
    }
}
