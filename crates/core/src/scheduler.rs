//! The frame-scheduling port: request-next-frame / cancel-frame.
//!
//! In a browser this is `requestAnimationFrame`; headless hosts use
//! [`ManualScheduler`] and call [`ParticleField::tick`](crate::ParticleField::tick)
//! themselves whenever a frame is pending.

use crate::error::FieldError;

/// Opaque id of a scheduled frame, as returned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Asks the host to invoke the tick callback once on the next refresh.
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError>;

    /// Cancels a previously requested frame. Cancelling a frame that already
    /// fired is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that drive frames by hand.
///
/// Holds at most one pending handle, which is all a single field ever asks
/// for. Handles increase monotonically so a stale cancel cannot hit a newer
/// request.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame the host should fire next, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Takes the pending frame, as the host does when it fires the callback.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError> {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_fire() {
        let mut s = ManualScheduler::new();
        let h = s.request_frame().unwrap();
        assert_eq!(s.pending(), Some(h));
        assert_eq!(s.fire(), Some(h));
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn handles_increase() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        let b = s.request_frame().unwrap();
        assert!(b.0 > a.0);
        assert_eq!(s.requested(), 2);
    }

    #[test]
    fn stale_cancel_is_ignored() {
        let mut s = ManualScheduler::new();
        let old = s.request_frame().unwrap();
        s.fire();
        let new = s.request_frame().unwrap();
        s.cancel_frame(old);
        assert_eq!(s.pending(), Some(new));
        assert_eq!(s.cancelled(), 0);
        s.cancel_frame(new);
        assert_eq!(s.pending(), None);
        assert_eq!(s.cancelled(), 1);
    }

    #[test]
    fn scheduler_is_object_safe() {
        let mut s = ManualScheduler::new();
        let dyn_s: &mut dyn FrameScheduler = &mut s;
        let h = dyn_s.request_frame().unwrap();
        dyn_s.cancel_frame(h);
    }
}
