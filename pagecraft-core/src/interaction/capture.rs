//! Input capture for the duration of a gesture.
//!
//! While a gesture is active the host routes every pointer move and release to
//! the engine, whatever element the pointer is over. [`CaptureGuard`] holds that
//! routing: creating one acquires it and dropping one releases it, so gesture
//! end, engine teardown and engine drop all release exactly once.

use std::fmt;
use std::rc::Rc;

/// Host hook that starts and stops global pointer routing.
pub trait PointerCapture {
    /// Begin routing pointer move/up events to the engine.
    fn acquire(&self);
    /// Stop routing pointer events to the engine.
    fn release(&self);
}

/// Capture that does nothing, for hosts that always route events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Scoped ownership of pointer capture.
pub struct CaptureGuard {
    capture: Rc<dyn PointerCapture>,
}

impl CaptureGuard {
    /// Acquire capture, releasing it again when the guard drops.
    #[must_use]
    pub fn acquire(capture: Rc<dyn PointerCapture>) -> Self {
        capture.acquire();
        tracing::trace!("Pointer capture acquired");
        Self { capture }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capture.release();
        tracing::trace!("Pointer capture released");
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// Capture that counts acquisitions and releases.
    #[derive(Debug, Default)]
    pub(crate) struct CountingCapture {
        pub(crate) acquired: Cell<u32>,
        pub(crate) released: Cell<u32>,
    }

    impl CountingCapture {
        pub(crate) fn held(&self) -> bool {
            self.acquired.get() > self.released.get()
        }
    }

    impl PointerCapture for CountingCapture {
        fn acquire(&self) {
            self.acquired.set(self.acquired.get() + 1);
        }
        fn release(&self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let capture = Rc::new(CountingCapture::default());
        {
            let _guard = CaptureGuard::acquire(capture.clone());
            assert!(capture.held());
        }
        assert!(!capture.held());
        assert_eq!(capture.acquired.get(), 1);
        assert_eq!(capture.released.get(), 1);
    }
}
