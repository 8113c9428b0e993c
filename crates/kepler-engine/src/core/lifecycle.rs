use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a frame loop.
///
/// The loop checks it before doing work and before rescheduling itself;
/// whoever owns the view calls [`CancelToken::cancel`] once on teardown.
/// Clones observe the same flag. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
