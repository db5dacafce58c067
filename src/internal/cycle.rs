//! Resolution re-entrancy detection.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

const MAX_DEPTH: usize = 1024;

// Thread-local resolution stack. Frames are keyed by provider identity (the
// shared-state allocation address), not by name: two providers from different
// container instances may share a name and legitimately nest.
thread_local! {
    static RESOLUTION_TLS: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

struct Frame {
    id: usize,
    name: &'static str,
}

/// Guard for the thread-local resolution stack.
pub(crate) struct CycleGuard {
    id: usize,
}

impl CycleGuard {
    pub(crate) fn enter(id: usize, name: &'static str) -> DiResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();

            if stack.iter().any(|frame| frame.id == id) {
                let mut path: Vec<&'static str> =
                    stack.iter().map(|frame| frame.name).collect();
                path.push(name);
                return Err(DiError::Circular(path));
            }

            if stack.len() >= MAX_DEPTH {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push(Frame { id, name });
            Ok(CycleGuard { id })
        })
    }
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some(last) = stack.pop() {
                debug_assert_eq!(last.id, self.id);
            }
        });
    }
}
