use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-wide key bindings that exist only while a view holds a
/// subscription. Dropping the subscription releases the binding, so leaving a
/// view by any path turns its bindings off.
#[derive(Debug, Clone, Default)]
pub struct Hotkeys {
    seek: Arc<AtomicUsize>,
}

impl Hotkeys {
    /// Bind ←/→ to seeking playing clips.
    pub fn subscribe_seek(&self) -> SeekSubscription {
        self.seek.fetch_add(1, Ordering::SeqCst);
        SeekSubscription { holders: self.seek.clone() }
    }

    pub fn seek_enabled(&self) -> bool {
        self.seek.load(Ordering::SeqCst) > 0
    }
}

#[derive(Debug)]
pub struct SeekSubscription {
    holders: Arc<AtomicUsize>,
}

impl Drop for SeekSubscription {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}
