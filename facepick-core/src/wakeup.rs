//! Cross-thread wake-up for the UI loop

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Create a connected waker/receiver pair
pub fn channel() -> (Waker, WakeReceiver) {
    // Capacity one: a pending wake-up absorbs any further ones
    let (tx, rx) = crossbeam_channel::bounded(1);
    (Waker { tx }, WakeReceiver { rx })
}

/// Asks the UI loop to redraw. Safe to call from any thread, any number of times.
#[derive(Debug, Clone)]
pub struct Waker {
    tx: Sender<()>,
}

impl Waker {
    pub fn wake(&self) {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                log::trace!("wake-up dropped, UI loop is gone");
            }
        }
    }
}

/// UI side of the wake-up channel
#[derive(Debug)]
pub struct WakeReceiver {
    rx: Receiver<()>,
}

impl WakeReceiver {
    /// Underlying receiver, for use in `select!`
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }

    /// Consume the pending wake-up, if any
    pub fn drain(&self) -> bool {
        let mut woke = false;
        while self.rx.try_recv().is_ok() {
            woke = true;
        }
        woke
    }
}
