//! "Equalizer changed" side channel.
//!
//! The panel and the preset loader only ever send on this channel. Whoever applies the
//! equalizer to audio owns the receiving end.

use crossbeam_channel::{Receiver, Sender, unbounded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqEvent {
    /// One or more band gains changed in the store.
    Changed,
}

/// Sending half of the change channel, injected into the panel.
#[derive(Debug, Clone)]
pub struct EqNotifier {
    tx: Sender<EqEvent>,
}

impl EqNotifier {
    /// Creates a notifier together with the receiver that observes it.
    pub fn channel() -> (Self, Receiver<EqEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Signals that band values changed. A dropped receiver is not an error.
    pub fn changed(&self) {
        let _ = self.tx.send(EqEvent::Changed);
    }
}
