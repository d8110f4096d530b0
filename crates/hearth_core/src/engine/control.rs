//! # Control Channel
//!
//! Out-of-band pause/resume/stop requests for a running engine.
//!
//! A collaborator that lives outside the tick (a window event thread, a
//! console, a test harness) holds a [`ControlSender`]. The engine drains the
//! channel at the start of every tick, so requests only ever take effect
//! between ticks.

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// A request to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    /// Pause the named system. Unknown names are ignored.
    Pause(String),
    /// Resume the named system. Unknown names are ignored.
    Resume(String),
    /// Stop the run loop. Drained at the start of the next tick, which
    /// still runs before `run` returns.
    Stop,
}

/// Sending half of the control channel.
///
/// Cheap to clone and safe to move to other threads. Sending never blocks,
/// so a system may send from inside its own `process`.
#[derive(Clone, Debug)]
pub struct ControlSender {
    sender: Sender<ControlMessage>,
}

impl ControlSender {
    /// Queues a message for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`TrySendError::Full`] if a bounded channel is at capacity,
    /// and [`TrySendError::Disconnected`] if the engine has been dropped.
    pub fn send(&self, message: ControlMessage) -> Result<(), TrySendError<ControlMessage>> {
        self.sender.try_send(message)
    }

    /// Requests that the named system be paused.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn pause(&self, name: impl Into<String>) -> Result<(), TrySendError<ControlMessage>> {
        self.send(ControlMessage::Pause(name.into()))
    }

    /// Requests that the named system be resumed.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn resume(&self, name: impl Into<String>) -> Result<(), TrySendError<ControlMessage>> {
        self.send(ControlMessage::Resume(name.into()))
    }

    /// Requests that the run loop stop.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn stop(&self) -> Result<(), TrySendError<ControlMessage>> {
        self.send(ControlMessage::Stop)
    }
}

/// Both halves of the control channel, owned by the engine.
#[derive(Debug)]
pub(crate) struct ControlChannel {
    sender: Sender<ControlMessage>,
    receiver: Receiver<ControlMessage>,
}

impl ControlChannel {
    /// Creates a bounded channel, or an unbounded one for `None`.
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        let (sender, receiver) = match capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        Self { sender, receiver }
    }

    /// Hands out a new sender.
    pub(crate) fn sender(&self) -> ControlSender {
        ControlSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every message queued so far, in send order.
    pub(crate) fn drain(&self) -> Vec<ControlMessage> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let channel = ControlChannel::new(None);
        let sender = channel.sender();

        sender.pause("physics").unwrap();
        sender.resume("physics").unwrap();
        sender.stop().unwrap();

        assert_eq!(
            channel.drain(),
            [
                ControlMessage::Pause("physics".into()),
                ControlMessage::Resume("physics".into()),
                ControlMessage::Stop,
            ]
        );
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_bounded_send_reports_full() {
        let channel = ControlChannel::new(Some(1));
        let sender = channel.sender();

        sender.stop().unwrap();
        assert!(matches!(
            sender.pause("physics"),
            Err(TrySendError::Full(ControlMessage::Pause(ref name))) if name == "physics"
        ));

        // Draining frees the slot again
        assert_eq!(channel.drain(), [ControlMessage::Stop]);
        sender.stop().unwrap();
    }

    #[test]
    fn test_send_after_drop_reports_disconnected() {
        let channel = ControlChannel::new(None);
        let sender = channel.sender();
        drop(channel);

        assert!(matches!(sender.stop(), Err(TrySendError::Disconnected(_))));
    }

    #[test]
    fn test_send_from_other_thread() {
        let channel = ControlChannel::new(None);
        let sender = channel.sender();

        std::thread::spawn(move || sender.stop().unwrap())
            .join()
            .unwrap();

        assert_eq!(channel.drain(), [ControlMessage::Stop]);
    }
}
