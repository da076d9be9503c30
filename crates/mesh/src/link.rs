//! Bidirectional rendezvous links.

use crossbeam::channel::{bounded, Receiver, Sender};

/// Error returned when the peer side of a link has terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The peer dropped its endpoint; the mesh is shutting down.
    #[error("neighbor link disconnected")]
    Disconnected,
}

/// One endpoint of a bidirectional rendezvous link.
///
/// Both underlying channels are zero-capacity: a [`send`](Duplex::send)
/// blocks until the peer's matching [`recv`](Duplex::recv), and vice versa.
/// Which side sends and which receives alternates with the exchange phase;
/// the link itself is direction-agnostic.
#[derive(Debug)]
pub struct Duplex<V> {
    tx: Sender<V>,
    rx: Receiver<V>,
}

impl<V> Duplex<V> {
    /// Create the two endpoints of a fresh link.
    pub fn pair() -> (Duplex<V>, Duplex<V>) {
        let (a_tx, b_rx) = bounded(0);
        let (b_tx, a_rx) = bounded(0);
        (
            Duplex { tx: a_tx, rx: a_rx },
            Duplex { tx: b_tx, rx: b_rx },
        )
    }

    /// Send one cell value to the peer, blocking until it receives.
    pub fn send(&self, value: V) -> Result<(), LinkError> {
        self.tx.send(value).map_err(|_| LinkError::Disconnected)
    }

    /// Receive one cell value from the peer, blocking until it sends.
    pub fn recv(&self) -> Result<V, LinkError> {
        self.rx.recv().map_err(|_| LinkError::Disconnected)
    }
}
