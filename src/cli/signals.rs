//! Termination signal handling
//!
//! Signals never run business logic. They are forwarded as messages on a
//! channel that the main task waits on, and the main task performs the
//! shutdown itself.

use tokio::sync::mpsc;
use tracing::debug;

/// Why the process was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl Termination {
    /// Signal name for messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }

    /// POSIX signal number
    #[cfg(unix)]
    pub fn signal_number(&self) -> i32 {
        use nix::sys::signal::Signal;

        match self {
            Self::Interrupt => Signal::SIGINT as i32,
            Self::Terminate => Signal::SIGTERM as i32,
        }
    }

    /// POSIX signal number
    #[cfg(not(unix))]
    pub fn signal_number(&self) -> i32 {
        match self {
            Self::Interrupt => 2,
            Self::Terminate => 15,
        }
    }

    /// Process exit code after a signal-driven shutdown
    pub fn exit_code(&self) -> u8 {
        self.signal_number() as u8
    }
}

/// Receives termination requests
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<Termination>,
}

impl ShutdownSignal {
    /// Create the channel without any OS hooks.
    ///
    /// The returned sender requests an in-band stop.
    pub fn new() -> (Self, mpsc::Sender<Termination>) {
        let (tx, rx) = mpsc::channel(4);
        (Self { receiver: rx }, tx)
    }

    /// Create the channel and forward SIGINT and SIGTERM onto it
    pub async fn install() -> Result<Self, std::io::Error> {
        let (handler, tx) = Self::new();
        listen(tx)?;
        Ok(handler)
    }

    /// Wait for the next termination request
    pub async fn recv(&mut self) -> Option<Termination> {
        self.receiver.recv().await
    }
}

#[cfg(unix)]
fn listen(tx: mpsc::Sender<Termination>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    // Setup SIGINT handler
    let tx_int = tx.clone();
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        sigint.recv().await;
        debug!("Received SIGINT");
        let _ = tx_int.send(Termination::Interrupt).await;
    });

    // Setup SIGTERM handler
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        debug!("Received SIGTERM");
        let _ = tx.send(Termination::Terminate).await;
    });

    Ok(())
}

#[cfg(not(unix))]
fn listen(tx: mpsc::Sender<Termination>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Received Ctrl+C");
            let _ = tx.send(Termination::Interrupt).await;
        }
    });

    Ok(())
}
