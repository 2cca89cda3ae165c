//! Topmost keeper
//!
//! Some applications (fullscreen games in particular) push themselves above
//! topmost windows. The keeper runs on its own thread and, once per
//! interval, asks the dispatch thread to re-assert the overlay's z-order.
//! It never touches the window itself.

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct TopmostKeeper {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TopmostKeeper {
    /// Start the keeper. `post` queues a reassert request and returns false
    /// once the receiving side is gone, which ends the loop.
    pub fn spawn<F>(interval: Duration, mut post: F) -> std::io::Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = channel::bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("topmost-keeper".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !post() {
                            tracing::debug!("Dispatch queue closed, topmost keeper exiting");
                            break;
                        }
                    }
                    // Stop requested, or the keeper handle was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        tracing::info!("Topmost keeper started ({}ms interval)", interval.as_millis());

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the keeper and wait for its thread to finish
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Topmost keeper thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TopmostKeeper {
    fn drop(&mut self) {
        self.stop();
    }
}
