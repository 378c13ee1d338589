//! Periodic recovery driver.
//!
//! The only recurring scheduled work in the core: a dedicated thread that
//! fires the recovery decay tick at a fixed interval. It is cancellable
//! independently of in-flight command processing; `stop()` signals the
//! thread and joins it.

use crate::hub::MarketHub;
use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use std::io;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug)]
pub struct RecoveryDriver {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RecoveryDriver {
    pub fn start(hub: MarketHub, interval: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = std::thread::Builder::new()
            .name("recovery-driver".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let recovering = hub.recovery_tick();
                        if recovering > 0 {
                            tracing::debug!(recovering, "recovery tick");
                        }
                    }
                    // stop signal, or the driver handle went away entirely
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        Ok(Self {
            stop_tx,
            handle: Some(handle),
        })
    }

    /// Signal the tick thread and wait for it to exit.
    pub fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RecoveryDriver {
    fn drop(&mut self) {
        let _ = self.stop_tx.try_send(());
    }
}
