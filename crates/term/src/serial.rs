//! Serial bridge: terminal bytes in, serial queue out.
//!
//! A reader thread plays the UART receive interrupt. It blocks on the byte
//! source and hands chunks to the loop over a channel; the loop moves them
//! into the serial queue between iterations. With the terminal in raw mode,
//! cursor keys arrive as the same `ESC [ X` sequences a serial terminal sends.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use mcu_tetris_input::QueuedInputs;

const CTRL_C: u8 = 0x03;

/// Bytes that end live mode instead of reaching the game.
pub fn is_quit_byte(byte: u8) -> bool {
    byte == CTRL_C || byte == b'q' || byte == b'Q'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Nothing arrived
    Idle,
    /// This many bytes arrived
    Received(usize),
    Quit,
    /// The byte source closed
    Closed,
}

pub struct SerialBridge {
    rx: Receiver<Vec<u8>>,
}

impl SerialBridge {
    /// Spawn a reader thread over `source`.
    pub fn spawn<R>(mut source: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = [0u8; 64];
            loop {
                match source.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        warn!("serial reader stopped: {}", e);
                        break;
                    }
                }
            }
        });
        Self { rx }
    }

    /// Reader over the process's stdin.
    pub fn stdin() -> Self {
        Self::spawn(std::io::stdin())
    }

    /// Move everything that arrived so far into the serial queue.
    pub fn drain_into(&self, inputs: &QueuedInputs) -> LinkEvent {
        let mut received = 0;
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => match forward(&chunk, inputs) {
                    Some(n) => received += n,
                    None => return LinkEvent::Quit,
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if received == 0 => return LinkEvent::Closed,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        if received == 0 {
            LinkEvent::Idle
        } else {
            LinkEvent::Received(received)
        }
    }

    /// Block until any byte arrives, discarding it.
    pub fn wait_for_key(&self) -> LinkEvent {
        loop {
            match self.rx.recv_timeout(Duration::from_millis(100)) {
                Ok(chunk) if chunk.iter().copied().any(is_quit_byte) => return LinkEvent::Quit,
                Ok(chunk) if !chunk.is_empty() => return LinkEvent::Received(chunk.len()),
                Ok(_) | Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return LinkEvent::Closed,
            }
        }
    }
}

/// Queue `chunk`, or `None` if it holds a quit byte.
fn forward(chunk: &[u8], inputs: &QueuedInputs) -> Option<usize> {
    if chunk.iter().copied().any(is_quit_byte) {
        return None;
    }
    let queued = inputs.push_serial(chunk);
    if queued < chunk.len() {
        debug!("serial queue full, {} bytes dropped", chunk.len() - queued);
    }
    Some(queued)
}
