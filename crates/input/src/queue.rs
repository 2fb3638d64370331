//! Interrupt-fed input queues.
//!
//! Button and serial receive interrupts push events; the game loop pops at most
//! one per iteration. Capacity is fixed at compile time and a push on a full
//! queue drops the new event.

use core::cell::RefCell;

use arrayvec::ArrayVec;
use critical_section::Mutex;
use log::warn;

use crate::types::{ButtonId, BUTTON_QUEUE_LEN, SERIAL_QUEUE_LEN};

/// Source of queued discrete input, polled without blocking.
pub trait InputQueues {
    /// Next pending push-button event, if any.
    fn poll_button(&mut self) -> Option<ButtonId>;

    /// Next pending serial byte, if any.
    fn poll_serial_byte(&mut self) -> Option<u8>;

    /// Discard every pending button event.
    fn empty_button_queue(&mut self);

    /// Discard every pending serial byte.
    fn clear_serial_input(&mut self);
}

/// FIFO shared between one interrupt handler and the loop.
pub struct EventQueue<T, const N: usize> {
    inner: Mutex<RefCell<ArrayVec<T, N>>>,
}

pub type ButtonQueue = EventQueue<ButtonId, BUTTON_QUEUE_LEN>;
pub type SerialQueue = EventQueue<u8, SERIAL_QUEUE_LEN>;

impl<T, const N: usize> EventQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ArrayVec::new_const())),
        }
    }

    /// Append an event. Returns false (and drops it) when full.
    pub fn push(&self, item: T) -> bool {
        let pushed = critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).try_push(item).is_ok()
        });
        if !pushed {
            warn!("input queue full ({} entries), event dropped", N);
        }
        pushed
    }

    /// Remove the oldest event.
    pub fn pop(&self) -> Option<T> {
        critical_section::with(|cs| {
            let mut q = self.inner.borrow_ref_mut(cs);
            if q.is_empty() {
                None
            } else {
                Some(q.remove(0))
            }
        })
    }

    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).clear());
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const N: usize> Default for EventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Button and serial queues bundled as one [`InputQueues`] source.
#[derive(Default)]
pub struct QueuedInputs {
    pub buttons: ButtonQueue,
    pub serial: SerialQueue,
}

impl QueuedInputs {
    pub const fn new() -> Self {
        Self {
            buttons: ButtonQueue::new(),
            serial: SerialQueue::new(),
        }
    }

    /// Queue every byte of `bytes` on the serial side; returns how many fit.
    pub fn push_serial(&self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|&&b| self.serial.push(b)).count()
    }
}

impl InputQueues for QueuedInputs {
    fn poll_button(&mut self) -> Option<ButtonId> {
        self.buttons.pop()
    }

    fn poll_serial_byte(&mut self) -> Option<u8> {
        self.serial.pop()
    }

    fn empty_button_queue(&mut self) {
        self.buttons.clear();
    }

    fn clear_serial_input(&mut self) {
        self.serial.clear();
    }
}

impl InputQueues for &QueuedInputs {
    fn poll_button(&mut self) -> Option<ButtonId> {
        self.buttons.pop()
    }

    fn poll_serial_byte(&mut self) -> Option<u8> {
        self.serial.pop()
    }

    fn empty_button_queue(&mut self) {
        self.buttons.clear();
    }

    fn clear_serial_input(&mut self) {
        self.serial.clear();
    }
}
