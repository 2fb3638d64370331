//! Input arbitration module (engine-facing).
//!
//! This crate turns three independent input sources into at most one
//! [`Command`](crate::types::Command) per loop iteration:
//!
//! - push-buttons, delivered through an interrupt-fed [`queue::ButtonQueue`]
//! - the serial terminal link, whose cursor keys arrive as `ESC [ X` sequences
//!   decoded one byte per iteration by [`escape::EscapeDecoder`]
//! - a two-axis analog joystick, sampled one axis per iteration with
//!   per-direction debounce in [`joystick::Joystick`]
//!
//! [`mux::InputMultiplexer`] applies the precedence rules between them. Nothing
//! here allocates or blocks beyond the bounded ADC wait, and the crate is
//! `no_std` outside of tests.

#![cfg_attr(not(test), no_std)]

pub mod escape;
pub mod joystick;
pub mod mux;
pub mod queue;

pub use mcu_tetris_types as types;

pub use escape::{EscapeDecoder, EscapeParseState};
pub use joystick::{sample_adc, AnalogInput, Joystick};
pub use mux::{InputMultiplexer, InputSource};
pub use queue::{ButtonQueue, EventQueue, InputQueues, QueuedInputs, SerialQueue};
