//! Host terminal as the game's serial link.
//!
//! Live mode puts the terminal in raw mode and forwards every byte typed to
//! the serial queue, so the loop sees exactly what a serial terminal would
//! send. The side displays are replaced by a status line.

pub mod live;
pub mod serial;
pub mod session;
pub mod status;

pub use live::{run, LiveConfig};
pub use serial::{is_quit_byte, LinkEvent, SerialBridge};
pub use session::TerminalSession;
pub use status::StatusLine;
