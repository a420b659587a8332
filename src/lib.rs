//! Low-level terminal device and PTY control for POSIX systems.
//!
//! This crate is the thin, safe layer between a terminal-using program and
//! the kernel's tty interface:
//! - Terminal attribute snapshots: read, modify, write back
//! - Window size queries and updates (TIOCGWINSZ/TIOCSWINSZ)
//! - Master/slave PTY pair allocation with a combined, error-reporting close
//! - Password prompting with echo disabled and guaranteed cleanup
//!
//! Every operation is a single blocking call into the OS; there is no
//! runtime, no caching, and no cross-handle locking. Concurrent use of one
//! handle needs external serialization; independent handles are independent.
//!
//! Reference: https://man7.org/linux/man-pages/man4/tty_ioctl.4.html

mod attrs;
mod error;
mod pass;
mod pty;
mod size;
mod sys;

pub use attrs::{attributes, is_terminal, set_attributes, TerminalAttributes};
pub use error::{CloseError, Error, Request, Result};
pub use pass::read_password;
pub use pty::{open_pty, PtyPair};
pub use size::{set_window_size, window_size, WindowSize};
