//! Error types for terminal and PTY operations

use std::fmt;
use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// The logical kernel requests this crate issues.
///
/// Each platform maps these to its own numeric codes inside `sys`; the
/// identity here is what error values carry back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Open the PTY multiplexing device
    OpenMaster,
    /// Open a PTY slave device by path
    OpenSlave,
    /// Read terminal attributes
    GetAttributes,
    /// Write terminal attributes
    SetAttributes,
    /// Read window geometry
    GetWindowSize,
    /// Write window geometry
    SetWindowSize,
    /// Grant access to the slave device
    GrantPty,
    /// Unlock the slave device for opening
    UnlockPty,
    /// Fetch the kernel-assigned PTY index
    GetPtyNumber,
    /// Fetch the slave device name
    GetPtyName,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Request::OpenMaster => "open pty master",
            Request::OpenSlave => "open pty slave",
            Request::GetAttributes => "get terminal attributes",
            Request::SetAttributes => "set terminal attributes",
            Request::GetWindowSize => "get window size",
            Request::SetWindowSize => "set window size",
            Request::GrantPty => "grant pty",
            Request::UnlockPty => "unlock pty",
            Request::GetPtyNumber => "get pty number",
            Request::GetPtyName => "get pty name",
        };
        f.write_str(name)
    }
}

/// Error type for terminal and PTY operations
#[derive(Debug, Error)]
pub enum Error {
    /// The kernel rejected a request
    #[error("failed to {request}: {source}")]
    Device {
        request: Request,
        source: Errno,
    },

    /// The kernel returned data that violates the request's contract
    #[error("{request}: {detail}")]
    Protocol {
        request: Request,
        detail: &'static str,
    },

    /// The password buffer filled up before a line terminator arrived
    #[error("ran out of buffer space before a line terminator")]
    BufferExhausted,

    /// One or both ends of a PTY pair failed to close
    #[error(transparent)]
    Close(#[from] CloseError),

    /// I/O error on the terminal handle
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Close failure for a PTY pair, recording each side independently.
#[derive(Debug)]
pub struct CloseError {
    /// Errno from closing the slave, if it failed
    pub slave: Option<Errno>,
    /// Errno from closing the master, if it failed
    pub master: Option<Errno>,
}

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to close pty pair")?;
        if let Some(e) = self.slave {
            write!(f, "; slave: {}", e)?;
        }
        if let Some(e) = self.master {
            write!(f, "; master: {}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for CloseError {}

/// Result type for terminal and PTY operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_error_names_failing_sides() {
        let both = CloseError {
            slave: Some(Errno::EBADF),
            master: Some(Errno::EIO),
        };
        let msg = both.to_string();
        assert!(msg.contains("slave"));
        assert!(msg.contains("master"));

        let slave_only = CloseError {
            slave: Some(Errno::EBADF),
            master: None,
        };
        let msg = slave_only.to_string();
        assert!(msg.contains("slave"));
        assert!(!msg.contains("master"));
    }

    #[test]
    fn device_error_names_request() {
        let err = Error::Device {
            request: Request::UnlockPty,
            source: Errno::EPERM,
        };
        assert!(err.to_string().contains("unlock pty"));
    }
}
