//! Password prompt with echo disabled
//!
//! The capture/modify/restore sequence runs on attribute snapshots, with
//! an RAII guard standing in for "echo is off" so the prior state comes
//! back on every exit path.

use std::io::{Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::ptr;

use crate::attrs::{attributes, set_attributes, TerminalAttributes};
use crate::error::{Error, Result};

/// Restores captured attributes when dropped.
struct EchoRestore {
    fd: RawFd,
    saved: TerminalAttributes,
}

impl Drop for EchoRestore {
    fn drop(&mut self) {
        // SAFETY: the guard never outlives the handle it was created from.
        let fd = unsafe { BorrowedFd::borrow_raw(self.fd) };
        if let Err(e) = set_attributes(&fd, &self.saved) {
            log::warn!("failed to restore terminal attributes: {}", e);
        }
    }
}

/// Volatile so the stores survive optimization even though the buffer may
/// never be read again.
fn wipe(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        unsafe { ptr::write_volatile(b, 0) };
    }
}

/// Prompt on `tty` and read a line with echo disabled.
///
/// Bytes are read one at a time into `buf` until `\n` or `\r`; the returned
/// slice excludes the terminator, and bytes beyond it are left as supplied.
/// Disposal of the full buffer after use is the caller's responsibility.
///
/// On any failure — the device rejecting the echo change, a read error,
/// end of input, or `buf` filling up before a terminator — the whole
/// buffer is zeroed before the error is returned, and the terminal's prior
/// attributes are restored either way.
///
/// Blocks until input arrives; callers wanting a deadline must check
/// readiness externally before calling.
pub fn read_password<'a, F>(tty: &mut F, prompt: &str, buf: &'a mut [u8]) -> Result<&'a [u8]>
where
    F: Read + Write + AsFd,
{
    let saved = attributes(tty)?;
    let mut silent = saved;
    silent.set_echo(false);
    // If this write fails the device was never touched; the guard only
    // arms once echo is actually off.
    set_attributes(tty, &silent)?;
    let _restore = EchoRestore {
        fd: tty.as_fd().as_raw_fd(),
        saved,
    };

    tty.write_all(prompt.as_bytes())?;

    let mut byte = [0u8; 1];
    for i in 0..buf.len() {
        match tty.read(&mut byte) {
            Ok(1) => {}
            Ok(_) => {
                wipe(buf);
                return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
            }
            Err(e) => {
                wipe(buf);
                return Err(Error::Io(e));
            }
        }
        if byte[0] == b'\n' || byte[0] == b'\r' {
            byte[0] = 0;
            return Ok(&buf[..i]);
        }
        buf[i] = byte[0];
        byte[0] = 0;
    }
    wipe(buf);
    Err(Error::BufferExhausted)
}
