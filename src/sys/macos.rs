//! macOS PTY requests and attribute constants.
//!
//! Darwin reports the slave name directly through TIOCPTYGNAME rather than
//! an index; the index is recovered from the name's decimal suffix. Grant
//! and unlock are their own ioctls here instead of libc wrappers.

use std::os::fd::BorrowedFd;

use crate::error::{Error, Request, Result};

use super::ioctl;

/// The PTY multiplexing device.
pub(crate) const MASTER_PATH: &str = "/dev/ptmx";

/// Byte length of the name buffer TIOCPTYGNAME fills, taken from the
/// parameter-length field encoded in the request code itself.
const PTY_NAME_LEN: usize = ((libc::TIOCPTYGNAME >> 16) & 0x1fff) as usize;

/// Darwin speed fields carry the rate as a plain value; every bit is
/// meaningful.
pub(crate) fn mask_speed(speed: libc::speed_t) -> libc::speed_t {
    speed
}

pub(crate) fn grant_pty(fd: BorrowedFd<'_>) -> Result<()> {
    ioctl(
        fd,
        libc::TIOCPTYGRANT as libc::c_ulong,
        std::ptr::null_mut(),
        Request::GrantPty,
    )
}

pub(crate) fn unlock_pty(fd: BorrowedFd<'_>) -> Result<()> {
    ioctl(
        fd,
        libc::TIOCPTYUNLK as libc::c_ulong,
        std::ptr::null_mut(),
        Request::UnlockPty,
    )
}

/// Slave device path as reported by the kernel.
pub(crate) fn pts_name(fd: BorrowedFd<'_>) -> Result<String> {
    let mut buf = [0u8; PTY_NAME_LEN];
    ioctl(
        fd,
        libc::TIOCPTYGNAME as libc::c_ulong,
        buf.as_mut_ptr() as *mut libc::c_void,
        Request::GetPtyName,
    )?;
    let nul = buf.iter().position(|&b| b == 0).ok_or(Error::Protocol {
        request: Request::GetPtyName,
        detail: "name not NUL-terminated within the reply buffer",
    })?;
    Ok(String::from_utf8_lossy(&buf[..nul]).into_owned())
}

/// Kernel-assigned index, recovered from the device name's decimal suffix.
pub(crate) fn pty_number(fd: BorrowedFd<'_>) -> Result<libc::c_uint> {
    let name = pts_name(fd)?;
    let start = name
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    name[start..].parse().map_err(|_| Error::Protocol {
        request: Request::GetPtyNumber,
        detail: "device name has no numeric suffix",
    })
}
