//! Platform adaptation for the kernel interface.
//!
//! Everything unsafe lives here: raw pointers handed to `ioctl(2)` and the
//! termios entry points. The portable modules above only ever see the
//! logical operations this module tree exposes. One sub-module per
//! supported OS holds the PTY request codes and layouts for that platform.

use std::ffi::CString;
use std::mem;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd};

use nix::errno::Errno;

use crate::error::{Error, Request, Result};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub(crate) use linux::*;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub(crate) use macos::*;

/// Issue an ioctl carrying a pointer argument, tagging failures with the
/// originating request.
pub(crate) fn ioctl(
    fd: BorrowedFd<'_>,
    code: libc::c_ulong,
    arg: *mut libc::c_void,
    request: Request,
) -> Result<()> {
    Errno::result(unsafe { libc::ioctl(fd.as_raw_fd(), code, arg) })
        .map(drop)
        .map_err(|errno| Error::Device {
            request,
            source: errno,
        })
}

/// Open a terminal device read-write without making it the controlling
/// terminal.
pub(crate) fn open_device(path: &str, request: Request) -> Result<OwnedFd> {
    let path = CString::new(path).map_err(|_| Error::Protocol {
        request,
        detail: "device path contains an interior NUL",
    })?;
    let fd = Errno::result(unsafe {
        libc::open(path.as_ptr(), libc::O_RDWR | libc::O_NOCTTY)
    })
    .map_err(|errno| Error::Device {
        request,
        source: errno,
    })?;
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Close a descriptor, reporting the errno instead of panicking or
/// dropping it silently.
pub(crate) fn close_fd(fd: OwnedFd) -> Option<Errno> {
    Errno::result(unsafe { libc::close(fd.into_raw_fd()) }).err()
}

pub(crate) fn get_attributes(fd: BorrowedFd<'_>) -> Result<libc::termios> {
    let mut raw: libc::termios = unsafe { mem::zeroed() };
    Errno::result(unsafe { libc::tcgetattr(fd.as_raw_fd(), &mut raw) })
        .map_err(|errno| Error::Device {
            request: Request::GetAttributes,
            source: errno,
        })?;
    Ok(raw)
}

/// Single TCSANOW write; no draining or flushing variants are exposed.
pub(crate) fn set_attributes(fd: BorrowedFd<'_>, raw: &libc::termios) -> Result<()> {
    Errno::result(unsafe { libc::tcsetattr(fd.as_raw_fd(), libc::TCSANOW, raw) })
        .map(drop)
        .map_err(|errno| Error::Device {
            request: Request::SetAttributes,
            source: errno,
        })
}

pub(crate) fn get_window_size(fd: BorrowedFd<'_>) -> Result<libc::winsize> {
    let mut ws: libc::winsize = unsafe { mem::zeroed() };
    ioctl(
        fd,
        libc::TIOCGWINSZ as libc::c_ulong,
        &mut ws as *mut _ as *mut libc::c_void,
        Request::GetWindowSize,
    )?;
    Ok(ws)
}

pub(crate) fn set_window_size(fd: BorrowedFd<'_>, ws: &libc::winsize) -> Result<()> {
    ioctl(
        fd,
        libc::TIOCSWINSZ as libc::c_ulong,
        ws as *const _ as *mut libc::c_void,
        Request::SetWindowSize,
    )
}
