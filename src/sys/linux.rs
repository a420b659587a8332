//! Linux PTY requests and attribute constants.
//!
//! Slave devices live under /dev/pts and are addressed by the index
//! TIOCGPTN reports. Unlocking goes through TIOCSPTLCK, the same request
//! unlockpt(3) issues; granting delegates to grantpt(3), which is where
//! glibc hides the devpts ownership rules.

use std::os::fd::{AsRawFd, BorrowedFd};

use nix::errno::Errno;

use crate::error::{Error, Request, Result};

use super::ioctl;

/// The PTY multiplexing device.
pub(crate) const MASTER_PATH: &str = "/dev/ptmx";

/// Directory slave devices are created under.
pub(crate) const PTS_DIR: &str = "/dev/pts";

/// Bits of a speed field that encode a recognized baud rate.
const SPEED_MASK: libc::speed_t =
    (libc::CBAUD | libc::CBAUDEX) as libc::speed_t;

/// Strip reserved bits from a kernel-reported speed field.
pub(crate) fn mask_speed(speed: libc::speed_t) -> libc::speed_t {
    speed & SPEED_MASK
}

pub(crate) fn grant_pty(fd: BorrowedFd<'_>) -> Result<()> {
    Errno::result(unsafe { libc::grantpt(fd.as_raw_fd()) })
        .map(drop)
        .map_err(|errno| Error::Device {
            request: Request::GrantPty,
            source: errno,
        })
}

pub(crate) fn unlock_pty(fd: BorrowedFd<'_>) -> Result<()> {
    let mut unlock: libc::c_int = 0;
    ioctl(
        fd,
        libc::TIOCSPTLCK as libc::c_ulong,
        &mut unlock as *mut _ as *mut libc::c_void,
        Request::UnlockPty,
    )
}

/// Kernel-assigned index of the slave paired with this master.
pub(crate) fn pty_number(fd: BorrowedFd<'_>) -> Result<libc::c_uint> {
    let mut number: libc::c_uint = 0;
    ioctl(
        fd,
        libc::TIOCGPTN as libc::c_ulong,
        &mut number as *mut _ as *mut libc::c_void,
        Request::GetPtyNumber,
    )?;
    Ok(number)
}

/// Slave device path, derived from the index the kernel reports.
pub(crate) fn pts_name(fd: BorrowedFd<'_>) -> Result<String> {
    let number = pty_number(fd)?;
    Ok(format!("{}/{}", PTS_DIR, number))
}
