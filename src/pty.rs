//! PTY pair allocation
//!
//! Opens the multiplexing master device, derives and unlocks the paired
//! slave, and hands both ends back as one unit. Nothing here spawns or
//! manages the processes that attach to the slave.

use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};

use nix::fcntl::{fcntl, FcntlArg, OFlag};

use crate::error::{CloseError, Error, Request, Result};
use crate::sys;

/// Both ends of one kernel-allocated pseudo-terminal.
///
/// Once constructed, master and slave are open and connected. Dropping the
/// pair closes both ends silently; call [`PtyPair::close`] instead when the
/// close status matters.
#[derive(Debug)]
pub struct PtyPair {
    master: OwnedFd,
    slave: OwnedFd,
}

/// Allocate a new master/slave PTY pair.
///
/// Sequence: open the master, query the slave's name through it, grant
/// access, unlock, open the slave. A failure at any step aborts with that
/// step's error; descriptors opened by earlier steps are closed on the way
/// out by ownership.
pub fn open_pty() -> Result<PtyPair> {
    let master = sys::open_device(sys::MASTER_PATH, Request::OpenMaster)?;
    let name = sys::pts_name(master.as_fd())?;
    sys::grant_pty(master.as_fd())?;
    sys::unlock_pty(master.as_fd())?;
    let slave = sys::open_device(&name, Request::OpenSlave)?;
    log::debug!("opened pty pair, slave {}", name);
    Ok(PtyPair { master, slave })
}

impl PtyPair {
    /// Borrow the master descriptor.
    pub fn master(&self) -> BorrowedFd<'_> {
        self.master.as_fd()
    }

    /// Borrow the slave descriptor.
    pub fn slave(&self) -> BorrowedFd<'_> {
        self.slave.as_fd()
    }

    /// Take ownership of both descriptors, master first.
    pub fn into_parts(self) -> (OwnedFd, OwnedFd) {
        (self.master, self.slave)
    }

    /// Slave device path, queried from the master on every call.
    pub fn slave_name(&self) -> Result<String> {
        sys::pts_name(self.master.as_fd())
    }

    /// Kernel-assigned PTY index, queried from the master on every call.
    pub fn slave_number(&self) -> Result<u32> {
        sys::pty_number(self.master.as_fd()).map(|n| n as u32)
    }

    /// Toggle O_NONBLOCK on the master descriptor.
    pub fn set_nonblocking(&self, nonblocking: bool) -> Result<()> {
        let fd = self.master.as_raw_fd();
        let flags = fcntl(fd, FcntlArg::F_GETFL).map_err(|e| Error::Io(io::Error::other(e)))?;
        let flags = OFlag::from_bits_truncate(flags);
        let new_flags = if nonblocking {
            flags | OFlag::O_NONBLOCK
        } else {
            flags & !OFlag::O_NONBLOCK
        };
        fcntl(fd, FcntlArg::F_SETFL(new_flags)).map_err(|e| Error::Io(io::Error::other(e)))?;
        Ok(())
    }

    /// Close both ends, slave first, and report every failure.
    ///
    /// Each side is closed unconditionally; if either close fails the
    /// result is a single error naming the failing side(s). Ok only when
    /// both closed cleanly.
    pub fn close(self) -> Result<()> {
        let Self { master, slave } = self;
        let slave_err = sys::close_fd(slave);
        let master_err = sys::close_fd(master);
        if slave_err.is_some() || master_err.is_some() {
            return Err(CloseError {
                slave: slave_err,
                master: master_err,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::os::fd::FromRawFd;

    use super::*;

    #[test]
    fn open_then_close_succeeds() {
        let pair = open_pty().unwrap();
        pair.close().unwrap();
    }

    #[test]
    fn slave_name_matches_slave_number() {
        let pair = open_pty().unwrap();
        let name = pair.slave_name().unwrap();
        let number = pair.slave_number().unwrap();
        assert!(name.ends_with(&number.to_string()));
        #[cfg(target_os = "linux")]
        assert_eq!(name, format!("/dev/pts/{}", number));
        #[cfg(target_os = "macos")]
        assert!(name.starts_with("/dev/ttys"));
        pair.close().unwrap();
    }

    #[test]
    fn fresh_queries_agree_across_calls() {
        let pair = open_pty().unwrap();
        assert_eq!(pair.slave_name().unwrap(), pair.slave_name().unwrap());
        assert_eq!(pair.slave_number().unwrap(), pair.slave_number().unwrap());
        pair.close().unwrap();
    }

    #[test]
    fn close_reports_the_broken_slave_not_the_master() {
        let (master, slave) = open_pty().unwrap().into_parts();
        drop(slave);

        // A descriptor number far above any real allocation, so closing it
        // fails with EBADF without racing other tests over recycled fds.
        let bogus = unsafe { OwnedFd::from_raw_fd(1 << 20) };
        let pair = PtyPair {
            master,
            slave: bogus,
        };
        match pair.close() {
            Err(Error::Close(e)) => {
                assert!(e.slave.is_some());
                assert!(e.master.is_none());
            }
            other => panic!("expected a close error, got {:?}", other),
        }
    }

    #[test]
    fn nonblocking_toggles_cleanly() {
        let pair = open_pty().unwrap();
        pair.set_nonblocking(true).unwrap();
        pair.set_nonblocking(false).unwrap();
        pair.close().unwrap();
    }
}
