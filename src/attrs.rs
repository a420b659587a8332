//! Terminal attribute snapshots
//!
//! Attributes are ambient kernel state; this module models them as an
//! explicit value type. Every read returns an owned snapshot and every
//! write takes one back, so capture/modify/restore sequences are plain
//! value transformations with no hidden shared state.

use std::os::fd::AsFd;

use crate::error::Result;
use crate::sys;

/// A snapshot of a terminal's line-discipline state.
///
/// Obtained from [`attributes`]; a held copy does not track the device.
/// Mutating a copy and writing it back with [`set_attributes`] is the only
/// way to change device state. Speed fields are already masked to the
/// recognized baud-rate bits; reserved kernel bits never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalAttributes {
    /// Input mode flags
    pub input_flags: libc::tcflag_t,
    /// Output mode flags
    pub output_flags: libc::tcflag_t,
    /// Control mode flags
    pub control_flags: libc::tcflag_t,
    /// Local mode flags
    pub local_flags: libc::tcflag_t,
    /// Control character table
    pub control_chars: [libc::cc_t; libc::NCCS],
    /// Input baud rate, masked
    pub input_speed: libc::speed_t,
    /// Output baud rate, masked
    pub output_speed: libc::speed_t,
    // Kernel line-discipline byte, carried so a read-modify-write round
    // trip writes back exactly what was read.
    #[cfg(target_os = "linux")]
    line: libc::cc_t,
}

impl TerminalAttributes {
    pub(crate) fn from_raw(raw: &libc::termios) -> Self {
        Self {
            input_flags: raw.c_iflag,
            output_flags: raw.c_oflag,
            control_flags: raw.c_cflag,
            local_flags: raw.c_lflag,
            control_chars: raw.c_cc,
            input_speed: sys::mask_speed(unsafe { libc::cfgetispeed(raw) }),
            output_speed: sys::mask_speed(unsafe { libc::cfgetospeed(raw) }),
            #[cfg(target_os = "linux")]
            line: raw.c_line,
        }
    }

    pub(crate) fn to_raw(self) -> libc::termios {
        let mut raw: libc::termios = unsafe { std::mem::zeroed() };
        raw.c_iflag = self.input_flags;
        raw.c_oflag = self.output_flags;
        raw.c_cflag = self.control_flags;
        raw.c_lflag = self.local_flags;
        raw.c_cc = self.control_chars;
        #[cfg(target_os = "linux")]
        {
            raw.c_line = self.line;
        }
        // Masked speeds are always within the range cfsetspeed accepts.
        unsafe {
            let _ = libc::cfsetispeed(&mut raw, self.input_speed);
            let _ = libc::cfsetospeed(&mut raw, self.output_speed);
        }
        raw
    }

    /// Whether input bytes are echoed back to the display.
    pub fn echo(&self) -> bool {
        self.local_flags & libc::ECHO != 0
    }

    /// Enable or disable echoing of input bytes.
    pub fn set_echo(&mut self, on: bool) {
        if on {
            self.local_flags |= libc::ECHO;
        } else {
            self.local_flags &= !libc::ECHO;
        }
    }
}

/// Read the device's current attributes.
///
/// Fails if the handle does not refer to a terminal device.
pub fn attributes<F: AsFd>(file: &F) -> Result<TerminalAttributes> {
    let raw = sys::get_attributes(file.as_fd())?;
    Ok(TerminalAttributes::from_raw(&raw))
}

/// Write attributes to the device in a single kernel call.
///
/// There is no locking across a read and a write; callers sequence their
/// own read-modify-write.
pub fn set_attributes<F: AsFd>(file: &F, attrs: &TerminalAttributes) -> Result<()> {
    sys::set_attributes(file.as_fd(), &attrs.to_raw())
}

/// Whether the handle refers to a terminal device.
///
/// Defined as "the attribute query succeeds"; never errors.
pub fn is_terminal<F: AsFd>(file: &F) -> bool {
    attributes(file).is_ok()
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;
    use crate::pty::open_pty;

    #[test]
    fn plain_file_is_not_a_terminal() {
        let file = tempfile::tempfile().unwrap();
        assert!(!is_terminal(&file));
        assert!(attributes(&file).is_err());
    }

    #[test]
    fn both_pty_ends_are_terminals() {
        let (master, slave) = open_pty().unwrap().into_parts();
        assert!(is_terminal(&master));
        assert!(is_terminal(&slave));
    }

    #[test]
    fn read_then_write_same_is_a_no_op() {
        let (_master, slave) = open_pty().unwrap().into_parts();
        let slave = File::from(slave);

        let before = attributes(&slave).unwrap();
        set_attributes(&slave, &before).unwrap();
        let after = attributes(&slave).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn echo_flag_round_trips_on_the_device() {
        let (_master, slave) = open_pty().unwrap().into_parts();
        let slave = File::from(slave);

        let mut attrs = attributes(&slave).unwrap();
        attrs.set_echo(false);
        assert!(!attrs.echo());
        set_attributes(&slave, &attrs).unwrap();
        assert!(!attributes(&slave).unwrap().echo());

        attrs.set_echo(true);
        set_attributes(&slave, &attrs).unwrap();
        assert!(attributes(&slave).unwrap().echo());
    }
}
