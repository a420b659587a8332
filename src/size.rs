//! Window size queries for terminal devices

use std::os::fd::AsFd;

use crate::error::Result;
use crate::sys;

/// Window size in characters and pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows (characters)
    pub rows: u16,
    /// Number of columns (characters)
    pub cols: u16,
    /// Width in pixels (optional, can be 0)
    pub pixel_width: u16,
    /// Height in pixels (optional, can be 0)
    pub pixel_height: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    /// Create a window size with pixel dimensions
    pub fn with_pixels(cols: u16, rows: u16, pixel_width: u16, pixel_height: u16) -> Self {
        Self {
            rows,
            cols,
            pixel_width,
            pixel_height,
        }
    }

    pub(crate) fn to_winsize(self) -> libc::winsize {
        libc::winsize {
            ws_row: self.rows,
            ws_col: self.cols,
            ws_xpixel: self.pixel_width,
            ws_ypixel: self.pixel_height,
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
            pixel_width: ws.ws_xpixel,
            pixel_height: ws.ws_ypixel,
        }
    }
}

/// Query the device's current window geometry.
///
/// The value is a snapshot; it is stale as soon as the terminal resizes.
/// A caller reacting to resize notifications re-queries here and pushes
/// the result to the other device itself — nothing propagates a size
/// between the two ends of a PTY pair on the caller's behalf.
pub fn window_size<F: AsFd>(file: &F) -> Result<WindowSize> {
    let ws = sys::get_window_size(file.as_fd())?;
    Ok(WindowSize::from(ws))
}

/// Set the device's window geometry.
pub fn set_window_size<F: AsFd>(file: &F, size: WindowSize) -> Result<()> {
    sys::set_window_size(file.as_fd(), &size.to_winsize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pty::open_pty;

    #[test]
    fn default_is_80_by_24() {
        let size = WindowSize::default();
        assert_eq!(size.cols, 80);
        assert_eq!(size.rows, 24);
    }

    #[test]
    fn new_leaves_pixels_zero() {
        let size = WindowSize::new(120, 40);
        assert_eq!(size.cols, 120);
        assert_eq!(size.rows, 40);
        assert_eq!(size.pixel_width, 0);
        assert_eq!(size.pixel_height, 0);
    }

    #[test]
    fn with_pixels_carries_all_four_fields() {
        let size = WindowSize::with_pixels(80, 24, 800, 600);
        let ws = size.to_winsize();
        assert_eq!(ws.ws_col, 80);
        assert_eq!(ws.ws_row, 24);
        assert_eq!(ws.ws_xpixel, 800);
        assert_eq!(ws.ws_ypixel, 600);
        assert_eq!(WindowSize::from(ws), size);
    }

    #[test]
    fn set_then_get_round_trips_on_an_endpoint() {
        let pair = open_pty().unwrap();
        let size = WindowSize::new(120, 40);
        set_window_size(&pair.master(), size).unwrap();
        let read_back = window_size(&pair.master()).unwrap();
        assert_eq!(read_back, size);
        pair.close().unwrap();
    }

    #[test]
    fn plain_file_has_no_window_size() {
        let file = tempfile::tempfile().unwrap();
        assert!(window_size(&file).is_err());
    }
}
