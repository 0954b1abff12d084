//! Core types for resize handling.

/// Terminal window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
    pub xpixel: u16,
    pub ypixel: u16,
}

impl WindowSize {
    /// Create a new window size with columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            xpixel: 0,
            ypixel: 0,
        }
    }

    /// Build from a libc winsize struct.
    pub(crate) fn from_libc(ws: libc::winsize) -> Self {
        Self {
            cols: ws.ws_col,
            rows: ws.ws_row,
            xpixel: ws.ws_xpixel,
            ypixel: ws.ws_ypixel,
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}
