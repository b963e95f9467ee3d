//! Printing system
//!
//! Status lines go to stderr with a right-aligned tag, so the output
//! of the tool (on stdout) can be piped without noise.
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static COLOR: AtomicBool = AtomicBool::new(true);

/// Enable verbose printing
pub fn verbose_on() {
    VERBOSE.store(true, Ordering::Relaxed);
}

/// Disable colored printing
pub fn color_off() {
    COLOR.store(false, Ordering::Relaxed);
}

/// Automatically enable colored printing if stderr is a terminal
pub fn auto_color() {
    if !std::io::stderr().is_terminal() {
        color_off();
    }
}

/// Check if colored printing is enabled
#[inline]
pub fn is_colored() -> bool {
    COLOR.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub mod __priv {
    pub static RED: &str = "\x1b[1;31m";
    pub static GREEN: &str = "\x1b[1;32m";
    pub static YELLOW: &str = "\x1b[1;33m";
    pub static MAGENTA: &str = "\x1b[1;35m";
    pub static RESET: &str = "\x1b[0m";

    #[inline]
    pub fn is_verbose() -> bool {
        super::VERBOSE.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Write the status tag in the given color, padded to the status column
    pub fn write_status(s: &mut impl std::io::Write, color: &str, status: impl std::fmt::Display) {
        if super::is_colored() {
            let _ = write!(s, "{}{:>12}{} ", color, status, RESET);
        } else {
            let _ = write!(s, "{:>12} ", status);
        }
    }
}

/// Log a status line using info color
#[macro_export]
macro_rules! infoln {
    ($status:expr, $($args:tt)*) => {
        {
            use ::std::io::Write;
            let mut s = ::std::io::stderr().lock();
            $crate::print::__priv::write_status(&mut s, $crate::print::__priv::GREEN, $status);
            let _ = writeln!(&mut s, $($args)*);
        }
    };
}

/// Log a status line using error color
#[macro_export]
macro_rules! errorln {
    ($status:expr, $($args:tt)*) => {
        {
            use ::std::io::Write;
            let mut s = ::std::io::stderr().lock();
            $crate::print::__priv::write_status(&mut s, $crate::print::__priv::RED, $status);
            let _ = writeln!(&mut s, $($args)*);
        }
    };
}

/// Log a status line using hint color
#[macro_export]
macro_rules! hintln {
    ($status:expr, $($args:tt)*) => {
        {
            use ::std::io::Write;
            let mut s = ::std::io::stderr().lock();
            $crate::print::__priv::write_status(&mut s, $crate::print::__priv::YELLOW, $status);
            let _ = writeln!(&mut s, $($args)*);
        }
    };
}

/// Log a line using verbose color, if verbose is enabled
#[macro_export]
macro_rules! verboseln {
    ($($args:tt)*) => {
        {
            if $crate::print::__priv::is_verbose() {
                use ::std::io::Write;
                let mut s = ::std::io::stderr().lock();
                $crate::print::__priv::write_status(&mut s, $crate::print::__priv::MAGENTA, "VERBOSE");
                let _ = writeln!(&mut s, $($args)*);
            }
        }
    };
}
