//! Internal logging shim.
//!
//! With the `log` feature these forward to the `log` facade; without it they
//! expand to nothing, so the codec stays silent by default.

macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "log")]
        {
            ::log::debug!($($arg)+);
        }
    };
}

macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "log")]
        {
            ::log::trace!($($arg)+);
        }
    };
}
