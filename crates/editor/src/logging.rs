//! Logging macros, compiled out when the `log` feature is disabled.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

macro_rules! info {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        {
            tracing::info!($($arg)*);
        }
    };
}

macro_rules! warn_ {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        {
            tracing::warn!($($arg)*);
        }
    };
}

macro_rules! error {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        {
            tracing::error!($($arg)*);
        }
    };
}

pub(crate) use {debug, error, info};
pub(crate) use warn_ as warn;
