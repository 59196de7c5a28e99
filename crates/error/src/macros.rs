/// Constructs a [`crate::Error::Config`] for the given format string.
#[macro_export]
macro_rules! errconfig {
    ($($args:tt)*) => { $crate::Error::Config(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::InvalidInput`] for the given format string.
#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => { $crate::Error::InvalidInput(format!($($args)*)).into() };
}
