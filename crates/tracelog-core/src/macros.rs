//! Emission macros.
//!
//! Each macro captures the call site and forwards to the matching
//! `LogService::*_at` method. Payload arguments can be any
//! [`Loggable`](crate::Loggable) values.
//!
//! ```ignore
//! tracelog_core::info!(log, "connected", peer, Duration::from_millis(12));
//! let ok = tracelog_core::check!(log, result, "while reading", path);
//! return tracelog_core::fail!(log, result);
//! tracelog_core::assert_that!(log, queue.len() <= cap, "queue overflow");
//! ```

/// Capture the current file, line and function as a [`Caller`](crate::Caller).
#[macro_export]
macro_rules! caller {
    () => {{
        fn __tracelog_here() {}
        fn __tracelog_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __tracelog_name_of(__tracelog_here);
        $crate::record::Caller::new(
            file!(),
            line!(),
            name.strip_suffix("::__tracelog_here").unwrap_or(name),
        )
    }};
}

/// Build a `&[&dyn Loggable]` payload from a list of expressions.
#[macro_export]
macro_rules! payload {
    ($($arg:expr),* $(,)?) => {
        &[$(&$arg as &dyn $crate::describe::Loggable),*]
    };
}

/// Log an error if `result` is `Err`; evaluates to `true` in that case.
#[macro_export]
macro_rules! check {
    ($log:expr, $result:expr $(, $arg:expr)* $(,)?) => {
        $log.check_at($crate::caller!(), &$result, $crate::payload!($($arg),*))
    };
}

/// Log an error if `result` is `Err`; evaluates to `result` unchanged.
#[macro_export]
macro_rules! fail {
    ($log:expr, $result:expr $(, $arg:expr)* $(,)?) => {
        $log.fail_at($crate::caller!(), $result, $crate::payload!($($arg),*))
    };
}

/// Panic with a formatted assert record if `condition` is false.
#[macro_export]
macro_rules! assert_that {
    ($log:expr, $condition:expr $(, $arg:expr)* $(,)?) => {
        $log.assert_at($crate::caller!(), $condition, $crate::payload!($($arg),*))
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warning {
    ($log:expr $(, $arg:expr)* $(,)?) => {
        $log.warning_at($crate::caller!(), $crate::payload!($($arg),*))
    };
}

/// Log an informational message.
#[macro_export]
macro_rules! info {
    ($log:expr $(, $arg:expr)* $(,)?) => {
        $log.info_at($crate::caller!(), $crate::payload!($($arg),*))
    };
}

/// Log a debug message; always echoed to the console.
#[macro_export]
macro_rules! debug {
    ($log:expr $(, $arg:expr)* $(,)?) => {
        $log.debug_at($crate::caller!(), $crate::payload!($($arg),*))
    };
}

/// Implement [`Loggable`](crate::Loggable) for a struct by listing the
/// fields to log and the name each is logged under.
///
/// ```
/// struct Login {
///     user: String,
///     attempts: u32,
///     password: String,
/// }
///
/// tracelog_core::loggable!(Login {
///     user => "user",
///     attempts => "attempts",
/// });
///
/// use tracelog_core::Loggable;
/// let login = Login { user: "ada".into(), attempts: 2, password: "x".into() };
/// assert_eq!(login.describe(), "[Login: user: ada, attempts: 2]");
/// # let _ = login.password;
/// ```
#[macro_export]
macro_rules! loggable {
    ($ty:ty { $($field:ident => $name:expr),* $(,)? }) => {
        impl $crate::describe::Loggable for $ty {
            fn describe(&self) -> ::std::string::String {
                $crate::describe::Fields::new($crate::describe::short_type_name::<$ty>())
                    $(.field($name, &self.$field))*
                    .finish()
            }
        }
    };
}
