//! Best-effort rendering of payload values.
//!
//! Types opt into logging by implementing [`Loggable`]. Scalars, strings,
//! durations, timestamps, error identities, options and sequences are
//! covered here; structs declare which of their fields are logged with the
//! [`loggable!`](crate::loggable) macro, which builds on [`Fields`]. Fields
//! that are not listed are never rendered.
//!
//! Rendering is lossy on purpose: output is meant for humans reading a log,
//! not for reconstructing values.

use chrono::{DateTime, Local, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracelog_types::ErrorIdentity;

use crate::time;

/// A value that can describe itself for a log payload.
pub trait Loggable {
    /// Render the value as text.
    fn describe(&self) -> String;

    /// Whether the value is an absent pointer-like value.
    ///
    /// Struct fields that report `true` render as `(nil)`.
    fn is_nil(&self) -> bool {
        false
    }
}

/// Render every payload value, in order.
pub fn describe_all(data: &[&dyn Loggable]) -> Vec<String> {
    data.iter().map(|value| value.describe()).collect()
}

/// Name of `T` with module paths stripped, e.g. `Vec<i32>`.
pub fn short_type_name<T: ?Sized>() -> String {
    static PATH: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*::)+").expect("static pattern is valid")
    });
    PATH.replace_all(std::any::type_name::<T>(), "").into_owned()
}

/// Render a sequence as `[Name: 0: a, 1: b]`.
pub fn describe_sequence<'a, T, I>(name: &str, items: I) -> String
where
    T: Loggable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let parts: Vec<String> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| format!("{}: {}", index, item.describe()))
        .collect();
    format!("[{}: {}]", name, parts.join(", "))
}

/// A named annotation around a value, rendered as `[name: value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    /// Annotate `value` with `name`.
    pub fn new(name: impl Into<String>, value: &dyn Loggable) -> Self {
        Self {
            name: name.into(),
            value: value.describe(),
        }
    }
}

impl Loggable for Tag {
    fn describe(&self) -> String {
        format!("[{}: {}]", self.name, self.value)
    }
}

/// Builder for `[TypeName: field: value, ...]` struct renderings.
#[derive(Debug)]
pub struct Fields {
    type_name: String,
    parts: Vec<String>,
}

impl Fields {
    /// Start rendering a value of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            parts: Vec::new(),
        }
    }

    /// Add a logged field under its tag name.
    pub fn field(mut self, name: &str, value: &dyn Loggable) -> Self {
        let rendered = if value.is_nil() {
            "(nil)".to_string()
        } else {
            value.describe()
        };
        self.parts.push(format!("{}: {}", name, rendered));
        self
    }

    /// Finish the rendering.
    pub fn finish(self) -> String {
        if self.parts.is_empty() {
            format!("[{}]", self.type_name)
        } else {
            format!("[{}: {}]", self.type_name, self.parts.join(", "))
        }
    }
}

/// Wraps any error so it can be passed as payload; renders its text.
pub struct ErrorText<'a>(pub &'a (dyn Error + 'a));

impl Loggable for ErrorText<'_> {
    fn describe(&self) -> String {
        self.0.to_string()
    }
}

/// Wraps a `Debug` value; renders it in the `[TypeName: value]` fallback form.
pub struct Opaque<'a, T: fmt::Debug + ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> Loggable for Opaque<'_, T> {
    fn describe(&self) -> String {
        format!("[{}: {:?}]", short_type_name::<T>(), self.0)
    }
}

impl Loggable for ErrorIdentity {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Loggable for Duration {
    fn describe(&self) -> String {
        time::seconds(self.as_secs_f64())
    }
}

impl Loggable for chrono::Duration {
    fn describe(&self) -> String {
        time::chrono_seconds(*self)
    }
}

impl<Tz> Loggable for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn describe(&self) -> String {
        time::rfc1123(self)
    }
}

impl Loggable for SystemTime {
    fn describe(&self) -> String {
        time::rfc1123(&DateTime::<Local>::from(*self))
    }
}

impl Loggable for str {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Loggable for String {
    fn describe(&self) -> String {
        self.clone()
    }
}

impl Loggable for bool {
    fn describe(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl Loggable for char {
    fn describe(&self) -> String {
        self.to_string()
    }
}

macro_rules! integer_loggable {
    ($($ty:ty),*) => {
        $(
            impl Loggable for $ty {
                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_loggable!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_loggable {
    ($($ty:ident),*) => {
        $(
            impl Loggable for $ty {
                fn describe(&self) -> String {
                    format!("[{}: {}]", stringify!($ty), self)
                }
            }
        )*
    };
}

float_loggable!(f32, f64);

impl<T: Loggable> Loggable for Option<T> {
    fn describe(&self) -> String {
        match self {
            Some(value) => value.describe(),
            None => "nil".to_string(),
        }
    }

    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: Loggable> Loggable for [T] {
    fn describe(&self) -> String {
        describe_sequence(&short_type_name::<[T]>(), self)
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn describe(&self) -> String {
        describe_sequence(&short_type_name::<[T; N]>(), self)
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn describe(&self) -> String {
        describe_sequence(&short_type_name::<Vec<T>>(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct Session {
        user: String,
        attempts: [i32; 3],
        expires: Option<DateTime<Utc>>,
        #[allow(dead_code)]
        secret: String,
    }

    crate::loggable!(Session {
        user => "user",
        attempts => "int-array",
        expires => "expires",
    });

    struct Empty;

    crate::loggable!(Empty {});

    #[test]
    fn test_scalars() {
        assert_eq!("hello".describe(), "hello");
        assert_eq!(String::from("x").describe(), "x");
        assert_eq!(true.describe(), "true");
        assert_eq!(false.describe(), "false");
        assert_eq!((-42i64).describe(), "-42");
        assert_eq!(42u64.describe(), "42");
        assert_eq!(1.5f64.describe(), "[f64: 1.5]");
    }

    #[test]
    fn test_durations_and_times() {
        assert_eq!(Duration::from_millis(1500).describe(), "1.50s");
        assert_eq!(chrono::Duration::seconds(3).describe(), "3.00s");
        let t = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(t.describe(), "Mon, 02 Jan 2006 15:04:05 UTC");
    }

    #[test]
    fn test_errors() {
        let id = ErrorIdentity::new(100, "crypto", "invalid key");
        assert_eq!(id.describe(), "crypto-100: invalid key");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(ErrorText(&io).describe(), "no such file");
    }

    #[test]
    fn test_tag() {
        let tag = Tag::new("retries", &3);
        assert_eq!(tag.describe(), "[retries: 3]");
        let nested = Tag::new("outer", &tag);
        assert_eq!(nested.describe(), "[outer: [retries: 3]]");
    }

    #[test]
    fn test_struct_renders_only_tagged_fields() {
        let session = Session {
            user: "ada".to_string(),
            attempts: [1, 2, 3],
            expires: None,
            secret: "hunter2".to_string(),
        };
        let text = session.describe();
        assert_eq!(
            text,
            "[Session: user: ada, int-array: [[i32; 3]: 0: 1, 1: 2, 2: 3], expires: (nil)]"
        );
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_shared_none_field_is_nil() {
        let boxed: Box<Option<u8>> = Box::new(None);
        let shared: Arc<Option<u8>> = Arc::new(Some(4));
        let text = Fields::new("Lease")
            .field("owner", &boxed)
            .field("slot", &shared)
            .finish();
        assert_eq!(text, "[Lease: owner: (nil), slot: 4]");
    }

    #[test]
    fn test_struct_without_tagged_fields() {
        assert_eq!(Empty.describe(), "[Empty]");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(vec!["a", "b"].describe(), "[Vec<&str>: 0: a, 1: b]");
        assert_eq!(Vec::<u8>::new().describe(), "[Vec<u8>: ]");
        let slice: &[bool] = &[true];
        assert_eq!(slice.describe(), "[[bool]: 0: true]");
        assert_eq!(vec![Some(1), None].describe(), "[Vec<Option<i32>>: 0: 1, 1: nil]");
    }

    #[test]
    fn test_option_top_level() {
        assert_eq!(None::<i32>.describe(), "nil");
        assert_eq!(Some("x").describe(), "x");
    }

    #[test]
    fn test_opaque_fallback() {
        #[derive(Debug)]
        struct Point(i32, i32);
        assert_eq!(Opaque(&Point(1, 2)).describe(), "[Point: Point(1, 2)]");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            short_type_name::<std::collections::HashMap<String, u8>>(),
            "HashMap<String, u8>"
        );
    }

    #[test]
    fn test_describe_all() {
        let data: [&dyn Loggable; 2] = [&"hello", &42];
        assert_eq!(describe_all(&data), vec!["hello", "42"]);
    }
}
