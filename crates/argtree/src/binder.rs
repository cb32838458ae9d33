//! Typed destinations for options and arguments.
//!
//! A [`Bindable`] type knows how to turn a token into a value; a
//! [`Destination`] is caller-owned storage the parsed value is written into.
//! [`Opt::bind`](crate::Opt::bind) and [`Argument::bind`](crate::Argument::bind)
//! glue the two into the uniform callbacks the parser dispatches.

use std::cell::{Cell, RefCell};

/// A primitive that can be bound to an option or positional argument.
pub trait Bindable: Sized {
    /// Name used in conversion error messages (`int32`, `float64`, ...).
    const TYPE_NAME: &'static str;

    /// Convert a token. `None` means the text is not a valid value.
    fn parse_value(text: &str) -> Option<Self>;

    /// Value stored when an option is present without a value.
    ///
    /// Types with an implicit value make the option's value optional.
    fn implicit() -> Option<Self> {
        None
    }
}

/// Storage a binding writes into. Last write wins.
pub trait Destination<T> {
    fn store(&self, value: T);
}

impl<T: Copy> Destination<T> for Cell<T> {
    fn store(&self, value: T) {
        self.set(value);
    }
}

impl<T> Destination<T> for RefCell<T> {
    fn store(&self, value: T) {
        *self.borrow_mut() = value;
    }
}

// Out-of-range values are truncated into the destination width, not rejected.
macro_rules! bindable_int {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Bindable for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_value(text: &str) -> Option<Self> {
                    text.parse::<i128>().ok().map(|v| v as $ty)
                }
            }
        )*
    };
}

bindable_int! {
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    isize => "isize",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    usize => "usize",
}

impl Bindable for f32 {
    const TYPE_NAME: &'static str = "float32";

    fn parse_value(text: &str) -> Option<Self> {
        float_prefix(text).and_then(|p| p.parse().ok())
    }
}

impl Bindable for f64 {
    const TYPE_NAME: &'static str = "float64";

    fn parse_value(text: &str) -> Option<Self> {
        float_prefix(text).and_then(|p| p.parse().ok())
    }
}

impl Bindable for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_value(text: &str) -> Option<Self> {
        parse_bool(text)
    }

    fn implicit() -> Option<Self> {
        Some(true)
    }
}

impl Bindable for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

pub fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
    const FALSE: [&str; 4] = ["false", "no", "off", "0"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

/// Longest leading slice of `text` that reads as a decimal float, the way
/// `strtod` scans: leading whitespace is skipped and trailing junk ignored.
///
/// Returns `None` when nothing could be consumed.
pub fn float_prefix(text: &str) -> Option<&str> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    for word in ["infinity", "inf", "nan"] {
        let head = bytes.get(i..i + word.len());
        if head.is_some_and(|h| h.eq_ignore_ascii_case(word.as_bytes())) {
            return Some(&s[..i + word.len()]);
        }
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int = digits(i);
    i += int;

    let mut frac = 0;
    if bytes.get(i) == Some(&b'.') {
        frac = digits(i + 1);
        if int > 0 || frac > 0 {
            i += 1 + frac;
        }
    }
    if int == 0 && frac == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp = digits(j);
        if exp > 0 {
            i = j + exp;
        }
    }

    Some(&s[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_truncate_into_narrow_widths() {
        assert_eq!(u8::parse_value("300"), Some(44));
        assert_eq!(i8::parse_value("-129"), Some(127));
        assert_eq!(u16::parse_value("-1"), Some(u16::MAX));
        assert_eq!(i64::parse_value("+42"), Some(42));
        assert_eq!(u64::parse_value("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn integers_reject_non_numeric_text() {
        assert_eq!(i32::parse_value(""), None);
        assert_eq!(i32::parse_value("12abc"), None);
        assert_eq!(i32::parse_value(" 12"), None);
        assert_eq!(u32::parse_value("1.5"), None);
    }

    #[test]
    fn float_prefix_scans_like_strtod() {
        assert_eq!(float_prefix("3.25"), Some("3.25"));
        assert_eq!(float_prefix("  -1e3xyz"), Some("-1e3"));
        assert_eq!(float_prefix("2.5e"), Some("2.5"));
        assert_eq!(float_prefix(".5"), Some(".5"));
        assert_eq!(float_prefix("7."), Some("7."));
        assert_eq!(float_prefix("Infinity!"), Some("Infinity"));
        assert_eq!(float_prefix("-nan"), Some("-nan"));
        assert_eq!(float_prefix(""), None);
        assert_eq!(float_prefix("."), None);
        assert_eq!(float_prefix("abc"), None);
        assert_eq!(float_prefix("-"), None);
    }

    #[test]
    fn floats_parse_leading_number() {
        assert_eq!(f64::parse_value("1.5kg"), Some(1.5));
        assert_eq!(f32::parse_value("-0.25"), Some(-0.25));
        assert_eq!(f64::parse_value("inf"), Some(f64::INFINITY));
        assert!(f64::parse_value("nan").is_some_and(f64::is_nan));
        assert_eq!(f64::parse_value("kg"), None);
    }

    #[test]
    fn booleans_accept_common_literals() {
        assert_eq!(bool::parse_value("TRUE"), Some(true));
        assert_eq!(bool::parse_value("off"), Some(false));
        assert_eq!(bool::parse_value("0"), Some(false));
        assert_eq!(bool::parse_value("maybe"), None);
        assert_eq!(bool::implicit(), Some(true));
        assert_eq!(i32::implicit(), None);
    }

    #[test]
    fn destinations_keep_last_write() {
        let cell = Cell::new(0u32);
        cell.store(1);
        cell.store(2);
        assert_eq!(cell.get(), 2);

        let text = RefCell::new(String::new());
        text.store("alice".to_string());
        assert_eq!(*text.borrow(), "alice");
    }
}
