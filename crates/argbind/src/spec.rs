//! Argument specifications: the registry entries built by the `add_*` calls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ParseError;

/// Typed write access to a host-owned variable.
///
/// This is a closed variant over the conversions the matcher supports; the
/// right variant is selected at registration time through [`Bindable`], so
/// registration stays one generic entry point without open-ended dispatch.
/// Boolean targets are deliberately absent: booleans are only ever set
/// through flags, never converted from a value token.
///
/// Public only because [`Bindable::bind`] names it; not part of the
/// supported API surface.
#[doc(hidden)]
pub enum Target<'a> {
    I32(&'a mut i32),
    I64(&'a mut i64),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Text(&'a mut String),
}

impl Target<'_> {
    /// Human name of the expected type, used in diagnostics.
    pub(crate) fn expected(&self) -> &'static str {
        match self {
            Target::I32(_) => "a 32-bit integer",
            Target::I64(_) => "a 64-bit integer",
            Target::U32(_) => "a 32-bit unsigned integer",
            Target::U64(_) => "a 64-bit unsigned integer",
            Target::Usize(_) => "an unsigned integer",
            Target::F32(_) => "a 32-bit floating-point number",
            Target::F64(_) => "a floating-point number",
            Target::Text(_) => "text",
        }
    }

    /// Convert `token` and store it into the bound variable.
    ///
    /// Conversion covers the whole token: trailing garbage after a numeric
    /// literal and out-of-range values are rejected. Text targets take the
    /// token verbatim, leading dashes and spaces included.
    pub(crate) fn assign(&mut self, token: &str) -> Result<(), ParseError> {
        let expected = self.expected();
        let fail = || ParseError::ConversionFailure {
            token: token.to_string(),
            expected,
        };
        match self {
            Target::I32(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::I64(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::U32(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::U64(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::Usize(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::F32(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::F64(slot) => **slot = token.parse().map_err(|_| fail())?,
            Target::Text(slot) => {
                slot.clear();
                slot.push_str(token);
            }
        }
        Ok(())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Types an option or positional may bind to.
///
/// Implemented for the closed set of supported targets; not implementable
/// outside this crate.
pub trait Bindable: sealed::Sealed {
    #[doc(hidden)]
    fn bind(target: &mut Self) -> Target<'_>;
}

macro_rules! bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Bindable for $ty {
            fn bind(target: &mut Self) -> Target<'_> {
                Target::$variant(target)
            }
        }
    )*};
}

bindable! {
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Text,
}

/// Argument name collection for flag/option registration.
///
/// Accepts a single name or multiple spellings via array/slice, so both
/// `add_flag(&mut v, "--verbose")` and `add_flag(&mut v, ["--verbose", "-v"])`
/// read naturally.
pub trait Names<'a> {
    type Iter: Iterator<Item = &'a str>;
    fn iter(self) -> Self::Iter;
}

impl<'a> Names<'a> for &'a str {
    type Iter = std::iter::Once<&'a str>;

    fn iter(self) -> Self::Iter {
        std::iter::once(self)
    }
}

impl<'a> Names<'a> for &'a [&'a str] {
    type Iter = std::iter::Copied<std::slice::Iter<'a, &'a str>>;

    fn iter(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<'a, const N: usize> Names<'a> for [&'a str; N] {
    type Iter = std::array::IntoIter<&'a str, N>;

    fn iter(self) -> Self::Iter {
        self.into_iter()
    }
}

/// State shared between a registered spec and the handles cloned from it.
#[derive(Debug, Default)]
pub(crate) struct SpecState {
    pub(crate) required: bool,
    pub(crate) found: bool,
    pub(crate) help: Option<String>,
}

/// Handle to one registered argument, returned by the `add_*` calls.
///
/// The handle shares state with the parser's registry entry, so it stays
/// usable after registration chaining ends and after `parse` runs.
#[derive(Clone)]
pub struct SpecHandle {
    state: Rc<RefCell<SpecState>>,
}

impl SpecHandle {
    pub(crate) fn new(state: Rc<RefCell<SpecState>>) -> Self {
        Self { state }
    }

    /// Mark the argument required. Parsing fails if it is never found.
    ///
    /// Meaningful for options and positionals; flags are implicitly
    /// optional.
    pub fn required(self) -> Self {
        self.state.borrow_mut().required = true;
        self
    }

    /// Attach descriptive text, shown by help rendering.
    pub fn help(self, text: impl Into<String>) -> Self {
        self.state.borrow_mut().help = Some(text.into());
        self
    }

    /// Whether the argument was bound to at least one token by the most
    /// recent `parse` call.
    pub fn found(&self) -> bool {
        self.state.borrow().found
    }
}

pub(crate) enum SpecKind<'a> {
    Flag(&'a mut bool),
    Option(Target<'a>),
    Positional(Target<'a>),
}

/// One registry entry. Positionals carry no names; their identity is their
/// registration order.
pub(crate) struct ArgSpec<'a> {
    pub(crate) kind: SpecKind<'a>,
    pub(crate) names: Vec<String>,
    pub(crate) state: Rc<RefCell<SpecState>>,
}

impl ArgSpec<'_> {
    pub(crate) fn matches(&self, token: &str) -> bool {
        self.names.iter().any(|name| name == token)
    }

    pub(crate) fn is_positional(&self) -> bool {
        matches!(self.kind, SpecKind::Positional(_))
    }

    pub(crate) fn takes_value(&self) -> bool {
        matches!(self.kind, SpecKind::Option(_))
    }

    pub(crate) fn found(&self) -> bool {
        self.state.borrow().found
    }

    pub(crate) fn required(&self) -> bool {
        self.state.borrow().required
    }

    pub(crate) fn help_text(&self) -> Option<String> {
        self.state.borrow().help.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign<T: Bindable>(slot: &mut T, token: &str) -> Result<(), ParseError> {
        T::bind(slot).assign(token)
    }

    #[test]
    fn converts_valid_literals() {
        let mut i = 0_i32;
        assign(&mut i, "-6").unwrap();
        assert_eq!(i, -6);

        let mut u = 0_usize;
        assign(&mut u, "10").unwrap();
        assert_eq!(u, 10);

        let mut d = 0.0_f64;
        assign(&mut d, "1.7").unwrap();
        assert_eq!(d, 1.7);

        let mut f = 0.0_f32;
        assign(&mut f, "1.8").unwrap();
        assert_eq!(f, 1.8);

        let mut d = 0.0_f64;
        assign(&mut d, "2.5e3").unwrap();
        assert_eq!(d, 2500.0);

        let mut s = String::new();
        assign(&mut s, "--a string").unwrap();
        assert_eq!(s, "--a string");
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut i = 0_i32;
        let err = assign(&mut i, "12abc").unwrap_err();
        assert!(matches!(err, ParseError::ConversionFailure { .. }));

        let mut d = 0.0_f64;
        assert!(assign(&mut d, "1.7x").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        let mut i = 0_i32;
        assert!(assign(&mut i, "4294967296").is_err());

        let mut u = 0_u32;
        assert!(assign(&mut u, "-1").is_err());
    }

    #[test]
    fn text_takes_token_verbatim() {
        let mut s = "old".to_string();
        assign(&mut s, "-6").unwrap();
        assert_eq!(s, "-6");
    }

    #[test]
    fn conversion_error_names_token_and_type() {
        let mut u = 0_u64;
        let err = assign(&mut u, "nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'nope': expected a 64-bit unsigned integer"
        );
    }
}
