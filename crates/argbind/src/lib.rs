//! Bound-target argument parsing and help rendering.
//!
//! Unlike schema-first parsers that hand back a bag of matches, `argbind`
//! writes converted values directly into variables the host program already
//! owns. The host declares its flags, options, and positionals up front,
//! each bound to a `&mut` target, then runs one parse pass over the argument
//! vector:
//!
//! ```
//! use argbind::Parser;
//!
//! let mut verbose = false;
//! let mut repeats = 1_i32;
//! let mut name = String::new();
//!
//! let mut parser = Parser::with_description("greet someone");
//! parser.add_flag(&mut verbose, ["--verbose", "-v"]);
//! parser.add_option(&mut repeats, "--repeat");
//! parser.add_positional(&mut name).required();
//!
//! // Token 0 is the program invocation name and is always skipped.
//! assert!(parser.parse(["greet", "-v", "--repeat", "3", "world"]));
//! assert!(!parser.need_help());
//!
//! assert!(verbose);
//! assert_eq!(repeats, 3);
//! assert_eq!(name, "world");
//! ```
//!
//! Token classification follows the usual UNIX conventions: `-h`/`--help`
//! requests help, a bare `--` ends name matching and everything after it
//! binds as literal positionals, an option consumes the very next token as
//! its value verbatim. Tokens that match nothing are reported back through
//! [`Parser::unparsed`] (or fail the parse under
//! [`Parser::no_unrecognized`]).
//!
//! The parser is single-threaded by design: handles share state through
//! `Rc`, so neither [`Parser`] nor [`SpecHandle`] is `Send`.

mod error;
mod help;
mod parser;
mod spec;

pub use error::ParseError;
pub use parser::Parser;
pub use spec::{Bindable, Names, SpecHandle};

#[doc(hidden)]
pub use spec::Target;
