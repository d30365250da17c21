//! The parser: argument registry plus the single-pass tokenizer/matcher.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ParseError;
use crate::help;
use crate::spec::{ArgSpec, Bindable, Names, SpecHandle, SpecKind, SpecState};

/// Binds command-line tokens to host-owned variables.
///
/// The host registers flags, options, and positionals before parsing; each
/// registration borrows its target mutably for the parser's lifetime, so the
/// registry never owns or copies the host's storage. `parse` then runs one
/// left-to-right pass over the token sequence and writes converted values in
/// place.
///
/// A parser serves sequential `parse` invocations: every call resets the
/// per-parse state (`found` flags, help signal, error, leftovers) before
/// running. Bound targets keep whatever the previous pass wrote until a new
/// token overwrites them.
pub struct Parser<'a> {
    description: Option<String>,
    specs: Vec<ArgSpec<'a>>,
    allow_unrecognized: bool,
    program: Option<String>,
    need_help: bool,
    error: Option<ParseError>,
    unparsed: Vec<String>,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self {
            description: None,
            specs: Vec::new(),
            allow_unrecognized: true,
            program: None,
            need_help: false,
            error: None,
            unparsed: Vec::new(),
        }
    }

    /// Like [`Parser::new`], with a program description used only by help
    /// rendering.
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::new()
        }
    }

    /// Register a boolean flag. Any of `names` sets the target true; no
    /// value token is consumed.
    ///
    /// # Panics
    ///
    /// Panics if a name is already registered or collides with the reserved
    /// `-h`/`--help`/`--` spellings. Duplicate registration is a programming
    /// error in the host's setup, not a parse-time condition.
    pub fn add_flag<'n>(&mut self, target: &'a mut bool, names: impl Names<'n>) -> SpecHandle {
        let names = self.claim_names(names);
        self.push(SpecKind::Flag(target), names)
    }

    /// Register a named option. Any of `names` consumes the *next* token as
    /// its value, converted to the target's type.
    ///
    /// # Panics
    ///
    /// Panics on duplicate or reserved names, as for [`Parser::add_flag`].
    pub fn add_option<'n, T: Bindable>(
        &mut self,
        target: &'a mut T,
        names: impl Names<'n>,
    ) -> SpecHandle {
        let names = self.claim_names(names);
        self.push(SpecKind::Option(T::bind(target)), names)
    }

    /// Register a positional slot. Identity is registration order: the Nth
    /// positional token encountered binds to the Nth registered slot.
    pub fn add_positional<T: Bindable>(&mut self, target: &'a mut T) -> SpecHandle {
        self.push(SpecKind::Positional(T::bind(target)), Vec::new())
    }

    /// Treat tokens that match no spec as a hard failure instead of leaving
    /// them in [`Parser::unparsed`].
    pub fn no_unrecognized(&mut self) -> &mut Self {
        self.allow_unrecognized = false;
        self
    }

    /// Run one pass over `argv` and bind tokens to the registered targets.
    ///
    /// Token 0 is the program invocation name and is skipped unconditionally;
    /// an empty sequence is a valid, trivially successful parse. Returns true
    /// on success, and also whenever help was requested: `-h`/`--help`
    /// outranks any failure, so check [`Parser::need_help`] before trusting
    /// bound values.
    pub fn parse<I, S>(&mut self, argv: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reset();

        let mut tokens = argv.into_iter();
        self.program = tokens.next().map(|t| t.as_ref().to_string());

        let mut literal = false;
        while let Some(raw) = tokens.next() {
            let token = raw.as_ref();

            if !literal {
                if token == "-h" || token == "--help" {
                    tracing::debug!("help requested");
                    self.need_help = true;
                    continue;
                }
                if token == "--" {
                    literal = true;
                    continue;
                }
                if let Some(idx) = self.specs.iter().position(|s| s.matches(token)) {
                    // An option's value is the very next token, verbatim: it
                    // is never re-tested against `--`, `-h`, or other names.
                    let value = if self.specs[idx].takes_value() {
                        match tokens.next() {
                            Some(v) => Some(v.as_ref().to_string()),
                            None => {
                                self.record(ParseError::MissingOptionValue {
                                    option: token.to_string(),
                                });
                                continue;
                            }
                        }
                    } else {
                        None
                    };
                    if let Err(err) = bind_named(&mut self.specs[idx], value) {
                        self.record(err);
                    }
                    continue;
                }
                if token != "-" && token.starts_with('-') {
                    // Name-shaped but unknown. Such tokens never fill a
                    // positional slot; that is what `--` is for.
                    self.unrecognized(token);
                    continue;
                }
            }

            // Positional path: the only path while in literal mode.
            match self.next_open_positional() {
                Some(idx) => {
                    if let Err(err) = bind_positional(&mut self.specs[idx], token) {
                        self.record(err);
                    }
                }
                None => self.unrecognized(token),
            }
        }

        if self.error.is_none() {
            self.check_required();
        }

        self.error.is_none() || self.need_help
    }

    /// Whether `-h` or `--help` was seen by the most recent parse.
    pub fn need_help(&self) -> bool {
        self.need_help
    }

    /// The error recorded by the most recent parse, if it failed.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Tokens the most recent parse did not consume, in encounter order.
    /// The skipped invocation name is not included.
    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }

    /// Render usage/help text from the registry. When the most recent parse
    /// failed, the diagnostic is included above the usage text.
    pub fn help(&self) -> String {
        help::render(
            self.program.as_deref(),
            self.description.as_deref(),
            &self.specs,
            self.error.as_ref(),
        )
    }

    fn reset(&mut self) {
        self.program = None;
        self.need_help = false;
        self.error = None;
        self.unparsed.clear();
        for spec in &self.specs {
            spec.state.borrow_mut().found = false;
        }
    }

    fn unrecognized(&mut self, token: &str) {
        if self.allow_unrecognized {
            tracing::debug!(token, "leaving unrecognized token to the host");
            self.unparsed.push(token.to_string());
        } else {
            self.record(ParseError::UnrecognizedToken {
                token: token.to_string(),
            });
        }
    }

    fn record(&mut self, err: ParseError) {
        tracing::debug!(%err, "parse error");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn next_open_positional(&self) -> Option<usize> {
        self.specs
            .iter()
            .position(|s| s.is_positional() && !s.found())
    }

    fn check_required(&mut self) {
        let mut positional = 0usize;
        for spec in &self.specs {
            if spec.is_positional() {
                positional += 1;
            }
            if spec.required() && !spec.found() {
                let what = match spec.names.first() {
                    Some(name) => name.clone(),
                    None => format!("positional {positional}"),
                };
                self.error = Some(ParseError::MissingRequired { what });
                tracing::debug!(%positional, "required argument never found");
                return;
            }
        }
    }

    fn claim_names<'n>(&self, names: impl Names<'n>) -> Vec<String> {
        let names: Vec<String> = names.iter().map(str::to_string).collect();
        assert!(
            !names.is_empty(),
            "a flag or option needs at least one name"
        );
        for name in &names {
            assert!(
                name != "-h" && name != "--help" && name != "--",
                "argument name '{name}' is reserved"
            );
            assert!(
                !self.specs.iter().any(|s| s.matches(name)),
                "duplicate argument name '{name}'"
            );
        }
        names
    }

    fn push(&mut self, kind: SpecKind<'a>, names: Vec<String>) -> SpecHandle {
        let state = Rc::new(RefCell::new(SpecState::default()));
        self.specs.push(ArgSpec {
            kind,
            names,
            state: Rc::clone(&state),
        });
        SpecHandle::new(state)
    }
}

fn bind_named(spec: &mut ArgSpec<'_>, value: Option<String>) -> Result<(), ParseError> {
    spec.state.borrow_mut().found = true;
    match (&mut spec.kind, value) {
        (SpecKind::Flag(slot), _) => {
            **slot = true;
            Ok(())
        }
        (SpecKind::Option(target), Some(value)) => target.assign(&value),
        // Positionals carry no names and are never matched here; an option
        // without a value never reaches binding.
        _ => Ok(()),
    }
}

fn bind_positional(spec: &mut ArgSpec<'_>, token: &str) -> Result<(), ParseError> {
    // The slot counts as consumed even when conversion fails, so one bad
    // token cannot cascade into later slots.
    spec.state.borrow_mut().found = true;
    match &mut spec.kind {
        SpecKind::Positional(target) => target.assign(token),
        _ => Ok(()),
    }
}
