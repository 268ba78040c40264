/*!
A table-driven command-line option engine. Declare your options once, as a
table of [`OptionDescriptor`] values, and `cmdf` takes care of the rest:
classifying tokens, bundling short flags, pulling the right number of
trailing arguments for each option, resolving aliases, answering `--help`,
`--version` and `--info`, and checking that every mandatory option was
supplied. What each option *means* is up to you: the engine calls your
[`Handler`] once per option (and once per option argument), and once per
positional argument with [`Key::POSITIONAL`].

```
use cmdf::{Key, Mode, OptionDescriptor, Outcome};

static OPTIONS: &[OptionDescriptor<'static>] = &[
    OptionDescriptor::new("where", Key::short('w'))
        .arity(1)
        .description("Where to create the project"),
    OptionDescriptor::alias("output", Key::short('o')),
    OptionDescriptor::new("verbose", Key::short('v'))
        .optional()
        .description("Verbose mode"),
];

let mode = Mode::new().report_only();
let registry = cmdf::register(OPTIONS, &mode).unwrap();

let mut project = None;
let mut verbose = false;

let outcome = cmdf::parse_to(
    &mut Vec::<u8>::new(),
    &registry,
    ["-o", "proj", "-v"],
    &mut |key: Key, argument: Option<&str>, _index: usize| {
        if key == 'w' || key == 'o' {
            project = argument.map(str::to_owned);
        } else if key == 'v' {
            verbose = true;
        }
    },
    &mode,
    &cmdf::configure(None, None, None),
)
.unwrap();

assert_eq!(outcome, Outcome::Complete);
assert_eq!(project.as_deref(), Some("proj"));
assert!(verbose);
```
*/

mod arity;
pub mod arguments;
pub mod defaults;
pub mod descriptor;
mod dispatch;
pub mod errors;
pub mod handler;
pub mod mode;
mod printers;
pub mod registry;
mod report;
mod validate;

use core::fmt;
use std::io;

use cmdf_parser::Tokens;

pub use arguments::LoadedArguments;
pub use descriptor::{Flag, Flags, OptionDescriptor};
pub use errors::{Error, OptionName, ParseError, RegistryError};
pub use handler::Handler;
pub use mode::{Info, Mode, OnError, Stream};
pub use registry::{Arity, Entry, Registry, RequiredGroup};

/// First key of the built-in range; everything at or above it is out of
/// reach of [`Key::short`] and [`Key::code`].
const BUILTIN_BASE: u32 = 0x11_0000;

/**
The identity of an option. Usually a single character (`Key::short('w')`),
but options that shouldn't be reachable as `-x` can use a non-alphabetic
integer code instead (`Key::code(2)`), paired with
[`Flag::NoCharKey`][crate::Flag::NoCharKey].

The zero key is reserved: handlers receive it, as [`Key::POSITIONAL`], for
arguments that don't belong to any option.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u32);

impl Key {
    /// Sentinel delivered with positional arguments. Never valid in a table.
    pub const POSITIONAL: Key = Key(0);

    /// Built-in `--help`
    pub const HELP: Key = Key(BUILTIN_BASE);

    /// Built-in `--version`
    pub const VERSION: Key = Key(BUILTIN_BASE + 1);

    /// Built-in `--info`
    pub const INFO: Key = Key(BUILTIN_BASE + 2);

    #[inline]
    #[must_use]
    pub const fn short(short: char) -> Self {
        Self(short as u32)
    }

    #[inline]
    #[must_use]
    pub const fn code(code: u16) -> Self {
        Self(code as u32)
    }

    /// The raw key value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The key as a character, if it is one
    #[inline]
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// True if the key is an ASCII letter, which is what makes it usable as
    /// a `-x` short option
    #[inline]
    #[must_use]
    pub fn is_alphabetic(self) -> bool {
        self.as_char().is_some_and(|c| c.is_ascii_alphabetic())
    }

    #[inline]
    #[must_use]
    pub const fn is_positional(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        self.0 >= BUILTIN_BASE
    }
}

impl From<char> for Key {
    #[inline]
    fn from(short: char) -> Self {
        Self::short(short)
    }
}

impl PartialEq<char> for Key {
    #[inline]
    fn eq(&self, other: &char) -> bool {
        self.0 == *other as u32
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_char() {
            Some(c) if c.is_ascii_alphabetic() => write!(f, "{c}"),
            _ => write!(f, "#{}", self.0),
        }
    }
}

/// How a successful [`parse`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every token was handled and every required option was present
    Complete,

    /// `--help`, `--version` or `--info` fired. Required options were not
    /// checked; callers usually exit after this.
    Informational,
}

/// Bundle the informational strings shown by `--help`, `--version` and
/// `--info`. Any of them may be left out.
#[must_use]
pub fn configure<'a>(
    usage: Option<&'a str>,
    version: Option<&'a str>,
    contact: Option<&'a str>,
) -> Info<'a> {
    Info {
        usage,
        version,
        contact,
    }
}

/**
Validate a table of option descriptors and build a [`Registry`] from it. The
built-in help/version/info options are merged in front of the table unless
[`Mode::include_defaults`] is off.

Table errors are authoring mistakes; under [`OnError::Exit`] they are
reported and the process ends.
*/
pub fn register<'a>(
    descriptors: &[OptionDescriptor<'a>],
    mode: &Mode,
) -> Result<Registry<'a>, RegistryError> {
    let registry = match mode.include_defaults {
        true => Registry::new(descriptors),
        false => Registry::without_defaults(descriptors),
    };

    registry.or_else(|error| report::fail(mode, error))
}

/**
Parse the argument tail (the arguments *after* the program name) against a
registry, calling `handler` for every option and positional. Informational
output goes to stdout.
*/
pub fn parse<'arg, H>(
    registry: &Registry<'_>,
    args: impl IntoIterator<Item = &'arg str>,
    handler: &mut H,
    mode: &Mode,
    info: &Info<'_>,
) -> Result<Outcome, ParseError>
where
    H: Handler<'arg>,
{
    parse_to(&mut io::stdout().lock(), registry, args, handler, mode, info)
}

/// Same as [`parse`], but informational output (help, version, contact) is
/// written to `out`.
pub fn parse_to<'arg, H, W>(
    out: &mut W,
    registry: &Registry<'_>,
    args: impl IntoIterator<Item = &'arg str>,
    handler: &mut H,
    mode: &Mode,
    info: &Info<'_>,
) -> Result<Outcome, ParseError>
where
    H: Handler<'arg>,
    W: io::Write,
{
    let mut tokens = Tokens::new(args);
    let mut session = dispatch::Session::default();

    dispatch::dispatch(registry, &mut tokens, handler, mode, info, out, &mut session)
        .and_then(|()| validate::validate(registry, &mut session))
        .or_else(|error| report::fail(mode, error))
}

/// [`register`] and [`parse`] in one call, for tables that are only used
/// once.
pub fn run<'arg, H>(
    descriptors: &[OptionDescriptor<'_>],
    args: impl IntoIterator<Item = &'arg str>,
    handler: &mut H,
    mode: &Mode,
    info: &Info<'_>,
) -> Result<Outcome, Error>
where
    H: Handler<'arg>,
{
    run_to(&mut io::stdout().lock(), descriptors, args, handler, mode, info)
}

/// Same as [`run`], but informational output is written to `out`.
pub fn run_to<'arg, H, W>(
    out: &mut W,
    descriptors: &[OptionDescriptor<'_>],
    args: impl IntoIterator<Item = &'arg str>,
    handler: &mut H,
    mode: &Mode,
    info: &Info<'_>,
) -> Result<Outcome, Error>
where
    H: Handler<'arg>,
    W: io::Write,
{
    let registry = register(descriptors, mode)?;
    let outcome = parse_to(out, &registry, args, handler, mode, info)?;

    Ok(outcome)
}
