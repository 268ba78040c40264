/*!
Error types for registration and parsing. Registration errors are authoring
mistakes in the option table; parse errors are problems with the command line
itself.
*/

use core::fmt;
use std::io;

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{Flag, Key, OptionDescriptor};

/// User-printable identification for an option: `-w / --where`, or just
/// `--vscode` for an option without a character key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionName {
    pub short: Option<char>,
    pub long: String,
}

impl OptionName {
    pub(crate) fn of(descriptor: &OptionDescriptor<'_>) -> Self {
        Self::new(descriptor.key, descriptor.flags.contains(Flag::NoCharKey), descriptor.long_name)
    }

    pub(crate) fn new(key: Key, no_char_key: bool, long: &str) -> Self {
        Self {
            short: key
                .as_char()
                .filter(|_| key.is_alphabetic() && !no_char_key),
            long: long.to_owned(),
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short {
            Some(short) => write!(f, "-{short} / --{long}", long = self.long),
            None => write!(f, "--{long}", long = self.long),
        }
    }
}

/// Which half of the character-key rule a descriptor broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// Declared with [`Flag::NoCharKey`], but the key is an ASCII letter
    MustNotBeAlphabetic,

    /// Declared with a character key that isn't an ASCII letter
    MustBeAlphabetic,
}

impl fmt::Display for KeyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyRule::MustNotBeAlphabetic => {
                "has no character key, so its key must not be an ASCII letter"
            }
            KeyRule::MustBeAlphabetic => "has a character key, so its key must be an ASCII letter",
        })
    }
}

/// A problem with the option table, found while building a
/// [`Registry`][crate::Registry]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("the key of option {option} is already registered by another option")]
    DuplicateKey { option: OptionName },

    #[error("the long name of option {option} is already registered by another option")]
    DuplicateLongName { option: OptionName },

    #[error("the option with key {key} has an empty long name")]
    EmptyLongName { key: Key },

    #[error("option {option} uses the key 0, which is reserved for positional arguments")]
    ReservedKey { option: OptionName },

    #[error("option {option} uses a key reserved for --help, --version or --info")]
    BuiltinKey { option: OptionName },

    #[error("option {option} {rule}")]
    InvalidKey { option: OptionName, rule: KeyRule },

    #[error("alias {option} must be declared below a non-alias option")]
    MalformedAlias { option: OptionName },

    #[error(
        "option {option} was registered with an invalid number of arguments ({arity}); \
        it should be -1, 0, or greater than 0"
    )]
    InvalidArity { option: OptionName, arity: i32 },
}

/// A problem with the command line
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("unrecognized option {token}")]
    UnknownOption { token: String },

    #[error(
        "only options without arguments can be bundled together; \
        -{bundle} includes {option}, which takes arguments"
    )]
    NestedArity { bundle: String, option: OptionName },

    #[error("option {option} needs at least one argument")]
    MissingArgument { option: OptionName },

    #[error("option {option} takes {expected} argument(s), but got {got}")]
    TooFewArguments {
        option: OptionName,
        expected: usize,
        got: usize,
    },

    #[error("option {option} takes only {expected} argument(s)")]
    TooManyArguments { option: OptionName, expected: usize },

    #[error("{}", missing_required(.option, .alternatives))]
    MissingRequiredOption {
        option: OptionName,
        alternatives: Vec<OptionName>,
    },

    #[error("failed to write informational output")]
    Output(#[from] io::Error),
}

fn missing_required<'a>(
    option: &'a OptionName,
    alternatives: &'a [OptionName],
) -> impl fmt::Display + 'a {
    lazy_format!(match (alternatives) {
        [] => "required option {option} was omitted",
        alternatives => (
            "required option {option} (or {alternatives}) was omitted",
            alternatives = alternatives.iter().join_with(", "),
        ),
    })
}

/// Either kind of error, for callers that register and parse in one go
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
