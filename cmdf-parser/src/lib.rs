#![cfg_attr(not(test), no_std)]

/*!
Low-level token handling for `cmdf`. Takes care of distinguishing long
options, bundles of short options, and positionals, and provides a cursor over
the argument tail that lets an option pull its trailing arguments without ever
swallowing the next option. No registry lookups happen here. Usually this is
too low level to use directly.
*/

mod shorts;

use core::iter::Peekable;

pub use shorts::Shorts;

/**
A single classified command-line token.

Given `--where=proj -vW file.txt -`, the tokens are a [`Token::Long`] named
`where` with the inline argument `proj`, a [`Token::Short`] bundle `vW`, and
the positionals `file.txt` and `-`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'arg> {
    /// A long option, such as `--where`. If it was given as `--where=proj`,
    /// the part after the first `=` is the inline argument.
    Long {
        name: &'arg str,
        inline: Option<&'arg str>,
    },

    /// One or more short options packed after a single `-`, such as `-vW`
    Short(Shorts<'arg>),

    /// Anything else, including a lone `-`
    Positional(&'arg str),
}

impl<'arg> Token<'arg> {
    /// Classify a single raw argument.
    #[must_use]
    pub fn classify(arg: &'arg str) -> Self {
        match arg.strip_prefix("--") {
            Some(option) => match split_once(option, b'=') {
                Some((name, argument)) => Token::Long {
                    name,
                    inline: Some(argument),
                },
                None => Token::Long {
                    name: option,
                    inline: None,
                },
            },
            None => match arg.strip_prefix('-').and_then(Shorts::new) {
                Some(shorts) => Token::Short(shorts),
                None => Token::Positional(arg),
            },
        }
    }
}

/// Returns true if `arg` is an option token (and therefore ends the trailing
/// arguments of whatever option came before it). A lone `-` is not an option.
#[inline]
#[must_use]
pub fn is_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/**
A cursor over the argument tail. [`next_token`][Tokens::next_token] pulls and
classifies the next token; [`take_argument`][Tokens::take_argument] pulls the
next token only if it can serve as an option argument, leaving an option token
in place so that it gets classified on the next call to `next_token`.

The tail should *exclude* the name of the program. Indexes reported by the
cursor are 0-based positions within the tail.
*/
pub struct Tokens<I: Iterator> {
    args: Peekable<I>,
    position: usize,
}

impl<'arg, I> Tokens<I>
where
    I: Iterator<Item = &'arg str>,
{
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            args: args.into_iter().peekable(),
            position: 0,
        }
    }

    /// The index the next token will have
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Pull the next token, along with its index in the tail
    pub fn next_token(&mut self) -> Option<(usize, Token<'arg>)> {
        let arg = self.args.next()?;
        let index = self.bump();

        Some((index, Token::classify(arg)))
    }

    /// Pull the next token as an option argument. Returns [`None`] at the end
    /// of input or if the next token is an option; in the latter case the
    /// option is left unconsumed.
    pub fn take_argument(&mut self) -> Option<&'arg str> {
        let arg = self.args.next_if(|arg| !is_option(arg))?;
        self.bump();

        Some(arg)
    }

    /// True if the next token could be taken with
    /// [`take_argument`][Tokens::take_argument]
    #[inline]
    pub fn has_argument(&mut self) -> bool {
        self.args.peek().is_some_and(|arg| !is_option(arg))
    }

    /// True if every token has been pulled
    #[inline]
    pub fn is_exhausted(&mut self) -> bool {
        self.args.peek().is_none()
    }

    fn bump(&mut self) -> usize {
        let index = self.position;
        self.position += 1;
        index
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // The delimiter is ASCII, so both halves stay on char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
