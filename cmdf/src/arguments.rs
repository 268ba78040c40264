use std::io;

use crate::{Handler, Info, Mode, Outcome, ParseError, Registry};

/**
An owned copy of the process's command line, for handlers to borrow from.

This type exists for roughly two purposes: to provide a convenient owned
container for args retrieved from [`std::env`], and to split off the program
name, which the engine never sees. Arguments that aren't valid UTF-8 are
converted lossily.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// The program name, if there was one
    pub fn argv0(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Everything after the program name
    pub fn tail(&self) -> impl Iterator<Item = &str> + Clone {
        self.arguments
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
    }

    /// Parse the argument tail; see [`parse`][crate::parse].
    pub fn parse<'a, H>(
        &'a self,
        registry: &Registry<'_>,
        handler: &mut H,
        mode: &Mode,
        info: &Info<'_>,
    ) -> Result<Outcome, ParseError>
    where
        H: Handler<'a>,
    {
        self.parse_to(&mut io::stdout().lock(), registry, handler, mode, info)
    }

    /// Parse the argument tail; see [`parse_to`][crate::parse_to].
    pub fn parse_to<'a, H, W>(
        &'a self,
        out: &mut W,
        registry: &Registry<'_>,
        handler: &mut H,
        mode: &Mode,
        info: &Info<'_>,
    ) -> Result<Outcome, ParseError>
    where
        H: Handler<'a>,
        W: io::Write,
    {
        crate::parse_to(out, registry, self.tail(), handler, mode, info)
    }
}

impl<S: Into<String>> FromIterator<S> for LoadedArguments {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
