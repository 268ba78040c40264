/*!
Per-call configuration. Nothing here is global: a [`Mode`] and an [`Info`]
are passed into every [`register`][crate::register] and
[`parse`][crate::parse] call.
*/

/// What happens when registration or parsing hits a fatal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Write the error to the configured [`Stream`] and end the process with
    /// exit status 1
    Exit,

    /// Hand the error back to the caller without writing anything
    Return,
}

/// Where error messages go under [`OnError::Exit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/**
Parsing policy.

The default is lenient: unknown options are skipped, the built-in
help/version/info options are included, and errors are written to stderr
before the process exits.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    /// Unknown options are errors instead of being skipped
    pub strict: bool,

    /// Merge `--help`, `--version` and `--info` into the registry
    pub include_defaults: bool,

    pub on_error: OnError,

    pub stream: Stream,
}

impl Mode {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict: false,
            include_defaults: true,
            on_error: OnError::Exit,
            stream: Stream::Stderr,
        }
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub const fn include_defaults(mut self, include: bool) -> Self {
        self.include_defaults = include;
        self
    }

    #[must_use]
    pub const fn on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Return errors to the caller instead of exiting
    #[must_use]
    pub const fn report_only(self) -> Self {
        self.on_error(OnError::Return)
    }

    #[must_use]
    pub const fn stream(mut self, stream: Stream) -> Self {
        self.stream = stream;
        self
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::new()
    }
}

/// The informational strings behind `--help` (usage banner), `--version` and
/// `--info` (contact details). Unset strings print nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Info<'a> {
    pub usage: Option<&'a str>,
    pub version: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> Info<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            usage: None,
            version: None,
            contact: None,
        }
    }

    #[must_use]
    pub const fn usage(mut self, usage: &'a str) -> Self {
        self.usage = Some(usage);
        self
    }

    #[must_use]
    pub const fn version(mut self, version: &'a str) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub const fn contact(mut self, contact: &'a str) -> Self {
        self.contact = Some(contact);
        self
    }
}
