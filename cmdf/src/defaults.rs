/*!
The built-in `--help`, `--version` and `--info` options.
*/

use std::io;

use crate::{Info, Key, OptionDescriptor, printers, registry::Registry};

/// The built-in options, in the order they're merged into a registry
pub static DEFAULT_OPTIONS: [OptionDescriptor<'static>; 3] = [
    OptionDescriptor::new("help", Key::HELP)
        .optional()
        .no_char_key()
        .description("Shows this help menu"),
    OptionDescriptor::new("info", Key::INFO)
        .optional()
        .no_char_key()
        .description("Shows information about the program"),
    OptionDescriptor::new("version", Key::VERSION)
        .optional()
        .no_char_key()
        .description("Shows program version"),
];

/// Which built-in option fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Version,
    Info,
}

impl Builtin {
    #[must_use]
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::HELP => Some(Self::Help),
            Key::VERSION => Some(Self::Version),
            Key::INFO => Some(Self::Info),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> Key {
        match self {
            Self::Help => Key::HELP,
            Self::Version => Key::VERSION,
            Self::Info => Key::INFO,
        }
    }
}

/// Write the output of a built-in option
pub(crate) fn render(
    out: &mut impl io::Write,
    builtin: Builtin,
    registry: &Registry<'_>,
    info: &Info<'_>,
) -> io::Result<()> {
    match builtin {
        Builtin::Help => printers::print_help(out, registry, info.usage),
        Builtin::Version => info.version.map_or(Ok(()), |version| writeln!(out, "{version}")),
        Builtin::Info => info.contact.map_or(Ok(()), |contact| writeln!(out, "{contact}")),
    }
}
