/*!
Option descriptors: the passive records that make up an option table. Tables
are plain slices, so they can be declared as `static` with the `const`
builder methods here.
*/

use crate::Key;

/// A single capability of an option descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// This option is another name for the nearest preceding non-alias
    /// option, and inherits its arity, flags and description
    Alias,

    /// The option doesn't need to appear on the command line
    Optional,

    /// The option has no `-x` form. Its key must not be an ASCII letter.
    NoCharKey,

    /// The option has no `--long` form; `--long` is silently skipped
    NoLongKey,

    /// The option doesn't appear in `--help`
    Hidden,
}

impl Flag {
    const ALL: [Flag; 5] = [
        Flag::Alias,
        Flag::Optional,
        Flag::NoCharKey,
        Flag::NoLongKey,
        Flag::Hidden,
    ];

    #[inline(always)]
    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// The set of [`Flag`]s on a descriptor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const EMPTY: Flags = Flags(0);

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Flag) -> Self {
        Self(self.0 | flag.mask())
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Flag) -> Self {
        Self(self.0 & !flag.mask())
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set `flag` only if `present`
    #[inline]
    #[must_use]
    pub const fn with_if(self, flag: Flag, present: bool) -> Self {
        match present {
            true => self.with(flag),
            false => self.without(flag),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |&flag| self.contains(flag))
    }
}

impl From<Flag> for Flags {
    #[inline]
    fn from(flag: Flag) -> Self {
        Self::EMPTY.with(flag)
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl core::fmt::Debug for Flags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/**
Describes one option: its `--long` name, its [`Key`], its [`Flags`], how many
trailing arguments it takes, and its help text.

The arity is stored as written: `0` for a flag, `N > 0` for exactly `N`
trailing arguments, `-1` for "as many as there are, at least one". Anything
else is rejected when the table is registered.

```
use cmdf::{Flag, Key, OptionDescriptor};

const VSCODE_KEY: Key = Key::code(2);

static OPTIONS: &[OptionDescriptor<'static>] = &[
    OptionDescriptor::new("where", Key::short('w'))
        .optional()
        .arity(1)
        .description("Where to create the project"),
    OptionDescriptor::alias("output", Key::short('o')),
    OptionDescriptor::new("vscode", VSCODE_KEY)
        .optional()
        .no_char_key()
        .description("Generate a .vscode folder"),
];

assert!(OPTIONS[1].flags.contains(Flag::Alias));
assert!(OPTIONS[2].flags.contains(Flag::NoCharKey));
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor<'a> {
    pub long_name: &'a str,
    pub key: Key,
    pub flags: Flags,
    pub arity: i32,
    pub description: &'a str,
}

impl<'a> OptionDescriptor<'a> {
    /// A required flag with no description. Use the builder methods to
    /// adjust it.
    #[must_use]
    pub const fn new(long_name: &'a str, key: Key) -> Self {
        Self {
            long_name,
            key,
            flags: Flags::EMPTY,
            arity: 0,
            description: "",
        }
    }

    /// Another name for the option declared right above it
    #[must_use]
    pub const fn alias(long_name: &'a str, key: Key) -> Self {
        Self::new(long_name, key).flag(Flag::Alias)
    }

    #[must_use]
    pub const fn flag(mut self, flag: Flag) -> Self {
        self.flags = self.flags.with(flag);
        self
    }

    #[must_use]
    pub const fn optional(self) -> Self {
        self.flag(Flag::Optional)
    }

    #[must_use]
    pub const fn no_char_key(self) -> Self {
        self.flag(Flag::NoCharKey)
    }

    #[must_use]
    pub const fn no_long_key(self) -> Self {
        self.flag(Flag::NoLongKey)
    }

    #[must_use]
    pub const fn hidden(self) -> Self {
        self.flag(Flag::Hidden)
    }

    #[must_use]
    pub const fn arity(mut self, arity: i32) -> Self {
        self.arity = arity;
        self
    }

    /// Shorthand for `.arity(-1)`
    #[must_use]
    pub const fn variadic(self) -> Self {
        self.arity(-1)
    }

    #[must_use]
    pub const fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }
}
