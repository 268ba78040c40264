/*!
The option registry: a validated, merged view of the built-in options and the
caller's table, with lookup indices and the list of required groups.
*/

use core::{fmt, num::NonZeroUsize};
use std::collections::HashMap;

use crate::{
    Flag, Flags, Key, OptionDescriptor,
    defaults::{self, Builtin},
    errors::{KeyRule, OptionName, RegistryError},
};

/// How many trailing arguments an option consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No arguments
    Flag,

    /// Exactly this many arguments
    Exactly(NonZeroUsize),

    /// Every argument up to the next option or the end of input, at least one
    Variadic,
}

impl Arity {
    /// Interpret a table arity: `0`, a positive count, or `-1`
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(Self::Variadic),
            0 => Some(Self::Flag),
            n => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(Self::Exactly),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Flag)
    }
}

/// `0`, the count, or `n` for variadic
impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Flag => f.write_str("0"),
            Arity::Exactly(count) => write!(f, "{count}"),
            Arity::Variadic => f.write_str("n"),
        }
    }
}

/// A resolved option: aliases have already inherited from their parent.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    long_name: &'a str,
    key: Key,
    flags: Flags,
    arity: Arity,
    description: &'a str,
    alias_of: Option<&'a str>,
}

impl<'a> Entry<'a> {
    #[inline]
    pub fn long_name(&self) -> &'a str {
        self.long_name
    }

    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// The effective flags. For an alias this is its parent's flags plus
    /// [`Flag::Alias`], with [`Flag::NoCharKey`] as the alias declared it.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[inline]
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// The long name of the option this one is an alias of
    #[inline]
    pub fn alias_of(&self) -> Option<&'a str> {
        self.alias_of
    }

    #[inline]
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_key(self.key)
    }

    /// The `-x` form of this option, if it has one
    pub fn short(&self) -> Option<char> {
        self.key
            .as_char()
            .filter(|_| self.key.is_alphabetic() && !self.flags.contains(Flag::NoCharKey))
    }

    /// The `--long` form of this option, if it has one
    pub fn long(&self) -> Option<&'a str> {
        match self.flags.contains(Flag::NoLongKey) {
            true => None,
            false => Some(self.long_name),
        }
    }

    pub fn name(&self) -> OptionName {
        OptionName::new(self.key, self.flags.contains(Flag::NoCharKey), self.long_name)
    }
}

/// A set of options where any one of them satisfies a mandatory
/// requirement: a required option together with the aliases declared right
/// after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredGroup {
    keys: Vec<Key>,
    entries: Vec<usize>,
}

impl RequiredGroup {
    fn new(key: Key, entry: usize) -> Self {
        Self {
            keys: vec![key],
            entries: vec![entry],
        }
    }

    fn add(&mut self, key: Key, entry: usize) {
        self.keys.push(key);
        self.entries.push(entry);
    }

    /// The key of the option that opened the group
    #[inline]
    pub fn lead(&self) -> Key {
        self.keys[0]
    }

    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }
}

/**
The merged option table. Built-in options (if any) come first, then the
caller's, in declaration order.

A registry is cheap to build and is meant to be built right before parsing,
from a table that lives for the rest of the program.
*/
#[derive(Debug, Clone)]
pub struct Registry<'a> {
    entries: Vec<Entry<'a>>,
    by_key: HashMap<Key, usize>,
    by_long: HashMap<&'a str, usize>,
    groups: Vec<RequiredGroup>,
    builtins: usize,
}

impl<'a> Registry<'a> {
    /// Build a registry from the caller's table, with `--help`, `--version`
    /// and `--info` merged in front of it.
    pub fn new(descriptors: &[OptionDescriptor<'a>]) -> Result<Self, RegistryError> {
        Self::build(descriptors, &defaults::DEFAULT_OPTIONS)
    }

    /// Build a registry from the caller's table alone
    pub fn without_defaults(descriptors: &[OptionDescriptor<'a>]) -> Result<Self, RegistryError> {
        Self::build(descriptors, &[])
    }

    /**
    Concatenate `builtins` and `descriptors` and validate every entry, in
    order: duplicate keys and long names, the reserved zero and built-in
    keys, the character-key rule, then alias resolution and arity.
    */
    pub fn build(
        descriptors: &[OptionDescriptor<'a>],
        builtins: &[OptionDescriptor<'a>],
    ) -> Result<Self, RegistryError> {
        let mut registry = Self {
            entries: Vec::with_capacity(builtins.len() + descriptors.len()),
            by_key: HashMap::new(),
            by_long: HashMap::new(),
            groups: Vec::new(),
            builtins: builtins.len(),
        };

        // The latest non-alias entry, which aliases inherit from
        let mut parent: Option<usize> = None;

        // Whether aliases still extend the most recent required group
        let mut group_open = false;

        for descriptor in builtins.iter().chain(descriptors) {
            let index = registry.entries.len();
            let entry = registry.resolve(descriptor, parent, index < registry.builtins)?;
            let is_alias = descriptor.flags.contains(Flag::Alias);

            if !is_alias {
                parent = Some(index);
            }

            match (is_alias, entry.flags.contains(Flag::Optional)) {
                (false, false) => {
                    registry.groups.push(RequiredGroup::new(entry.key, index));
                    group_open = true;
                }
                (true, _) if group_open => {
                    if let Some(group) = registry.groups.last_mut() {
                        group.add(entry.key, index);
                    }
                }
                _ => group_open = false,
            }

            registry.by_key.insert(entry.key, index);
            registry.by_long.insert(entry.long_name, index);
            registry.entries.push(entry);
        }

        tracing::debug!(
            entries = registry.entries.len(),
            builtins = registry.builtins,
            required_groups = registry.groups.len(),
            "built option registry"
        );

        Ok(registry)
    }

    fn resolve(
        &self,
        descriptor: &OptionDescriptor<'a>,
        parent: Option<usize>,
        builtin: bool,
    ) -> Result<Entry<'a>, RegistryError> {
        let option = || OptionName::of(descriptor);
        let key = descriptor.key;
        let no_char_key = descriptor.flags.contains(Flag::NoCharKey);

        if self.by_key.contains_key(&key) {
            return Err(RegistryError::DuplicateKey { option: option() });
        }

        if descriptor.long_name.is_empty() {
            return Err(RegistryError::EmptyLongName { key });
        }

        if self.by_long.contains_key(descriptor.long_name) {
            return Err(RegistryError::DuplicateLongName { option: option() });
        }

        if key.is_positional() {
            return Err(RegistryError::ReservedKey { option: option() });
        }

        // Only the built-in slots may use the built-in keys, with or without
        // the defaults merged in
        if key.is_builtin() && !builtin {
            return Err(RegistryError::BuiltinKey { option: option() });
        }

        match (no_char_key, key.is_alphabetic()) {
            (true, true) => {
                return Err(RegistryError::InvalidKey {
                    option: option(),
                    rule: KeyRule::MustNotBeAlphabetic,
                });
            }
            (false, false) => {
                return Err(RegistryError::InvalidKey {
                    option: option(),
                    rule: KeyRule::MustBeAlphabetic,
                });
            }
            _ => {}
        }

        if descriptor.flags.contains(Flag::Alias) {
            let parent = parent
                .and_then(|index| self.entries.get(index))
                .ok_or_else(|| RegistryError::MalformedAlias { option: option() })?;

            return Ok(Entry {
                long_name: descriptor.long_name,
                key,
                flags: parent
                    .flags
                    .with(Flag::Alias)
                    .without(Flag::NoCharKey)
                    .with_if(Flag::NoCharKey, no_char_key),
                arity: parent.arity,
                description: parent.description,
                alias_of: Some(parent.long_name),
            });
        }

        let arity = Arity::from_raw(descriptor.arity).ok_or_else(|| RegistryError::InvalidArity {
            option: option(),
            arity: descriptor.arity,
        })?;

        Ok(Entry {
            long_name: descriptor.long_name,
            key,
            flags: descriptor.flags,
            arity,
            description: descriptor.description,
            alias_of: None,
        })
    }

    /// Every entry, built-ins first
    #[inline]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// The built-in entries only
    #[inline]
    pub fn builtin_entries(&self) -> &[Entry<'a>] {
        &self.entries[..self.builtins]
    }

    /// The caller's entries only
    #[inline]
    pub fn user_entries(&self) -> &[Entry<'a>] {
        &self.entries[self.builtins..]
    }

    pub fn get_by_key(&self, key: Key) -> Option<&Entry<'a>> {
        self.by_key.get(&key).map(|&index| &self.entries[index])
    }

    pub fn get_by_long(&self, long_name: &str) -> Option<&Entry<'a>> {
        self.by_long.get(long_name).map(|&index| &self.entries[index])
    }

    /// Look up a `-x` short option. Options declared without a character
    /// key are never found this way.
    pub fn get_by_short(&self, short: char) -> Option<&Entry<'a>> {
        self.get_by_key(Key::short(short))
            .filter(|entry| entry.short() == Some(short))
    }

    #[inline]
    pub fn required_groups(&self) -> &[RequiredGroup] {
        &self.groups
    }

    /// The entries of a required group, in declaration order
    pub fn group_entries<'s>(
        &'s self,
        group: &'s RequiredGroup,
    ) -> impl Iterator<Item = &'s Entry<'a>> + 's {
        group.entries.iter().filter_map(|&index| self.entries.get(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Key = Key::short('w');
    const O: Key = Key::short('o');
    const F: Key = Key::short('f');
    const V: Key = Key::short('v');

    fn table() -> [OptionDescriptor<'static>; 6] {
        [
            OptionDescriptor::new("where", W)
                .arity(1)
                .description("Where to create the project"),
            OptionDescriptor::alias("output", O),
            OptionDescriptor::alias("folder", F),
            OptionDescriptor::new("verbose", V).optional(),
            OptionDescriptor::alias("talk", Key::short('t')),
            OptionDescriptor::new("module", Key::short('M')).variadic(),
        ]
    }

    #[test]
    fn builtins_come_first() {
        let registry = Registry::new(&table()).unwrap();

        assert_eq!(registry.len(), 9);
        assert_eq!(registry.builtin_entries().len(), 3);
        assert_eq!(registry.entries()[0].key(), Key::HELP);
        assert_eq!(registry.user_entries()[0].long_name(), "where");
        assert_eq!(registry.get_by_long("help").unwrap().builtin(), Some(Builtin::Help));
    }

    #[test]
    fn aliases_inherit_from_parent() {
        let registry = Registry::without_defaults(&table()).unwrap();
        let folder = registry.get_by_key(F).unwrap();

        assert_eq!(folder.arity(), Arity::Exactly(NonZeroUsize::new(1).unwrap()));
        assert_eq!(folder.description(), "Where to create the project");
        assert_eq!(folder.alias_of(), Some("where"));
        assert!(folder.flags().contains(Flag::Alias));

        let talk = registry.get_by_long("talk").unwrap();
        assert!(talk.flags().contains(Flag::Optional));
        assert_eq!(talk.alias_of(), Some("verbose"));
    }

    #[test]
    fn required_groups_follow_aliases() {
        let registry = Registry::new(&table()).unwrap();
        let groups = registry.required_groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].keys(), [W, O, F]);
        assert_eq!(groups[0].lead(), W);
        assert_eq!(groups[1].keys(), [Key::short('M')]);
    }

    #[test]
    fn optional_entry_closes_group() {
        let table = [
            OptionDescriptor::new("alpha", Key::short('a')),
            OptionDescriptor::new("beta", Key::short('b')).optional(),
            OptionDescriptor::alias("gamma", Key::short('g')),
        ];
        let registry = Registry::without_defaults(&table).unwrap();

        assert_eq!(registry.required_groups().len(), 1);
        assert_eq!(registry.required_groups()[0].keys(), [Key::short('a')]);
    }

    #[test]
    fn duplicate_keys() {
        let table = [
            OptionDescriptor::new("alpha", Key::short('a')),
            OptionDescriptor::new("again", Key::short('a')),
        ];

        assert!(matches!(
            Registry::new(&table),
            Err(RegistryError::DuplicateKey { option }) if option.long == "again"
        ));
    }

    #[test]
    fn duplicate_builtin_long_name() {
        let table = [OptionDescriptor::new("help", Key::short('h'))];

        assert!(matches!(
            Registry::new(&table),
            Err(RegistryError::DuplicateLongName { .. })
        ));
        assert!(Registry::without_defaults(&table).is_ok());
    }

    #[test]
    fn key_rules() {
        let reserved = [OptionDescriptor::new("zero", Key::POSITIONAL)];
        assert!(matches!(
            Registry::new(&reserved),
            Err(RegistryError::ReservedKey { .. })
        ));

        let reserved = [OptionDescriptor::new("zero", Key::POSITIONAL).no_char_key()];
        assert!(matches!(
            Registry::new(&reserved),
            Err(RegistryError::ReservedKey { .. })
        ));

        for key in [Key::HELP, Key::VERSION, Key::INFO] {
            let builtin = [
                OptionDescriptor::new("assist", key).optional().no_char_key(),
                OptionDescriptor::new("where", Key::short('w')).arity(1),
            ];
            assert!(matches!(
                Registry::without_defaults(&builtin),
                Err(RegistryError::BuiltinKey { .. })
            ));
        }

        let letter_code = [OptionDescriptor::new("code", Key::short('c')).no_char_key()];
        assert!(matches!(
            Registry::new(&letter_code),
            Err(RegistryError::InvalidKey {
                rule: KeyRule::MustNotBeAlphabetic,
                ..
            })
        ));

        let digit = [OptionDescriptor::new("digit", Key::short('1'))];
        assert!(matches!(
            Registry::new(&digit),
            Err(RegistryError::InvalidKey {
                rule: KeyRule::MustBeAlphabetic,
                ..
            })
        ));

        let code = [OptionDescriptor::new("vscode", Key::code(2)).no_char_key()];
        assert!(Registry::new(&code).is_ok());
    }

    #[test]
    fn leading_alias_is_malformed() {
        let table = [OptionDescriptor::alias("output", O)];

        assert!(matches!(
            Registry::without_defaults(&table),
            Err(RegistryError::MalformedAlias { .. })
        ));

        // With the built-ins in front, the alias attaches to `--version`
        let registry = Registry::new(&table).unwrap();
        assert_eq!(registry.get_by_key(O).unwrap().alias_of(), Some("version"));
    }

    #[test]
    fn invalid_arity() {
        for arity in [-2, -100] {
            let table = [OptionDescriptor::new("bad", Key::short('b')).arity(arity)];

            assert!(matches!(
                Registry::new(&table),
                Err(RegistryError::InvalidArity { arity: a, .. }) if a == arity
            ));
        }
    }

    #[test]
    fn short_lookup_respects_no_char_key() {
        let table = [
            OptionDescriptor::new("brace", Key::short('{')).no_char_key().optional(),
            OptionDescriptor::new("verbose", V).optional(),
        ];
        let registry = Registry::new(&table).unwrap();

        assert!(registry.get_by_short('{').is_none());
        assert!(registry.get_by_short('v').is_some());
        assert!(registry.get_by_short('x').is_none());
    }

    #[test]
    fn arity_from_raw() {
        assert_eq!(Arity::from_raw(0), Some(Arity::Flag));
        assert_eq!(Arity::from_raw(-1), Some(Arity::Variadic));
        assert_eq!(Arity::from_raw(3), NonZeroUsize::new(3).map(Arity::Exactly));
        assert_eq!(Arity::from_raw(-3), None);
        assert_eq!(Arity::Variadic.to_string(), "n");
    }
}
