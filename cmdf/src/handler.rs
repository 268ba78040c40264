use crate::Key;

/**
Receives every option and positional argument, in command-line order. This is
where a parsed option gets its meaning; the value implementing `Handler` is
also where that meaning gets stored.

- A flag is delivered once as `(key, None, 0)`.
- An option with arguments is delivered once per argument, as
  `(key, Some(argument), index)`, with `index` counting from 0 for each
  occurrence of the option.
- A positional argument is delivered as
  `(Key::POSITIONAL, Some(argument), position)`, where `position` is the
  argument's index in the argument tail. The program name is not counted, so
  `position` is one less than the argument's index in [`std::env::args`].

Built-in options are never delivered; the engine answers them itself.

Any `FnMut(Key, Option<&str>, usize)` closure is a handler.
*/
pub trait Handler<'arg> {
    fn handle(&mut self, key: Key, argument: Option<&'arg str>, index: usize);
}

impl<'arg, F> Handler<'arg> for F
where
    F: FnMut(Key, Option<&'arg str>, usize),
{
    #[inline]
    fn handle(&mut self, key: Key, argument: Option<&'arg str>, index: usize) {
        self(key, argument, index)
    }
}

/// A handler that drops everything. Used to run arity checks for built-in
/// options, whose output the engine writes itself.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Discard;

impl<'arg> Handler<'arg> for Discard {
    #[inline(always)]
    fn handle(&mut self, _key: Key, _argument: Option<&'arg str>, _index: usize) {}
}
