/*!
The dispatch loop: reads the argument tail token by token, resolves each
option through the registry, and delegates to the arity consumer.
*/

use std::{collections::HashSet, io};

use cmdf_parser::{Shorts, Token, Tokens};

use crate::{
    Flag, Info, Key, Mode, arity, defaults,
    errors::{OptionName, ParseError},
    handler::{Discard, Handler},
    registry::{Entry, Registry},
};

/// An option whose trailing arguments were cut short by the end of input
#[derive(Debug, Clone)]
pub(crate) struct Outstanding {
    pub option: OptionName,
    pub expected: usize,
    pub got: usize,
}

/// The state of a single parse call
#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Keys of every option seen on the command line
    pub passed: HashSet<Key>,

    /// A built-in informational option fired
    pub informational: bool,

    pub outstanding: Option<Outstanding>,
}

/// Bundles the per-call collaborators so the token handlers below don't
/// each need seven parameters
struct Dispatcher<'r, 'a, 'c, H, W> {
    registry: &'r Registry<'a>,
    handler: &'c mut H,
    mode: &'c Mode,
    info: &'c Info<'c>,
    out: &'c mut W,
    session: &'c mut Session,
}

pub(crate) fn dispatch<'arg, I, H, W>(
    registry: &Registry<'_>,
    tokens: &mut Tokens<I>,
    handler: &mut H,
    mode: &Mode,
    info: &Info<'_>,
    out: &mut W,
    session: &mut Session,
) -> Result<(), ParseError>
where
    I: Iterator<Item = &'arg str>,
    H: Handler<'arg>,
    W: io::Write,
{
    let mut dispatcher = Dispatcher {
        registry,
        handler,
        mode,
        info,
        out,
        session,
    };

    while let Some((index, token)) = tokens.next_token() {
        tracing::trace!(index, ?token, "dispatching token");

        match token {
            Token::Long { name, inline } => dispatcher.long(name, inline, tokens)?,
            Token::Short(shorts) => dispatcher.shorts(shorts, tokens)?,
            Token::Positional(argument) => {
                dispatcher
                    .handler
                    .handle(Key::POSITIONAL, Some(argument), index)
            }
        }
    }

    Ok(())
}

impl<'arg, H, W> Dispatcher<'_, '_, '_, H, W>
where
    H: Handler<'arg>,
    W: io::Write,
{
    fn long<I>(
        &mut self,
        name: &str,
        inline: Option<&'arg str>,
        tokens: &mut Tokens<I>,
    ) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'arg str>,
    {
        let registry = self.registry;

        let Some(entry) = registry.get_by_long(name) else {
            return self.unknown(|| format!("--{name}"));
        };

        // Seen is seen, even in a form the option doesn't answer to
        if entry.flags().contains(Flag::NoLongKey) {
            tracing::debug!(option = name, "skipping option without a long form");
            self.session.passed.insert(entry.key());
            return Ok(());
        }

        self.invoke(entry, inline, tokens)
    }

    fn shorts<I>(&mut self, shorts: Shorts<'arg>, tokens: &mut Tokens<I>) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'arg str>,
    {
        let registry = self.registry;

        for short in shorts.chars() {
            let Some(entry) = registry.get_by_short(short) else {
                self.unknown(|| format!("-{short}"))?;
                continue;
            };

            if shorts.is_bundle() && !entry.arity().is_flag() {
                return Err(ParseError::NestedArity {
                    bundle: shorts.as_str().to_owned(),
                    option: entry.name(),
                });
            }

            self.invoke(entry, None, tokens)?;
        }

        Ok(())
    }

    /// An unrecognized option: fatal in strict mode, skipped otherwise
    fn unknown(&self, token: impl FnOnce() -> String) -> Result<(), ParseError> {
        let token = token();

        match self.mode.strict {
            true => Err(ParseError::UnknownOption { token }),
            false => {
                tracing::debug!(%token, "skipping unrecognized option");
                Ok(())
            }
        }
    }

    fn invoke<I>(
        &mut self,
        entry: &Entry<'_>,
        inline: Option<&'arg str>,
        tokens: &mut Tokens<I>,
    ) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'arg str>,
    {
        self.session.passed.insert(entry.key());

        match entry.builtin() {
            None => arity::consume(entry, inline, tokens, self.handler, self.session),
            Some(builtin) => {
                tracing::debug!(?builtin, "informational option requested");
                self.session.informational = true;

                arity::consume(entry, inline, tokens, &mut Discard, self.session)?;
                defaults::render(self.out, builtin, self.registry, self.info)?;

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionDescriptor;

    type Calls = Vec<(Key, Option<String>, usize)>;

    static TABLE: &[OptionDescriptor<'static>] = &[
        OptionDescriptor::new("where", Key::short('w'))
            .optional()
            .arity(1),
        OptionDescriptor::new("verbose", Key::short('v')).optional(),
        OptionDescriptor::new("Wall", Key::short('W')).optional(),
        OptionDescriptor::new("force", Key::short('f')).optional(),
        OptionDescriptor::new("files", Key::short('F'))
            .optional()
            .variadic(),
        OptionDescriptor::new("quiet", Key::short('q'))
            .optional()
            .no_long_key(),
        OptionDescriptor::new("vscode", Key::code(2))
            .optional()
            .no_char_key(),
    ];

    struct Run {
        result: Result<(), ParseError>,
        calls: Calls,
        session: Session,
        output: String,
    }

    fn run(mode: Mode, args: &[&str]) -> Run {
        let registry = Registry::new(TABLE).unwrap();
        let info = Info::new().version("v1.0");
        let mut tokens = Tokens::new(args.iter().copied());
        let mut session = Session::default();
        let mut calls = Calls::new();
        let mut out = Vec::new();
        let mut handler = |key: Key, argument: Option<&str>, index: usize| {
            calls.push((key, argument.map(str::to_owned), index));
        };

        let result = dispatch(
            &registry,
            &mut tokens,
            &mut handler,
            &mode,
            &info,
            &mut out,
            &mut session,
        );

        Run {
            result,
            calls,
            session,
            output: String::from_utf8(out).unwrap(),
        }
    }

    fn flag(key: char) -> (Key, Option<String>, usize) {
        (Key::short(key), None, 0)
    }

    #[test]
    fn bundle_dispatches_left_to_right() {
        let run = run(Mode::new(), &["-vWf"]);

        run.result.unwrap();
        assert_eq!(run.calls, [flag('v'), flag('W'), flag('f')]);
        assert!(run.session.passed.contains(&Key::short('W')));
    }

    #[test]
    fn bundle_rejects_arguments() {
        let run = run(Mode::new(), &["-vw", "proj"]);

        assert!(matches!(
            run.result,
            Err(ParseError::NestedArity { ref bundle, ref option })
                if bundle == "vw" && option.long == "where"
        ));
        assert_eq!(run.calls, [flag('v')]);
    }

    #[test]
    fn single_short_may_take_arguments() {
        let run = run(Mode::new(), &["-w", "proj", "-v"]);

        run.result.unwrap();
        assert_eq!(
            run.calls,
            [(Key::short('w'), Some("proj".to_owned()), 0), flag('v')]
        );
    }

    #[test]
    fn positionals_use_the_sentinel_key() {
        let run = run(Mode::new(), &["first", "-v", "second", "-"]);

        run.result.unwrap();
        assert_eq!(
            run.calls,
            [
                (Key::POSITIONAL, Some("first".to_owned()), 0),
                flag('v'),
                (Key::POSITIONAL, Some("second".to_owned()), 2),
                (Key::POSITIONAL, Some("-".to_owned()), 3),
            ]
        );
        assert!(!run.session.passed.contains(&Key::POSITIONAL));
    }

    #[test]
    fn variadic_hands_back_the_boundary() {
        let run = run(Mode::new(), &["--files", "a", "b", "-v", "c"]);

        run.result.unwrap();
        assert_eq!(
            run.calls,
            [
                (Key::short('F'), Some("a".to_owned()), 0),
                (Key::short('F'), Some("b".to_owned()), 1),
                flag('v'),
                (Key::POSITIONAL, Some("c".to_owned()), 4),
            ]
        );
    }

    #[test]
    fn inline_long_argument() {
        let run = run(Mode::new(), &["--where=proj"]);

        run.result.unwrap();
        assert_eq!(run.calls, [(Key::short('w'), Some("proj".to_owned()), 0)]);
    }

    #[test]
    fn unknown_options_are_skipped_when_lenient() {
        let run = run(Mode::new(), &["--nope", "-xv", "--"]);

        run.result.unwrap();
        assert_eq!(run.calls, [flag('v')]);
    }

    #[test]
    fn unknown_options_are_fatal_when_strict() {
        let run_long = run(Mode::new().strict(true), &["--nope"]);
        assert!(matches!(
            run_long.result,
            Err(ParseError::UnknownOption { ref token }) if token == "--nope"
        ));

        let run_short = run(Mode::new().strict(true), &["-vx"]);
        assert!(matches!(
            run_short.result,
            Err(ParseError::UnknownOption { ref token }) if token == "-x"
        ));
        assert_eq!(run_short.calls, [flag('v')]);
    }

    #[test]
    fn no_long_key_is_skipped() {
        let run = run(Mode::new().strict(true), &["--quiet", "-q"]);

        run.result.unwrap();
        assert_eq!(run.calls, [flag('q')]);
    }

    #[test]
    fn no_long_key_still_counts_as_passed() {
        let run = run(Mode::new(), &["--quiet"]);

        run.result.unwrap();
        assert!(run.calls.is_empty());
        assert!(run.session.passed.contains(&Key::short('q')));
    }

    #[test]
    fn no_char_key_is_long_only() {
        let run = run(Mode::new(), &["--vscode"]);

        run.result.unwrap();
        assert_eq!(run.calls, [(Key::code(2), None, 0)]);
    }

    #[test]
    fn builtins_render_instead_of_calling_back() {
        let run = run(Mode::new(), &["--version", "-v"]);

        run.result.unwrap();
        assert_eq!(run.output, "v1.0\n");
        assert_eq!(run.calls, [flag('v')]);
        assert!(run.session.informational);
    }
}
