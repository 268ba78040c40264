/*!
Arity enforcement: pulls the right number of trailing arguments for one
resolved option and hands each of them to the handler.
*/

use cmdf_parser::Tokens;

use crate::{
    dispatch::{Outstanding, Session},
    errors::ParseError,
    handler::Handler,
    registry::{Arity, Entry},
};

/// The next argument for the current option: the inline `--long=value`
/// argument first, then following tokens up to the next option.
fn next_argument<'arg, I>(inline: &mut Option<&'arg str>, tokens: &mut Tokens<I>) -> Option<&'arg str>
where
    I: Iterator<Item = &'arg str>,
{
    inline.take().or_else(|| tokens.take_argument())
}

/**
Consume the arguments of `entry`, which was just seen on the command line
(possibly with an `inline` argument), calling `handler` for each.

An option token is never consumed; it stays in `tokens` for the dispatcher.
Running out of input partway through a fixed-arity option isn't an error
yet: the shortage is recorded in the session and reported by the validator.
*/
pub(crate) fn consume<'arg, I, H>(
    entry: &Entry<'_>,
    mut inline: Option<&'arg str>,
    tokens: &mut Tokens<I>,
    handler: &mut H,
    session: &mut Session,
) -> Result<(), ParseError>
where
    I: Iterator<Item = &'arg str>,
    H: Handler<'arg>,
{
    let key = entry.key();

    match entry.arity() {
        Arity::Flag => match inline {
            Some(_) => Err(ParseError::TooManyArguments {
                option: entry.name(),
                expected: 0,
            }),
            None => {
                handler.handle(key, None, 0);
                Ok(())
            }
        },
        Arity::Variadic => {
            let mut count = 0;

            while let Some(argument) = next_argument(&mut inline, tokens) {
                handler.handle(key, Some(argument), count);
                count += 1;
            }

            match count {
                0 => Err(ParseError::MissingArgument {
                    option: entry.name(),
                }),
                _ => Ok(()),
            }
        }
        Arity::Exactly(expected) => {
            let expected = expected.get();
            let mut count = 0;

            while count < expected {
                let Some(argument) = next_argument(&mut inline, tokens) else {
                    break;
                };

                handler.handle(key, Some(argument), count);
                count += 1;
            }

            if count < expected {
                if tokens.is_exhausted() {
                    session.outstanding = Some(Outstanding {
                        option: entry.name(),
                        expected,
                        got: count,
                    });
                    Ok(())
                } else {
                    Err(ParseError::TooFewArguments {
                        option: entry.name(),
                        expected,
                        got: count,
                    })
                }
            } else if tokens.has_argument() {
                Err(ParseError::TooManyArguments {
                    option: entry.name(),
                    expected,
                })
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Key, OptionDescriptor, Registry};

    type Calls = Vec<(Key, Option<String>, usize)>;

    /// Run the consumer for option `-x` with `arity`, as if `-x` had just
    /// been read from the front of `args`
    fn run(
        arity: i32,
        inline: Option<&str>,
        args: &[&str],
    ) -> (Result<(), ParseError>, Calls, Session, usize) {
        let table = [OptionDescriptor::new("x", Key::short('x')).arity(arity)];
        let registry = Registry::without_defaults(&table).unwrap();
        let entry = registry.get_by_key(Key::short('x')).unwrap();

        let mut tokens = Tokens::new(args.iter().copied());
        let mut session = Session::default();
        let mut calls = Calls::new();
        let mut handler = |key: Key, argument: Option<&str>, index: usize| {
            calls.push((key, argument.map(str::to_owned), index));
        };

        let result = consume(entry, inline, &mut tokens, &mut handler, &mut session);
        let position = tokens.position();

        (result, calls, session, position)
    }

    fn call(argument: &str, index: usize) -> (Key, Option<String>, usize) {
        (Key::short('x'), Some(argument.to_owned()), index)
    }

    #[test]
    fn flag_takes_nothing() {
        let (result, calls, _, position) = run(0, None, &["value"]);

        result.unwrap();
        assert_eq!(calls, [(Key::short('x'), None, 0)]);
        assert_eq!(position, 0);
    }

    #[test]
    fn flag_rejects_inline_argument() {
        let (result, calls, _, _) = run(0, Some("value"), &[]);

        assert!(matches!(
            result,
            Err(ParseError::TooManyArguments { expected: 0, .. })
        ));
        assert!(calls.is_empty());
    }

    #[test]
    fn variadic_stops_at_option() {
        let (result, calls, _, position) = run(-1, None, &["a", "b", "c", "-v", "d"]);

        result.unwrap();
        assert_eq!(calls, [call("a", 0), call("b", 1), call("c", 2)]);
        assert_eq!(position, 3);
    }

    #[test]
    fn variadic_needs_one_argument() {
        let (result, calls, _, position) = run(-1, None, &["-v"]);

        assert!(matches!(result, Err(ParseError::MissingArgument { .. })));
        assert!(calls.is_empty());
        assert_eq!(position, 0);

        let (result, _, _, _) = run(-1, None, &[]);
        assert!(matches!(result, Err(ParseError::MissingArgument { .. })));
    }

    #[test]
    fn variadic_with_inline_argument() {
        let (result, calls, _, _) = run(-1, Some("a"), &["b"]);

        result.unwrap();
        assert_eq!(calls, [call("a", 0), call("b", 1)]);
    }

    #[test]
    fn exact_arity() {
        let (result, calls, session, position) = run(2, None, &["a", "b", "-v"]);

        result.unwrap();
        assert_eq!(calls, [call("a", 0), call("b", 1)]);
        assert!(session.outstanding.is_none());
        assert_eq!(position, 2);
    }

    #[test]
    fn exact_arity_too_few_before_option() {
        let (result, calls, _, _) = run(3, None, &["a", "-v"]);

        assert!(matches!(
            result,
            Err(ParseError::TooFewArguments {
                expected: 3,
                got: 1,
                ..
            })
        ));
        assert_eq!(calls, [call("a", 0)]);
    }

    #[test]
    fn exact_arity_too_few_at_end_is_deferred() {
        let (result, _, session, _) = run(3, None, &["a"]);

        result.unwrap();
        let outstanding = session.outstanding.unwrap();
        assert_eq!((outstanding.expected, outstanding.got), (3, 1));
    }

    #[test]
    fn exact_arity_too_many() {
        let (result, calls, _, position) = run(1, None, &["a", "b"]);

        assert!(matches!(
            result,
            Err(ParseError::TooManyArguments { expected: 1, .. })
        ));
        assert_eq!(calls, [call("a", 0)]);
        assert_eq!(position, 1);
    }

    #[test]
    fn exact_arity_with_inline_argument() {
        let (result, calls, _, _) = run(2, Some("a"), &["b", "--next"]);

        result.unwrap();
        assert_eq!(calls, [call("a", 0), call("b", 1)]);
    }
}
