use core::fmt::Display;
use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use lazy_format::lazy_format;

use crate::{
    Flag,
    registry::{Entry, Registry},
};

/// Help lines wrap at this many columns, counting the section indent
const WIDTH: usize = 80;
const INDENT: &str = "  ";

/*
Overall structure:

USAGE BANNER

Options:
  --help: Shows this help menu [0]
  -w (--where): Where to create the project [1]
  -o (--output): alias of --where [1]
  --vscode: Generate a .vscode folder [0]
  -F: Input files, printed wrapped if they run past
      the right margin [n]
 */
pub fn print_help(
    out: &mut impl io::Write,
    registry: &Registry<'_>,
    usage: Option<&str>,
) -> io::Result<()> {
    if let Some(usage) = usage {
        writeln!(out, "{usage}\n")?;
    }

    let visible = registry
        .entries()
        .iter()
        .filter(|entry| !entry.flags().contains(Flag::Hidden));

    maybe_section(out, "Options", visible, |out, entry| {
        let line = help_line(entry).to_string();
        let options = textwrap::Options::new(WIDTH - INDENT.len()).subsequent_indent("    ");

        writeln!(out, "{}", textwrap::fill(&line, options))
    })
}

/// `-k (--long): description [arity]`, with the forms the option doesn't
/// have (and an empty description) left out
fn help_line(entry: &Entry<'_>) -> impl Display {
    let tags = lazy_format!(match ((entry.short(), entry.long())) {
        (Some(short), Some(long)) => "-{short} (--{long})",
        (None, Some(long)) => "--{long}",
        (Some(short), None) => "-{short}",
        (None, None) => ("({long})", long = entry.long_name()),
    });

    let description = lazy_format!(match ((entry.alias_of(), entry.description())) {
        (Some(parent), _) => " alias of --{parent}",
        (None, "") => "",
        (None, description) => " {description}",
    });

    let arity = entry.arity();

    lazy_format!("{tags}:{description} [{arity}]")
}

/// Write a section: the `header`, then an indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "{header}:")?;
    let value = body(IndentWriter::new(INDENT, out))?;

    Ok(value)
}

/// Write an optional section, only if the iterator is not empty.
/// Otherwise identical to `section`.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => section(out, header, |mut out| {
            body(&mut out, first)?;
            items.try_for_each(|item| body(&mut out, item))
        }),
    }
}
