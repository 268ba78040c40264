use core::fmt::Display;
use std::{io, process};

use crate::{Mode, OnError, Stream};

/// Deal with a fatal error according to the mode: hand it back under
/// [`OnError::Return`], or print it and end the process under
/// [`OnError::Exit`].
pub(crate) fn fail<T, E: Display>(mode: &Mode, error: E) -> Result<T, E> {
    match mode.on_error {
        OnError::Return => Err(error),
        OnError::Exit => {
            // The process is about to end; a failed write has nowhere to go.
            let _ = match mode.stream {
                Stream::Stdout => write_error(&mut io::stdout().lock(), &error),
                Stream::Stderr => write_error(&mut io::stderr().lock(), &error),
            };

            process::exit(1)
        }
    }
}

fn write_error(out: &mut impl io::Write, error: &impl Display) -> io::Result<()> {
    writeln!(out, "error: {error}")?;
    out.flush()
}
