//! Console I/O seam between the interpreter and its host.
//!
//! The interpreter never touches a terminal itself. Everything `AFFICHER`
//! prints and everything `LIRE` reads goes through a [`Console`]. Errors
//! returned by a console abort the run as `RuntimeError::Console`, which is
//! how a host cancels a program blocked on input.

use std::io::{self, BufRead, IsTerminal, Write};

pub trait Console {
    /// Emits one line of program output. `text` already ends with `'\n'`.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Asks for one line of input. The answer carries no line terminator.
    fn input(&mut self, prompt: &str) -> io::Result<String>;
}

/// Adapts a pair of closures to [`Console`].
pub struct Callbacks<P, I> {
    pub print: P,
    pub input: I,
}

impl<P, I> Console for Callbacks<P, I>
where
    P: FnMut(&str) -> io::Result<()>,
    I: FnMut(&str) -> io::Result<String>,
{
    fn print(&mut self, text: &str) -> io::Result<()> {
        (self.print)(text)
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        (self.input)(prompt)
    }
}

/// Standard output and standard input. When stdin is not a terminal the
/// answer is echoed after the prompt so transcripts read `Variable N = 5`.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        {
            let mut out = io::stdout().lock();
            out.write_all(prompt.as_bytes())?;
            out.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        if !io::stdin().is_terminal() {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", line)?;
            out.flush()?;
        }
        Ok(line)
    }
}

/// Discards output and has no input to offer. Used when evaluating a lone
/// expression outside of any program.
#[derive(Debug, Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn print(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn input(&mut self, _prompt: &str) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no input available"))
    }
}
