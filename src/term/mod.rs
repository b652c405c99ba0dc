extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Listing, Runtime};
use crate::{error, lang::Error};
use ansi_term::Style;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Signal, Terminal};
use std::fs::File;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod source;
pub use source::Sources;

/// Environment variable holding the log filter, e.g. `BASIC_LOG=debug`.
pub const LOG_ENV: &str = "BASIC_LOG";

pub fn main() {
    init_logging();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl-C handler: {}", error);
    }
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = match std::env::var(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => return,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let mut runtime = Runtime::default();
    let mut sources = Sources::default();
    let mut entered = String::new();
    let command = Interface::new("BASIC")?;
    let input = Interface::new("Input")?;
    input.set_report_signal(Signal::Interrupt, true);
    command.write_fmt(format_args!("BASIC\nREADY.\n"))?;

    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000) {
            Event::Stopped => {
                let string = match sources.read_line() {
                    Ok(Some(string)) => string,
                    Ok(None) => {
                        let saved_completer = command.completer();
                        command.set_completer(Arc::new(LineCompleter::new(runtime.get_listing())));
                        let string = match command.read_line()? {
                            ReadResult::Input(string) => string,
                            ReadResult::Signal(_) | ReadResult::Eof => break,
                        };
                        command.set_completer(saved_completer);
                        string
                    }
                    Err(error) => {
                        report(&command, &error)?;
                        continue;
                    }
                };
                if runtime.enter(&string) && sources.is_empty() {
                    command.add_history_unique(string.clone());
                }
                entered = string;
            }
            Event::Input(prompt) => {
                let string = match sources.read_line() {
                    Ok(Some(string)) => string,
                    Ok(None) => {
                        input.set_prompt(&prompt)?;
                        match input.read_line()? {
                            ReadResult::Input(string) => string,
                            ReadResult::Signal(Signal::Interrupt) => {
                                input.set_buffer("")?;
                                input.lock_reader().cancel_read_line()?;
                                runtime.interrupt();
                                continue;
                            }
                            ReadResult::Signal(_) | ReadResult::Eof => break,
                        }
                    }
                    Err(error) => {
                        report(&command, &error)?;
                        runtime.interrupt();
                        continue;
                    }
                };
                runtime.enter(&string);
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    let column = error.column();
                    if !column.is_empty() && column.end <= entered.chars().count() + 1 {
                        command.write_fmt(format_args!(
                            "{}\n",
                            decorate_list(&entered, &[column])
                        ))?;
                    }
                    report(&command, error)?;
                }
            }
            Event::Running => {}
            Event::Print(s) => {
                command.write_fmt(format_args!("{}", s))?;
            }
            Event::List(s) => {
                command.write_fmt(format_args!("{}\n", s))?;
            }
            Event::Load(s) => {
                debug!(file = s.as_str(), "load");
                if let Err(error) = sources.push_file(&s) {
                    report(&command, &error)?;
                }
            }
            Event::Save(s) => {
                debug!(file = s.as_str(), "save");
                if let Err(error) = save(&runtime.get_listing(), &s) {
                    report(&command, &error)?;
                }
            }
            Event::Cls => {
                command.write_fmt(format_args!("\x1b[2J\x1b[H"))?;
            }
            Event::Bye => break,
        }
    }
    Ok(())
}

fn report<T: Terminal>(command: &Interface<T>, error: &Error) -> std::io::Result<()> {
    command.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(format!("?{}", error))
    ))
}

struct LineCompleter {
    listing: Listing,
}

impl LineCompleter {
    fn new(listing: Listing) -> LineCompleter {
        LineCompleter { listing }
    }
}

impl<Term: Terminal> Completer<Term> for LineCompleter {
    fn complete(
        &self,
        _word: &str,
        prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        if let Ok(num) = prompter.buffer().parse::<usize>() {
            if let Some(s) = self.listing.line(num) {
                let mut comp = Completion::simple(s);
                comp.suffix = linefeed::complete::Suffix::None;
                return Some(vec![comp]);
            }
        }
        None
    }
}

/// Underline the given columns of `ins`. A column just past the end
/// underlines a trailing space.
fn decorate_list(ins: &str, columns: &[std::ops::Range<usize>]) -> String {
    let mut under_on = false;
    let mut out = String::new();
    let style = Style::new().underline();
    let prefix = format!("{}", style.prefix());
    let suffix = format!("{}", style.suffix());
    let mut index = 0;
    for char in ins.chars() {
        let do_under = columns.iter().any(|c| c.contains(&index));
        if under_on {
            if !do_under {
                out.push_str(&suffix);
            }
        } else if do_under {
            out.push_str(&prefix);
        }
        under_on = do_under;
        out.push(char);
        index += 1;
    }
    if columns.iter().any(|c| c.start == index) {
        under_on = true;
        out.push_str(&prefix);
        out.push(' ');
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}

/// Write the program as LIST shows it, replacing any existing file.
pub fn save(listing: &Listing, filename: &str) -> Result<(), Error> {
    let mut file = match File::create(filename) {
        Ok(file) => file,
        Err(error) => return Err(error!(InternalError; error.to_string().to_uppercase())),
    };
    for line in listing.lines() {
        if let Err(error) = writeln!(file, "{}", line) {
            return Err(error!(InternalError; error.to_string().to_uppercase()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_list_underlines_column() {
        let s = decorate_list("PRINT )", &[6..7]);
        let style = Style::new().underline();
        assert_eq!(s, format!("PRINT {}){}", style.prefix(), style.suffix()));
        assert_eq!(decorate_list("AB", &[]), "AB");
    }

    #[test]
    fn test_save_then_load_through_sources() {
        let mut runtime = Runtime::default();
        runtime.enter("20 PRINT \"B\"");
        runtime.enter("10 print 1;2");
        let path = std::env::temp_dir().join(format!("basic-save-{}.bas", std::process::id()));
        let filename = path.to_string_lossy().to_string();
        save(&runtime.get_listing(), &filename).unwrap();
        let mut sources = Sources::default();
        sources.push_file(&filename).unwrap();
        assert_eq!(sources.read_line().unwrap().unwrap(), "10 PRINT 1; 2");
        assert_eq!(sources.read_line().unwrap().unwrap(), "20 PRINT \"B\"");
        assert_eq!(sources.read_line().unwrap(), None);
        std::fs::remove_file(&path).unwrap();
    }
}
