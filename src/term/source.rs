use crate::error;
use crate::lang::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Deepest nesting of LOAD inside loaded files.
const MAX_SOURCES: usize = 32;

/// ## Stacked input sources
///
/// Loaded files are read before the console. When a file runs out
/// it is dropped and reading falls through to the one below it.
#[derive(Default)]
pub struct Sources {
    stack: Vec<(String, Box<dyn BufRead>)>,
}

impl Sources {
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push<R: BufRead + 'static>(&mut self, name: &str, reader: R) -> Result<()> {
        if self.stack.len() >= MAX_SOURCES {
            return Err(error!(OutOfMemory; "TOO MANY OPEN FILES"));
        }
        debug!(name, depth = self.stack.len() + 1, "push source");
        self.stack.push((name.to_string(), Box::new(reader)));
        Ok(())
    }

    pub fn push_file(&mut self, filename: &str) -> Result<()> {
        match File::open(filename) {
            Ok(file) => self.push(filename, BufReader::new(file)),
            Err(error) => {
                let msg = error.to_string().to_uppercase();
                match error.kind() {
                    ErrorKind::NotFound => Err(error!(FileNotFound; msg)),
                    _ => Err(error!(InternalError; msg)),
                }
            }
        }
    }

    /// Next line from the topmost source without its line ending.
    /// Each byte is one character. `None` means every source is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        while let Some((name, reader)) = self.stack.last_mut() {
            let mut bytes = vec![];
            match reader.read_until(b'\n', &mut bytes) {
                Ok(0) => {
                    debug!(name = name.as_str(), "end of source");
                    self.stack.pop();
                }
                Ok(_) => {
                    let s: String = bytes.iter().map(|&b| char::from(b)).collect();
                    return Ok(Some(s.trim_end_matches(|c| c == '\n' || c == '\r').to_string()));
                }
                Err(error) => {
                    self.stack.pop();
                    return Err(error!(InternalError; error.to_string().to_uppercase()));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_falls_through_at_end_of_file() {
        let mut sources = Sources::default();
        sources
            .push("outer", Cursor::new("10 PRINT 1\r\n20 END\n"))
            .unwrap();
        assert_eq!(sources.read_line().unwrap().unwrap(), "10 PRINT 1");
        sources.push("inner", Cursor::new("5 REM")).unwrap();
        assert_eq!(sources.read_line().unwrap().unwrap(), "5 REM");
        assert_eq!(sources.read_line().unwrap().unwrap(), "20 END");
        assert!(!sources.is_empty());
        assert_eq!(sources.read_line().unwrap(), None);
        assert!(sources.is_empty());
    }

    #[test]
    fn test_single_byte_characters_keep_the_source() {
        let mut sources = Sources::default();
        sources
            .push("latin", Cursor::new(&b"10 REM CAF\xE9\n20 PRINT 1\n30 END\n"[..]))
            .unwrap();
        assert_eq!(sources.read_line().unwrap().unwrap(), "10 REM CAF\u{e9}");
        assert_eq!(sources.read_line().unwrap().unwrap(), "20 PRINT 1");
        assert_eq!(sources.read_line().unwrap().unwrap(), "30 END");
        assert_eq!(sources.read_line().unwrap(), None);
    }

    #[test]
    fn test_missing_file() {
        let mut sources = Sources::default();
        let e = sources
            .push_file("/nonexistent/surely/not/here.bas")
            .unwrap_err();
        assert_eq!(e.code(), 53);
        assert!(sources.is_empty());
    }

    #[test]
    fn test_nesting_limit() {
        let mut sources = Sources::default();
        for _ in 0..MAX_SOURCES {
            sources.push("f", Cursor::new("")).unwrap();
        }
        assert!(sources.push("f", Cursor::new("")).is_err());
    }
}
