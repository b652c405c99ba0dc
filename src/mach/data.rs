use super::Val;
use crate::error;
use crate::lang::{Error, LineNumber};
use std::collections::BTreeSet;

type Result<T> = std::result::Result<T, Error>;

/// ## DATA literal pool
///
/// Records keep the line they came from so `RESTORE` can find them.
#[derive(Debug, Default)]
pub struct DataBank {
    records: Vec<(LineNumber, Val)>,
    lines: BTreeSet<LineNumber>,
    cursor: usize,
}

impl DataBank {
    pub fn clear(&mut self) {
        self.records.clear();
        self.lines.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A line already in the pool is not added twice.
    pub fn append(&mut self, line: LineNumber, items: &[String]) {
        if !self.lines.insert(line) {
            return;
        }
        self.records
            .extend(items.iter().map(|s| (line, Val::new(s.as_str()))));
    }

    pub fn read(&mut self) -> Result<Val> {
        match self.records.get(self.cursor) {
            Some((_, val)) => {
                self.cursor += 1;
                Ok(val.clone())
            }
            None => Err(error!(OutOfData)),
        }
    }

    pub fn restore(&mut self, line: LineNumber) -> Result<()> {
        if line.is_none() {
            self.cursor = 0;
            return Ok(());
        }
        match self.records.iter().position(|(ln, _)| *ln == line) {
            Some(index) => {
                self.cursor = index;
                Ok(())
            }
            None => Err(error!(UndefinedLine; "NO DATA IN LINE")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_append_is_idempotent_per_line() {
        let mut data = DataBank::default();
        data.append(Some(10), &items(&["1", "2"]));
        data.append(Some(10), &items(&["1", "2"]));
        data.append(Some(20), &items(&["3"]));
        assert_eq!(data.len(), 3);
        data.clear();
        data.append(Some(10), &items(&["4"]));
        assert_eq!(data.read().unwrap(), Val::from("4"));
    }

    #[test]
    fn test_read_and_restore() {
        let mut data = DataBank::default();
        data.append(Some(10), &items(&["1", "2"]));
        data.append(Some(20), &items(&["HELLO"]));
        assert_eq!(data.read().unwrap(), Val::from("1"));
        data.restore(Some(20)).unwrap();
        assert_eq!(data.read().unwrap(), Val::from("HELLO"));
        assert_eq!(data.read().unwrap_err().to_string(), "OUT OF DATA");
        data.restore(None).unwrap();
        assert_eq!(data.read().unwrap(), Val::from("1"));
        assert!(data.restore(Some(30)).is_err());
    }
}
