use crate::lang::{Line, LineNumber, MaxValue};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// ## Program store
///
/// Lines ordered by line number. Lines are shared so the runtime can
/// hold the one it is executing while the store changes underneath.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: BTreeMap<u16, Arc<Line>>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Replaces any line with the same number. Direct lines are refused.
    pub fn insert(&mut self, line: Line) -> Option<Arc<Line>> {
        let number = line.number()?;
        self.source.insert(number, Arc::new(line))
    }

    pub fn remove(&mut self, number: u16) -> Option<Arc<Line>> {
        self.source.remove(&number)
    }

    pub fn get(&self, number: u16) -> Option<&Arc<Line>> {
        self.source.get(&number)
    }

    pub fn first(&self) -> Option<u16> {
        self.source.keys().next().copied()
    }

    /// The line number that follows `number` in program order.
    pub fn after(&self, number: u16) -> Option<u16> {
        self.source
            .range((Excluded(number), Unbounded))
            .next()
            .map(|(n, _)| *n)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Arc<Line>> {
        self.source.values()
    }

    pub fn range(&self, range: RangeInclusive<u16>) -> impl Iterator<Item = &Arc<Line>> {
        self.source.range(range).map(|(_, line)| line)
    }

    /// Text of one line, used to complete a typed line number.
    pub fn line(&self, num: usize) -> Option<String> {
        if num > LineNumber::max_value() as usize {
            return None;
        }
        self.get(num as u16).map(|line| line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(lines: &[&str]) -> Listing {
        let mut listing = Listing::default();
        for s in lines {
            listing.insert(Line::parse(s).unwrap());
        }
        listing
    }

    #[test]
    fn test_ordered_regardless_of_insertion() {
        let listing = listing(&["30 END", "10 PRINT 1", "20 PRINT 2", "5 REM"]);
        let text: Vec<String> = listing.lines().map(|l| l.to_string()).collect();
        assert_eq!(text, vec!["5 REM", "10 PRINT 1", "20 PRINT 2", "30 END"]);
        assert_eq!(listing.first(), Some(5));
        assert_eq!(listing.after(10), Some(20));
        assert_eq!(listing.after(30), None);
    }

    #[test]
    fn test_replace() {
        let listing = listing(&["10 PRINT 1 : PRINT 2", "10 END"]);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.line(10), Some("10 END".to_string()));
    }

    #[test]
    fn test_direct_lines_are_refused() {
        let mut listing = Listing::default();
        assert!(listing.insert(Line::parse("PRINT").unwrap()).is_none());
        assert!(listing.is_empty());
    }
}
