use std::fmt;

/// A half-open residue interval `[start, end)` produced by fragmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
}

impl Fragment {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Number of residues shared with a fragment that starts at or after this one.
    pub fn overlap_with(&self, next: &Fragment) -> usize {
        self.end.saturating_sub(next.start)
    }

    /// 1-based, inclusive residue numbers as reported to users.
    pub fn one_based(&self) -> (usize, usize) {
        (self.start + 1, self.end)
    }
}

impl From<(usize, usize)> for Fragment {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
