use std::ops::RangeInclusive;

/// One flag per gallery item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    flags: Vec<bool>,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Flips one flag and returns its new value, `None` past the end.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flag = self.flags.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Flips every flag in the range; indices past the end are ignored.
    pub fn toggle_range(&mut self, range: RangeInclusive<usize>) {
        let (start, end) = range.into_inner();
        let end = end.min(self.flags.len().saturating_sub(1));
        if self.flags.is_empty() || start > end {
            return;
        }
        for flag in &mut self.flags[start..=end] {
            *flag = !*flag;
        }
    }

    pub fn clear(&mut self) {
        self.flags.fill(false);
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(index, flag)| flag.then_some(index))
            .collect()
    }
}
