use std::ops::{Index, IndexMut, RangeInclusive};

/// Calendar months in order.
pub const MONTHS: RangeInclusive<u32> = 1..=12;

/// One value per calendar month, indexed by month number (1-12).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthArray<T>([T; 12]);

impl<T> MonthArray<T> {
    pub fn from_fn(mut f: impl FnMut(u32) -> T) -> Self {
        Self(std::array::from_fn(|idx| f(idx as u32 + 1)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        MONTHS.zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }
}

impl<T: Default> Default for MonthArray<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

/// Panics when `month` is outside 1-12, like slice indexing.
impl<T> Index<u32> for MonthArray<T> {
    type Output = T;

    fn index(&self, month: u32) -> &T {
        &self.0[slot(month)]
    }
}

impl<T> IndexMut<u32> for MonthArray<T> {
    fn index_mut(&mut self, month: u32) -> &mut T {
        &mut self.0[slot(month)]
    }
}

fn slot(month: u32) -> usize {
    assert!(MONTHS.contains(&month), "month out of range: {month}");
    (month - 1) as usize
}
