use crate::foundation::{
    core::Rgb8,
    error::{SeqgifError, SeqgifResult},
};

/// Ordered, duplicate-free RGB lookup table of an indexed raster.
///
/// The index of an entry is its insertion position. Capacity is capped at
/// [`ColorTable::CAPACITY`] so every index fits in a `u8` and in a GIF palette.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Rgb8>,
}

impl ColorTable {
    pub const CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from distinct colors, in order.
    pub fn from_colors(colors: impl IntoIterator<Item = Rgb8>) -> SeqgifResult<Self> {
        let mut table = Self::new();
        for c in colors {
            if table.position(c).is_some() {
                return Err(SeqgifError::validation(format!(
                    "duplicate color table entry {c:?}"
                )));
            }
            if table.push_unique(c).is_none() {
                return Err(SeqgifError::validation(format!(
                    "color table exceeds {} entries",
                    Self::CAPACITY
                )));
            }
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= Self::CAPACITY
    }

    pub fn get(&self, index: u8) -> Option<Rgb8> {
        self.entries.get(usize::from(index)).copied()
    }

    pub fn entries(&self) -> &[Rgb8] {
        &self.entries
    }

    /// Index of the entry exactly equal to `color`, if any.
    pub fn position(&self, color: Rgb8) -> Option<u8> {
        self.entries
            .iter()
            .position(|&c| c == color)
            .map(|i| i as u8)
    }

    /// Append `color` unless it is already present. Returns the entry index, or `None` when
    /// the color is new and the table is full.
    pub fn push_unique(&mut self, color: Rgb8) -> Option<u8> {
        if let Some(i) = self.position(color) {
            return Some(i);
        }
        if self.is_full() {
            return None;
        }
        self.entries.push(color);
        Some((self.entries.len() - 1) as u8)
    }

    /// Entry with the smallest RGB distance to `target`. The first minimum wins.
    pub fn nearest(&self, target: Rgb8) -> Option<u8> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &c) in self.entries.iter().enumerate() {
            let d = c.distance_sq(target);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i as u8)
    }
}

/// Resolve `target` to an index in `table`, growing it only when needed.
///
/// 1. an exact entry is reused as-is;
/// 2. a full table answers with its nearest entry (the table is left untouched);
/// 3. otherwise `target` is appended.
///
/// The table is always owned by a single raster; callers never share one across frames.
pub fn resolve(table: &mut ColorTable, target: Rgb8) -> u8 {
    if let Some(i) = table.position(target) {
        return i;
    }
    if table.is_full() {
        // A full table is never empty, so `nearest` always finds an entry.
        return table.nearest(target).unwrap_or(0);
    }
    table.push_unique(target).unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/palette.rs"]
mod tests;
