//! Complementary color lookup
//!
//! A fixed table from a color to the colors that pair well with it. Filter
//! broadening and scoring both read this one table.

use crate::vocabulary::ColorLabel;
use std::collections::BTreeSet;

use ColorLabel::*;

static COMPLEMENTS: [(ColorLabel, [ColorLabel; 3]); 12] = [
    (Red, [Gold, Green, White]),
    (Blue, [Silver, White, Gold]),
    (Green, [Gold, Red, White]),
    (Yellow, [Blue, Purple, Silver]),
    (Orange, [Blue, Teal, Gold]),
    (Purple, [Yellow, Gold, Silver]),
    (Pink, [Green, Gold, Silver]),
    (Black, [Gold, Silver, White]),
    (White, [Gold, Silver, Black]),
    (Gray, [Gold, Silver, Blue]),
    (Gold, [Red, Green, Blue]),
    (Silver, [Blue, Purple, Black]),
];

/// Read-only view over the complementary color table
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplementarityTable;

impl ComplementarityTable {
    /// Complements of a single color; empty for colors without an entry
    pub fn complements(color: ColorLabel) -> &'static [ColorLabel] {
        COMPLEMENTS
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, complements)| complements.as_slice())
            .unwrap_or(&[])
    }

    /// Union of the complements of every given color
    pub fn complements_of<'a, I>(colors: I) -> BTreeSet<ColorLabel>
    where
        I: IntoIterator<Item = &'a ColorLabel>,
    {
        colors
            .into_iter()
            .flat_map(|c| Self::complements(*c).iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_complements() {
        let expected: BTreeSet<_> = [Gold, Green, White].into_iter().collect();
        assert_eq!(ComplementarityTable::complements_of(&[Red]), expected);
    }

    #[test]
    fn test_empty_input() {
        let none: [ColorLabel; 0] = [];
        assert!(ComplementarityTable::complements_of(&none).is_empty());
    }

    #[test]
    fn test_unlisted_colors_have_no_complements() {
        assert!(ComplementarityTable::complements(Teal).is_empty());
        assert!(ComplementarityTable::complements(Neutral).is_empty());
    }

    #[test]
    fn test_union_is_deduplicated() {
        let set = ComplementarityTable::complements_of(&[Red, Green]);
        let expected: BTreeSet<_> = [Gold, Green, White, Red].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_table_has_twelve_entries() {
        let with_entries = ColorLabel::ALL
            .iter()
            .filter(|c| !ComplementarityTable::complements(**c).is_empty())
            .count();
        assert_eq!(with_entries, 12);
    }
}
