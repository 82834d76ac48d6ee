use crate::Warning;
use std::fmt;

/// Birth/survival rule of a life-like automaton.
///
/// Both sets are stored as bitmasks over neighbor counts `0..=8`:
/// bit `n` is set when a count of `n` triggers the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleTable {
    born: u16,
    survives: u16,
}

impl RuleTable {
    /// Conway's Game of Life, the fallback for unknown names.
    pub const CONWAY: Self = Self::new(&[3], &[2, 3]);

    const CATALOG: [(&'static str, RuleTable); 6] = [
        ("B3/S23", Self::CONWAY),
        ("B6/S16", Self::new(&[6], &[1, 6])),
        ("B1/S12", Self::new(&[1], &[1, 2])),
        ("B36/S23", Self::new(&[3, 6], &[2, 3])),
        ("B2/S3", Self::new(&[2], &[3])),
        ("B2/S", Self::new(&[2], &[])),
    ];

    /// Builds a table from explicit neighbor counts. Counts above 8 are ignored.
    pub const fn new(born: &[u8], survives: &[u8]) -> Self {
        const fn mask(counts: &[u8]) -> u16 {
            let mut result = 0;
            let mut i = 0;
            while i < counts.len() {
                if counts[i] <= 8 {
                    result |= 1 << counts[i];
                }
                i += 1;
            }
            result
        }

        Self {
            born: mask(born),
            survives: mask(survives),
        }
    }

    /// Looks up a catalog entry by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATALOG
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|&(_, table)| table)
    }

    /// Same as [`RuleTable::from_name`], but an unknown name is reported
    /// with a warning and replaced by B3/S23.
    pub fn lookup(name: &str) -> Self {
        Self::resolve(name).0
    }

    /// Looks up `name`, falling back to B3/S23 with a logged [`Warning`].
    pub(crate) fn resolve(name: &str) -> (Self, Option<Warning>) {
        match Self::from_name(name) {
            Some(table) => (table, None),
            None => {
                let warning = Warning::UnknownRule {
                    name: name.to_owned(),
                };
                log::warn!("{warning}");
                (Self::CONWAY, Some(warning))
            }
        }
    }

    /// Names of all supported variants, default first.
    pub fn catalog() -> impl Iterator<Item = &'static str> {
        Self::CATALOG.iter().map(|(name, _)| *name)
    }

    #[inline]
    pub fn is_born(&self, neighbors: u8) -> bool {
        neighbors <= 8 && (self.born >> neighbors) & 1 == 1
    }

    #[inline]
    pub fn survives(&self, neighbors: u8) -> bool {
        neighbors <= 8 && (self.survives >> neighbors) & 1 == 1
    }

    /// State of a cell in the next generation.
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survives(neighbors)
        } else {
            self.is_born(neighbors)
        }
    }

    /// Neighbor counts that bring a dead cell to life.
    pub fn born_counts(&self) -> Vec<u8> {
        (0..=8).filter(|&n| self.is_born(n)).collect()
    }

    /// Neighbor counts that keep a live cell alive.
    pub fn survival_counts(&self) -> Vec<u8> {
        (0..=8).filter(|&n| self.survives(n)).collect()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.born_counts() {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in self.survival_counts() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}
