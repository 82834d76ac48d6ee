use crate::{Bounds, CellSet, Coord, RuleTable};
use ahash::AHashMap as HashMap;

/// Transition of a single cell between two generations.
///
/// Dead cells that stay dead are not reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fate {
    Survives,
    Dies,
    Born,
}

impl Fate {
    /// Whether the cell is alive in the next generation.
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Fate::Survives | Fate::Born)
    }
}

/// Neighbor counts accumulated around the live cells of one generation.
///
/// The keys of `counts` are exactly the cells that must be re-evaluated:
/// every live cell (with a count of zero if it is isolated) and every
/// in-bounds neighbor of a live cell. Work is proportional to the number of
/// live cells and never to the area of the field.
pub struct NeighborTally {
    living: CellSet,
    counts: HashMap<Coord, u8>,
}

impl NeighborTally {
    /// Tallies the neighborhoods of `living`, in whatever order it yields
    /// cells. Repeated cells are counted once.
    pub fn new<I>(living: I, bounds: Bounds) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let living = living.into_iter();
        let hint = living.size_hint().0;
        let mut seen = CellSet::with_capacity(hint);
        let mut counts = HashMap::with_capacity(hint * 4);

        for pos in living {
            debug_assert!(bounds.contains(pos), "live cell outside of the field");
            if !seen.insert(pos) {
                continue;
            }
            // a live cell must be re-evaluated even if nothing touches it
            counts.entry(pos).or_insert(0);
            for n in bounds.neighbors(pos) {
                *counts.entry(n).or_insert(0) += 1;
            }
        }

        Self {
            living: seen,
            counts,
        }
    }

    /// Number of live neighbors of `pos` in the tallied generation.
    pub fn count(&self, pos: Coord) -> u8 {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    /// The tallied generation.
    pub fn living(&self) -> &CellSet {
        &self.living
    }

    /// Number of cells that will be evaluated.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Applies `rules` to every tallied cell and reports the ones whose
    /// next state is alive or that die.
    pub fn fates<'a>(&'a self, rules: &'a RuleTable) -> impl Iterator<Item = (Coord, Fate)> + 'a {
        self.counts.iter().filter_map(move |(&pos, &count)| {
            let alive = self.living.contains(&pos);
            match (alive, rules.next_state(alive, count)) {
                (true, true) => Some((pos, Fate::Survives)),
                (true, false) => Some((pos, Fate::Dies)),
                (false, true) => Some((pos, Fate::Born)),
                (false, false) => None,
            }
        })
    }
}

/// Computes the generation that follows `living` on a field of `bounds`.
///
/// The result does not depend on the order in which `living` yields cells.
pub fn next_generation<I>(living: I, bounds: Bounds, rules: &RuleTable) -> CellSet
where
    I: IntoIterator<Item = Coord>,
{
    let tally = NeighborTally::new(living, bounds);
    tally
        .fates(rules)
        .filter(|(_, fate)| fate.is_alive())
        .map(|(pos, _)| pos)
        .collect()
}
