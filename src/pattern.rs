use crate::{Bounds, Coord};
use anyhow::{anyhow, Result};
use rand::{Rng, SeedableRng};
use std::{fmt, str::FromStr};

/// Probability of a cell being alive on a randomly seeded board.
pub const RANDOM_DENSITY: f64 = 0.3;

/// Named starting patterns.
///
/// Block, beehive, blinker, toad, the lightweight spaceship and the single
/// "sierpinski" seed are placed around the centre `(width / 2, height / 2)`
/// (the spaceship only along `x`); the glider and the glider gun sit near
/// the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Block,
    Beehive,
    Blinker,
    Toad,
    Glider,
    LightweightSpaceship,
    GliderGun,
    /// One live cell; grows into a Sierpinski-like figure under B1/S12.
    Sierpinski,
}

/// Offsets from the centre.
type Shape = &'static [(i64, i64)];

const BLOCK: Shape = &[(-1, -1), (-1, 0), (0, -1), (0, 0)];
const BEEHIVE: Shape = &[(-1, 0), (-1, 1), (0, -1), (0, 2), (1, 0), (1, 1)];
const BLINKER: Shape = &[(-1, 0), (0, 0), (1, 0)];
const TOAD: Shape = &[(-1, -1), (-1, 0), (-1, 1), (0, -2), (0, -1), (0, 0)];
const SIERPINSKI: Shape = &[(0, 0)];

/// Offset along `x` from the centre, absolute `y`.
const LIGHTWEIGHT_SPACESHIP: Shape = &[
    (-1, 3),
    (-1, 4),
    (-1, 5),
    (-1, 6),
    (-1, 7),
    (0, 2),
    (0, 7),
    (1, 7),
    (2, 2),
    (2, 6),
];

/// Absolute coordinates.
const GLIDER: Shape = &[(3, 4), (4, 2), (4, 4), (5, 3), (5, 4)];
#[rustfmt::skip]
const GLIDER_GUN: Shape = &[
    (1, 5), (1, 6), (2, 5), (2, 6), (11, 5), (11, 6), (11, 7),
    (12, 4), (12, 8), (13, 3), (13, 9), (14, 3), (14, 9), (15, 6),
    (16, 4), (16, 8), (17, 5), (17, 6), (17, 7), (18, 6), (21, 3),
    (21, 4), (21, 5), (22, 3), (22, 4), (22, 5), (23, 2), (23, 6),
    (25, 1), (25, 2), (25, 6), (25, 7), (35, 3), (35, 4), (36, 3),
    (36, 4), (35, 22), (35, 23), (35, 25), (36, 22), (36, 23), (36, 25),
    (36, 26), (36, 27), (37, 28), (38, 22), (38, 23), (38, 25), (38, 26),
    (38, 27), (39, 23), (39, 25), (40, 23), (40, 25), (41, 24),
];

impl Preset {
    pub const ALL: [Preset; 8] = [
        Self::Block,
        Self::Beehive,
        Self::Blinker,
        Self::Toad,
        Self::Glider,
        Self::LightweightSpaceship,
        Self::GliderGun,
        Self::Sierpinski,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Beehive => "beehive",
            Self::Blinker => "blinker",
            Self::Toad => "toad",
            Self::Glider => "glider",
            Self::LightweightSpaceship => "lightweight_spaceship",
            Self::GliderGun => "glider_gun",
            Self::Sierpinski => "sierpinski",
        }
    }

    /// Places the pattern on a field of `bounds`.
    ///
    /// # Errors
    ///
    /// Returns an error if any cell of the pattern falls outside the field.
    pub fn cells(&self, bounds: Bounds) -> Result<Vec<Coord>> {
        let (cx, cy) = (i64::from(bounds.width / 2), i64::from(bounds.height / 2));
        let (shape, origin) = match self {
            Self::Block => (BLOCK, (cx, cy)),
            Self::Beehive => (BEEHIVE, (cx, cy)),
            Self::Blinker => (BLINKER, (cx, cy)),
            Self::Toad => (TOAD, (cx, cy)),
            Self::Sierpinski => (SIERPINSKI, (cx, cy)),
            Self::LightweightSpaceship => (LIGHTWEIGHT_SPACESHIP, (cx, 0)),
            Self::Glider => (GLIDER, (0, 0)),
            Self::GliderGun => (GLIDER_GUN, (0, 0)),
        };

        shape
            .iter()
            .map(|&(dx, dy)| {
                let (x, y) = (origin.0 + dx, origin.1 + dy);
                u32::try_from(x)
                    .ok()
                    .zip(u32::try_from(y).ok())
                    .map(Coord::from)
                    .filter(|&pos| bounds.contains(pos))
                    .ok_or_else(|| {
                        anyhow!(
                            "Preset {} does not fit into the {}x{} field: cell ({}, {})",
                            self,
                            bounds.width,
                            bounds.height,
                            x,
                            y
                        )
                    })
            })
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| anyhow!("Unknown preset {:?}", s))
    }
}

/// Makes each cell of the field alive with probability [`RANDOM_DENSITY`].
///
/// Cells are visited in row-major order, so the same `seed` yields the same
/// cells on a field of the same size. Without a seed the generator is seeded
/// from the OS.
pub fn random_cells(bounds: Bounds, seed: Option<u64>) -> Vec<Coord> {
    let mut rng = if let Some(x) = seed {
        rand_chacha::ChaCha8Rng::seed_from_u64(x)
    } else {
        rand_chacha::ChaCha8Rng::from_os_rng()
    };
    bounds
        .cells()
        .filter(|_| rng.random_bool(RANDOM_DENSITY))
        .collect()
}

/// Pattern read from RLE text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RlePattern {
    pub width: u32,
    pub height: u32,
    /// Value of the optional `rule = ...` header entry, as written.
    pub rule: Option<String>,
    /// Live cells in the order they appear, relative to the top-left corner.
    pub cells: Vec<Coord>,
}

impl RlePattern {
    /// Moves the pattern by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a moved cell does not fit into `u32` coordinates.
    pub fn shifted(&self, dx: u32, dy: u32) -> Result<Vec<Coord>> {
        self.cells
            .iter()
            .map(|pos| {
                pos.x
                    .checked_add(dx)
                    .zip(pos.y.checked_add(dy))
                    .map(Coord::from)
                    .ok_or_else(|| {
                        anyhow!("Cell ({}, {}) moved by ({}, {}) overflows", pos.x, pos.y, dx, dy)
                    })
            })
            .collect()
    }
}

/// Parses a pattern in the [RLE](https://golly.sourceforge.io/Help/formats.html#rle) format.
///
/// Lines starting with `#` are comments. The header `x = .., y = ..` may be
/// followed by `rule = ..`; the rule is returned as is and not interpreted.
/// The body consists of runs of `b` (dead), `o` (alive) and `$` (end of
/// row), optionally prefixed with a count, and ends at `!`.
///
/// # Errors
///
/// Returns an error if the header is missing or malformed, the body holds
/// an unknown character, or a live cell lies outside of `x` by `y`.
pub fn parse_rle(data: &[u8]) -> Result<RlePattern> {
    let mut lines = data
        .split(|&b| b == b'\n')
        .map(|x| x.strip_suffix(b"\r").unwrap_or(x))
        .filter(|x| !x.trim_ascii().is_empty() && x[0] != b'#');

    let header = lines.next().ok_or_else(|| anyhow!("Missing header"))?;
    let mut parts = header.split(|&b| b == b',').map(|x| x.trim_ascii());

    let extract_value = |part: &[u8], expected_key: &[u8]| {
        let mut items = part.split(|&b| b == b'=');
        let key = items.next().unwrap_or(&[]).trim_ascii_end();
        if key != expected_key {
            return Err(anyhow!(
                "Invalid header: expected {}, got {}",
                String::from_utf8_lossy(expected_key),
                String::from_utf8_lossy(key)
            ));
        }
        let value = items.next().unwrap_or(&[]).trim_ascii();
        if items.next().is_some() {
            return Err(anyhow!("Invalid header: missing ',' between '='"));
        }
        Ok(std::str::from_utf8(value)?.to_owned())
    };

    let width: u32 = extract_value(
        parts
            .next()
            .ok_or_else(|| anyhow!("Invalid header: missing \"x\""))?,
        b"x",
    )?
    .parse()?;
    let height: u32 = extract_value(
        parts
            .next()
            .ok_or_else(|| anyhow!("Invalid header: missing \"y\""))?,
        b"y",
    )?
    .parse()?;
    // rule is optional
    let rule = parts
        .next()
        .map(|part| extract_value(part, b"rule"))
        .transpose()?;

    let mut cells = Vec::new();
    let (mut x, mut y, mut count) = (0u64, 0u64, 0u64);
    let run = |count: u64| if count == 0 { 1 } else { count };

    'body: for line in lines {
        for &b in line {
            match b {
                b'0'..=b'9' => {
                    count = count
                        .checked_mul(10)
                        .and_then(|c| c.checked_add(u64::from(b - b'0')))
                        .ok_or_else(|| anyhow!("Run count is too large"))?;
                }
                b'b' => {
                    x = x.saturating_add(run(count));
                    count = 0;
                }
                b'o' => {
                    let c = run(count);
                    if x.saturating_add(c) > u64::from(width) || y >= u64::from(height) {
                        return Err(anyhow!(
                            "Pattern data out of bounds: x = {}, y = {}",
                            x.saturating_add(c - 1),
                            y
                        ));
                    }
                    // both fit into u32 after the check above
                    cells.extend((x..x + c).map(|i| Coord::new(i as u32, y as u32)));
                    x += c;
                    count = 0;
                }
                b'$' => {
                    y = y.saturating_add(run(count));
                    x = 0;
                    count = 0;
                }
                b'!' => break 'body,
                b' ' | b'\t' => continue,
                _ => return Err(anyhow!("Invalid RLE character: '{}'", b as char)),
            }
        }
    }

    Ok(RlePattern {
        width,
        height,
        rule,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellSet;

    const SEED: u64 = 42;

    #[test]
    fn test_centred_presets() {
        let bounds = Bounds::new(6, 6);
        let mut block = Preset::Block.cells(bounds).unwrap();
        block.sort();
        assert_eq!(
            block,
            [(2, 2), (3, 2), (2, 3), (3, 3)].map(|(x, y)| Coord::new(x, y))
        );

        let beehive = Preset::Beehive.cells(bounds).unwrap();
        let expected = [(2, 3), (2, 4), (3, 2), (3, 5), (4, 3), (4, 4)]
            .map(|(x, y)| Coord::new(x, y));
        assert_eq!(beehive, expected);

        assert_eq!(Preset::Sierpinski.cells(bounds).unwrap(), vec![Coord::new(3, 3)]);
    }

    #[test]
    fn test_preset_must_fit() {
        assert!(Preset::GliderGun.cells(Bounds::new(42, 29)).is_ok());
        assert!(Preset::GliderGun.cells(Bounds::new(41, 29)).is_err());
        assert!(Preset::GliderGun.cells(Bounds::new(42, 28)).is_err());
        assert!(Preset::Toad.cells(Bounds::new(2, 2)).is_err());
        assert!(Preset::LightweightSpaceship.cells(Bounds::new(20, 8)).is_ok());
        assert!(Preset::LightweightSpaceship.cells(Bounds::new(20, 7)).is_err());
    }

    #[test]
    fn test_preset_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!("Glider".parse::<Preset>().is_err());
        assert_eq!(Preset::GliderGun.cells(Bounds::new(64, 64)).unwrap().len(), 55);
    }

    #[test]
    fn test_random_cells_are_reproducible() {
        let bounds = Bounds::new(40, 30);
        let a = random_cells(bounds, Some(SEED));
        let b = random_cells(bounds, Some(SEED));
        assert_eq!(a, b);
        assert!(a.iter().all(|&pos| bounds.contains(pos)));
        assert_eq!(a.iter().copied().collect::<CellSet>().len(), a.len());

        // roughly 30% of 1200 cells
        assert!((250..470).contains(&a.len()), "{} live cells", a.len());
    }

    #[test]
    fn test_parse_glider() {
        let rle = parse_rle(b"#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!").unwrap();
        assert_eq!((rle.width, rle.height), (3, 3));
        assert_eq!(rle.rule.as_deref(), Some("B3/S23"));
        let expected = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)].map(|(x, y)| Coord::new(x, y));
        assert_eq!(rle.cells, expected);
        assert_eq!(rle.shifted(3, 1).unwrap()[0], Coord::new(4, 1));
        assert!(rle.shifted(u32::MAX - 1, 0).is_err());
        assert!(rle.shifted(0, u32::MAX - 1).is_err());
        assert!(rle.shifted(u32::MAX - 2, u32::MAX - 2).is_ok());
    }

    #[test]
    fn test_parse_without_rule() {
        let rle = parse_rle(b"x = 4, y = 3\r\n2o$\r\n$3bo!\r\nignored trailing text").unwrap();
        assert_eq!(rle.rule, None);
        let expected = [(0, 0), (1, 0), (3, 2)].map(|(x, y)| Coord::new(x, y));
        assert_eq!(rle.cells, expected);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_rle(b"").is_err());
        assert!(parse_rle(b"y = 3, x = 3\no!").is_err());
        assert!(parse_rle(b"x = 2, y = 2\n3o!").is_err());
        assert!(parse_rle(b"x = 2, y = 2\n$$o!").is_err());
        assert!(parse_rle(b"x = 2, y = 2\nbq!").is_err());
        assert!(parse_rle(b"x = 2, y = 2 = 3\no!").is_err());
        // a dead run that saturates the column must still end in an error
        assert!(parse_rle(b"x = 2, y = 2\n18446744073709551615bo!").is_err());
        assert!(parse_rle(b"x = 2, y = 2\n18446744073709551615b18446744073709551615o!").is_err());
    }
}
