use itertools::Itertools;
use log::debug;

use crate::geometry::Point;

/// One tile of a [`Fix`]: the state it should be toggled to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FixTile {
    /// The tile to change.
    pub point: Point,
    /// Whether it should become a wall (`true`) or be opened (`false`).
    pub suggest_wall: bool,
}

/// A candidate edit of the map and the map score it would result in.
#[derive(Clone, Debug, PartialEq)]
pub struct Fix {
    /// The score after applying this fix. Raw from [`suggest_fixes`](crate::DashEngine::suggest_fixes),
    /// in `[0, 1]` after [`normalize_fix_scores`].
    pub score: f64,
    /// The tiles this fix changes.
    pub tiles: Vec<FixTile>,
}

impl Fix {
    /// Whether this fix changes the tile at `point`.
    pub fn touches(&self, point: Point) -> bool {
        self.tiles.iter().any(|tile| tile.point == point)
    }
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamping to the output range.
///
/// A degenerate input range maps everything to the middle of the output range.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let (low, high) = (out_min.min(out_max), out_min.max(out_max));

    if in_max == in_min {
        return (out_min + out_max) / 2.;
    }

    let mapped = out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min);
    mapped.clamp(low, high)
}

/// The median of `values`, averaging the two middle values for an even count. [`None`] if empty.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let sorted = values.into_iter().sorted_by(f64::total_cmp).collect_vec();
    let middle = sorted.len() / 2;

    match sorted.len() {
        0 => None,
        len if len % 2 == 1 => sorted.get(middle).copied(),
        _ => Some((sorted.get(middle - 1)? + sorted.get(middle)?) / 2.),
    }
}

/// Rescale raw fix scores into `[0, 1]`.
///
/// Only fixes scoring at least the median decide the range: their minimum maps to 0 and their maximum to 1.
/// Every fix is then mapped with that range, so fixes below the median clamp to 0.
pub fn normalize_fix_scores(fixes: &[Fix]) -> Vec<Fix> {
    let Some(median_score) = median(fixes.iter().map(|fix| fix.score)) else {
        return Vec::new();
    };
    debug!("median fix score {}", median_score);

    let (min_score, max_score) = fixes.iter()
        .map(|fix| fix.score)
        .filter(|score| *score >= median_score)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), score| (min.min(score), max.max(score)));

    fixes.iter()
        .map(|fix| Fix {
            score: map_range(fix.score, min_score, max_score, 0., 1.),
            tiles: fix.tiles.clone(),
        })
        .collect()
}
