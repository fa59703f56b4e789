// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level ordering and per-envelope band selection.
//!
//! Levels are sorted once; every envelope then takes the run of levels inside
//! its elevation range. The last level used by one envelope is carried into
//! the next so the strip between them is still covered when no level falls
//! exactly on the envelope transition.

use smallvec::SmallVec;

use crate::model::{Band, Envelope, Level};

/// Sort levels by ascending elevation, keeping input order among equals.
pub fn sort_levels(levels: &[Level]) -> Vec<Level> {
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
    sorted
}

/// The ordered levels one envelope is banded by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandLevels<'a> {
    levels: SmallVec<[&'a Level; 8]>,
}

impl<'a> BandLevels<'a> {
    pub fn levels(&self) -> &[&'a Level] {
        &self.levels
    }

    pub fn first(&self) -> Option<&'a Level> {
        self.levels.first().copied()
    }

    pub fn last(&self) -> Option<&'a Level> {
        self.levels.last().copied()
    }

    /// Number of bands, zero when fewer than two levels were selected
    pub fn band_count(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Adjacent level pairs, bottom to top
    pub fn bands(&self) -> impl Iterator<Item = Band<'a>> + '_ {
        let count = self.band_count();
        self.levels.windows(2).enumerate().map(move |(index, pair)| Band {
            index,
            lower: pair[0],
            upper: pair[1],
            is_top: index + 1 == count,
        })
    }
}

/// Select the levels banding `envelope` out of globally `sorted` levels.
///
/// `carried` is the last level used by the previously processed envelope. It
/// is prepended even when it lies below the envelope, unless the selection
/// already starts with that very level.
pub fn select_band_levels<'a>(
    envelope: &Envelope,
    sorted: &'a [Level],
    carried: Option<&'a Level>,
) -> BandLevels<'a> {
    let mut levels: SmallVec<[&'a Level; 8]> = sorted
        .iter()
        .filter(|l| envelope.spans(l.elevation))
        .collect();

    if let Some(previous) = carried {
        let already_first = levels
            .first()
            .is_some_and(|first| std::ptr::eq(*first, previous));
        if !already_first {
            levels.insert(0, previous);
        }
    }

    BandLevels { levels }
}

/// Band levels for every envelope in processing order.
///
/// The carried level is threaded through as an explicit accumulator.
pub fn select_all<'a, 'e>(
    envelopes: impl IntoIterator<Item = &'e Envelope>,
    sorted: &'a [Level],
) -> Vec<BandLevels<'a>> {
    envelopes
        .into_iter()
        .scan(None, |carried: &mut Option<&'a Level>, envelope| {
            let selected = select_band_levels(envelope, sorted, *carried);
            *carried = selected.last();
            Some(selected)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn levels_every(step: f64, count: u32) -> Vec<Level> {
        (0..count)
            .map(|i| Level::new(i, format!("Level {}", i as f64 * step), i as f64 * step))
            .collect()
    }

    fn envelope(elevation: f64, height: f64) -> Envelope {
        Envelope::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            elevation,
            height,
        )
    }

    fn elevations(selected: &BandLevels<'_>) -> Vec<f64> {
        selected.levels().iter().map(|l| l.elevation).collect()
    }

    #[test]
    fn sort_is_stable_for_equal_elevations() {
        let levels = vec![
            Level::new(1, "b", 3.0),
            Level::new(2, "a", 0.0),
            Level::new(3, "c", 3.0),
        ];
        let sorted = sort_levels(&levels);
        let ids: Vec<u32> = sorted.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn selects_levels_within_inclusive_range() {
        let levels = levels_every(3.0, 7);
        let selected = select_band_levels(&envelope(3.0, 9.0), &levels, None);
        assert_eq!(elevations(&selected), vec![3.0, 6.0, 9.0, 12.0]);
        assert_eq!(selected.band_count(), 3);
    }

    #[test]
    fn carried_level_is_prepended() {
        let levels = levels_every(3.0, 7);
        let sorted = sort_levels(&levels);
        let all = select_all([&envelope(0.0, 10.0), &envelope(10.0, 20.0)], &sorted);

        assert_eq!(elevations(&all[0]), vec![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(elevations(&all[1]), vec![9.0, 12.0, 15.0, 18.0]);
        assert_eq!(all[1].first(), all[0].last());
    }

    #[test]
    fn shared_boundary_level_is_not_duplicated() {
        let levels = levels_every(5.0, 5);
        let all = select_all([&envelope(0.0, 10.0), &envelope(10.0, 10.0)], &levels);

        assert_eq!(elevations(&all[1]), vec![10.0, 15.0, 20.0]);
        assert!(all[1].bands().all(|band| band.height() > 0.0));
    }

    #[test]
    fn empty_selection_still_carries_forward() {
        let levels = levels_every(10.0, 3);
        let all = select_all(
            [&envelope(0.0, 5.0), &envelope(12.0, 3.0), &envelope(16.0, 10.0)],
            &levels,
        );

        assert_eq!(elevations(&all[0]), vec![0.0]);
        assert_eq!(elevations(&all[1]), vec![0.0]);
        assert_eq!(elevations(&all[2]), vec![0.0, 20.0]);
        assert_eq!(all[0].band_count(), 0);
        assert_eq!(all[2].band_count(), 1);
    }

    #[test]
    fn first_envelope_without_levels_carries_nothing() {
        let levels = levels_every(10.0, 2);
        let all = select_all([&envelope(50.0, 5.0), &envelope(0.0, 10.0)], &levels);
        assert!(all[0].levels().is_empty());
        assert_eq!(elevations(&all[1]), vec![0.0, 10.0]);
    }

    #[test]
    fn only_last_band_is_top() {
        let levels = levels_every(1.0, 4);
        let selected = select_band_levels(&envelope(0.0, 3.0), &levels, None);
        let tops: Vec<bool> = selected.bands().map(|b| b.is_top).collect();
        assert_eq!(tops, vec![false, false, true]);
    }
}
