use std::cmp::Reverse;

use super::super::domain::{Style, StyleScore};
use super::tally::StyleTally;

/// Upper bound on how far the eight independently rounded percentages may stray from 100.
pub const PERCENTAGE_SUM_TOLERANCE: u32 = 4;

/// Round-half-up integer percentage; zero when nothing was selected.
pub(crate) fn percentage(points: u32, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(points) * 100;
    let rounded = (scaled * 2 + total) / (total * 2);
    rounded.min(100) as u8
}

/// Orders all eight styles: points descending, then earlier first appearance, then canonical
/// declaration order. The result is a strict total order, so ranks never tie.
pub(crate) fn rank_styles(tally: &StyleTally) -> Vec<StyleScore> {
    let mut styles = Style::ALL.to_vec();
    styles.sort_by_key(|style| {
        (
            Reverse(tally.points(*style)),
            tally.first_appearance(*style).unwrap_or(u64::MAX),
            style.index(),
        )
    });

    let total = tally.total_points();
    styles
        .into_iter()
        .enumerate()
        .map(|(position, style)| StyleScore {
            style,
            points: tally.points(style),
            percentage: percentage(tally.points(style), total),
            rank: (position + 1) as u8,
        })
        .collect()
}
