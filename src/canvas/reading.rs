//! Reading order: top-to-bottom, left-to-right.
//!
//! Magnets are sorted by `y`, then grouped into lines: a magnet joins the
//! current line when its `y` is within [`ROW_THRESHOLD_PX`] of the line's
//! first magnet. Each line is then ordered by `x`. Grouping against the
//! line's anchor keeps the comparison a total order, so overlapping or
//! diagonal placements still produce a stable (if approximate) reading.

#[cfg(test)]
#[path = "reading_test.rs"]
mod reading_test;

use super::consts::ROW_THRESHOLD_PX;
use crate::poem::PlacedMagnet;

/// Magnets in reading order.
#[must_use]
pub fn reading_order(magnets: &[PlacedMagnet]) -> Vec<&PlacedMagnet> {
    let mut by_y: Vec<&PlacedMagnet> = magnets.iter().collect();
    by_y.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut ordered = Vec::with_capacity(by_y.len());
    let mut line: Vec<&PlacedMagnet> = Vec::new();
    let mut anchor_y = f64::NEG_INFINITY;

    for magnet in by_y {
        if !line.is_empty() && (magnet.y - anchor_y).abs() >= ROW_THRESHOLD_PX {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            ordered.append(&mut line);
        }
        if line.is_empty() {
            anchor_y = magnet.y;
        }
        line.push(magnet);
    }
    line.sort_by(|a, b| a.x.total_cmp(&b.x));
    ordered.append(&mut line);
    ordered
}

/// Words joined with single spaces in reading order.
#[must_use]
pub fn poem_text(magnets: &[PlacedMagnet]) -> String {
    reading_order(magnets)
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
