// Typed aggregation helpers over player slices.
//
// Every statistic over an empty slice is `None` rather than NaN so callers
// have to decide how "undefined" is shown.

use crate::player::{PlayerRecord, Role};
use serde::Serialize;
use std::cmp::Ordering;

/// Numeric columns that aggregations can run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Credits,
    ValueScore,
    RoleValue,
}

impl NumericField {
    pub fn of(&self, p: &PlayerRecord) -> f64 {
        match self {
            NumericField::Credits => p.credits,
            NumericField::ValueScore => p.value_score,
            NumericField::RoleValue => p.role_value,
        }
    }
}

pub fn sum<'a, I>(players: I, field: NumericField) -> f64
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    players.into_iter().map(|p| field.of(p)).sum()
}

pub fn mean<'a, I>(players: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let (total, n) = players
        .into_iter()
        .fold((0.0, 0usize), |(s, n), p| (s + field.of(p), n + 1));
    (n > 0).then(|| total / n as f64)
}

pub fn min<'a, I>(players: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    players.into_iter().map(|p| field.of(p)).reduce(f64::min)
}

pub fn max<'a, I>(players: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    players.into_iter().map(|p| field.of(p)).reduce(f64::max)
}

/// Median; the mean of the two middle values for even counts.
pub fn median<'a, I>(players: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut values: Vec<f64> = players.into_iter().map(|p| field.of(p)).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Population standard deviation (divides by n).
pub fn population_std<'a, I>(players: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a PlayerRecord> + Clone,
{
    let m = mean(players.clone(), field)?;
    let (sq, n) = players.into_iter().fold((0.0, 0usize), |(s, n), p| {
        let d = field.of(p) - m;
        (s + d * d, n + 1)
    });
    Some((sq / n as f64).sqrt())
}

/// The first `n` players by `field`, largest first. Equal values keep their
/// table order.
pub fn top_n<'a, I>(players: I, n: usize, field: NumericField) -> Vec<&'a PlayerRecord>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut sorted: Vec<&PlayerRecord> = players.into_iter().collect();
    sorted.sort_by(|a, b| {
        field
            .of(b)
            .partial_cmp(&field.of(a))
            .unwrap_or(Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Role distribution
// ---------------------------------------------------------------------------

/// Number of players holding one role code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    pub role: Role,
    pub count: usize,
}

/// Count players per role code. Only roles present appear, most common first;
/// equal counts keep first-appearance order.
pub fn role_counts<'a, I>(players: I) -> Vec<RoleCount>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut counts: Vec<RoleCount> = Vec::new();
    for p in players {
        match counts.iter_mut().find(|c| c.role == p.role) {
            Some(c) => c.count += 1,
            None => counts.push(RoleCount {
                role: p.role.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Look up one role in a distribution; absent roles count as zero.
pub fn count_of(counts: &[RoleCount], role: &Role) -> usize {
    counts
        .iter()
        .find(|c| &c.role == role)
        .map(|c| c.count)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
