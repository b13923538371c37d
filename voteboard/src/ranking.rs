//! Stable orderings for candidates and parties in chart order.
//!
//! Every function returns a fresh `Vec` and leaves its input untouched.
//! Entities that lack a field the ordering needs are rejected rather than
//! coerced to a default.

use std::cmp::Ordering;

/// A record that can be ordered by display name or by vote count.
///
/// Fields are optional because backend payloads may omit them; an ordering
/// that needs a missing field fails with [`RankError::MissingField`].
pub trait Rankable {
    fn first_name(&self) -> Option<&str> {
        None
    }

    fn last_name(&self) -> Option<&str> {
        None
    }

    fn vote_count(&self) -> Option<u64> {
        None
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RankError {
    #[error("invalid entity at index {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
}

fn require<V>(value: Option<V>, index: usize, field: &'static str) -> Result<V, RankError> {
    value.ok_or(RankError::MissingField { index, field })
}

/// Orders by last name, then first name, ignoring case. Equal names keep
/// their input order.
pub fn sort_by_name<T: Rankable + Clone>(entities: &[T]) -> Result<Vec<T>, RankError> {
    let mut keyed = entities
        .iter()
        .enumerate()
        .map(|(index, entity)| -> Result<_, RankError> {
            let last = require(entity.last_name(), index, "lastName")?;
            let first = require(entity.first_name(), index, "firstName")?;
            Ok((utf16_key(last), utf16_key(first), entity))
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(last_a, first_a, _), (last_b, first_b, _)| {
        last_a.cmp(last_b).then_with(|| first_a.cmp(first_b))
    });

    Ok(keyed.into_iter().map(|(_, _, entity)| entity.clone()).collect())
}

/// Lowercased name as UTF-16 code units, so names compare the way the
/// dashboard's string comparison does.
fn utf16_key(name: &str) -> Vec<u16> {
    name.to_lowercase().encode_utf16().collect()
}

/// Orders by vote count, highest first. Ties keep their input order.
pub fn sort_by_votes<T: Rankable + Clone>(entities: &[T]) -> Result<Vec<T>, RankError> {
    let mut keyed = entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            require(entity.vote_count(), index, "votes").map(|votes| (votes, entity))
        })
        .collect::<Result<Vec<_>, RankError>>()?;

    keyed.sort_by(|(votes_a, _), (votes_b, _)| descending(*votes_a, *votes_b));

    Ok(keyed.into_iter().map(|(_, entity)| entity.clone()).collect())
}

#[inline]
fn descending(a: u64, b: u64) -> Ordering {
    b.cmp(&a)
}
