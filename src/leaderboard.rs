use std::cmp::Ordering;

use rocket::serde::{self, Deserialize, Serialize};

use crate::database::GameScore;

/// How many records survive in each difficulty tier.
pub const LB_LIMIT: usize = 10;

/// The position-determining part of a record.
/// Better standings compare as smaller, so an ascending sort puts the leader first:
/// higher score first, then lower time, then the earlier insertion.
#[derive(Clone, Copy, Debug)]
pub struct Standing {
    pub score: GameScore,
    pub time: f64,
    pub seq: i64,
}

impl Ord for Standing {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.time.total_cmp(&other.time))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Standing {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Standing {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Standing {}

pub trait LeaderboardItem {
    fn standing(&self) -> Standing;
}

/// An ordered collection of records, best first.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard<T> {
    collection: Vec<T>,
}

impl<T> Leaderboard<T> {
    /// Wraps a collection that is already in rank order.
    pub fn new(collection: Vec<T>) -> Self {
        Self { collection }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.collection.iter()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }
}

impl<T: LeaderboardItem> Leaderboard<T> {
    /// Ranks `collection` and splits it into the top `limit` survivors
    /// and the evicted remainder (also in rank order).
    pub fn partition(mut collection: Vec<T>, limit: usize) -> (Self, Vec<T>) {
        collection.sort_by_key(|item| item.standing());
        let evicted = collection.split_off(limit.min(collection.len()));
        (Self::new(collection), evicted)
    }
}

impl<T: Serialize> Serialize for Leaderboard<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.collection.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Leaderboard<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::new(Vec::deserialize(deserializer)?))
    }
}
