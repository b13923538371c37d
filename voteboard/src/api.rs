//! Records as the backend API returns them. Optional fields mirror values the
//! backend may leave out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ranking::Rankable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<u32>,
}

impl Rankable for Candidate {
    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn vote_count(&self) -> Option<u64> {
        self.votes
    }
}

/// A party or other affiliation on the ballot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub id: u32,
    pub name: String,
    #[serde(default, alias = "candiList")]
    pub candidates: Vec<Candidate>,
    /// Valid votes cast for the affiliation.
    #[serde(default, alias = "votes")]
    pub vv_count: Option<u64>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl Rankable for Affiliation {
    fn vote_count(&self) -> Option<u64> {
        self.vv_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
}
