//! Pie chart payloads in the shape chart.js expects.

use serde::{Deserialize, Serialize};

use crate::api::Affiliation;
use crate::palette::{ColorAssigner, ColorScheme};
use crate::ranking::{sort_by_votes, RankError, Rankable};

pub const HOVER_OFFSET: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: Vec<String>,
    pub hover_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<PieDataset>,
}

impl PieChartData {
    /// Builds a single-dataset pie of affiliations, largest slice first.
    pub fn for_affiliations(
        label: &str,
        affiliations: &[Affiliation],
        scheme: ColorScheme,
        assigner: &ColorAssigner,
    ) -> Result<Self, RankError> {
        let ranked = sort_by_votes(affiliations)?;

        let mut labels = Vec::with_capacity(ranked.len());
        let mut data = Vec::with_capacity(ranked.len());
        let mut background_color = Vec::with_capacity(ranked.len());
        for affiliation in &ranked {
            labels.push(affiliation.name.clone());
            // sort_by_votes has already rejected entries without a count
            data.push(affiliation.vote_count().unwrap_or_default());
            background_color.push(scheme.color(assigner, &affiliation.name).to_string());
        }

        Ok(Self {
            labels,
            datasets: vec![PieDataset {
                label: label.to_string(),
                data,
                background_color,
                hover_offset: HOVER_OFFSET,
            }],
        })
    }
}

/// Share of the total vote per affiliation, in percent and in input order.
/// All shares are zero when no votes were cast.
pub fn vote_shares(affiliations: &[Affiliation]) -> Result<Vec<f64>, RankError> {
    let votes = affiliations
        .iter()
        .enumerate()
        .map(|(index, affiliation)| {
            affiliation.vote_count().ok_or(RankError::MissingField {
                index,
                field: "votes",
            })
        })
        .collect::<Result<Vec<u64>, _>>()?;

    let total: u64 = votes.iter().sum();
    if total == 0 {
        return Ok(vec![0.0; votes.len()]);
    }

    Ok(votes
        .into_iter()
        .map(|count| count as f64 * 100.0 / total as f64)
        .collect())
}

/// Copies `affiliations` with `percentage` filled in from [`vote_shares`].
pub fn with_percentages(affiliations: &[Affiliation]) -> Result<Vec<Affiliation>, RankError> {
    let shares = vote_shares(affiliations)?;
    Ok(affiliations
        .iter()
        .zip(shares)
        .map(|(affiliation, share)| Affiliation {
            percentage: Some(share),
            ..affiliation.clone()
        })
        .collect())
}
