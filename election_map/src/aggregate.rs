//! Roll-ups of votes across groups of records.
//!
//! Tallies are keyed by candidate id (or party code) and kept in a `BTreeMap`,
//! so that everything computed from them is independent of the order of the
//! input records.

use log::debug;
use std::collections::BTreeMap;

use crate::config::{ConstituencyResult, MpResult, VoteShare};
use crate::ElectionDataset;

/// Total votes per candidate id (or seats per party code).
pub type Tally = BTreeMap<String, u64>;

/// Sums the votes of each candidate across a sequence of breakdowns.
///
/// For instance, passing the breakdowns of all the districts of a region gives
/// the regional totals.
pub fn aggregate_votes_by_candidate<'a, I>(records: I) -> Tally
where
    I: IntoIterator<Item = &'a [VoteShare]>,
{
    let mut tally = Tally::new();
    for breakdown in records {
        for share in breakdown.iter() {
            *tally.entry(share.candidate_id.clone()).or_insert(0) += share.votes;
        }
    }
    tally
}

/// Returns the key with the most votes, or `None` for an empty tally.
///
/// Ties are resolved in favour of the lexicographically smallest key. Because
/// the tally is ordered by key, this is simply the first maximum found.
pub fn winner_of(totals: &Tally) -> Option<&str> {
    let mut best: Option<(&str, u64)> = None;
    for (id, &votes) in totals.iter() {
        match best {
            Some((_, best_votes)) if votes <= best_votes => {}
            _ => best = Some((id.as_str(), votes)),
        }
    }
    best.map(|(id, _)| id)
}

/// `votes` as a percentage of `total`, or 0 if the total is 0.
pub fn percentage_of(votes: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (votes as f64) / (total as f64) * 100.0
    }
}

/// A line of a ranked breakdown.
#[derive(PartialEq, Debug, Clone)]
pub struct Standing {
    pub id: String,
    pub votes: u64,
    pub percentage: f64,
}

/// Ranks a tally by decreasing votes, ties by increasing key.
///
/// The percentages are computed against `total`, which may include votes that
/// are not in the tally.
pub fn ranked_standings(tally: &Tally, total: u64) -> Vec<Standing> {
    let mut res: Vec<Standing> = tally
        .iter()
        .map(|(id, &votes)| Standing {
            id: id.clone(),
            votes,
            percentage: percentage_of(votes, total),
        })
        .collect();
    res.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.id.cmp(&b.id)));
    res
}

/// Counts the constituencies won by each party.
pub fn party_seat_tally<'a, I>(constituencies: I) -> Tally
where
    I: IntoIterator<Item = &'a ConstituencyResult>,
{
    let mut tally = Tally::new();
    for c in constituencies {
        *tally.entry(c.winner.party.clone()).or_insert(0) += 1;
    }
    tally
}

/// The party holding most of the reported constituencies of a district.
pub fn leading_party(dataset: &ElectionDataset, district_id: &str) -> Option<String> {
    let tally = party_seat_tally(dataset.constituencies_in_district(district_id));
    winner_of(&tally).map(|s| s.to_string())
}

/// The party holding most of the reported constituencies of a region.
pub fn leading_party_in_region(dataset: &ElectionDataset, region_id: &str) -> Option<String> {
    let tally = party_seat_tally(dataset.constituencies_in_region(region_id));
    winner_of(&tally).map(|s| s.to_string())
}

/// The presidential votes of a district, summed from its reported constituencies.
pub fn constituency_rollup(dataset: &ElectionDataset, district_id: &str) -> Tally {
    aggregate_votes_by_candidate(
        dataset
            .constituencies_in_district(district_id)
            .map(|c| c.presidential_results.as_slice()),
    )
}

/// The presidential winner of a region, from the sum of its districts.
pub fn region_winner(dataset: &ElectionDataset, region_id: &str) -> Option<String> {
    let tally = aggregate_votes_by_candidate(
        dataset
            .districts_in_region(region_id)
            .map(|d| d.presidential_results.as_slice()),
    );
    winner_of(&tally).map(|s| s.to_string())
}

// ******** Summaries *********

#[derive(PartialEq, Debug, Clone)]
pub struct NationalSummary {
    pub total_votes: u64,
    pub registered_voters: u64,
    pub turnout: f64,
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
    /// Sum of the reported districts, which may cover only part of the country.
    pub district_totals: Tally,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DistrictLine {
    pub id: String,
    pub name: String,
    pub winner: Option<String>,
    pub turnout: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RegionSummary {
    pub id: String,
    pub name: String,
    pub color: String,
    pub total_votes: u64,
    pub registered_voters: u64,
    pub turnout: f64,
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
    pub districts: Vec<DistrictLine>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ConstituencyLine {
    pub id: String,
    pub name: String,
    pub winner_name: String,
    pub winner_party: String,
    pub turnout: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DistrictSummary {
    pub id: String,
    pub name: String,
    pub region: String,
    pub total_votes: u64,
    pub registered_voters: u64,
    pub turnout: f64,
    /// The winner as stored with the district.
    pub recorded_winner: String,
    /// The winner recomputed from the breakdown.
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
    pub constituencies: Vec<ConstituencyLine>,
    /// Number of constituencies the district declares.
    pub expected_constituencies: usize,
    /// Presidential votes summed from the reported constituencies.
    pub constituency_standings: Vec<Standing>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ConstituencySummary {
    pub id: String,
    pub name: String,
    pub district: String,
    pub region: String,
    pub registered_voters: u64,
    pub total_votes: u64,
    pub turnout: f64,
    pub winner: MpResult,
    /// The local race, by decreasing votes.
    pub candidates: Vec<MpResult>,
    pub presidential: Vec<Standing>,
    pub polling_stations: usize,
    /// (polling station id, report) pairs.
    pub irregularities: Vec<(String, String)>,
}

/// The national presidential result, recomputed from the candidates.
pub fn summarize_nation(dataset: &ElectionDataset) -> NationalSummary {
    let p = dataset.presidential();
    let tally: Tally = dataset
        .candidates()
        .iter()
        .map(|c| (c.id.clone(), c.votes))
        .collect();
    let district_totals = aggregate_votes_by_candidate(
        dataset
            .districts()
            .iter()
            .map(|d| d.presidential_results.as_slice()),
    );
    NationalSummary {
        total_votes: p.total_votes,
        registered_voters: p.registered_voters,
        turnout: percentage_of(p.total_votes, p.registered_voters),
        winner: winner_of(&tally).map(|s| s.to_string()),
        standings: ranked_standings(&tally, p.total_votes),
        district_totals,
    }
}

/// Rolls up the districts of a region. Returns `None` for an unknown region.
///
/// A known region without any district yields zero totals and no winner.
pub fn summarize_region(dataset: &ElectionDataset, region_id: &str) -> Option<RegionSummary> {
    let region = dataset.region(region_id)?;
    let mut total_votes: u64 = 0;
    let mut registered_voters: u64 = 0;
    let mut districts: Vec<DistrictLine> = Vec::new();
    let mut breakdowns: Vec<&[VoteShare]> = Vec::new();
    for d in dataset.districts_in_region(region_id) {
        total_votes += d.total_votes;
        registered_voters += d.registered_voters;
        breakdowns.push(d.presidential_results.as_slice());
        let tally = aggregate_votes_by_candidate([d.presidential_results.as_slice()]);
        districts.push(DistrictLine {
            id: d.id.clone(),
            name: d.name.clone(),
            winner: winner_of(&tally).map(|s| s.to_string()),
            turnout: percentage_of(d.total_votes, d.registered_voters),
        });
    }
    let tally = aggregate_votes_by_candidate(breakdowns);
    debug!("summarize_region: {} tally: {:?}", region_id, tally);
    Some(RegionSummary {
        id: region.id.clone(),
        name: region.name.clone(),
        color: region.color.clone(),
        total_votes,
        registered_voters,
        turnout: percentage_of(total_votes, registered_voters),
        winner: winner_of(&tally).map(|s| s.to_string()),
        standings: ranked_standings(&tally, total_votes),
        districts,
    })
}

/// Details of one district. Returns `None` for an unknown district.
pub fn summarize_district(dataset: &ElectionDataset, district_id: &str) -> Option<DistrictSummary> {
    let d = dataset.district(district_id)?;
    let tally = aggregate_votes_by_candidate([d.presidential_results.as_slice()]);
    let constituencies: Vec<ConstituencyLine> = dataset
        .constituencies_in_district(district_id)
        .map(|c| ConstituencyLine {
            id: c.id.clone(),
            name: c.name.clone(),
            winner_name: c.winner.name.clone(),
            winner_party: c.winner.party.clone(),
            turnout: percentage_of(c.total_votes, c.registered_voters),
        })
        .collect();
    let rollup = constituency_rollup(dataset, district_id);
    let rollup_total: u64 = rollup.values().sum();
    Some(DistrictSummary {
        id: d.id.clone(),
        name: d.name.clone(),
        region: d.region.clone(),
        total_votes: d.total_votes,
        registered_voters: d.registered_voters,
        turnout: percentage_of(d.total_votes, d.registered_voters),
        recorded_winner: d.presidential_winner.clone(),
        winner: winner_of(&tally).map(|s| s.to_string()),
        standings: ranked_standings(&tally, d.total_votes),
        constituencies,
        expected_constituencies: d.constituencies.len(),
        constituency_standings: ranked_standings(&rollup, rollup_total),
    })
}

/// Details of one constituency. Returns `None` for an unknown constituency.
pub fn summarize_constituency(
    dataset: &ElectionDataset,
    constituency_id: &str,
) -> Option<ConstituencySummary> {
    let c = dataset.constituency(constituency_id)?;
    let tally = aggregate_votes_by_candidate([c.presidential_results.as_slice()]);
    let mut candidates = c.candidates.clone();
    // Stable: equal votes keep their published order.
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes));
    let mut polling_stations: usize = 0;
    let mut irregularities: Vec<(String, String)> = Vec::new();
    for ps in dataset.polling_stations_in(constituency_id) {
        polling_stations += 1;
        for report in ps.irregularities.iter().flatten() {
            irregularities.push((ps.id.clone(), report.clone()));
        }
    }
    Some(ConstituencySummary {
        id: c.id.clone(),
        name: c.name.clone(),
        district: c.district.clone(),
        region: c.region.clone(),
        registered_voters: c.registered_voters,
        total_votes: c.total_votes,
        turnout: percentage_of(c.total_votes, c.registered_voters),
        winner: c.winner.clone(),
        candidates,
        presidential: ranked_standings(&tally, c.total_votes),
        polling_stations,
        irregularities,
    })
}
