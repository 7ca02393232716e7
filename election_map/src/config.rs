// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A presidential candidate, with the national result.
#[derive(PartialEq, Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// Party code, for example `NRM`.
    pub party: String,
    /// Display colour of the party. Not needed by any computation.
    pub party_color: String,
    pub votes: u64,
    pub percentage: f64,
}

/// One entry of a presidential breakdown, for a district, constituency or polling station.
#[derive(PartialEq, Debug, Clone)]
pub struct VoteShare {
    pub candidate_id: String,
    pub votes: u64,
    pub percentage: f64,
}

impl VoteShare {
    pub fn new(candidate_id: &str, votes: u64, percentage: f64) -> VoteShare {
        VoteShare {
            candidate_id: candidate_id.to_string(),
            votes,
            percentage,
        }
    }
}

/// The national presidential totals, as published.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct PresidentialTotals {
    pub total_votes: u64,
    pub registered_voters: u64,
    pub turnout: f64,
}

/// A top-level grouping of districts.
///
/// The stored totals are informative only: all the rollups are recomputed
/// from the districts.
#[derive(PartialEq, Debug, Clone)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub districts: Vec<String>,
    pub color: String,
    pub total_votes: u64,
    pub registered_voters: u64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct District {
    pub id: String,
    pub name: String,
    /// Identifier of the owning region.
    pub region: String,
    /// Identifiers of the constituencies, in display order. Not all of them
    /// need to have reported results.
    pub constituencies: Vec<String>,
    pub total_votes: u64,
    pub registered_voters: u64,
    pub turnout: f64,
    pub presidential_winner: String,
    pub presidential_results: Vec<VoteShare>,
}

/// The result of one candidate in a local (parliamentary) race.
#[derive(PartialEq, Debug, Clone)]
pub struct MpResult {
    pub name: String,
    pub party: String,
    pub party_color: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ConstituencyResult {
    pub id: String,
    pub name: String,
    pub district: String,
    pub region: String,
    pub registered_voters: u64,
    pub total_votes: u64,
    pub turnout: f64,
    pub winner: MpResult,
    pub candidates: Vec<MpResult>,
    pub presidential_results: Vec<VoteShare>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct PollingStationResult {
    pub id: String,
    pub constituency: String,
    pub turnout: f64,
    pub total_votes: u64,
    pub presidential_results: Vec<VoteShare>,
    pub local_results: Vec<MpResult>,
    /// Free-text reports, if any were filed for this station.
    pub irregularities: Option<Vec<String>>,
}

/// One shape of the national map.
///
/// The region tag was assigned when the geometry was extracted and is not
/// guaranteed to agree with the region of the matched district.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MapPathRecord {
    pub id: String,
    /// Path description, passed through untouched.
    pub d: String,
    pub name: String,
    pub region: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartySeats {
    pub party: String,
    pub name: String,
    pub seats: u32,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParliamentarySummary {
    pub total_seats: u32,
    pub parties: Vec<PartySeats>,
}

/// The kind of record an identifier refers to.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RecordKind {
    Candidate,
    Region,
    District,
    Constituency,
    PollingStation,
    Party,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordKind::Candidate => "candidate",
            RecordKind::Region => "region",
            RecordKind::District => "district",
            RecordKind::Constituency => "constituency",
            RecordKind::PollingStation => "polling station",
            RecordKind::Party => "party",
        };
        write!(f, "{}", s)
    }
}

/// Errors that prevent a dataset from being assembled.
///
/// Inconsistent numbers are not errors: they are reported by the validation
/// pass as warnings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DatasetError {
    EmptyId(RecordKind),
    DuplicateId(RecordKind, String),
}

impl Error for DatasetError {}

impl Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::EmptyId(kind) => write!(f, "a {} record has an empty id", kind),
            DatasetError::DuplicateId(kind, id) => {
                write!(f, "the {} id {:?} is used more than once", kind, id)
            }
        }
    }
}
