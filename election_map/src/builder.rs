use log::debug;
use std::collections::HashSet;

pub use crate::config::*;
use crate::ElectionDataset;

/// A builder for assembling a dataset.
///
/// Records can be added in any order. Identifiers must be non-empty and unique
/// within their kind; references between records are not checked here (see
/// [`crate::validate::validate_dataset`]).
///
/// ```
/// use election_map::builder::DatasetBuilder;
/// use election_map::{Candidate, DatasetError};
///
/// let mut builder = DatasetBuilder::new();
/// builder.add_candidate(Candidate {
///     id: "museveni".to_string(),
///     name: "Yoweri Kaguta Museveni".to_string(),
///     party: "NRM".to_string(),
///     party_color: "#FFD700".to_string(),
///     votes: 6042898,
///     percentage: 58.64,
/// })?;
///
/// let dataset = builder.build()?;
/// assert!(dataset.candidate("museveni").is_some());
///
/// # Ok::<(), DatasetError>(())
/// ```
#[derive(Default)]
pub struct DatasetBuilder {
    _candidates: Vec<Candidate>,
    _presidential: PresidentialTotals,
    _regions: Vec<Region>,
    _districts: Vec<District>,
    _constituencies: Vec<ConstituencyResult>,
    _polling_stations: Vec<PollingStationResult>,
    _parliament: ParliamentarySummary,
}

impl DatasetBuilder {
    pub fn new() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    pub fn presidential_totals(&mut self, totals: PresidentialTotals) -> &mut DatasetBuilder {
        self._presidential = totals;
        self
    }

    pub fn parliament(&mut self, summary: ParliamentarySummary) -> &mut DatasetBuilder {
        self._parliament = summary;
        self
    }

    pub fn add_candidate(&mut self, candidate: Candidate) -> Result<(), DatasetError> {
        check_id(RecordKind::Candidate, &candidate.id)?;
        self._candidates.push(candidate);
        Ok(())
    }

    pub fn add_region(&mut self, region: Region) -> Result<(), DatasetError> {
        check_id(RecordKind::Region, &region.id)?;
        self._regions.push(region);
        Ok(())
    }

    pub fn add_district(&mut self, district: District) -> Result<(), DatasetError> {
        check_id(RecordKind::District, &district.id)?;
        self._districts.push(district);
        Ok(())
    }

    pub fn add_constituency(
        &mut self,
        constituency: ConstituencyResult,
    ) -> Result<(), DatasetError> {
        check_id(RecordKind::Constituency, &constituency.id)?;
        self._constituencies.push(constituency);
        Ok(())
    }

    pub fn add_polling_station(
        &mut self,
        station: PollingStationResult,
    ) -> Result<(), DatasetError> {
        check_id(RecordKind::PollingStation, &station.id)?;
        self._polling_stations.push(station);
        Ok(())
    }

    /// Freezes the records into a dataset.
    pub fn build(self) -> Result<ElectionDataset, DatasetError> {
        check_unique(RecordKind::Candidate, self._candidates.iter().map(|c| &c.id))?;
        check_unique(RecordKind::Region, self._regions.iter().map(|r| &r.id))?;
        check_unique(RecordKind::District, self._districts.iter().map(|d| &d.id))?;
        check_unique(
            RecordKind::Constituency,
            self._constituencies.iter().map(|c| &c.id),
        )?;
        check_unique(
            RecordKind::PollingStation,
            self._polling_stations.iter().map(|p| &p.id),
        )?;
        check_unique(
            RecordKind::Party,
            self._parliament.parties.iter().map(|p| &p.party),
        )?;
        for p in self._parliament.parties.iter() {
            check_id(RecordKind::Party, &p.party)?;
        }
        debug!(
            "build: {} candidates, {} regions, {} districts, {} constituencies, {} polling stations",
            self._candidates.len(),
            self._regions.len(),
            self._districts.len(),
            self._constituencies.len(),
            self._polling_stations.len()
        );
        Ok(ElectionDataset {
            candidates: self._candidates,
            presidential: self._presidential,
            regions: self._regions,
            districts: self._districts,
            constituencies: self._constituencies,
            polling_stations: self._polling_stations,
            parliament: self._parliament,
        })
    }
}

fn check_id(kind: RecordKind, id: &str) -> Result<(), DatasetError> {
    if id.trim().is_empty() {
        Err(DatasetError::EmptyId(kind))
    } else {
        Ok(())
    }
}

fn check_unique<'a>(
    kind: RecordKind,
    ids: impl Iterator<Item = &'a String>,
) -> Result<(), DatasetError> {
    let mut seen: HashSet<&String> = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId(kind, id.clone()));
        }
    }
    Ok(())
}
