mod config;
use log::debug;

pub mod aggregate;
pub mod builder;
pub mod hemicycle;
pub mod manual;
pub mod reconcile;
pub mod search;
pub mod validate;
pub mod view;

#[cfg(test)]
mod test_data;

pub use crate::config::*;

/// The complete set of results, read-only once built.
///
/// A dataset is assembled with [`builder::DatasetBuilder`] and then shared by
/// reference with every component that needs it. Records are kept in their
/// input order, which is also the order used by search and display.
#[derive(PartialEq, Debug, Clone)]
pub struct ElectionDataset {
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) presidential: PresidentialTotals,
    pub(crate) regions: Vec<Region>,
    pub(crate) districts: Vec<District>,
    pub(crate) constituencies: Vec<ConstituencyResult>,
    pub(crate) polling_stations: Vec<PollingStationResult>,
    pub(crate) parliament: ParliamentarySummary,
}

impl ElectionDataset {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn presidential(&self) -> &PresidentialTotals {
        &self.presidential
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn constituencies(&self) -> &[ConstituencyResult] {
        &self.constituencies
    }

    pub fn polling_stations(&self) -> &[PollingStationResult] {
        &self.polling_stations
    }

    pub fn parliament(&self) -> &ParliamentarySummary {
        &self.parliament
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn district(&self, id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    pub fn constituency(&self, id: &str) -> Option<&ConstituencyResult> {
        self.constituencies.iter().find(|c| c.id == id)
    }

    /// The districts that declare `region_id` as their region, in dataset order.
    ///
    /// Membership is taken from the districts themselves and not from the list
    /// stored on the region, which may name districts without results.
    pub fn districts_in_region<'a>(
        &'a self,
        region_id: &'a str,
    ) -> impl Iterator<Item = &'a District> + 'a {
        self.districts.iter().filter(move |d| d.region == region_id)
    }

    pub fn constituencies_in_district<'a>(
        &'a self,
        district_id: &'a str,
    ) -> impl Iterator<Item = &'a ConstituencyResult> + 'a {
        self.constituencies
            .iter()
            .filter(move |c| c.district == district_id)
    }

    pub fn constituencies_in_region<'a>(
        &'a self,
        region_id: &'a str,
    ) -> impl Iterator<Item = &'a ConstituencyResult> + 'a {
        self.constituencies
            .iter()
            .filter(move |c| c.region == region_id)
    }

    pub fn polling_stations_in<'a>(
        &'a self,
        constituency_id: &'a str,
    ) -> impl Iterator<Item = &'a PollingStationResult> + 'a {
        self.polling_stations
            .iter()
            .filter(move |p| p.constituency == constituency_id)
    }

    /// The party colour used for a candidate, if the candidate is known.
    pub fn candidate_color(&self, candidate_id: &str) -> Option<&str> {
        let c = self.candidate(candidate_id);
        if c.is_none() {
            debug!("candidate_color: unknown candidate {:?}", candidate_id);
        }
        c.map(|c| c.party_color.as_str())
    }

    /// The colour of a party, looked up first in the parliament summary and
    /// then among the local race results.
    pub fn party_color(&self, party: &str) -> Option<&str> {
        if let Some(p) = self.parliament.parties.iter().find(|p| p.party == party) {
            return Some(p.color.as_str());
        }
        self.constituencies
            .iter()
            .flat_map(|c| c.candidates.iter())
            .find(|mp| mp.party == party)
            .map(|mp| mp.party_color.as_str())
    }
}
