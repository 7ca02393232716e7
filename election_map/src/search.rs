//! Free-text search over candidates, districts and constituencies.

use log::debug;
use std::fmt::Display;

use crate::ElectionDataset;

/// Queries shorter than this (after trimming) return nothing.
pub const MIN_QUERY_LEN: usize = 2;
/// The number of results shown by the dashboard.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// The categories, in the order in which they are scanned.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum SearchCategory {
    Candidate,
    District,
    Constituency,
}

impl Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchCategory::Candidate => "Presidential Candidate",
            SearchCategory::District => "District",
            SearchCategory::Constituency => "Constituency",
        };
        write!(f, "{}", s)
    }
}

/// Where selecting a result leads.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum NavigationTarget {
    Candidate {
        candidate: String,
    },
    District {
        region: String,
        district: String,
    },
    Constituency {
        region: String,
        district: String,
        constituency: String,
    },
}

/// One step of a drill-down. The steps of a target are meant to be applied
/// in order, possibly spaced in time to animate the transitions.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum NavigationStep {
    ShowCandidate(String),
    RevealRegion(String),
    RevealDistrict(String),
    RevealConstituency(String),
}

impl NavigationTarget {
    pub fn steps(&self) -> Vec<NavigationStep> {
        match self {
            NavigationTarget::Candidate { candidate } => {
                vec![NavigationStep::ShowCandidate(candidate.clone())]
            }
            NavigationTarget::District { region, district } => vec![
                NavigationStep::RevealRegion(region.clone()),
                NavigationStep::RevealDistrict(district.clone()),
            ],
            NavigationTarget::Constituency {
                region,
                district,
                constituency,
            } => vec![
                NavigationStep::RevealRegion(region.clone()),
                NavigationStep::RevealDistrict(district.clone()),
                NavigationStep::RevealConstituency(constituency.clone()),
            ],
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct SearchResult {
    pub category: SearchCategory,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub party: Option<String>,
    pub party_color: Option<String>,
    pub target: NavigationTarget,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Finds the records whose searchable fields contain the query.
///
/// The match is a case-insensitive substring test on:
/// * candidates: name, party code
/// * districts: name, region id
/// * constituencies: name, name and party of the winner
///
/// Candidates come first, then districts, then constituencies, each in dataset
/// order. At most `max_results` results are returned. A query of fewer than
/// [`MIN_QUERY_LEN`] characters (once trimmed) returns nothing.
pub fn search(dataset: &ElectionDataset, query: &str, max_results: usize) -> Vec<SearchResult> {
    let q = query.trim().to_lowercase();
    if q.chars().count() < MIN_QUERY_LEN {
        return vec![];
    }
    let matches = |field: &str| field.to_lowercase().contains(&q);

    let candidates = dataset
        .candidates()
        .iter()
        .filter(|c| matches(&c.name) || matches(&c.party))
        .map(|c| SearchResult {
            category: SearchCategory::Candidate,
            id: c.id.clone(),
            title: c.name.clone(),
            subtitle: format!("{} • {:.2}%", c.party, c.percentage),
            party: Some(c.party.clone()),
            party_color: Some(c.party_color.clone()),
            target: NavigationTarget::Candidate {
                candidate: c.id.clone(),
            },
        });

    let districts = dataset
        .districts()
        .iter()
        .filter(|d| matches(&d.name) || matches(&d.region))
        .map(|d| SearchResult {
            category: SearchCategory::District,
            id: d.id.clone(),
            title: d.name.clone(),
            subtitle: format!("{} Region • Turnout: {}%", capitalize(&d.region), d.turnout),
            party: None,
            party_color: None,
            target: NavigationTarget::District {
                region: d.region.clone(),
                district: d.id.clone(),
            },
        });

    let constituencies = dataset
        .constituencies()
        .iter()
        .filter(|c| matches(&c.name) || matches(&c.winner.name) || matches(&c.winner.party))
        .map(|c| SearchResult {
            category: SearchCategory::Constituency,
            id: c.id.clone(),
            title: c.name.clone(),
            subtitle: format!(
                "{} • MP: {} ({})",
                capitalize(&c.district),
                c.winner.name,
                c.winner.party
            ),
            party: Some(c.winner.party.clone()),
            party_color: Some(c.winner.party_color.clone()),
            target: NavigationTarget::Constituency {
                region: c.region.clone(),
                district: c.district.clone(),
                constituency: c.id.clone(),
            },
        });

    let res: Vec<SearchResult> = candidates
        .chain(districts)
        .chain(constituencies)
        .take(max_results)
        .collect();
    debug!("search: {:?} -> {} results", q, res.len());
    res
}

// ******** Interactive session *********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SessionState {
    Idle,
    /// Some text was typed, but not enough to search.
    Typing,
    /// The number of results shown.
    Results(usize),
    /// The query is long enough and matched nothing.
    Empty,
}

/// The state of the search box: query, results and keyboard selection.
pub struct SearchSession<'a> {
    dataset: &'a ElectionDataset,
    max_results: usize,
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
    state: SessionState,
}

impl<'a> SearchSession<'a> {
    pub fn new(dataset: &'a ElectionDataset) -> SearchSession<'a> {
        SearchSession::with_max_results(dataset, DEFAULT_MAX_RESULTS)
    }

    pub fn with_max_results(dataset: &'a ElectionDataset, max_results: usize) -> SearchSession<'a> {
        SearchSession {
            dataset,
            max_results,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.results.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    /// Replaces the query and recomputes the results. The selection goes back
    /// to the first result.
    pub fn input(&mut self, text: &str) -> SessionState {
        self.query = text.to_string();
        self.selected = 0;
        if self.query.is_empty() {
            self.results.clear();
            self.state = SessionState::Idle;
            return self.state;
        }
        self.results = search(self.dataset, &self.query, self.max_results);
        self.state = if self.query.trim().chars().count() < MIN_QUERY_LEN {
            SessionState::Typing
        } else if self.results.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Results(self.results.len())
        };
        self.state
    }

    /// Moves the selection down, wrapping around after the last result.
    pub fn move_down(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    /// Moves the selection up, wrapping around before the first result.
    pub fn move_up(&mut self) {
        let n = self.results.len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Chooses the selected result. The session is cleared and the steps to
    /// reach the result are returned, or `None` if there is nothing to choose.
    pub fn select(&mut self) -> Option<Vec<NavigationStep>> {
        let steps = self.selected().map(|r| r.target.steps());
        if steps.is_some() {
            self.clear();
        }
        steps
    }

    /// Chooses a result by its position in the list.
    pub fn select_at(&mut self, index: usize) -> Option<Vec<NavigationStep>> {
        if index < self.results.len() {
            self.selected = index;
            self.select()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
        self.state = SessionState::Idle;
    }

    pub fn escape(&mut self) {
        self.clear();
    }
}
