//! The drill-down state of the map and the colouring derived from it.
//!
//! The map is either showing the whole country (each shape coloured by the
//! winner of its region) or one region (the shapes of the region coloured by
//! the winner of their district, the rest faded out).

use log::debug;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use crate::aggregate::{leading_party, leading_party_in_region, region_winner};
use crate::config::{District, MapPathRecord};
use crate::reconcile::{resolve_district, DistrictNameIndex};
use crate::search::NavigationStep;
use crate::ElectionDataset;

/// Shapes without a matching district.
pub const NO_DATA_COLOR: &str = "#e2e8f0";
/// A district won by a candidate (or party) without a known colour.
pub const UNKNOWN_WINNER_COLOR: &str = "#94a3b8";
/// A region whose winner has no known colour.
pub const REGION_FALLBACK_COLOR: &str = "#cbd5e1";
/// Shapes outside of the selected region.
pub const BACKGROUND_COLOR: &str = "#f1f5f9";
pub const BACKGROUND_STROKE: &str = "#d2dae5";
pub const ACTIVE_STROKE: &str = "#ffffff";
pub const HIGHLIGHT_STROKE: &str = "#334155";
pub const FADED_OPACITY: f64 = 0.1;

pub const NO_DATA_LABEL: &str = "No data";

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ViewMode {
    Presidential,
    Parliamentary,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Presidential
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Presidential => write!(f, "presidential"),
            ViewMode::Parliamentary => write!(f, "parliamentary"),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseViewModeError(pub String);

impl Display for ParseViewModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown view mode {:?}: expected presidential or parliamentary",
            self.0
        )
    }
}

impl Error for ParseViewModeError {}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "presidential" => Ok(ViewMode::Presidential),
            "parliamentary" => Ok(ViewMode::Parliamentary),
            _ => Err(ParseViewModeError(s.to_string())),
        }
    }
}

/// What the map is currently focused on.
///
/// Each level keeps the ids of the levels above it, so that going back never
/// needs a lookup.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum ViewState {
    Overview,
    RegionSelected {
        region: String,
    },
    DistrictSelected {
        region: String,
        district: String,
    },
    ConstituencySelected {
        region: String,
        district: String,
        constituency: String,
    },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Overview
    }
}

impl ViewState {
    pub fn region(&self) -> Option<&str> {
        match self {
            ViewState::Overview => None,
            ViewState::RegionSelected { region }
            | ViewState::DistrictSelected { region, .. }
            | ViewState::ConstituencySelected { region, .. } => Some(region),
        }
    }

    pub fn district(&self) -> Option<&str> {
        match self {
            ViewState::DistrictSelected { district, .. }
            | ViewState::ConstituencySelected { district, .. } => Some(district),
            _ => None,
        }
    }

    pub fn constituency(&self) -> Option<&str> {
        match self {
            ViewState::ConstituencySelected { constituency, .. } => Some(constituency),
            _ => None,
        }
    }

    /// Focuses on a region, from any state.
    pub fn select_region(&mut self, region: &str) {
        *self = ViewState::RegionSelected {
            region: region.to_string(),
        };
    }

    /// Focuses on a district of the selected region.
    ///
    /// Returns false (and leaves the state unchanged) when no region is selected.
    pub fn select_district(&mut self, district: &str) -> bool {
        match self.region() {
            Some(region) => {
                *self = ViewState::DistrictSelected {
                    region: region.to_string(),
                    district: district.to_string(),
                };
                true
            }
            None => false,
        }
    }

    /// Focuses on a constituency of the selected district.
    ///
    /// Returns false (and leaves the state unchanged) when no district is selected.
    pub fn select_constituency(&mut self, constituency: &str) -> bool {
        match (self.region(), self.district()) {
            (Some(region), Some(district)) => {
                *self = ViewState::ConstituencySelected {
                    region: region.to_string(),
                    district: district.to_string(),
                    constituency: constituency.to_string(),
                };
                true
            }
            _ => false,
        }
    }

    /// Goes up one level.
    pub fn back(&mut self) {
        let next = match self {
            ViewState::Overview | ViewState::RegionSelected { .. } => ViewState::Overview,
            ViewState::DistrictSelected { region, .. } => ViewState::RegionSelected {
                region: region.clone(),
            },
            ViewState::ConstituencySelected {
                region, district, ..
            } => ViewState::DistrictSelected {
                region: region.clone(),
                district: district.clone(),
            },
        };
        *self = next;
    }

    /// Goes back to the whole country.
    pub fn close(&mut self) {
        *self = ViewState::Overview;
    }

    /// Applies one step of a search navigation. Showing a candidate does not
    /// move the map, and false is returned.
    pub fn apply(&mut self, step: &NavigationStep) -> bool {
        match step {
            NavigationStep::ShowCandidate(_) => false,
            NavigationStep::RevealRegion(r) => {
                self.select_region(r);
                true
            }
            NavigationStep::RevealDistrict(d) => self.select_district(d),
            NavigationStep::RevealConstituency(c) => self.select_constituency(c),
        }
    }

    /// Reacts to a click on a map shape.
    ///
    /// In the overview, the region of the shape gets selected. Once a region is
    /// selected, clicking one of its shapes selects the matching district, and
    /// clicking a shape of another region switches to that region. A shape that
    /// matches a district belongs to the region of that district, whatever its
    /// tag says. Other shapes fall back to their tag and never select a district.
    pub fn click_path(&mut self, dataset: &ElectionDataset, path: &MapPathRecord) {
        let district = resolve_district(path, dataset.districts());
        let region = district.map(|d| d.region.as_str()).unwrap_or(&path.region);
        if self.region() != Some(region) {
            self.select_region(region);
        } else if let Some(d) = district {
            self.select_district(&d.id);
        }
        debug!("click_path: {} -> {:?}", path.name, self);
    }
}

/// How one map shape is drawn.
#[derive(PartialEq, Debug, Clone)]
pub struct PathFill {
    pub id: String,
    pub region: String,
    /// The matched district, if any.
    pub district: Option<String>,
    /// The district name, or [`NO_DATA_LABEL`].
    pub label: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

fn fill_for(dataset: &ElectionDataset, district: Option<&District>, mode: ViewMode) -> String {
    let d = match district {
        Some(d) => d,
        None => return NO_DATA_COLOR.to_string(),
    };
    let color = match mode {
        ViewMode::Presidential => dataset
            .candidate_color(&d.presidential_winner)
            .unwrap_or(UNKNOWN_WINNER_COLOR),
        ViewMode::Parliamentary => match leading_party(dataset, &d.id) {
            Some(party) => dataset.party_color(&party).unwrap_or(UNKNOWN_WINNER_COLOR),
            None => NO_DATA_COLOR,
        },
    };
    color.to_string()
}

/// The colour of the district drawn by a shape.
///
/// In presidential mode this is the colour of the recorded winner. In
/// parliamentary mode it is the colour of the party holding most of the
/// reported constituencies of the district.
pub fn district_fill(dataset: &ElectionDataset, path: &MapPathRecord, mode: ViewMode) -> String {
    fill_for(dataset, resolve_district(path, dataset.districts()), mode)
}

/// The colour of a region, from the winner over all its districts.
pub fn region_fill(dataset: &ElectionDataset, region_id: &str, mode: ViewMode) -> String {
    if dataset.districts_in_region(region_id).next().is_none() {
        return NO_DATA_COLOR.to_string();
    }
    let color = match mode {
        ViewMode::Presidential => region_winner(dataset, region_id)
            .and_then(|w| dataset.candidate_color(&w).map(|s| s.to_string())),
        ViewMode::Parliamentary => leading_party_in_region(dataset, region_id)
            .and_then(|p| dataset.party_color(&p).map(|s| s.to_string())),
    };
    color.unwrap_or_else(|| REGION_FALLBACK_COLOR.to_string())
}

/// Computes how every shape of the map is drawn in a given state.
pub fn map_view(
    dataset: &ElectionDataset,
    paths: &[MapPathRecord],
    state: &ViewState,
    mode: ViewMode,
) -> Vec<PathFill> {
    let index = DistrictNameIndex::new(dataset.districts());
    let selected = state.region();
    let mut res: Vec<PathFill> = Vec::with_capacity(paths.len());
    for p in paths.iter() {
        let district = index.resolve(p);
        let region = district.map(|d| d.region.as_str()).unwrap_or(&p.region);
        let mut fill = PathFill {
            id: p.id.clone(),
            region: region.to_string(),
            district: district.map(|d| d.id.clone()),
            label: district
                .map(|d| d.name.clone())
                .unwrap_or_else(|| NO_DATA_LABEL.to_string()),
            fill: BACKGROUND_COLOR.to_string(),
            stroke: BACKGROUND_STROKE.to_string(),
            stroke_width: 0.5,
            opacity: 1.0,
        };
        match selected {
            Some(r) if r == region => {
                fill.fill = fill_for(dataset, district, mode);
                fill.stroke = ACTIVE_STROKE.to_string();
                fill.stroke_width = 1.0;
                if district.is_some() && fill.district.as_deref() == state.district() {
                    fill.stroke = HIGHLIGHT_STROKE.to_string();
                    fill.stroke_width = 1.5;
                }
            }
            Some(_) => {
                fill.opacity = FADED_OPACITY;
            }
            None => {
                fill.fill = region_fill(dataset, region, mode);
                fill.stroke = ACTIVE_STROKE.to_string();
            }
        }
        res.push(fill);
    }
    debug!(
        "map_view: {} shapes, {} without data",
        res.len(),
        res.iter().filter(|f| f.district.is_none()).count()
    );
    res
}
