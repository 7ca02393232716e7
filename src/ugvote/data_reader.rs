// Reader for the election dataset in JSON format.

use election_map::builder::DatasetBuilder;

use crate::ugvote::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonCandidate {
    pub id: String,
    pub name: String,
    pub party: String,
    #[serde(rename = "partyColor")]
    pub party_color: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonVoteShare {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonPresidential {
    #[serde(rename = "totalVotes")]
    pub total_votes: u64,
    #[serde(rename = "registeredVoters")]
    pub registered_voters: u64,
    pub turnout: f64,
    pub candidates: Vec<JsonCandidate>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonRegion {
    pub id: String,
    pub name: String,
    pub districts: Vec<String>,
    pub color: String,
    #[serde(rename = "totalVotes", default)]
    pub total_votes: u64,
    #[serde(rename = "registeredVoters", default)]
    pub registered_voters: u64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonDistrict {
    pub id: String,
    pub name: String,
    pub region: String,
    pub constituencies: Vec<String>,
    #[serde(rename = "totalVotes")]
    pub total_votes: u64,
    #[serde(rename = "registeredVoters")]
    pub registered_voters: u64,
    pub turnout: f64,
    #[serde(rename = "presidentialWinner")]
    pub presidential_winner: String,
    #[serde(rename = "presidentialResults")]
    pub presidential_results: Vec<JsonVoteShare>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonMpResult {
    pub name: String,
    pub party: String,
    #[serde(rename = "partyColor")]
    pub party_color: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonConstituency {
    pub id: String,
    pub name: String,
    pub district: String,
    pub region: String,
    #[serde(rename = "registeredVoters")]
    pub registered_voters: u64,
    #[serde(rename = "totalVotes")]
    pub total_votes: u64,
    pub turnout: f64,
    pub winner: JsonMpResult,
    pub candidates: Vec<JsonMpResult>,
    #[serde(rename = "presidentialResults")]
    pub presidential_results: Vec<JsonVoteShare>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonPollingStation {
    pub id: String,
    pub constituency: String,
    pub turnout: f64,
    #[serde(rename = "totalVotes")]
    pub total_votes: u64,
    #[serde(rename = "presidentialResults")]
    pub presidential_results: Vec<JsonVoteShare>,
    #[serde(rename = "localResults")]
    pub local_results: Vec<JsonMpResult>,
    pub irregularities: Option<Vec<String>>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonPartySeats {
    pub party: String,
    pub name: String,
    pub seats: u32,
    pub color: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonParliament {
    #[serde(rename = "totalSeats")]
    pub total_seats: u32,
    pub parties: Vec<JsonPartySeats>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionFile {
    pub presidential: JsonPresidential,
    pub regions: Vec<JsonRegion>,
    pub districts: Vec<JsonDistrict>,
    pub constituencies: Vec<JsonConstituency>,
    #[serde(rename = "pollingStations", default)]
    pub polling_stations: Vec<JsonPollingStation>,
    pub parliament: JsonParliament,
}

impl From<JsonVoteShare> for VoteShare {
    fn from(s: JsonVoteShare) -> VoteShare {
        VoteShare {
            candidate_id: s.candidate_id,
            votes: s.votes,
            percentage: s.percentage,
        }
    }
}

impl From<JsonMpResult> for MpResult {
    fn from(mp: JsonMpResult) -> MpResult {
        MpResult {
            name: mp.name,
            party: mp.party,
            party_color: mp.party_color,
            votes: mp.votes,
            percentage: mp.percentage,
        }
    }
}

fn shares(l: Vec<JsonVoteShare>) -> Vec<VoteShare> {
    l.into_iter().map(VoteShare::from).collect()
}

fn mp_results(l: Vec<JsonMpResult>) -> Vec<MpResult> {
    l.into_iter().map(MpResult::from).collect()
}

/// Assembles the dataset, rejecting empty and duplicate identifiers.
pub fn build_dataset(file: ElectionFile) -> UgResult<ElectionDataset> {
    let mut builder = DatasetBuilder::new();
    builder.presidential_totals(PresidentialTotals {
        total_votes: file.presidential.total_votes,
        registered_voters: file.presidential.registered_voters,
        turnout: file.presidential.turnout,
    });
    builder.parliament(ParliamentarySummary {
        total_seats: file.parliament.total_seats,
        parties: file
            .parliament
            .parties
            .into_iter()
            .map(|p| PartySeats {
                party: p.party,
                name: p.name,
                seats: p.seats,
                color: p.color,
            })
            .collect(),
    });

    for c in file.presidential.candidates {
        builder
            .add_candidate(Candidate {
                id: c.id,
                name: c.name,
                party: c.party,
                party_color: c.party_color,
                votes: c.votes,
                percentage: c.percentage,
            })
            .context(BuildingDatasetSnafu {})?;
    }

    for r in file.regions {
        builder
            .add_region(Region {
                id: r.id,
                name: r.name,
                districts: r.districts,
                color: r.color,
                total_votes: r.total_votes,
                registered_voters: r.registered_voters,
            })
            .context(BuildingDatasetSnafu {})?;
    }

    for d in file.districts {
        builder
            .add_district(District {
                id: d.id,
                name: d.name,
                region: d.region,
                constituencies: d.constituencies,
                total_votes: d.total_votes,
                registered_voters: d.registered_voters,
                turnout: d.turnout,
                presidential_winner: d.presidential_winner,
                presidential_results: shares(d.presidential_results),
            })
            .context(BuildingDatasetSnafu {})?;
    }

    for c in file.constituencies {
        builder
            .add_constituency(ConstituencyResult {
                id: c.id,
                name: c.name,
                district: c.district,
                region: c.region,
                registered_voters: c.registered_voters,
                total_votes: c.total_votes,
                turnout: c.turnout,
                winner: c.winner.into(),
                candidates: mp_results(c.candidates),
                presidential_results: shares(c.presidential_results),
            })
            .context(BuildingDatasetSnafu {})?;
    }

    for ps in file.polling_stations {
        builder
            .add_polling_station(PollingStationResult {
                id: ps.id,
                constituency: ps.constituency,
                turnout: ps.turnout,
                total_votes: ps.total_votes,
                presidential_results: shares(ps.presidential_results),
                local_results: mp_results(ps.local_results),
                irregularities: ps.irregularities,
            })
            .context(BuildingDatasetSnafu {})?;
    }

    builder.build().context(BuildingDatasetSnafu {})
}

pub fn parse_dataset(contents: &str, path: &str) -> UgResult<ElectionDataset> {
    let file: ElectionFile = serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    info!(
        "Read {} candidates, {} regions, {} districts, {} constituencies from {}",
        file.presidential.candidates.len(),
        file.regions.len(),
        file.districts.len(),
        file.constituencies.len(),
        path
    );
    build_dataset(file)
}

pub fn read_dataset(path: &str) -> UgResult<ElectionDataset> {
    info!("Attempting to read election dataset {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_dataset(&contents, path)
}
