use log::{debug, info, warn};

use election_map::aggregate::*;
use election_map::hemicycle::parliament_hemicycle;
use election_map::search::{search, NavigationStep};
use election_map::validate::{validate_dataset, ConsistencyWarning};
use election_map::view::{map_view, region_fill, ParseViewModeError, ViewMode, ViewState};
use election_map::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::ugvote::data_reader::read_dataset;
use crate::ugvote::map_reader::read_map;

pub mod data_reader;
pub mod map_reader;

#[derive(Debug, Snafu)]
pub enum UgError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid election dataset: {source}"))]
    BuildingDataset { source: DatasetError },
    #[snafu(display("{source}"))]
    InvalidViewMode { source: ParseViewModeError },
    #[snafu(display("Unknown {kind} {id:?}"))]
    UnknownSelection { kind: RecordKind, id: String },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type UgResult<T> = Result<T, UgError>;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn standings_to_json(dataset: &ElectionDataset, standings: &[Standing]) -> Vec<JSValue> {
    standings
        .iter()
        .map(|s| {
            let name = dataset.candidate(&s.id).map(|c| c.name.clone());
            json!({
                "candidate": s.id,
                "name": name,
                "votes": s.votes,
                "percentage": round2(s.percentage),
            })
        })
        .collect()
}

fn step_to_json(step: &NavigationStep) -> String {
    match step {
        NavigationStep::ShowCandidate(id) => format!("candidate:{}", id),
        NavigationStep::RevealRegion(id) => format!("region:{}", id),
        NavigationStep::RevealDistrict(id) => format!("district:{}", id),
        NavigationStep::RevealConstituency(id) => format!("constituency:{}", id),
    }
}

fn presidential_to_json(dataset: &ElectionDataset) -> JSValue {
    let n = summarize_nation(dataset);
    json!({
        "totalVotes": n.total_votes,
        "registeredVoters": n.registered_voters,
        "turnout": round2(n.turnout),
        "winner": n.winner,
        "standings": standings_to_json(dataset, &n.standings),
    })
}

fn regions_to_json(dataset: &ElectionDataset, mode: ViewMode) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for r in dataset.regions() {
        if let Some(s) = summarize_region(dataset, &r.id) {
            l.push(json!({
                "id": s.id,
                "name": s.name,
                "totalVotes": s.total_votes,
                "registeredVoters": s.registered_voters,
                "turnout": round2(s.turnout),
                "winner": s.winner,
                "districts": s.districts.len(),
                "fill": region_fill(dataset, &r.id, mode),
            }));
        }
    }
    l
}

fn parliament_to_json(dataset: &ElectionDataset) -> JSValue {
    let h = parliament_hemicycle(dataset.parliament());
    let segments: Vec<JSValue> = h
        .segments
        .iter()
        .map(|s| {
            json!({
                "party": s.party,
                "name": s.name,
                "seats": s.seats,
                "color": s.color,
                "startAngle": s.start_angle,
                "endAngle": s.end_angle,
                "path": s.svg_path(),
            })
        })
        .collect();
    json!({
        "totalSeats": h.total_seats,
        "segments": segments,
        "warning": h.warning.map(|w| w.to_string()),
    })
}

fn selection_to_json(dataset: &ElectionDataset, state: &ViewState) -> JSValue {
    match state {
        ViewState::Overview => JSValue::Null,
        ViewState::RegionSelected { region } => match summarize_region(dataset, region) {
            Some(s) => {
                let districts: Vec<JSValue> = s
                    .districts
                    .iter()
                    .map(|d| {
                        json!({
                            "id": d.id,
                            "name": d.name,
                            "winner": d.winner,
                            "turnout": round2(d.turnout),
                        })
                    })
                    .collect();
                json!({
                    "kind": "region",
                    "id": s.id,
                    "name": s.name,
                    "totalVotes": s.total_votes,
                    "registeredVoters": s.registered_voters,
                    "turnout": round2(s.turnout),
                    "winner": s.winner,
                    "standings": standings_to_json(dataset, &s.standings),
                    "districts": districts,
                })
            }
            None => JSValue::Null,
        },
        ViewState::DistrictSelected { district, .. } => {
            match summarize_district(dataset, district) {
                Some(s) => {
                    let constituencies: Vec<JSValue> = s
                        .constituencies
                        .iter()
                        .map(|c| {
                            json!({
                                "id": c.id,
                                "name": c.name,
                                "mp": c.winner_name,
                                "party": c.winner_party,
                                "turnout": round2(c.turnout),
                            })
                        })
                        .collect();
                    json!({
                        "kind": "district",
                        "id": s.id,
                        "name": s.name,
                        "region": s.region,
                        "totalVotes": s.total_votes,
                        "registeredVoters": s.registered_voters,
                        "turnout": round2(s.turnout),
                        "winner": s.winner,
                        "recordedWinner": s.recorded_winner,
                        "standings": standings_to_json(dataset, &s.standings),
                        "constituencies": constituencies,
                        "reportedConstituencies": s.constituencies.len(),
                        "expectedConstituencies": s.expected_constituencies,
                        "constituencyStandings":
                            standings_to_json(dataset, &s.constituency_standings),
                    })
                }
                None => JSValue::Null,
            }
        }
        ViewState::ConstituencySelected { constituency, .. } => {
            match summarize_constituency(dataset, constituency) {
                Some(s) => {
                    let candidates: Vec<JSValue> = s
                        .candidates
                        .iter()
                        .map(|mp| {
                            json!({
                                "name": mp.name,
                                "party": mp.party,
                                "votes": mp.votes,
                                "percentage": mp.percentage,
                            })
                        })
                        .collect();
                    let irregularities: Vec<JSValue> = s
                        .irregularities
                        .iter()
                        .map(|(station, report)| {
                            json!({"pollingStation": station, "report": report})
                        })
                        .collect();
                    json!({
                        "kind": "constituency",
                        "id": s.id,
                        "name": s.name,
                        "district": s.district,
                        "region": s.region,
                        "totalVotes": s.total_votes,
                        "registeredVoters": s.registered_voters,
                        "turnout": round2(s.turnout),
                        "mp": s.winner.name,
                        "party": s.winner.party,
                        "candidates": candidates,
                        "presidential": standings_to_json(dataset, &s.presidential),
                        "pollingStations": s.polling_stations,
                        "irregularities": irregularities,
                    })
                }
                None => JSValue::Null,
            }
        }
    }
}

fn map_to_json(
    dataset: &ElectionDataset,
    paths: &[MapPathRecord],
    state: &ViewState,
    mode: ViewMode,
) -> JSValue {
    let fills = map_view(dataset, paths, state, mode);
    let unmatched: Vec<&str> = paths
        .iter()
        .zip(fills.iter())
        .filter(|(_, f)| f.district.is_none())
        .map(|(p, _)| p.name.as_str())
        .collect();
    let shapes: Vec<JSValue> = fills
        .iter()
        .map(|f| {
            json!({
                "id": f.id,
                "region": f.region,
                "district": f.district,
                "label": f.label,
                "fill": f.fill,
                "stroke": f.stroke,
                "strokeWidth": f.stroke_width,
                "opacity": f.opacity,
            })
        })
        .collect();
    json!({
        "shapes": shapes,
        "unmatched": unmatched,
    })
}

fn search_to_json(dataset: &ElectionDataset, query: &str, max_results: usize) -> JSValue {
    let results: Vec<JSValue> = search(dataset, query, max_results)
        .iter()
        .map(|r| {
            let steps: Vec<String> = r.target.steps().iter().map(step_to_json).collect();
            json!({
                "category": r.category.to_string(),
                "id": r.id,
                "title": r.title,
                "subtitle": r.subtitle,
                "party": r.party,
                "partyColor": r.party_color,
                "steps": steps,
            })
        })
        .collect();
    json!({
        "query": query,
        "results": results,
    })
}

/// Resolves the selection passed on the command line. A deeper level implies
/// its parents, which may be omitted but must agree when given.
fn resolve_selection(
    dataset: &ElectionDataset,
    region: Option<&str>,
    district: Option<&str>,
    constituency: Option<&str>,
) -> UgResult<ViewState> {
    let mut state = ViewState::Overview;
    if let Some(cid) = constituency {
        let c = dataset.constituency(cid).context(UnknownSelectionSnafu {
            kind: RecordKind::Constituency,
            id: cid,
        })?;
        if let Some(did) = district {
            if did != c.district {
                whatever!("Constituency {} is not in district {}", cid, did)
            }
        }
        if let Some(rid) = region {
            if rid != c.region {
                whatever!("Constituency {} is not in region {}", cid, rid)
            }
        }
        state.select_region(&c.region);
        state.select_district(&c.district);
        state.select_constituency(&c.id);
        return Ok(state);
    }
    if let Some(did) = district {
        let d = dataset.district(did).context(UnknownSelectionSnafu {
            kind: RecordKind::District,
            id: did,
        })?;
        if let Some(rid) = region {
            if rid != d.region {
                whatever!("District {} is not in region {}", did, rid)
            }
        }
        state.select_region(&d.region);
        state.select_district(&d.id);
        return Ok(state);
    }
    if let Some(rid) = region {
        let r = dataset.region(rid).context(UnknownSelectionSnafu {
            kind: RecordKind::Region,
            id: rid,
        })?;
        state.select_region(&r.id);
    }
    Ok(state)
}

#[allow(clippy::too_many_arguments)]
fn build_summary_js(
    dataset: &ElectionDataset,
    paths: Option<&[MapPathRecord]>,
    state: &ViewState,
    mode: ViewMode,
    query: Option<&str>,
    max_results: usize,
    warnings: &[ConsistencyWarning],
) -> JSValue {
    let warnings: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
    json!({
        "viewMode": mode.to_string(),
        "presidential": presidential_to_json(dataset),
        "regions": regions_to_json(dataset, mode),
        "parliament": parliament_to_json(dataset),
        "selection": selection_to_json(dataset, state),
        "map": paths.map(|p| map_to_json(dataset, p, state, mode)),
        "search": query.map(|q| search_to_json(dataset, q, max_results)),
        "warnings": warnings,
    })
}

pub fn read_summary(path: &str) -> UgResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn write_output(out: Option<&str>, pretty_js: &str) -> UgResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
            info!("Summary written to {}", path);
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js: &str) -> UgResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The summary matches the reference {}", reference_path);
    Ok(())
}

/// Loads the data, computes the summary requested on the command line, writes it
/// and compares it against the reference if one is given.
pub fn run_dashboard(args: &Args) -> UgResult<JSValue> {
    let mode = args.view_mode.parse::<ViewMode>().context(InvalidViewModeSnafu {})?;

    let dataset = read_dataset(&args.data)?;
    let warnings = validate_dataset(&dataset);

    let paths: Option<Vec<MapPathRecord>> = match &args.map {
        Some(p) => Some(read_map(p)?),
        None => None,
    };

    let state = resolve_selection(
        &dataset,
        args.region.as_deref(),
        args.district.as_deref(),
        args.constituency.as_deref(),
    )?;
    info!("selection: {:?}", state);

    let summary = build_summary_js(
        &dataset,
        paths.as_deref(),
        &state,
        mode,
        args.query.as_deref(),
        args.max_results,
        &warnings,
    );

    let pretty_js = serde_json::to_string_pretty(&summary).context(SerializingJsonSnafu {})?;
    write_output(args.out.as_deref(), &pretty_js)?;

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn data_path(name: &str) -> String {
        format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("ugvote_{}.json", name))
            .display()
            .to_string()
    }

    fn run(test_name: &str, extra: &[&str]) -> UgResult<JSValue> {
        let mut cmd: Vec<String> = vec![
            "ugvote".to_string(),
            "--data".to_string(),
            data_path("uganda_2026.json"),
            "--out".to_string(),
            temp_path(test_name),
        ];
        cmd.extend(extra.iter().map(|s| s.to_string()));
        let args = Args::parse_from(cmd);
        run_dashboard(&args)
    }

    #[test]
    fn dataset_is_consistent() {
        let ds = read_dataset(&data_path("uganda_2026.json")).unwrap();
        assert_eq!(ds.candidates().len(), 5);
        assert_eq!(ds.regions().len(), 4);
        assert_eq!(ds.districts().len(), 17);
        assert_eq!(ds.constituencies().len(), 5);
        assert_eq!(ds.polling_stations().len(), 2);
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn national_and_regional_winners() {
        let js = run("winners", &[]).unwrap();
        assert_eq!(js["presidential"]["winner"], "museveni");
        assert_eq!(js["presidential"]["standings"][1]["candidate"], "kyagulanyi");
        assert_eq!(js["presidential"]["turnout"], 56.92);
        let regions = js["regions"].as_array().unwrap();
        let winners: Vec<&str> = regions
            .iter()
            .map(|r| r["winner"].as_str().unwrap())
            .collect();
        assert_eq!(winners, vec!["kyagulanyi", "museveni", "museveni", "museveni"]);
        assert_eq!(regions[0]["totalVotes"], 1678110);
        assert_eq!(regions[0]["districts"], 5);
        assert_eq!(regions[0]["fill"], "#DC2626");
        assert_eq!(js["selection"], JSValue::Null);
        assert_eq!(js["map"], JSValue::Null);
        assert_eq!(js["warnings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn parliament_spans_half_circle() {
        let js = run("parliament", &[]).unwrap();
        let segments = js["parliament"]["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 7);
        assert_eq!(segments[0]["party"], "NRM");
        assert_eq!(segments[1]["party"], "IND");
        assert_eq!(segments[0]["startAngle"], 180.0);
        let last_end = segments[6]["endAngle"].as_f64().unwrap();
        assert!(last_end.abs() < 1e-9);
        let total: f64 = segments
            .iter()
            .map(|s| s["startAngle"].as_f64().unwrap() - s["endAngle"].as_f64().unwrap())
            .sum();
        assert!((total - 180.0).abs() < 1e-9);
        assert_eq!(js["parliament"]["warning"], JSValue::Null);
    }

    #[test]
    fn search_results() {
        let js = run("search", &["--query", "kyagu"]).unwrap();
        let results = js["search"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["title"], "Robert Kyagulanyi Ssentamu");
        assert_eq!(results[0]["steps"], json!(["candidate:kyagulanyi"]));

        let js = run("search_short", &["--query", "k"]).unwrap();
        assert_eq!(js["search"]["results"], json!([]));

        let js = run("search_max", &["--query", "NRM", "--max-results", "2"]).unwrap();
        let results = js["search"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["category"], "Presidential Candidate");
        assert_eq!(results[1]["category"], "Constituency");
        assert_eq!(
            results[1]["steps"],
            json!([
                "region:western",
                "district:mbarara",
                "constituency:mbarara-city-north"
            ])
        );
    }

    #[test]
    fn selection_implies_parents() {
        let js = run("selection", &["--constituency", "jinja-city-east"]).unwrap();
        assert_eq!(js["selection"]["kind"], "constituency");
        assert_eq!(js["selection"]["district"], "jinja");
        assert_eq!(js["selection"]["region"], "eastern");
        assert_eq!(js["selection"]["mp"], "Paul Mwiru");

        let js = run("selection_district", &["--district", "kampala"]).unwrap();
        assert_eq!(js["selection"]["kind"], "district");
        assert_eq!(js["selection"]["region"], "central");
        assert_eq!(js["selection"]["expectedConstituencies"], 8);
        assert_eq!(js["selection"]["reportedConstituencies"], 2);
    }

    #[test]
    fn bad_selections() {
        let res = run("bad_region", &["--region", "atlantis"]);
        assert!(matches!(res, Err(UgError::UnknownSelection { .. })));
        let res = run("bad_parent", &["--district", "kampala", "--region", "western"]);
        assert!(matches!(res, Err(UgError::Whatever { .. })));
        let res = run("bad_mode", &["--view-mode", "senate"]);
        assert!(matches!(res, Err(UgError::InvalidViewMode { .. })));
    }

    #[test]
    fn map_colouring() {
        let map = data_path("uganda_map.json");
        let js = run("map", &["--map", map.as_str()]).unwrap();
        let shapes = js["map"]["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 20);
        assert_eq!(
            js["map"]["unmatched"],
            json!(["Fort Portal", "Moroto", "Kalangala"])
        );
        // Overview: Kampala is coloured by the winner of the central region.
        assert_eq!(shapes[0]["fill"], "#DC2626");

        let js = run(
            "map_region",
            &["--map", map.as_str(), "--region", "central"],
        )
        .unwrap();
        let shapes = js["map"]["shapes"].as_array().unwrap();
        // Luwero was won by Museveni, Mbarara is out of the region.
        assert_eq!(shapes[3]["fill"], "#FFD700");
        assert_eq!(shapes[5]["opacity"], 0.1);
    }

    #[test]
    fn parliamentary_mode() {
        let map = data_path("uganda_map.json");
        let js = run(
            "parliamentary",
            &["--map", map.as_str(), "--view-mode", "parliamentary", "--region", "eastern"],
        )
        .unwrap();
        assert_eq!(js["viewMode"], "parliamentary");
        let shapes = js["map"]["shapes"].as_array().unwrap();
        // Jinja City East went to the FDC; Mbale has no reported constituency.
        assert_eq!(shapes[10]["fill"], "#3B82F6");
        assert_eq!(shapes[11]["fill"], "#e2e8f0");
    }

    #[test]
    fn reference_comparison() {
        let first = temp_path("reference_src");
        run("reference_src", &[]).unwrap();
        assert!(run("reference_ok", &["--reference", first.as_str()]).is_ok());

        let altered = temp_path("reference_altered");
        let mut js = read_summary(&first).unwrap();
        js["presidential"]["winner"] = json!("kyagulanyi");
        fs::write(&altered, serde_json::to_string_pretty(&js).unwrap()).unwrap();
        let res = run("reference_ko", &["--reference", altered.as_str()]);
        assert!(matches!(res, Err(UgError::ReferenceMismatch { .. })));
    }
}
