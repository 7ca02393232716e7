//! Consistency checks run when a dataset is loaded.
//!
//! The dataset is trusted: nothing found here stops the program. Each problem
//! is logged as a warning and returned to the caller.

use log::{info, warn};
use std::collections::HashSet;
use std::fmt::Display;

use crate::aggregate::{aggregate_votes_by_candidate, percentage_of, winner_of};
use crate::config::{MpResult, RecordKind, VoteShare};
use crate::ElectionDataset;

/// Allowed gap between a stored percentage and the one recomputed from votes.
pub const PERCENT_TOLERANCE: f64 = 0.05;
/// Allowed gap between the sum of the percentages of a contest and 100.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.1;
/// Allowed gap between a stored turnout and the recomputed one.
pub const TURNOUT_TOLERANCE: f64 = 0.1;

#[derive(PartialEq, Debug, Clone)]
pub enum ConsistencyWarning {
    PercentageSum {
        context: String,
        sum: f64,
    },
    PercentageMismatch {
        context: String,
        entry: String,
        stored: f64,
        computed: f64,
    },
    VoteTotalMismatch {
        context: String,
        total_votes: u64,
        breakdown_sum: u64,
    },
    TurnoutMismatch {
        context: String,
        stored: f64,
        computed: f64,
    },
    WinnerMismatch {
        context: String,
        recorded: String,
        computed: Option<String>,
    },
    UnknownParent {
        kind: RecordKind,
        id: String,
        parent_kind: RecordKind,
        parent: String,
    },
    /// The parent exists but is not the one implied by the rest of the dataset.
    ParentMismatch {
        kind: RecordKind,
        id: String,
        parent_kind: RecordKind,
        expected: String,
        found: String,
    },
    UnknownCandidate {
        context: String,
        candidate_id: String,
    },
    SeatTotalMismatch {
        expected: u32,
        actual: u64,
    },
}

impl Display for ConsistencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyWarning::PercentageSum { context, sum } => {
                write!(f, "{}: percentages sum to {:.2}", context, sum)
            }
            ConsistencyWarning::PercentageMismatch {
                context,
                entry,
                stored,
                computed,
            } => write!(
                f,
                "{}: {} has a stored percentage of {:.2} but its votes give {:.2}",
                context, entry, stored, computed
            ),
            ConsistencyWarning::VoteTotalMismatch {
                context,
                total_votes,
                breakdown_sum,
            } => write!(
                f,
                "{}: total votes is {} but the breakdown sums to {}",
                context, total_votes, breakdown_sum
            ),
            ConsistencyWarning::TurnoutMismatch {
                context,
                stored,
                computed,
            } => write!(
                f,
                "{}: stored turnout {:.2} differs from computed turnout {:.2}",
                context, stored, computed
            ),
            ConsistencyWarning::WinnerMismatch {
                context,
                recorded,
                computed,
            } => write!(
                f,
                "{}: recorded winner {:?} but the votes designate {:?}",
                context, recorded, computed
            ),
            ConsistencyWarning::UnknownParent {
                kind,
                id,
                parent_kind,
                parent,
            } => write!(
                f,
                "{} {:?} refers to the unknown {} {:?}",
                kind, id, parent_kind, parent
            ),
            ConsistencyWarning::ParentMismatch {
                kind,
                id,
                parent_kind,
                expected,
                found,
            } => write!(
                f,
                "{} {:?} is in the {} {:?} but its parent is in the {} {:?}",
                kind, id, parent_kind, found, parent_kind, expected
            ),
            ConsistencyWarning::UnknownCandidate {
                context,
                candidate_id,
            } => write!(f, "{}: unknown candidate {:?}", context, candidate_id),
            ConsistencyWarning::SeatTotalMismatch { expected, actual } => write!(
                f,
                "parliament: the parties hold {} seats but the chamber has {}",
                actual, expected
            ),
        }
    }
}

/// Runs all the checks on a dataset and logs each problem found.
pub fn validate_dataset(dataset: &ElectionDataset) -> Vec<ConsistencyWarning> {
    let mut res: Vec<ConsistencyWarning> = Vec::new();
    let candidate_ids: HashSet<&str> = dataset.candidates().iter().map(|c| c.id.as_str()).collect();
    let region_ids: HashSet<&str> = dataset.regions().iter().map(|r| r.id.as_str()).collect();
    let district_ids: HashSet<&str> = dataset.districts().iter().map(|d| d.id.as_str()).collect();
    let constituency_ids: HashSet<&str> =
        dataset.constituencies().iter().map(|c| c.id.as_str()).collect();

    // National contest
    {
        let p = dataset.presidential();
        let entries: Vec<(String, u64, f64)> = dataset
            .candidates()
            .iter()
            .map(|c| (c.id.clone(), c.votes, c.percentage))
            .collect();
        check_contest("national presidential", p.total_votes, &entries, &mut res);
        check_turnout(
            "national presidential",
            p.turnout,
            p.total_votes,
            p.registered_voters,
            &mut res,
        );
    }

    for d in dataset.districts() {
        let context = format!("district {}", d.id);
        if !region_ids.contains(d.region.as_str()) {
            res.push(ConsistencyWarning::UnknownParent {
                kind: RecordKind::District,
                id: d.id.clone(),
                parent_kind: RecordKind::Region,
                parent: d.region.clone(),
            });
        }
        check_shares(&context, d.total_votes, &d.presidential_results, &candidate_ids, &mut res);
        check_turnout(&context, d.turnout, d.total_votes, d.registered_voters, &mut res);
        let tally = aggregate_votes_by_candidate([d.presidential_results.as_slice()]);
        let computed = winner_of(&tally);
        if computed != Some(d.presidential_winner.as_str()) {
            res.push(ConsistencyWarning::WinnerMismatch {
                context,
                recorded: d.presidential_winner.clone(),
                computed: computed.map(|s| s.to_string()),
            });
        }
    }

    for c in dataset.constituencies() {
        let context = format!("constituency {}", c.id);
        if !district_ids.contains(c.district.as_str()) {
            res.push(ConsistencyWarning::UnknownParent {
                kind: RecordKind::Constituency,
                id: c.id.clone(),
                parent_kind: RecordKind::District,
                parent: c.district.clone(),
            });
        } else if let Some(d) = dataset.district(&c.district) {
            if !region_ids.contains(c.region.as_str()) {
                res.push(ConsistencyWarning::UnknownParent {
                    kind: RecordKind::Constituency,
                    id: c.id.clone(),
                    parent_kind: RecordKind::Region,
                    parent: c.region.clone(),
                });
            } else if d.region != c.region {
                res.push(ConsistencyWarning::ParentMismatch {
                    kind: RecordKind::Constituency,
                    id: c.id.clone(),
                    parent_kind: RecordKind::Region,
                    expected: d.region.clone(),
                    found: c.region.clone(),
                });
            }
        }
        check_shares(
            &format!("{} (presidential)", context),
            c.total_votes,
            &c.presidential_results,
            &candidate_ids,
            &mut res,
        );
        check_local_race(&context, c.total_votes, &c.candidates, &mut res);
        check_turnout(&context, c.turnout, c.total_votes, c.registered_voters, &mut res);
        let top = top_local_candidate(&c.candidates);
        if top.map(|mp| mp.name.as_str()) != Some(c.winner.name.as_str()) {
            res.push(ConsistencyWarning::WinnerMismatch {
                context,
                recorded: c.winner.name.clone(),
                computed: top.map(|mp| mp.name.clone()),
            });
        }
    }

    for ps in dataset.polling_stations() {
        let context = format!("polling station {}", ps.id);
        if !constituency_ids.contains(ps.constituency.as_str()) {
            res.push(ConsistencyWarning::UnknownParent {
                kind: RecordKind::PollingStation,
                id: ps.id.clone(),
                parent_kind: RecordKind::Constituency,
                parent: ps.constituency.clone(),
            });
        }
        check_shares(
            &format!("{} (presidential)", context),
            ps.total_votes,
            &ps.presidential_results,
            &candidate_ids,
            &mut res,
        );
        check_local_race(&context, ps.total_votes, &ps.local_results, &mut res);
    }

    let parliament = dataset.parliament();
    let seat_sum: u64 = parliament.parties.iter().map(|p| p.seats as u64).sum();
    if seat_sum != parliament.total_seats as u64 {
        res.push(ConsistencyWarning::SeatTotalMismatch {
            expected: parliament.total_seats,
            actual: seat_sum,
        });
    }

    for w in res.iter() {
        warn!("{}", w);
    }
    info!("validate_dataset: {} warnings", res.len());
    res
}

// The local race winner: most votes, first published on ties.
fn top_local_candidate(candidates: &[MpResult]) -> Option<&MpResult> {
    let mut best: Option<&MpResult> = None;
    for mp in candidates.iter() {
        match best {
            Some(b) if mp.votes <= b.votes => {}
            _ => best = Some(mp),
        }
    }
    best
}

fn check_shares(
    context: &str,
    total_votes: u64,
    shares: &[VoteShare],
    candidate_ids: &HashSet<&str>,
    res: &mut Vec<ConsistencyWarning>,
) {
    for s in shares.iter() {
        if !candidate_ids.contains(s.candidate_id.as_str()) {
            res.push(ConsistencyWarning::UnknownCandidate {
                context: context.to_string(),
                candidate_id: s.candidate_id.clone(),
            });
        }
    }
    let entries: Vec<(String, u64, f64)> = shares
        .iter()
        .map(|s| (s.candidate_id.clone(), s.votes, s.percentage))
        .collect();
    check_contest(context, total_votes, &entries, res);
}

fn check_local_race(
    context: &str,
    total_votes: u64,
    candidates: &[MpResult],
    res: &mut Vec<ConsistencyWarning>,
) {
    let entries: Vec<(String, u64, f64)> = candidates
        .iter()
        .map(|mp| (mp.name.clone(), mp.votes, mp.percentage))
        .collect();
    check_contest(&format!("{} (local race)", context), total_votes, &entries, res);
}

// Checks the (name, votes, stored percentage) entries of one contest.
fn check_contest(
    context: &str,
    total_votes: u64,
    entries: &[(String, u64, f64)],
    res: &mut Vec<ConsistencyWarning>,
) {
    if entries.is_empty() {
        return;
    }
    let breakdown_sum: u64 = entries.iter().map(|(_, v, _)| *v).sum();
    if breakdown_sum != total_votes {
        res.push(ConsistencyWarning::VoteTotalMismatch {
            context: context.to_string(),
            total_votes,
            breakdown_sum,
        });
    }
    let pct_sum: f64 = entries.iter().map(|(_, _, p)| *p).sum();
    if (pct_sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
        res.push(ConsistencyWarning::PercentageSum {
            context: context.to_string(),
            sum: pct_sum,
        });
    }
    for (name, votes, stored) in entries.iter() {
        let computed = percentage_of(*votes, total_votes);
        if (computed - stored).abs() > PERCENT_TOLERANCE {
            res.push(ConsistencyWarning::PercentageMismatch {
                context: context.to_string(),
                entry: name.clone(),
                stored: *stored,
                computed,
            });
        }
    }
}

fn check_turnout(
    context: &str,
    stored: f64,
    total_votes: u64,
    registered_voters: u64,
    res: &mut Vec<ConsistencyWarning>,
) {
    let computed = percentage_of(total_votes, registered_voters);
    if (computed - stored).abs() > TURNOUT_TOLERANCE {
        res.push(ConsistencyWarning::TurnoutMismatch {
            context: context.to_string(),
            stored,
            computed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::sample_dataset;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn sample_is_consistent() {
        init();
        let ds = sample_dataset();
        assert_eq!(validate_dataset(&ds), vec![]);
    }

    #[test]
    fn wrong_winner() {
        init();
        let mut ds = sample_dataset();
        ds.districts[0].presidential_winner = "museveni".to_string();
        let res = validate_dataset(&ds);
        assert_eq!(
            res,
            vec![ConsistencyWarning::WinnerMismatch {
                context: "district kampala".to_string(),
                recorded: "museveni".to_string(),
                computed: Some("kyagulanyi".to_string()),
            }]
        );
    }

    #[test]
    fn wrong_percentages() {
        init();
        let mut ds = sample_dataset();
        ds.candidates[0].percentage = 60.0;
        let res = validate_dataset(&ds);
        assert_eq!(res.len(), 2);
        assert!(matches!(
            &res[0],
            ConsistencyWarning::PercentageSum { context, .. } if context == "national presidential"
        ));
        assert!(matches!(
            &res[1],
            ConsistencyWarning::PercentageMismatch { entry, .. } if entry == "museveni"
        ));
    }

    #[test]
    fn wrong_turnout_and_totals() {
        init();
        let mut ds = sample_dataset();
        ds.districts[1].turnout = 70.0;
        ds.constituencies[0].total_votes += 1;
        let res = validate_dataset(&ds);
        assert!(res.iter().any(|w| matches!(
            w,
            ConsistencyWarning::TurnoutMismatch { context, .. } if context == "district wakiso"
        )));
        assert!(res.iter().any(|w| matches!(
            w,
            ConsistencyWarning::VoteTotalMismatch { total_votes: 56790, breakdown_sum: 56789, .. }
        )));
    }

    #[test]
    fn dangling_references() {
        init();
        let mut ds = sample_dataset();
        ds.districts[0].region = "atlantis".to_string();
        ds.polling_stations[0].constituency = "nowhere".to_string();
        ds.constituencies[1].presidential_results[0].candidate_id = "ghost".to_string();
        let res = validate_dataset(&ds);
        assert!(res.contains(&ConsistencyWarning::UnknownParent {
            kind: RecordKind::District,
            id: "kampala".to_string(),
            parent_kind: RecordKind::Region,
            parent: "atlantis".to_string(),
        }));
        assert!(res.contains(&ConsistencyWarning::UnknownParent {
            kind: RecordKind::PollingStation,
            id: "kampala-central-001".to_string(),
            parent_kind: RecordKind::Constituency,
            parent: "nowhere".to_string(),
        }));
        assert!(res.contains(&ConsistencyWarning::UnknownCandidate {
            context: "constituency rubaga-north (presidential)".to_string(),
            candidate_id: "ghost".to_string(),
        }));
    }

    #[test]
    fn constituency_in_the_wrong_region() {
        init();
        let mut ds = sample_dataset();
        ds.constituencies[0].region = "western".to_string();
        let res = validate_dataset(&ds);
        assert_eq!(
            res,
            vec![ConsistencyWarning::ParentMismatch {
                kind: RecordKind::Constituency,
                id: "kampala-central".to_string(),
                parent_kind: RecordKind::Region,
                expected: "central".to_string(),
                found: "western".to_string(),
            }]
        );
        assert_eq!(
            res[0].to_string(),
            concat!(
                "constituency \"kampala-central\" is in the region \"western\" ",
                "but its parent is in the region \"central\""
            )
        );

        ds.constituencies[0].region = "atlantis".to_string();
        assert_eq!(
            validate_dataset(&ds),
            vec![ConsistencyWarning::UnknownParent {
                kind: RecordKind::Constituency,
                id: "kampala-central".to_string(),
                parent_kind: RecordKind::Region,
                parent: "atlantis".to_string(),
            }]
        );
    }

    #[test]
    fn seat_total() {
        init();
        let mut ds = sample_dataset();
        ds.parliament.total_seats = 530;
        assert_eq!(
            validate_dataset(&ds),
            vec![ConsistencyWarning::SeatTotalMismatch {
                expected: 530,
                actual: 529
            }]
        );
    }
}
