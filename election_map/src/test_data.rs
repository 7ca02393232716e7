// A reduced copy of the 2026 dataset, shared by the unit tests.

use crate::builder::DatasetBuilder;
use crate::*;

const NRM: &str = "#FFD700";
const NUP: &str = "#DC2626";
const FDC: &str = "#3B82F6";
const DP: &str = "#22C55E";
const UPC: &str = "#F97316";
const ANT: &str = "#8B5CF6";
const IND: &str = "#6B7280";

fn candidate(id: &str, name: &str, party: &str, color: &str, votes: u64, pct: f64) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        party: party.to_string(),
        party_color: color.to_string(),
        votes,
        percentage: pct,
    }
}

fn region(id: &str, name: &str, districts: &[&str], color: &str) -> Region {
    Region {
        id: id.to_string(),
        name: name.to_string(),
        districts: districts.iter().map(|s| s.to_string()).collect(),
        color: color.to_string(),
        total_votes: 0,
        registered_voters: 0,
    }
}

// Shares are given in the order museveni, kyagulanyi, muntu, mao, tumukunde.
fn shares(votes: [u64; 5], pcts: [f64; 5]) -> Vec<VoteShare> {
    let ids = ["museveni", "kyagulanyi", "muntu", "mao", "tumukunde"];
    ids.iter()
        .zip(votes.iter().zip(pcts.iter()))
        .map(|(id, (v, p))| VoteShare::new(id, *v, *p))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn district(
    id: &str,
    name: &str,
    region: &str,
    constituencies: &[&str],
    total: u64,
    registered: u64,
    turnout: f64,
    winner: &str,
    results: Vec<VoteShare>,
) -> District {
    District {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        constituencies: constituencies.iter().map(|s| s.to_string()).collect(),
        total_votes: total,
        registered_voters: registered,
        turnout,
        presidential_winner: winner.to_string(),
        presidential_results: results,
    }
}

fn mp(name: &str, party: &str, color: &str, votes: u64, pct: f64) -> MpResult {
    MpResult {
        name: name.to_string(),
        party: party.to_string(),
        party_color: color.to_string(),
        votes,
        percentage: pct,
    }
}

#[allow(clippy::too_many_arguments)]
fn constituency(
    id: &str,
    name: &str,
    district: &str,
    region: &str,
    registered: u64,
    total: u64,
    turnout: f64,
    candidates: Vec<MpResult>,
    presidential: Vec<VoteShare>,
) -> ConstituencyResult {
    ConstituencyResult {
        id: id.to_string(),
        name: name.to_string(),
        district: district.to_string(),
        region: region.to_string(),
        registered_voters: registered,
        total_votes: total,
        turnout,
        winner: candidates[0].clone(),
        candidates,
        presidential_results: presidential,
    }
}

fn seats(party: &str, name: &str, seats: u32, color: &str) -> PartySeats {
    PartySeats {
        party: party.to_string(),
        name: name.to_string(),
        seats,
        color: color.to_string(),
    }
}

pub(crate) fn parliament() -> ParliamentarySummary {
    ParliamentarySummary {
        total_seats: 529,
        parties: vec![
            seats("NRM", "National Resistance Movement", 316, NRM),
            seats("NUP", "National Unity Platform", 57, NUP),
            seats("FDC", "Forum for Democratic Change", 32, FDC),
            seats("DP", "Democratic Party", 9, DP),
            seats("UPC", "Uganda People's Congress", 9, UPC),
            seats("IND", "Independents", 74, IND),
            seats("OTHERS", "Other Parties", 32, "#94A3B8"),
        ],
    }
}

pub(crate) fn sample_dataset() -> ElectionDataset {
    let mut b = DatasetBuilder::new();
    b.presidential_totals(PresidentialTotals {
        total_votes: 10304166,
        registered_voters: 18103603,
        turnout: 56.92,
    });
    b.parliament(parliament());

    for c in [
        candidate("museveni", "Yoweri Kaguta Museveni", "NRM", NRM, 6042898, 58.64),
        candidate("kyagulanyi", "Robert Kyagulanyi Ssentamu", "NUP", NUP, 3475298, 33.73),
        candidate("muntu", "Mugisha Muntu", "ANT", ANT, 380954, 3.70),
        candidate("mao", "Nobert Mao", "DP", DP, 204891, 1.99),
        candidate("tumukunde", "Henry Tumukunde", "IND", IND, 200125, 1.94),
    ] {
        b.add_candidate(c).unwrap();
    }

    for r in [
        region("central", "Central Region", &["kampala", "wakiso", "mukono"], "#EF4444"),
        region("western", "Western Region", &["mbarara", "fortportal"], "#F59E0B"),
        region("eastern", "Eastern Region", &["jinja"], "#10B981"),
        region("northern", "Northern Region", &["gulu"], "#3B82F6"),
    ] {
        b.add_region(r).unwrap();
    }

    let districts = vec![
        district(
            "kampala",
            "Kampala",
            "central",
            &["kampala-central", "rubaga-north", "nakawa"],
            567890,
            987654,
            57.5,
            "kyagulanyi",
            shares(
                [198765, 312456, 34567, 12345, 9757],
                [35.00, 55.02, 6.09, 2.17, 1.72],
            ),
        ),
        district(
            "wakiso",
            "Wakiso",
            "central",
            &["entebbe", "nansana"],
            489234,
            876543,
            55.8,
            "kyagulanyi",
            shares(
                [176543, 264789, 29876, 11234, 6792],
                [36.09, 54.13, 6.11, 2.30, 1.39],
            ),
        ),
        district(
            "mbarara",
            "Mbarara",
            "western",
            &["mbarara-city-north"],
            298765,
            456789,
            65.4,
            "museveni",
            shares(
                [224567, 52345, 13456, 5678, 2719],
                [75.16, 17.52, 4.50, 1.90, 0.91],
            ),
        ),
        district(
            "fortportal",
            "Fort Portal",
            "western",
            &[],
            100000,
            160000,
            62.5,
            "museveni",
            shares(
                [60000, 30000, 6000, 2500, 1500],
                [60.00, 30.00, 6.00, 2.50, 1.50],
            ),
        ),
        district(
            "jinja",
            "Jinja",
            "eastern",
            &["jinja-city-east"],
            234567,
            398765,
            58.8,
            "kyagulanyi",
            shares(
                [89765, 126789, 11234, 4567, 2212],
                [38.27, 54.05, 4.79, 1.95, 0.94],
            ),
        ),
        district(
            "gulu",
            "Gulu",
            "northern",
            &["gulu-city-east"],
            298765,
            498765,
            59.9,
            "museveni",
            shares(
                [178901, 89765, 19234, 7654, 3211],
                [59.88, 30.05, 6.44, 2.56, 1.07],
            ),
        ),
    ];
    for d in districts {
        b.add_district(d).unwrap();
    }

    let constituencies = vec![
        constituency(
            "kampala-central",
            "Kampala Central",
            "kampala",
            "central",
            98765,
            56789,
            57.5,
            vec![
                mp("Muhammad Nsereko", "IND", IND, 25678, 45.21),
                mp("Charles Musoke", "NUP", NUP, 18765, 33.04),
                mp("James Okello", "NRM", NRM, 8765, 15.43),
                mp("Others", "IND", IND, 3581, 6.31),
            ],
            shares(
                [18765, 32456, 3456, 1234, 878],
                [33.04, 57.15, 6.09, 2.17, 1.55],
            ),
        ),
        constituency(
            "rubaga-north",
            "Rubaga North",
            "kampala",
            "central",
            112345,
            67890,
            60.4,
            vec![
                mp("Moses Kasibante", "NUP", NUP, 34567, 50.91),
                mp("Sarah Nalule", "NRM", NRM, 21234, 31.28),
                mp("David Ssemwanga", "FDC", FDC, 8765, 12.91),
                mp("Others", "IND", IND, 3324, 4.90),
            ],
            shares(
                [21234, 38901, 4567, 2234, 954],
                [31.28, 57.30, 6.73, 3.29, 1.41],
            ),
        ),
        constituency(
            "mbarara-city-north",
            "Mbarara City North",
            "mbarara",
            "western",
            89765,
            58901,
            65.6,
            vec![
                mp("Jackson Byarugaba", "NRM", NRM, 38765, 65.81),
                mp("Grace Tumwebaze", "NUP", NUP, 12345, 20.96),
                mp("Others", "IND", IND, 7791, 13.23),
            ],
            shares(
                [43210, 11234, 2765, 1234, 458],
                [73.36, 19.07, 4.69, 2.09, 0.78],
            ),
        ),
        constituency(
            "gulu-city-east",
            "Gulu City East",
            "gulu",
            "northern",
            78901,
            47234,
            59.9,
            vec![
                mp("Charles Onen", "NRM", NRM, 24567, 52.02),
                mp("Lucy Akello", "FDC", FDC, 14567, 30.84),
                mp("Patrick Odong", "NUP", NUP, 5678, 12.02),
                mp("Others", "IND", IND, 2422, 5.13),
            ],
            shares(
                [27890, 13456, 3765, 1456, 667],
                [59.05, 28.49, 7.97, 3.08, 1.41],
            ),
        ),
        constituency(
            "jinja-city-east",
            "Jinja City East",
            "jinja",
            "eastern",
            87654,
            52345,
            59.7,
            vec![
                mp("Paul Mwiru", "FDC", FDC, 26789, 51.18),
                mp("Samuel Kigundu", "NRM", NRM, 18765, 35.85),
                mp("Mary Nabirye", "NUP", NUP, 4567, 8.72),
                mp("Others", "IND", IND, 2224, 4.25),
            ],
            shares(
                [18765, 28901, 2876, 1234, 569],
                [35.85, 55.22, 5.49, 2.36, 1.09],
            ),
        ),
    ];
    for c in constituencies {
        b.add_constituency(c).unwrap();
    }

    b.add_polling_station(PollingStationResult {
        id: "kampala-central-001".to_string(),
        constituency: "kampala-central".to_string(),
        turnout: 61.2,
        total_votes: 612,
        presidential_results: shares([200, 370, 25, 10, 7], [32.68, 60.46, 4.08, 1.63, 1.14]),
        local_results: vec![
            mp("Muhammad Nsereko", "IND", IND, 301, 49.18),
            mp("Charles Musoke", "NUP", NUP, 311, 50.82),
        ],
        irregularities: Some(vec!["Late opening of the station".to_string()]),
    })
    .unwrap();
    b.add_polling_station(PollingStationResult {
        id: "kampala-central-002".to_string(),
        constituency: "kampala-central".to_string(),
        turnout: 55.0,
        total_votes: 550,
        presidential_results: shares([190, 320, 25, 10, 5], [34.55, 58.18, 4.55, 1.82, 0.91]),
        local_results: vec![
            mp("Muhammad Nsereko", "IND", IND, 300, 54.55),
            mp("Charles Musoke", "NUP", NUP, 250, 45.45),
        ],
        irregularities: None,
    })
    .unwrap();

    b.build().unwrap()
}
