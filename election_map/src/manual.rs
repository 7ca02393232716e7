/*!

This is the long-form manual for `election_map` and `ugvote`.

## Input formats

Two JSON files are read by `ugvote`:
* the election dataset (`data/uganda_2026.json` by default)
* the map geometry (`data/uganda_map.json`), produced by `extract_map`

Both files are loaded once at startup and never modified.

### Election dataset

A single object with the following keys. All keys use camelCase.

```text
{
  "presidential": {
    "totalVotes": 10304166,
    "registeredVoters": 18103603,
    "turnout": 56.92,
    "candidates": [
      { "id": "museveni", "name": "Yoweri Kaguta Museveni", "party": "NRM",
        "partyColor": "#FFD700", "votes": 6042898, "percentage": 58.64 },
      ...
    ]
  },
  "regions": [
    { "id": "central", "name": "Central Region", "districts": ["kampala", ...],
      "color": "#EF4444", "totalVotes": 3245678, "registeredVoters": 5234567 },
    ...
  ],
  "districts": [
    { "id": "kampala", "name": "Kampala", "region": "central",
      "constituencies": ["kampala-central", ...],
      "totalVotes": 567890, "registeredVoters": 987654, "turnout": 57.5,
      "presidentialWinner": "kyagulanyi",
      "presidentialResults": [
        { "candidateId": "kyagulanyi", "votes": 312456, "percentage": 55.02 },
        ...
      ] },
    ...
  ],
  "constituencies": [
    { "id": "kampala-central", "name": "Kampala Central",
      "district": "kampala", "region": "central",
      "registeredVoters": 98765, "totalVotes": 56789, "turnout": 57.5,
      "winner": { "name": "Muhammad Nsereko", "party": "IND", "partyColor": "#6B7280",
                  "votes": 25678, "percentage": 45.21 },
      "candidates": [ ... same shape as winner ... ],
      "presidentialResults": [ ... same shape as for districts ... ] },
    ...
  ],
  "pollingStations": [
    { "id": "kampala-central-001", "constituency": "kampala-central",
      "turnout": 61.2, "totalVotes": 612,
      "presidentialResults": [ ... ], "localResults": [ ... ],
      "irregularities": ["Late opening of the station"] }
  ],
  "parliament": {
    "totalSeats": 529,
    "parties": [
      { "party": "NRM", "name": "National Resistance Movement", "seats": 316,
        "color": "#FFD700" },
      ...
    ]
  }
}
```

Notes:
- `pollingStations` is optional, and so is `irregularities` within a station.
- The `totalVotes` and `registeredVoters` of a region are informative only. Regional
  figures are always recomputed from the districts that name the region.
- The `districts` list of a region may name districts without results. Those are
  ignored.
- Identifiers must be non-empty and unique within their kind. A dataset that breaks
  this rule is rejected. All the other inconsistencies (percentages that do not match
  the votes, a stored winner that is not the leader, dangling references) are
  reported as warnings and the dataset is used as is.

### Map geometry

An array of shapes, one per district outline:

```text
[
  { "d": "M 100 100 L 250 100 ...", "id": "UG101", "name": "Kampala", "region": "central" },
  ...
]
```

The `name` of a shape is matched against the `name` of the districts after
normalization: both are lower-cased, trimmed, and stripped of a trailing
`district` word. `Fort Portal District` and `fort portal` designate the same district.
Shapes without a matching district are drawn as "No data".

The `region` of a shape is assigned by `extract_map` from a fixed list of district
names per region. A shape whose name contains none of the known names is placed in
the `northern` region.

## Winners and ties

The winner of an area is the candidate with the most votes in the sum of its
breakdowns. When several candidates share the largest count, the candidate whose
identifier comes first in lexicographic order wins. The result therefore never depends
on the order in which the records are listed. An area without any vote record has no
winner.

The same rule applies to parties when colouring the map by parliamentary results: the
party holding the most constituencies wins, and ties go to the smallest party code.

The winner of a local race is the candidate with the most votes. On ties, the first
candidate published wins.

## Search

A query matches a record when its trimmed, lower-cased text is contained in one of the
searchable fields:
- presidential candidates: name and party code
- districts: name and region
- constituencies: name, name of the winner and party of the winner

Candidates are listed first, then districts, then constituencies. Queries of fewer than
2 characters return nothing, and at most 8 results are shown by default.

 */
