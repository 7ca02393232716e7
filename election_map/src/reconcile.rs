//! Matching of map shapes to district records by name.
//!
//! The geometry and the results are produced by different sources and spell
//! the district names differently ("Fort Portal District" vs "Fort Portal").
//! Both sides are normalized before being compared for equality.

use log::debug;
use std::collections::HashMap;

use crate::config::{District, MapPathRecord};

/// The qualifier that some sources append to district names.
pub const DISTRICT_QUALIFIER: &str = "district";

/// Lower-cases a name, removes any trailing "district" qualifier and trims
/// the surrounding whitespace.
///
/// The qualifier is only removed when it is a separate word, so that a name
/// like "Subdistrict" is left alone. Applying the function twice gives the
/// same result as applying it once.
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut cur: &str = lower.trim();
    while let Some(rest) = cur.strip_suffix(DISTRICT_QUALIFIER) {
        if rest.ends_with(char::is_whitespace) {
            cur = rest.trim_end();
        } else {
            break;
        }
    }
    cur.to_string()
}

/// Finds the district that a map shape represents.
///
/// Returns the first district, in the given order, whose normalized name
/// equals the normalized name of the shape, or `None` if no district matches.
/// A shape without a district is not an error: callers render it as "no data".
pub fn resolve_district<'a>(
    path: &MapPathRecord,
    districts: &'a [District],
) -> Option<&'a District> {
    resolve_district_name(&path.name, districts)
}

/// Same as [`resolve_district`], for a bare display name.
pub fn resolve_district_name<'a>(name: &str, districts: &'a [District]) -> Option<&'a District> {
    let target = normalize(name);
    let res = districts.iter().find(|d| normalize(&d.name) == target);
    if res.is_none() {
        debug!("resolve_district_name: no district for {:?}", name);
    }
    res
}

/// A precomputed lookup from normalized names to districts.
///
/// Gives the same answers as [`resolve_district`] without normalizing every
/// district name at each call. When several districts share a normalized
/// name, the first one is kept.
pub struct DistrictNameIndex<'a> {
    by_name: HashMap<String, &'a District>,
}

impl<'a> DistrictNameIndex<'a> {
    pub fn new(districts: &'a [District]) -> DistrictNameIndex<'a> {
        let mut by_name: HashMap<String, &'a District> = HashMap::new();
        for d in districts.iter() {
            by_name.entry(normalize(&d.name)).or_insert(d);
        }
        DistrictNameIndex { by_name }
    }

    pub fn resolve(&self, path: &MapPathRecord) -> Option<&'a District> {
        self.resolve_name(&path.name)
    }

    pub fn resolve_name(&self, name: &str) -> Option<&'a District> {
        self.by_name.get(&normalize(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::sample_dataset;

    fn path(name: &str) -> MapPathRecord {
        MapPathRecord {
            id: format!("UG{}", name.len()),
            d: "M 0 0 L 1 1 Z".to_string(),
            name: name.to_string(),
            region: "western".to_string(),
        }
    }

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize("Fort Portal District"), normalize("fort portal"));
        assert_eq!(normalize("  KAMPALA  "), "kampala");
        assert_eq!(normalize("Madi-Okollo district"), "madi-okollo");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "",
            " ",
            "District",
            "Fort Portal District",
            "Gulu District District",
            "Kasese district  ",
            "Subdistrict",
            "  district  district ",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn normalize_keeps_inner_words() {
        assert_eq!(normalize("District Of Kampala"), "district of kampala");
        assert_eq!(normalize("Subdistrict"), "subdistrict");
        assert_eq!(normalize("district"), "district");
    }

    #[test]
    fn resolves_matching_names() {
        let ds = sample_dataset();
        let d = resolve_district(&path("Fort Portal District"), ds.districts());
        assert_eq!(d.map(|d| d.id.as_str()), Some("fortportal"));
        let d = resolve_district(&path("GULU"), ds.districts());
        assert_eq!(d.map(|d| d.id.as_str()), Some("gulu"));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let ds = sample_dataset();
        assert!(resolve_district(&path("Atlantis"), ds.districts()).is_none());
        assert!(resolve_district(&path(""), ds.districts()).is_none());
    }

    #[test]
    fn index_agrees_with_scan() {
        let ds = sample_dataset();
        let index = DistrictNameIndex::new(ds.districts());
        assert_eq!(index.len(), ds.districts().len());
        for name in ["Kampala District", "fort portal", "Atlantis", "Jinja ", "wakiso"] {
            let p = path(name);
            assert_eq!(
                index.resolve(&p).map(|d| &d.id),
                resolve_district(&p, ds.districts()).map(|d| &d.id)
            );
        }
    }

    #[test]
    fn first_district_wins_on_name_collisions() {
        let ds = sample_dataset();
        let mut districts = ds.districts().to_vec();
        let mut copy = districts[0].clone();
        copy.id = "kampala-2".to_string();
        copy.name = "KAMPALA District".to_string();
        districts.push(copy);
        let index = DistrictNameIndex::new(&districts);
        assert_eq!(index.resolve_name("kampala").map(|d| d.id.as_str()), Some("kampala"));
        assert_eq!(
            resolve_district_name("kampala", &districts).map(|d| d.id.as_str()),
            Some("kampala")
        );
    }
}
