// Reader for the map geometry produced by extract_map.

use crate::ugvote::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JsonMapPath {
    pub d: String,
    pub id: String,
    pub name: String,
    pub region: String,
}

impl From<JsonMapPath> for MapPathRecord {
    fn from(p: JsonMapPath) -> MapPathRecord {
        MapPathRecord {
            id: p.id,
            d: p.d,
            name: p.name,
            region: p.region,
        }
    }
}

pub fn parse_map(contents: &str, path: &str) -> UgResult<Vec<MapPathRecord>> {
    let paths: Vec<JsonMapPath> =
        serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    debug!("parse_map: {} shapes in {}", paths.len(), path);
    Ok(paths.into_iter().map(MapPathRecord::from).collect())
}

pub fn read_map(path: &str) -> UgResult<Vec<MapPathRecord>> {
    info!("Attempting to read map geometry {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_map(&contents, path)
}
