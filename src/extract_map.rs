//! Extracts the district outlines of `assets/ug.svg` into `data/uganda_map.json`.
//!
//! Each `<path d=".." id=".." name="..">` element becomes one shape. The region
//! of a shape is guessed from its name with a fixed list of district names per
//! region. This is a one-off step whose output is reviewed by hand.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::{prelude::*, ErrorCompat, Snafu};
use std::fs;

const SVG_PATH: &str = "assets/ug.svg";
const OUTPUT_PATH: &str = "data/uganda_map.json";

/// The region of the shapes that match none of the lists.
const DEFAULT_REGION: &str = "northern";

// Checked in this order: the first list containing a substring of the name wins.
const REGION_NAMES: [(&str, &[&str]); 4] = [
    (
        "central",
        &[
            "Kampala", "Wakiso", "Mukono", "Luwero", "Masaka", "Mpigi", "Kayunga", "Buikwe",
            "Mityana", "Gomba", "Butambala", "Buvuma", "Kalangala", "Kalungu", "Kiboga",
            "Kyankwanzi", "Lyantonde", "Lwengo", "Mubende", "Nakaseke", "Nakasongola", "Rakai",
            "Sembabule", "Bukomansimbi",
        ],
    ),
    (
        "western",
        &[
            "Mbarara", "Kabale", "Bushenyi", "Kasese", "Fort Portal", "Hoima", "Rukungiri",
            "Ntungamo", "Ibanda", "Kiruhura", "Buhweju", "Buliisa", "Bundibugyo", "Bunyangabu",
            "Isingiro", "Kabarole", "Kagadi", "Kakumiro", "Kamwenge", "Kanungu", "Kazo",
            "Kibaale", "Kikuube", "Kisoro", "Kitagwenda", "Kyegegwa", "Kyenjojo", "Masindi",
            "Mitooma", "Ntoroko", "Rubanda", "Rubirizi", "Rwampara", "Sheema",
        ],
    ),
    (
        "eastern",
        &[
            "Jinja", "Mbale", "Soroti", "Tororo", "Busia", "Kapchorwa", "Iganga", "Kamuli",
            "Bugiri", "Pallisa", "Amuria", "Budaka", "Bududa", "Bugweri", "Bukedea", "Bukwo",
            "Bulambuli", "Butaleja", "Butebo", "Buyende", "Kaberamaido", "Kalaki", "Kaliro",
            "Kapelebyong", "Katakwi", "Kibuku", "Kumi", "Kween", "Luuka", "Manafwa", "Mayuge",
            "Namayingo", "Namisindwa", "Namutumba", "Ngora", "Serere", "Sironko",
        ],
    ),
    (
        "northern",
        &[
            "Gulu", "Lira", "Arua", "Kitgum", "Nebbi", "Moyo", "Adjumani", "Koboko", "Yumbe",
            "Apac", "Abim", "Agago", "Alebtong", "Amolatar", "Amudat", "Amuru", "Dokolo",
            "Kaabong", "Karenga", "Kole", "Kotido", "Kwania", "Lamwo", "Madi-Okollo", "Maracha",
            "Moroto", "Nabilatuk", "Nakapiripirit", "Napak", "Obongi", "Omoro", "Otuke", "Oyam",
            "Pader", "Pakwach", "Terego", "Zombo",
        ],
    ),
];

#[derive(Debug, Snafu)]
enum ExtractError {
    #[snafu(display("Error reading {path}"))]
    ReadingSvg {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the shapes"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },
}

type ExtractResult<T> = Result<T, ExtractError>;

/// One shape, in the format read by `ugvote --map`.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct MapShape {
    d: String,
    id: String,
    name: String,
    region: String,
}

fn region_of(name: &str) -> &'static str {
    for (region, names) in REGION_NAMES.iter() {
        if names.iter().any(|n| name.contains(n)) {
            return *region;
        }
    }
    DEFAULT_REGION
}

fn extract_shapes(svg: &str) -> Vec<MapShape> {
    lazy_static! {
        static ref PATH_RX: Regex =
            Regex::new(r#"<path d="([^"]+)" id="([^"]+)" name="([^"]+)">"#).unwrap();
    }
    PATH_RX
        .captures_iter(svg)
        .map(|cap| {
            let name = cap[3].to_string();
            let region = region_of(&name).to_string();
            debug!("extract_shapes: {} {:?} -> {}", &cap[2], name, region);
            MapShape {
                d: cap[1].to_string(),
                id: cap[2].to_string(),
                name,
                region,
            }
        })
        .collect()
}

fn run_extraction(svg_path: &str, output_path: &str) -> ExtractResult<usize> {
    let svg = fs::read_to_string(svg_path).context(ReadingSvgSnafu { path: svg_path })?;
    let shapes = extract_shapes(&svg);
    info!("Found {} shapes in {}", shapes.len(), svg_path);
    let js = serde_json::to_string_pretty(&shapes).context(SerializingJsonSnafu {})?;
    fs::write(output_path, js).context(WritingJsonSnafu { path: output_path })?;
    Ok(shapes.len())
}

fn main() {
    env_logger::init();

    match run_extraction(SVG_PATH, OUTPUT_PATH) {
        Ok(count) => println!("Extracted {} districts to {}", count, OUTPUT_PATH),
        Err(e) => {
            eprintln!("An error occured {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("{}", bt);
            }
            std::process::exit(1);
        }
    }
}
