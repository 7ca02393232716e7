use clap::Parser;

/// This is a results explorer for the Uganda 2026 elections.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the election results in JSON format.
    /// For more information about the file format, read the documentation of the election_map crate.
    #[clap(short, long, value_parser, default_value = "data/uganda_2026.json")]
    pub data: String,

    /// (file path, optional) The map geometry in JSON format, as produced by extract_map. If provided,
    /// the colouring of every shape of the map is added to the summary.
    #[clap(short, long, value_parser)]
    pub map: Option<String>,

    /// (text, optional) If specified, the candidates, districts and constituencies matching this
    /// text are added to the summary.
    #[clap(short, long, value_parser)]
    pub query: Option<String>,

    /// (default 8) The maximum number of search results.
    #[clap(long, value_parser, default_value_t = 8)]
    pub max_results: usize,

    /// (region id, optional) Focuses the summary on a region.
    #[clap(long, value_parser)]
    pub region: Option<String>,

    /// (district id, optional) Focuses the summary on a district. The region is implied.
    #[clap(long, value_parser)]
    pub district: Option<String>,

    /// (constituency id, optional) Focuses the summary on a constituency. The district and the
    /// region are implied.
    #[clap(long, value_parser)]
    pub constituency: Option<String>,

    /// (presidential or parliamentary) How the map is coloured.
    #[clap(long, value_parser, default_value = "presidential")]
    pub view_mode: String,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. By default, it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, ugvote will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
