use clap::Subcommand;
use model::filter::ReportVariant;

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch orders created in [from, to) and print the filtered rows as JSON
    Run {
        #[arg(long, help = "Window start (RFC 3339, inclusive)")]
        from: String,

        #[arg(long, help = "Window end (RFC 3339, exclusive)")]
        to: String,

        #[arg(
            long = "city",
            help = "Allowed city; repeat for several. Overrides REPORT_CITIES"
        )]
        cities: Vec<String>,

        #[arg(long, help = "Report variant: unfulfilled or all")]
        variant: Option<ReportVariant>,

        #[arg(long, help = "Match only the given city names, without default aliases")]
        strict_cities: bool,

        #[arg(long, help = "Load additional variables from this .env file")]
        env_file: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON output to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Show the effective configuration with secrets redacted
    Config {
        #[arg(long, help = "Load additional variables from this .env file")]
        env_file: Option<String>,
    },
}
