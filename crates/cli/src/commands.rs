use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter against a schema without evaluating it
    Check {
        #[arg(long, help = "Filter tree file (JSON)")]
        filter: String,

        #[arg(long, help = "Record schema file (JSON)")]
        schema: String,
    },
    /// Filter JSON-lines records, printing the ones that match
    Run {
        #[arg(long, help = "Filter tree file (JSON)")]
        filter: String,

        #[arg(long, help = "Record schema file (JSON)")]
        schema: String,

        #[arg(
            long,
            help = "JSON-lines file with one record per line; reads stdin when omitted or '-'"
        )]
        records: Option<String>,

        #[arg(long, help = "Print only the number of matching records")]
        count: bool,
    },
    /// Print a filter tree in its indented text form
    Print {
        #[arg(long, help = "Filter tree file (JSON)")]
        filter: String,
    },
}
