use arg_parser::CmdArgs;

#[derive(CmdArgs, Debug, Default, PartialEq)]
#[metadata(
    name = "treko",
    description = "Scans a treko script and prints its tokens. Starts a prompt when no script is given."
)]
pub struct Options {
    #[arg(positional = true, description = "The script to scan")]
    pub script: Option<String>,

    #[arg(
        short = "-q",
        long = "--quiet",
        description = "Only report errors, do not print tokens"
    )]
    pub quiet: bool,

    #[arg(
        short = "-l",
        long = "--log",
        description = "Log filter, overrides RUST_LOG (e.g. debug)"
    )]
    pub log_filter: Option<String>,
}
