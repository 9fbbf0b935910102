use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "typelist",
    disable_version_flag = true,
    about = "List all declared types within a given Go file",
    after_help = r#"Examples:
  typelist path/to/file.go
  typelist -v
"#
)]
pub struct Args {
    /// Go source file to catalog.
    pub file: Option<PathBuf>,
    /// Print version and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}
