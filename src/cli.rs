use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "svnmap")]
#[command(about = "Reports when each directory path existed across SVN history")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to Subversion repository root (or file:// URL)")]
    pub repository: String,

    #[arg(long, help = "Summarize committer activity instead of path history")]
    pub committers: bool,

    #[arg(long, help = "Hide revision number columns")]
    pub no_numbers: bool,

    #[arg(long, help = "Hide progress display")]
    pub no_progress: bool,

    #[arg(long, help = "Show the content of branches folders")]
    pub branches: bool,

    #[arg(long, help = "Show the content of tags folders")]
    pub tags: bool,

    #[arg(long, help = "Hide [..] omission markers")]
    pub no_dots: bool,

    #[arg(long, help = "Print full paths without indentation")]
    pub flatten: bool,

    #[arg(
        long,
        default_value_t = 0,
        help = "Maximum tree depth; values below 1 mean unlimited"
    )]
    pub depth: i32,

    #[arg(
        long,
        value_name = "NAME",
        default_value = "<unknown>",
        help = "Name to book commits without an author under"
    )]
    pub unknown_committer: String,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        if self.committers {
            crate::committers::exec(&self)
        } else {
            crate::paths::exec(&self)
        }
    }
}
