use console::style;
use svnmap::cli::Cli;
use svnmap::error::SvnmapError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("{} {err:#}", style("error:").red().bold());
        let code = err
            .downcast_ref::<SvnmapError>()
            .map_or(1, SvnmapError::exit_code);
        std::process::exit(code);
    }
}
