mod commands;
mod terminal;

use commands::{CommandLine, Commands, enumerate, tools};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let CommandLine {
        command,
        no_banner,
        quiet,
        verbose,
    } = CommandLine::parse_args();

    logging::init(verbose);
    print::banner(no_banner, quiet);

    match command {
        Commands::Enumerate(args) => {
            let cfg = args.into_config(quiet);
            print::header("getting ready for enumeration", cfg.quiet);
            enumerate::enumerate(&cfg).await
        }
        Commands::Tools => {
            print::header("discovery tools", quiet);
            tools::tools(quiet).await;
            Ok(())
        }
    }
}
