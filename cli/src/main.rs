mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, filter, update};
use terminal::{logging, print};
use uncdn_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg = Config::from_db_dir(&commands.db_dir)
        .with_fetch_timeout(Duration::from_secs(commands.timeout));

    if commands.update {
        print::header("updating cidr database");
        update::update(&cfg).await?;
    }

    if let (Some(input), Some(output)) = (commands.input_ip_list, commands.output) {
        print::header("filtering input");
        filter::filter(&input, &output, &cfg, commands.yes).await?;
    }

    Ok(())
}
