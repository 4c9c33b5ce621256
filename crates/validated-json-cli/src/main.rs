use std::process::ExitCode;

use clap::Parser;
use validated_json_cli::args::Cli;
use validated_json_cli::{Settings, load_config, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli)?;
    let settings = Settings::resolve(cli, config);
    logging::init(&settings.log_level);
    run(&cli.file, &settings)
}
