use std::{
    io::{self, Write},
    process,
};

use clap::Parser;
use luca_core::{
    cli::{self, Cli},
    config::ConfigManager,
    init_with_filter,
};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigManager::new().load()?;
    init_with_filter(config.log_filter.as_deref());

    let rendered = cli::run(cli, &config)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}
