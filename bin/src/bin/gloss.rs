use clap::Parser;
use gloss_bin::{cli::Cli, commands, session::Session};
use gloss_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let _log_guard = gloss_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })
    .map_err(|e| eprintln!("Warning: Failed to initialize logging: {e}"))
    .ok();

    let mut session = Session::load(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(cli.command, &mut session, &mut stdout) {
        eprintln!("Command failed: {e:#}");
        std::process::exit(1);
    }

    if let Err(e) = session.save() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
