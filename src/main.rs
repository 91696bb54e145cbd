use clap::Parser;
use tsk::cli::commands::Cli;
use tsk::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let file = cli.file.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = tsk::tui::run(file.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
