mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "runclean",
    version,
    about = "Review and delete entries from the Windows Run dialog history"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Print the current Run dialog history
    List {
        /// Print entries as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => commands::gui::execute(),
        Some(Commands::Init) => commands::init::execute(),
        Some(Commands::List { json }) => commands::list::execute(json),
    }
}
