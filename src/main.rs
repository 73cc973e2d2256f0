use clap::Parser;
use quill::cli::{commands, Cli, Commands};

fn main() {
    quill::logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Board { ref action } => commands::board::execute(&cli, action),
        Commands::Write {
            ref board,
            ref content,
        } => commands::write::execute(&cli, board, content.as_deref()),
        Commands::Entries { ref board } => commands::entries::execute(&cli, board.as_deref()),
        Commands::Delete { ref id } => commands::delete::execute(&cli, id),
        Commands::Passphrase { copy } => commands::passphrase::execute(copy),
        Commands::Export { ref output_dir } => {
            commands::export::execute(&cli, output_dir.as_deref())
        }
        Commands::Import { ref file, yes } => commands::import_cmd::execute(&cli, file, yes),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Commands::Audit { .. } => Err(quill::errors::QuillError::CommandFailed(
            "this build has no audit log (enable the `audit-log` feature)".into(),
        )),
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        quill::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
