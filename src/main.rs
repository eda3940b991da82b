use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supanotes::config::Config;
use supanotes::models::NoteId;
use supanotes::prompt::TerminalPrompter;
use supanotes::remote::RestClient;
use supanotes::render::render_notes;
use supanotes::store::{NoteStore, StoreError};

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Take notes in a hosted Supabase table")]
struct Cli {
    /// Table holding the notes (overrides config and SUPANOTES_TABLE)
    #[arg(long, global = true)]
    table: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List,
    /// Add a new note
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
    },
    /// Change the title and/or content of a note
    Edit {
        id: NoteId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Initialize tracing on stderr so stdout only carries rendered notes.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "supanotes=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load()?;
    if let Some(table) = cli.table {
        config.table = table;
    }
    tracing::debug!("Using table {} at {}", config.table, config.url);

    let command = cli.command.unwrap_or(Commands::List);
    let assume_yes = matches!(command, Commands::Delete { yes: true, .. });
    let prompter = TerminalPrompter::new(assume_yes);
    let mut store = NoteStore::new(RestClient::new(&config), Box::new(prompter));

    // Store errors have already been shown to the user; only the exit code is left.
    match run(command, &mut store).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is::<StoreError>() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e),
    }
}

async fn run(command: Commands, store: &mut NoteStore<RestClient>) -> anyhow::Result<()> {
    store.load().await?;

    match command {
        Commands::List => {}
        Commands::Add { title, content } => {
            let draft = store.draft_mut();
            draft.title = title;
            draft.content = content;
            store.create().await?;
        }
        Commands::Edit { id, title, content } => {
            let Some(note) = store.notes().iter().find(|note| note.id == id).cloned() else {
                anyhow::bail!("Note {} not found", id);
            };
            store.begin_edit(&note);
            if let Some(editing) = store.editing_mut() {
                if let Some(title) = title {
                    editing.title = title;
                }
                if let Some(content) = content {
                    editing.content = content;
                }
            }
            store.commit_edit().await?;
        }
        Commands::Delete { id, .. } => {
            if !store.delete(&id).await? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    print!("{}", render_notes(store));
    Ok(())
}
