//! friendgraph data file CLI.
//!
//! Provides the `friendgraph` binary for working with the server's JSON data
//! document while the server is stopped: create an empty document, list
//! users or a user's friends, and validate a document before deployment.
//!
//! Uses the same `JsonFileStore` as the server, so a document that passes
//! `check` is one the server will load.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use friendgraph_core::{UserGraph, UserId};
use friendgraph_storage::document::to_document;
use friendgraph_storage::{JsonFileStore, UserStore};

/// friendgraph data file tools.
#[derive(Parser)]
#[command(name = "friendgraph", about = "friendgraph data file tools")]
struct Cli {
    /// Path to the JSON data document.
    #[arg(short, long, default_value = "data.json", global = true)]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create an empty data document if none exists.
    Init,

    /// List every user.
    Users {
        /// Print the raw document instead of summaries.
        #[arg(long)]
        json: bool,
    },

    /// List a user's friends.
    Friends {
        /// The user's ID.
        id: String,
    },

    /// Load the document and report whether the server would accept it.
    Check,
}

fn main() {
    let cli = Cli::parse();
    let mut store = JsonFileStore::new(cli.data);

    let exit_code = match cli.command {
        Commands::Init => run_init(&mut store),
        Commands::Users { json } => with_graph(&store, |graph| {
            report(print_users(graph, json, &mut io::stdout().lock()))
        }),
        Commands::Friends { id } => with_graph(&store, |graph| {
            report(print_friends(graph, &UserId::from(id), &mut io::stdout().lock()))
        }),
        Commands::Check => with_graph(&store, |graph| {
            println!(
                "{}: {} user(s), document is consistent",
                store.location(),
                graph.len()
            );
            0
        }),
    };
    process::exit(exit_code);
}

/// Execute the init subcommand.
///
/// Returns exit code: 0 = created or already present, 3 = I/O error.
fn run_init(store: &mut JsonFileStore) -> i32 {
    match store.init() {
        Ok(true) => {
            println!("created empty document at {}", store.location());
            0
        }
        Ok(false) => {
            println!("{} already exists, left untouched", store.location());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            3
        }
    }
}

/// Loads the document and runs `f` on it.
///
/// Returns exit code 3 when the document cannot be loaded.
fn with_graph<F>(store: &JsonFileStore, f: F) -> i32
where
    F: FnOnce(&UserGraph) -> i32,
{
    match store.load() {
        Ok(graph) => f(&graph),
        Err(e) => {
            eprintln!("Error: failed to load '{}': {}", store.location(), e);
            3
        }
    }
}

/// Maps a failed write to stdout to exit code 1.
fn report(result: io::Result<i32>) -> i32 {
    result.unwrap_or_else(|e| {
        eprintln!("Error: failed to write output: {}", e);
        1
    })
}

fn print_users(graph: &UserGraph, json: bool, out: &mut impl Write) -> io::Result<i32> {
    if json {
        match serde_json::to_string_pretty(&to_document(graph)) {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(e) => {
                eprintln!("Error: failed to serialize document: {}", e);
                return Ok(1);
            }
        }
    } else {
        for user in graph.users() {
            writeln!(out, "{}", user)?;
        }
    }
    Ok(0)
}

/// Returns exit code 1 when the user does not exist.
fn print_friends(graph: &UserGraph, id: &UserId, out: &mut impl Write) -> io::Result<i32> {
    match graph.friends(id) {
        Ok(friends) => {
            for friend in friends {
                writeln!(out, "{} ({}, age {})", friend.name, friend.id, friend.age)?;
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(1)
        }
    }
}
