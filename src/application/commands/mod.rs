// src/application/commands/mod.rs
//
// Command-line Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the terminal and the store
// - Each command maps onto store operations, nothing else
// - Commands return DTOs or an ErrorResponse
// - Commands NEVER contain business logic

pub mod book_commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::{OrderDirection, OrderField};

pub use book_commands::*;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Manage your personal book library")]
pub struct Cli {
    /// Library API base URL (overrides config file and BOOKSHELF_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List books, optionally filtered and ordered by the server
    List(ListArgs),

    /// Show one book
    Show { id: u64 },

    /// Add a new book
    Add(BookArgs),

    /// Edit an existing book; omitted fields keep their current value
    Edit {
        id: u64,
        #[command(flatten)]
        changes: EditArgs,
    },

    /// Remove a book
    Remove { id: u64 },

    /// Check that the server is reachable
    Health,
}

#[derive(Debug, Args, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// title, author or year
    #[arg(long)]
    pub order_by: Option<OrderField>,

    /// asc or desc
    #[arg(long, requires = "order_by")]
    pub order_dir: Option<OrderDirection>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub year: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// to-read, reading or read
    #[arg(long, default_value = "to-read")]
    pub status: String,
}

#[derive(Debug, Args, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}
