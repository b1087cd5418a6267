//! CLI 模块

pub mod login;
pub mod logout;
pub mod whoami;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "huddle")]
#[command(version)]
#[command(about = "Kanban task board for teams, in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the task board TUI (default)
    Tui,
    /// Sign in to your Huddle backend and store the session
    Login {
        /// Email to sign in with (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in identity and selected workspace
    Whoami,
}
