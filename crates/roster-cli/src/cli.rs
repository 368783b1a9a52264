
use anyhow::Result;
use clap::{Parser, Subcommand};

use roster_db::Connection;

use crate::commands::{
    AddMember, DeleteMember, ExportMembers, ListMembers, RecentMembers, ShowInsights, ShowMember,
    UpdateMember,
};

#[derive(Parser, Debug)]
#[clap(name = "roster", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path of the members database
    #[clap(long, env = "ROSTER_DB", default_value = "membership.db")]
    pub members_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// List members, optionally by name or student number
    #[clap(name = "list")]
    List(ListMembers),
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
    /// Show the most recently added members
    #[clap(name = "recent")]
    Recent(RecentMembers),
    /// Show totals and payment mode distribution
    #[clap(name = "insights")]
    Insights(ShowInsights),
    /// Export all members to a file
    #[clap(name = "export")]
    Export(ExportMembers),
}

impl Command {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Command::Add(cmd) => cmd.run(db).await,
            Command::List(cmd) => cmd.run(db).await,
            Command::Show(cmd) => cmd.run(db).await,
            Command::Update(cmd) => cmd.run(db).await,
            Command::Delete(cmd) => cmd.run(db).await,
            Command::Recent(cmd) => cmd.run(db).await,
            Command::Insights(cmd) => cmd.run(db).await,
            Command::Export(cmd) => cmd.run(db).await,
        }
    }
}
