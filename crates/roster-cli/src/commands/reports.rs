use anyhow::Result;
use clap::Args;

use roster_data::{Insights, Member, Recent, Summarize};
use roster_db::{members::DEFAULT_RECENT_LIMIT, Connection};

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct RecentMembers {
    #[clap(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: u32,
}

impl RecentMembers {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let members: Vec<Member> = db.recent(self.limit).await?;
        if members.is_empty() {
            println!("No recent entries.");
            return Ok(());
        }
        members.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowInsights {}

impl ShowInsights {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let insights: Insights = db.summarize().await?;
        if insights.total == 0 {
            println!("No data available for insights.");
            return Ok(());
        }
        insights.print_formatted();
        Ok(())
    }
}
