
use anyhow::Result;

use roster_cli::{cli::Cli, logging};
use roster_db::{schema, Connection};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();
    logging::init();

    let conn = Connection::open(&cli.members_db).await?;
    schema::install(&conn).await?;

    cli.command.run(&conn).await
}
