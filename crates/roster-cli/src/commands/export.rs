use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use roster_db::Connection;
use roster_export::ExportFormat;

#[derive(Args, Debug)]
pub struct ExportMembers {
    /// xlsx or csv
    #[clap(short, long, default_value = "xlsx")]
    pub format: ExportFormat,
    /// Defaults to members.xlsx or members.csv
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportMembers {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(self.format.file_name()));
        let data = self.format.encode(db).await?;
        tokio::fs::write(&output, &data).await?;

        tracing::info!(format = %self.format, path = %output.display(), "exported members");
        println!(
            "Wrote {} bytes ({}) to {}.",
            data.len(),
            self.format.mime(),
            output.display()
        );
        Ok(())
    }
}
