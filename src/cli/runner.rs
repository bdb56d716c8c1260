//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::load_job;
use crate::engine::{Connector, Dispatcher};
use crate::error::{Error, Result};
use crate::options::OptionLoader;
use crate::provider::StaticProvider;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check { job } => self.check(job).await,
            Commands::Run { job, pretty } => self.run_job(job, *pretty).await,
            Commands::Options { loader, job } => self.options(loader, job).await,
        }
    }

    /// Load a job file and stand up the dispatcher it describes
    fn dispatcher(&self, path: &Path) -> Result<(Dispatcher, StaticProvider)> {
        let job = load_job(path)?;
        let edition = job.edition;
        let provider = job.into_provider();
        let dispatcher = Dispatcher::from_provider(&provider, edition)?;
        Ok((dispatcher, provider))
    }

    async fn check(&self, path: &Path) -> Result<()> {
        let (dispatcher, _) = self.dispatcher(path)?;
        let result = dispatcher.check().await?;

        if result.success {
            println!("connection ok ({})", dispatcher.gateway().base_url());
            Ok(())
        } else {
            Err(Error::config(format!(
                "connection check failed: {}",
                result.message.unwrap_or_default()
            )))
        }
    }

    async fn run_job(&self, path: &Path, pretty: bool) -> Result<()> {
        let (dispatcher, provider) = self.dispatcher(path)?;
        let records = dispatcher.execute(&provider, provider.item_count()).await?;

        for record in &records {
            let line = if pretty {
                serde_json::to_string_pretty(record)?
            } else {
                serde_json::to_string(record)?
            };
            println!("{line}");
        }
        Ok(())
    }

    async fn options(&self, loader: &str, path: &Path) -> Result<()> {
        let loader: OptionLoader = loader.parse()?;
        let (dispatcher, _) = self.dispatcher(path)?;

        for entry in dispatcher.load_options(loader).await? {
            println!("{}", serde_json::to_string(&entry)?);
        }
        Ok(())
    }
}
