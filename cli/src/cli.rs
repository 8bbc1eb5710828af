//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::Parser;
use clap::builder::FalseyValueParser;

use crate::commands;
use crate::output::OutputContext;

/// Blue/green deployments for AWS Elastic Beanstalk.
///
/// Uploads the artifact, registers it as an application version, builds a
/// replacement environment from the current one, swaps CNAMEs and then
/// terminates the old environment.
#[derive(Parser, Debug)]
#[command(name = "eb-deploy")]
pub struct Cli {
    #[command(flatten)]
    pub deploy: commands::deploy::DeployArgs,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

impl Cli {
    /// Execute the deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment fails.
    pub async fn run(self) -> Result<()> {
        let ctx = OutputContext::new(self.no_color, self.quiet);
        commands::deploy::run(&self.deploy, &ctx).await
    }
}
