//! Serve command implementation

use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overrides the configured one
    #[arg(long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bind = self
            .bind
            .as_deref()
            .unwrap_or(&config.server.bind_address);
        crate::server::serve(config, bind).await
    }
}
