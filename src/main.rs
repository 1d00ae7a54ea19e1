use github_actions::{Action, Client, Config, Error, Result};
use log::info;
use serde_json::json;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(short, long, parse(from_os_str))]
    /// config file to use
    config: Option<PathBuf>,

    #[structopt(long)]
    /// environment variable holding the Github token [default: GITHUB_TOKEN]
    token_var: Option<String>,

    #[structopt(long)]
    /// base URL of the Github API [default: https://api.github.com/]
    api_url: Option<String>,

    #[structopt(long)]
    /// timeout for each request to Github, in seconds
    timeout_secs: Option<u64>,

    #[structopt(short, long, parse(from_os_str))]
    /// GraphQL query to run once the client is ready
    query: Option<PathBuf>,

    #[structopt(long, requires = "query")]
    /// JSON object with the variables of the query
    variables: Option<String>,
}

impl Options {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(token_var) = &self.token_var {
            config.set_token_var(token_var.as_str());
        }
        if let Some(api_url) = &self.api_url {
            config.set_api_url(api_url.as_str());
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.set_timeout_secs(timeout_secs);
        }

        Ok(config)
    }
}

async fn run_query(client: &Client<'_>, path: &Path, variables: Option<&str>) -> Result<()> {
    let query = fs::read_to_string(path)?;
    let variables: serde_json::Value = match variables {
        Some(variables) => serde_json::from_str(variables)?,
        None => json!({}),
    };

    let data: serde_json::Value = client
        .query(&json!({ "query": query, "variables": variables }))
        .await?;
    client.action().info(serde_json::to_string_pretty(&data)?);

    Ok(())
}

fn exit_with(action: &Action, error: Error) -> ! {
    action.error(error);
    process::exit(1)
}

#[tokio::main]
async fn main() {
    let opts = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let action = Action::new();

    let config = opts.config().unwrap_or_else(|e| exit_with(&action, e));

    let options = config.client_options();
    // failures were already reported to the runner
    let client = match Client::with_options(&action, config.token_var(), &options).await {
        Ok(client) => client,
        Err(_) => process::exit(1),
    };
    info!("authenticated with Github");

    if let Some(path) = &opts.query {
        if let Err(e) = run_query(&client, path, opts.variables.as_deref()).await {
            exit_with(&action, e);
        }
    }
}
