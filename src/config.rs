use crate::{graphql::ClientOptions, Result};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Environment variable holding the token used to authenticate with Github
    #[serde(default = "default_token_var")]
    token_var: String,

    /// Base URL of the Github API, for use with Github Enterprise
    #[serde(default)]
    api_url: Option<String>,

    /// Timeout for each request made to Github
    #[serde(default)]
    timeout_secs: Option<u64>,
}

fn default_token_var() -> String {
    DEFAULT_TOKEN_VAR.to_owned()
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn token_var(&self) -> &str {
        &self.token_var
    }

    pub fn set_token_var<S: Into<String>>(&mut self, token_var: S) {
        self.token_var = token_var.into();
    }

    pub fn set_api_url<S: Into<String>>(&mut self, api_url: S) {
        self.api_url = Some(api_url.into());
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) {
        self.timeout_secs = Some(timeout_secs);
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_url: self.api_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_var: default_token_var(),
            api_url: None,
            timeout_secs: None,
        }
    }
}
