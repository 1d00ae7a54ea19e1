//! Access to the GitHub Actions runner: environment lookup and workflow commands.
//!
//! Workflow commands are lines of the form `::command::message` written to stdout, see
//! https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions

use std::{
    env,
    fmt::{self, Display},
    io::{self, Write},
    sync::Mutex,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

type Getenv = dyn Fn(&str) -> Option<String> + Send + Sync;

/// A workflow command understood by the Actions runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Debug,
    Notice,
    Warning,
    Error,
}

impl Command {
    fn as_str(self) -> &'static str {
        match self {
            Command::Debug => "debug",
            Command::Notice => "notice",
            Command::Warning => "warning",
            Command::Error => "error",
        }
    }
}

/// The Actions context handed to clients: reads the environment and reports to the runner.
pub struct Action {
    writer: Mutex<Box<dyn Write + Send>>,
    getenv: Box<Getenv>,
    user_agent: String,
}

impl Action {
    /// An `Action` writing to stdout and reading the process environment.
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            getenv: Box::new(|key| env::var(key).ok()),
            user_agent: USER_AGENT.to_owned(),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    pub fn with_getenv<F>(mut self, getenv: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.getenv = Box::new(getenv);
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Value of the environment variable `key`, empty if it is unset.
    pub fn getenv(&self, key: &str) -> String {
        (self.getenv)(key).unwrap_or_default()
    }

    /// User agent the base transport sends with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn debug<M: Display>(&self, message: M) {
        self.issue(Command::Debug, message)
    }

    pub fn notice<M: Display>(&self, message: M) {
        self.issue(Command::Notice, message)
    }

    pub fn warning<M: Display>(&self, message: M) {
        self.issue(Command::Warning, message)
    }

    pub fn error<M: Display>(&self, message: M) {
        self.issue(Command::Error, message)
    }

    /// Plain output, not interpreted by the runner.
    pub fn info<M: Display>(&self, message: M) {
        self.write_line(format_args!("{}", message))
    }

    pub fn issue<M: Display>(&self, command: Command, message: M) {
        let message = escape_data(&message.to_string());
        self.write_line(format_args!("::{}::{}", command.as_str(), message))
    }

    fn write_line(&self, line: fmt::Arguments<'_>) {
        // A poisoned writer still holds a usable sink.
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Nowhere left to report a failed write to the runner.
        if let Err(e) = writer.write_fmt(format_args!("{}\n", line)).and_then(|_| writer.flush()) {
            log::warn!("failed to write workflow command: {}", e);
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
