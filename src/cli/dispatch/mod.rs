use crate::cli::{
    actions::{server::Args, Action},
    commands::{ARG_DSN, ARG_PORT},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or the DSN is not a valid URL.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    // Fail at startup rather than on the first pool connection.
    Url::parse(&dsn).context("invalid ANNOUNCEMENTS_DSN")?;

    Ok(Action::Server(Args {
        port,
        dsn: SecretString::from(dsn),
    }))
}
