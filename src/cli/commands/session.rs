use clap::{Arg, ArgMatches, Command};

use crate::api::state::DEFAULT_SESSION_COOKIE_NAME;

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_SESSION_COOKIE_NAME: &str = "session-cookie-name";
pub const ARG_SESSION_VERIFY_URL: &str = "session-verify-url";

#[derive(Debug, Clone)]
pub struct Options {
    pub frontend_base_url: String,
    pub cookie_name: String,
    pub verify_url: Option<String>,
}

impl Options {
    /// Parse session arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the cookie name is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // clap passes through empty strings when env vars are set to ""
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let Some(cookie_name) = get_non_empty(ARG_SESSION_COOKIE_NAME) else {
            anyhow::bail!("--{ARG_SESSION_COOKIE_NAME} must not be empty");
        };

        Ok(Self {
            frontend_base_url: get_non_empty(ARG_FRONTEND_BASE_URL)
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            cookie_name,
            verify_url: get_non_empty(ARG_SESSION_VERIFY_URL),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Storefront base URL, used as the CORS origin")
                .long_help(
                    "Storefront base URL, used as the only allowed CORS origin.\n\nSession cookies are marked `Secure` when this URL uses https.",
                )
                .env("SOLARENT_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE_NAME)
                .long(ARG_SESSION_COOKIE_NAME)
                .help("Name of the session cookie")
                .env("SOLARENT_SESSION_COOKIE_NAME")
                .default_value(DEFAULT_SESSION_COOKIE_NAME),
        )
        .arg(
            Arg::new(ARG_SESSION_VERIFY_URL)
                .long(ARG_SESSION_VERIFY_URL)
                .help("Base URL of an external session service")
                .long_help(
                    "Base URL of an external session service exposing `POST /verify`.\n\nWhen unset, sessions are verified against the `user_sessions` table.",
                )
                .env("SOLARENT_SESSION_VERIFY_URL"),
        )
}
