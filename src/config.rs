// src/config.rs
use crate::constants::{
    DEFAULT_PAGE_ID, DEFAULT_USER_LOCALE, DEFAULT_USER_TIME_ZONE, IMAGE_PROXY_PREFIX,
    NOTION_BASE_URL,
};
use crate::error::AppError;
use crate::types::{PageId, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (defaults to the built-in landing page)
    pub page: Option<String>,

    /// Host serving the Notion v3 API
    #[arg(long, default_value = NOTION_BASE_URL)]
    pub base_url: String,

    /// Two-letter locale sent with collection queries (defaults to $LANG)
    #[arg(long)]
    pub locale: Option<String>,

    /// Time zone sent with collection queries (defaults to $TZ)
    #[arg(long)]
    pub time_zone: Option<String>,

    /// Output file for the document JSON (stdout when omitted)
    #[arg(short, long = "output")]
    pub output_file: Option<String>,

    /// Pretty-print the document JSON
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Locale and time zone reported to Notion when querying collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub user_locale: String,
    pub user_time_zone: String,
}

impl Locale {
    /// Builds a locale from raw `LANG`/`TZ` values.
    ///
    /// The locale is the first two characters of `LANG`; unset or empty
    /// values fall back to the fixed defaults.
    pub fn from_env_values(lang: Option<&str>, tz: Option<&str>) -> Self {
        let user_locale = lang
            .filter(|lang| !lang.is_empty())
            .map(|lang| lang.chars().take(2).collect())
            .unwrap_or_else(|| DEFAULT_USER_LOCALE.to_string());
        let user_time_zone = tz
            .filter(|tz| !tz.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_USER_TIME_ZONE.to_string());

        Self {
            user_locale,
            user_time_zone,
        }
    }

    /// Reads `LANG` and `TZ` from the process environment once.
    pub fn from_env() -> Self {
        let lang = std::env::var("LANG").ok();
        let tz = std::env::var("TZ").ok();
        Self::from_env_values(lang.as_deref(), tz.as_deref())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::from_env_values(None, None)
    }
}

/// Resolved client configuration: everything the assembler needs besides
/// the transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub locale: Locale,
    pub image_proxy_prefix: String,
}

impl ClientConfig {
    /// Default configuration with locale taken from the environment.
    pub fn from_env() -> Self {
        Self {
            locale: Locale::from_env(),
            ..Self::default()
        }
    }

    /// Same configuration pointed at another host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AppError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(NOTION_BASE_URL).expect("Notion base URL is valid"),
            locale: Locale::default(),
            image_proxy_prefix: IMAGE_PROXY_PREFIX.to_string(),
        }
    }
}

fn parse_base_url(input: &str) -> Result<Url, AppError> {
    let url = Url::parse(input)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }
    Ok(with_trailing_slash(url))
}

/// Ends the URL path with `/` so that relative joins keep any path prefix.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub page_id: PageId,
    pub client: ClientConfig,
    pub output_file: Option<PathBuf>,
    pub pretty: bool,
}

impl RunConfig {
    /// Resolves a run configuration from CLI input and environment.
    ///
    /// Explicit flags win over `LANG`/`TZ`.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let page_id = PageId::parse(cli.page.as_deref().unwrap_or(DEFAULT_PAGE_ID))?;

        let env_locale = Locale::from_env();
        let locale = Locale {
            user_locale: cli.locale.unwrap_or(env_locale.user_locale),
            user_time_zone: cli.time_zone.unwrap_or(env_locale.user_time_zone),
        };

        let client = ClientConfig {
            locale,
            ..ClientConfig::default()
        }
        .with_base_url(&cli.base_url)?;

        Ok(Self {
            page_id,
            client,
            output_file: cli.output_file.map(PathBuf::from),
            pretty: cli.pretty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_takes_first_two_characters_of_lang() {
        let locale = Locale::from_env_values(Some("en_US.UTF-8"), Some("Europe/Berlin"));
        assert_eq!(locale.user_locale, "en");
        assert_eq!(locale.user_time_zone, "Europe/Berlin");
    }

    #[test]
    fn locale_falls_back_when_unset_or_empty() {
        assert_eq!(
            Locale::from_env_values(None, None),
            Locale {
                user_locale: "ko".into(),
                user_time_zone: "Asia/Seoul".into(),
            }
        );
        assert_eq!(Locale::from_env_values(Some(""), Some("")).user_locale, "ko");
        assert_eq!(
            Locale::from_env_values(Some(""), Some("")).user_time_zone,
            "Asia/Seoul"
        );
    }

    #[test]
    fn short_lang_is_kept_whole() {
        assert_eq!(Locale::from_env_values(Some("C"), None).user_locale, "C");
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(ClientConfig::default()
            .with_base_url("ftp://example.com")
            .is_err());
        assert!(ClientConfig::default().with_base_url("not a url").is_err());

        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn base_url_path_prefix_gains_a_trailing_slash() {
        let config = ClientConfig::default()
            .with_base_url("http://proxy.local/notion")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://proxy.local/notion/");

        let config = ClientConfig::default()
            .with_base_url("http://proxy.local/notion/")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://proxy.local/notion/");
    }

    #[test]
    fn output_flag_names_the_output_file() {
        for flag in ["--output", "-o"] {
            let cli = CommandLineInput::parse_from(["notion2sections", flag, "doc.json"]);
            let config = RunConfig::resolve(cli).unwrap();
            assert_eq!(config.output_file, Some(PathBuf::from("doc.json")));
        }
    }

    #[test]
    fn resolve_uses_default_page_and_cli_overrides() {
        let cli = CommandLineInput::parse_from([
            "notion2sections",
            "--locale",
            "fr",
            "--time-zone",
            "UTC",
        ]);
        let config = RunConfig::resolve(cli).unwrap();
        assert_eq!(config.page_id.as_str(), DEFAULT_PAGE_ID);
        assert_eq!(config.client.locale.user_locale, "fr");
        assert_eq!(config.client.locale.user_time_zone, "UTC");
        assert!(!config.pretty);
    }

    #[test]
    fn resolve_rejects_bad_page_ids() {
        let cli = CommandLineInput::parse_from(["notion2sections", "not-an-id"]);
        assert!(matches!(
            RunConfig::resolve(cli),
            Err(AppError::ValidationError(_))
        ));
    }
}
