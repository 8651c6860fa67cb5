use crate::error::{self, Result};
use crate::util::parsing::deserialize_base_url;
use config::{Config, Environment, File};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::PathBuf;
use std::sync::{LazyLock, RwLock};
use url::Url;

static SETTINGS: LazyLock<RwLock<Config>> = LazyLock::new(init_settings);

fn init_settings() -> RwLock<Config> {
    let mut settings = Config::builder();

    let dir: PathBuf = retrieve_settings_dir().expect("settings directory should exist");

    #[cfg(test)]
    let files = ["Settings-default.toml", "Settings-test.toml"];

    #[cfg(not(test))]
    let files = ["Settings-default.toml", "Settings.toml"];

    let files: Vec<File<_, _>> = files
        .iter()
        .map(|f| dir.join(f))
        .filter(|p| p.exists())
        .map(File::from)
        .collect();

    settings = settings.add_source(files);

    // Override config with environment variables that start with `GEEDHIS2__`,
    // e.g. `GEEDHIS2__LOGGING__LOG_SPEC=debug`
    // Note: Since variables contain underscores, we need to use something different
    // for separating groups, for instance double underscores `__`
    settings = settings.add_source(Environment::with_prefix("geedhis2").separator("__"));

    RwLock::new(
        settings
            .build()
            .expect("it should crash the program if this fails"),
    )
}

/// test may run in subdirectory
#[cfg(test)]
fn retrieve_settings_dir() -> Result<PathBuf> {
    use crate::error::Error;

    const MAX_PARENT_DIRS: usize = 1;

    let mut settings_dir = std::env::current_dir().context(error::MissingWorkingDirectory)?;

    for _ in 0..=MAX_PARENT_DIRS {
        if settings_dir.join("Settings-default.toml").exists() {
            return Ok(settings_dir);
        }

        // go to parent directory
        if !settings_dir.pop() {
            break;
        }
    }

    Err(Error::MissingSettingsDirectory)
}

#[cfg(not(test))]
fn retrieve_settings_dir() -> Result<PathBuf> {
    std::env::current_dir().context(error::MissingWorkingDirectory)
}

#[cfg(test)]
pub fn set_config<T>(key: &str, value: T) -> Result<()>
where
    T: Into<config::Value>,
{
    let mut settings = SETTINGS
        .write()
        .map_err(|_error| error::Error::ConfigLockFailed)?;

    let builder = Config::builder()
        .add_source(settings.clone())
        .set_override(key, value)
        .context(error::Config)?;

    *settings = builder.build().context(error::Config)?;
    Ok(())
}

pub fn get_config<'a, T>(key: &str) -> Result<T>
where
    T: Deserialize<'a>,
{
    SETTINGS
        .read()
        .map_err(|_error| error::Error::ConfigLockFailed)?
        .get::<T>(key)
        .context(error::Config)
}

pub fn get_config_element<'a, T>() -> Result<T>
where
    T: ConfigElement + Deserialize<'a>,
{
    get_config(T::KEY)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

#[derive(Clone, Debug, Deserialize)]
pub struct Dhis2 {
    #[serde(deserialize_with = "deserialize_base_url")]
    pub base_url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConfigElement for Dhis2 {
    const KEY: &'static str = "dhis2";
}

#[derive(Clone, Debug, Deserialize)]
pub struct Gee {
    #[serde(deserialize_with = "deserialize_base_url")]
    pub api_endpoint: Url,
    pub access_token: Option<String>,
}

impl ConfigElement for Gee {
    const KEY: &'static str = "gee";
}
