//! Config-file loading and the `config` subcommand.
//!
//! Files are `key=value` lines with `#` comments. Search order: explicit
//! `--config` path, then `~/.config/gwstool/config`, then
//! `/etc/gwstool.conf`; the first file that exists wins. No file at all
//! means the built-in defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use gws_client::Config;

const SYSTEM_CONFIG: &str = "/etc/gwstool.conf";

fn user_config_path() -> Option<PathBuf> {
  std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/gwstool/config"))
}

// ─── Loading ──────────────────────────────────────────────────────────────────

/// Resolve and load the active config file.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
  if let Some(path) = explicit {
    return load_file(path);
  }
  for path in user_config_path().into_iter().chain([PathBuf::from(SYSTEM_CONFIG)]) {
    if path.exists() {
      return load_file(&path);
    }
  }
  Ok(Config::default())
}

fn load_file(path: &Path) -> Result<Config> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  parse(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

fn parse(raw: &str) -> Result<Config> {
  let mut config = Config::default();
  for (lineno, line) in raw.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let Some((key, value)) = line.split_once('=') else {
      bail!("line {}: expected key=value", lineno + 1);
    };
    let (key, value) = (key.trim(), value.trim());
    match key {
      "api_url" => config.api_url = value.to_string(),
      "ca_file" => config.ca_file = Some(PathBuf::from(value)),
      "client_cert" => config.client_cert = Some(PathBuf::from(value)),
      "client_key" => config.client_key = Some(PathBuf::from(value)),
      "timeout" => {
        config.timeout = value
          .parse()
          .with_context(|| format!("line {}: timeout must be a number of seconds", lineno + 1))?
      }
      other => bail!("line {}: unknown key {other}", lineno + 1),
    }
  }
  Ok(config)
}

// ─── The `config` subcommand ──────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
  /// Show the configuration sources and the active values.
  Show,
  /// Write a template user config file.
  Init {
    /// Replace an existing file.
    #[arg(long)]
    overwrite: bool,
  },
}

pub fn run(command: &ConfigCommand, explicit: Option<&Path>, json: bool) -> Result<()> {
  match command {
    ConfigCommand::Show => show(explicit, json),
    ConfigCommand::Init { overwrite } => init(*overwrite),
  }
}

fn active_path(explicit: Option<&Path>) -> Option<PathBuf> {
  if let Some(path) = explicit {
    return Some(path.to_path_buf());
  }
  user_config_path()
    .into_iter()
    .chain([PathBuf::from(SYSTEM_CONFIG)])
    .find(|p| p.exists())
}

fn show(explicit: Option<&Path>, json: bool) -> Result<()> {
  let active = active_path(explicit);
  let config = load(explicit)?;

  if json {
    let value = serde_json::json!({
      "active_config": active.as_ref().map(|p| p.display().to_string()),
      "api_url": config.api_url,
      "ca_file": config.ca_file,
      "client_cert": config.client_cert,
      "client_key": config.client_key,
      "timeout": config.timeout,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  println!("Configuration sources:");
  if let Some(path) = explicit {
    println!("  Command line:  {}", path.display());
  }
  if let Some(path) = user_config_path() {
    println!("  User config:   {} (exists: {})", path.display(), path.exists());
  }
  println!(
    "  System config: {} (exists: {})",
    SYSTEM_CONFIG,
    Path::new(SYSTEM_CONFIG).exists()
  );
  match &active {
    Some(path) => println!("\nActive: {}", path.display()),
    None => println!("\nActive: built-in defaults"),
  }
  println!("  api_url     = {}", config.api_url);
  if let Some(p) = &config.ca_file {
    println!("  ca_file     = {}", p.display());
  }
  if let Some(p) = &config.client_cert {
    println!("  client_cert = {}", p.display());
  }
  if let Some(p) = &config.client_key {
    println!("  client_key  = {}", p.display());
  }
  println!("  timeout     = {}s", config.timeout);
  Ok(())
}

const TEMPLATE: &str = "\
# gwstool user configuration file
# This file takes precedence over the system configuration (/etc/gwstool.conf).
# Edit these values with your actual credentials and settings.

# GWS API URL
api_url=https://groups.uw.edu/group_sws/v3

# Path to the CA certificate file
ca_file=/path/to/ca.cert

# Path to the client certificate file
client_cert=/path/to/client.cert

# Path to the client private key file
client_key=/path/to/client.key

# Request timeout in seconds
timeout=30
";

fn init(overwrite: bool) -> Result<()> {
  let Some(path) = user_config_path() else {
    bail!("cannot resolve the user config path: HOME is not set");
  };
  if path.exists() && !overwrite {
    bail!(
      "user config file already exists at {}, use --overwrite to replace it",
      path.display()
    );
  }
  if let Some(dir) = path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("creating config directory {}", dir.display()))?;
  }
  std::fs::write(&path, TEMPLATE)
    .with_context(|| format!("writing config file {}", path.display()))?;
  // The file carries credential paths; keep it private.
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
  }
  println!("User configuration file created at: {}", path.display());
  println!("Edit the file with your actual credentials.");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_a_full_file() {
    let raw = "\
# comment
api_url=https://eval.groups.uw.edu/group_sws/v3

ca_file = /etc/ssl/incommon.pem
client_cert=/etc/gws/client.crt
client_key=/etc/gws/client.key
timeout=60
";
    let config = parse(raw).unwrap();
    assert_eq!(config.api_url, "https://eval.groups.uw.edu/group_sws/v3");
    assert_eq!(config.ca_file.unwrap().to_str(), Some("/etc/ssl/incommon.pem"));
    assert_eq!(config.timeout, 60);
  }

  #[test]
  fn unset_keys_keep_their_defaults() {
    let config = parse("timeout=10\n").unwrap();
    assert_eq!(config.api_url, gws_client::DEFAULT_API_URL);
    assert!(config.ca_file.is_none());
  }

  #[test]
  fn rejects_unknown_keys_and_bad_lines() {
    assert!(parse("nonsense\n").is_err());
    assert!(parse("shoe_size=12\n").is_err());
    assert!(parse("timeout=soon\n").is_err());
  }
}
