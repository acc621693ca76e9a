/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::{data_dir, home_dir};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

const APP_DIR: &str = "kurs";

/// Fetches the config from the given path, or default path if none.
/// The boolean argument indicates whether it is necessary to inspect
/// the config for authentication, i.e. for fetching live rates.
pub fn get_config(
	custom_config_path: Option<&String>,
	expand_auth: bool,
) -> Result<Config, Error> {
	let config_path = match &custom_config_path {
		None => home_dir()
			.ok_or_else(|| anyhow!("unable to determine home directory"))?
			.join(".config")
			.join(APP_DIR)
			.join("config.toml"),
		Some(p) => PathBuf::from(p),
	};

	// create empty config file if it doesn't exist
	if !config_path.exists() && custom_config_path.is_none() {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent)?;
		}
		File::create(&config_path)?;
	}

	let content = fs::read_to_string(&config_path).map_err(|e| {
		anyhow!("failed to read config {}: {}", config_path.display(), e)
	})?;
	let mut config: Config = toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))?;

	// Execute api_key_cmd if applicable, and put result in api_key
	if !expand_auth {
		return Ok(config);
	}

	if let Some(source) = &mut config.source {
		if source.api_key_cmd.is_some() && source.api_key.is_some() {
			bail!(
				"Only one of source.api_key and source.api_key_cmd may be \
				 specified"
			)
		}

		if let Some(api_key_cmd) = &source.api_key_cmd {
			source.api_key = Some(run_key_command(api_key_cmd)?);
		}
	}

	Ok(config)
}

fn run_key_command(cmd: &str) -> Result<String, Error> {
	let output = Command::new("sh")
		.arg("-c")
		.arg(cmd)
		.output()
		.map_err(|e| anyhow!("failed to execute api_key_cmd: {}", e))?;

	if !output.status.success() {
		bail!(
			"api_key_cmd failed with status {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr)
		);
	}

	Ok(String::from_utf8(output.stdout)
		.map_err(|e| anyhow!("failed to parse command output: {}", e))?
		.trim()
		.to_string())
}

/// Picks the directory holding the rate table and history log: the command
/// line wins over the config file, which wins over the platform default.
pub fn resolve_data_dir(
	cli_override: Option<&String>,
	config: &Config,
) -> Result<PathBuf, Error> {
	if let Some(dir) = cli_override {
		return Ok(PathBuf::from(dir));
	}

	if let Some(dir) = config.storage.as_ref().and_then(|s| s.data_dir.as_ref())
	{
		return Ok(expand_home(dir));
	}

	data_dir()
		.map(|d| d.join(APP_DIR))
		.ok_or_else(|| anyhow!("unable to determine data directory"))
}

/// Expands a leading "~/" since config files are hand-written.
fn expand_home(path: &str) -> PathBuf {
	match (path.strip_prefix("~/"), home_dir()) {
		(Some(rest), Some(home)) => home.join(rest),
		_ => Path::new(path).to_path_buf(),
	}
}
