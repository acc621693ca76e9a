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
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_API_URL: &str =
	"https://api.exchangerate-api.com/v4/latest/IDR";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub source: Option<Source>,
	pub storage: Option<Storage>,

	/// Overrides for the static rate table, keyed by code or display name.
	#[serde(default)]
	pub static_rates: BTreeMap<String, f64>,
}

/// Where live rates come from.
#[derive(Debug, Default, Deserialize)]
pub struct Source {
	pub api_url: Option<String>,
	pub api_key: Option<String>,
	pub api_key_cmd: Option<String>,
	pub timeout_secs: Option<u64>,
}

impl Source {
	pub fn api_url(&self) -> &str {
		self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct Storage {
	/// Directory for the rate table and history log.
	pub data_dir: Option<String>,

	/// Set to false to stop recording conversions.
	pub history: Option<bool>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.source.is_none());
		assert!(config.storage.is_none());
		assert!(config.static_rates.is_empty());

		let source = config.source.unwrap_or_default();
		assert_eq!(source.api_url(), DEFAULT_API_URL);
		assert_eq!(source.timeout(), Duration::from_secs(10));
	}

	#[test]
	fn test_full_config() {
		let config: Config = toml::from_str(
			r#"
			[source]
			api_url = "https://example.test/latest/IDR"
			api_key = "secret"
			timeout_secs = 3

			[storage]
			data_dir = "/tmp/kurs"
			history = false

			[static_rates]
			USD = 0.00007
			Yen = 0.01
			"#,
		)
		.unwrap();

		let source = config.source.unwrap();
		assert_eq!(source.api_url(), "https://example.test/latest/IDR");
		assert_eq!(source.api_key.as_deref(), Some("secret"));
		assert_eq!(source.timeout(), Duration::from_secs(3));

		let storage = config.storage.unwrap();
		assert_eq!(storage.data_dir.as_deref(), Some("/tmp/kurs"));
		assert_eq!(storage.history, Some(false));

		assert_eq!(config.static_rates["USD"], 0.00007);
		assert_eq!(config.static_rates["Yen"], 0.01);
	}
}
