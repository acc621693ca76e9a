/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
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
use crate::fx::error::FxError;
use crate::fx::exchange_rate::{ExchangeRate, RateTable};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "rates.json";

/// The locally persisted copy of the latest rate per currency.
pub struct RateStore {
	path: PathBuf,
}

impl RateStore {
	pub fn new(data_dir: &Path) -> Self {
		Self {
			path: data_dir.join(FILE_NAME),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the stored table. A store that was never written is empty
	/// rather than an error. Rows that no longer validate are dropped.
	pub fn load(&self) -> Result<RateTable, FxError> {
		if !self.path.exists() {
			return Ok(RateTable::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let rows: Vec<ExchangeRate> = serde_json::from_str(&content)?;

		let mut table = RateTable::new();
		for row in rows {
			match ExchangeRate::new(row.currency, row.rate, row.updated_at) {
				Ok(rate) => table.insert(rate),
				Err(_) => log::warn!(
					"{}: dropping stored rate {} for {}",
					self.path.display(),
					row.rate,
					row.currency
				),
			}
		}

		Ok(table)
	}

	/// Replaces the stored table as a whole. The new content is written
	/// beside the old file and renamed over it so readers never see half a
	/// table.
	pub fn save(&self, table: &RateTable) -> Result<(), FxError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}

		let rows: Vec<&ExchangeRate> = table.iter().collect();
		let tmp = self.path.with_extension("json.tmp");
		fs::write(&tmp, serde_json::to_string_pretty(&rows)?)?;
		fs::rename(&tmp, &self.path)?;

		log::debug!("saved {} rates to {}", rows.len(), self.path.display());
		Ok(())
	}
}
