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
use crate::fx::convert::Conversion;
use crate::fx::error::FxError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "history.jsonl";

/// One past conversion. Never changed once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
	/// Assigned by the store on append; zero until then.
	#[serde(default)]
	pub id: u64,
	pub from_currency: String,
	pub to_currency: String,
	pub amount: f64,
	pub result: f64,
	pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
	pub fn new(conversion: &Conversion, timestamp: DateTime<Utc>) -> Self {
		let (from, to) = conversion.codes();
		Self {
			id: 0,
			from_currency: from.to_string(),
			to_currency: to.to_string(),
			amount: conversion.amount,
			result: conversion.result,
			timestamp,
		}
	}
}

/// Append-only log of conversions, one JSON object per line.
pub struct HistoryStore {
	path: PathBuf,
}

impl HistoryStore {
	pub fn new(data_dir: &Path) -> Self {
		Self {
			path: data_dir.join(FILE_NAME),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Writes the record as a new row and returns it with its id filled in.
	/// Earlier rows are only scanned for the last id, so an unreadable line
	/// never stops new conversions from being recorded.
	pub fn append(
		&self,
		mut record: ConversionRecord,
	) -> Result<ConversionRecord, FxError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}

		let content = self.read_content()?;
		record.id = last_id(&content).map_or(1, |id| id + 1);

		let mut row = serde_json::to_string(&record)?;
		row.push('\n');

		// a write cut short leaves no trailing newline; don't glue onto it
		if !content.is_empty() && !content.ends_with('\n') {
			row.insert(0, '\n');
		}

		let mut file = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&self.path)?;
		file.write_all(row.as_bytes())?;

		log::debug!(
			"recorded conversion #{} in {}",
			record.id,
			self.path.display()
		);
		Ok(record)
	}

	/// At most `limit` records, newest first. Records sharing a timestamp
	/// come out in reverse insertion order.
	pub fn recent(
		&self,
		limit: usize,
	) -> Result<Vec<ConversionRecord>, FxError> {
		let mut records = self.read_all()?;

		// read_all yields insertion order, so reversing first and then
		// stable-sorting keeps later inserts ahead on ties
		records.reverse();
		records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
		records.truncate(limit);

		Ok(records)
	}

	fn read_content(&self) -> Result<String, FxError> {
		if !self.path.exists() {
			return Ok(String::new());
		}
		Ok(fs::read_to_string(&self.path)?)
	}

	/// Every readable row in insertion order. Rows that fail to decode are
	/// reported and skipped.
	fn read_all(&self) -> Result<Vec<ConversionRecord>, FxError> {
		let content = self.read_content()?;
		let mut records = Vec::new();

		for (i, line) in content.lines().enumerate() {
			if line.trim().is_empty() {
				continue;
			}
			match serde_json::from_str::<ConversionRecord>(line) {
				Ok(record) => records.push(record),
				Err(e) => log::warn!(
					"{} line {}: skipping unreadable record: {}",
					self.path.display(),
					i + 1,
					e
				),
			}
		}

		Ok(records)
	}
}

/// Just enough of a row to number the next one.
#[derive(Deserialize)]
struct RowId {
	id: u64,
}

/// Id of the last row whose id can be read, if any.
fn last_id(content: &str) -> Option<u64> {
	content
		.lines()
		.rev()
		.find_map(|line| serde_json::from_str::<RowId>(line).ok())
		.map(|row| row.id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fx::convert::Direction;
	use crate::fx::currency::Currency;
	use crate::util::testing::scratch_dir;
	use chrono::TimeZone;

	fn at(secs: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
	}

	fn record(amount: f64, secs: i64) -> ConversionRecord {
		let conversion = Conversion::new(
			Currency::Usd,
			Direction::ToForeign,
			amount,
			0.000066,
		)
		.unwrap();
		ConversionRecord::new(&conversion, at(secs))
	}

	#[test]
	fn test_empty_history() {
		let dir = scratch_dir("history_empty");
		let store = HistoryStore::new(&dir);
		assert!(store.recent(10).unwrap().is_empty());
	}

	#[test]
	fn test_append_assigns_ids() {
		let dir = scratch_dir("history_ids");
		let store = HistoryStore::new(&dir);
		assert_eq!(store.append(record(1.0, 0)).unwrap().id, 1);
		assert_eq!(store.append(record(2.0, 1)).unwrap().id, 2);
		assert_eq!(store.append(record(2.0, 1)).unwrap().id, 3);
	}

	#[test]
	fn test_recent_newest_first_and_limited() {
		let dir = scratch_dir("history_order");
		let store = HistoryStore::new(&dir);
		// appended out of timestamp order on purpose
		store.append(record(1.0, 10)).unwrap();
		store.append(record(2.0, 30)).unwrap();
		store.append(record(3.0, 20)).unwrap();
		store.append(record(4.0, 40)).unwrap();

		let recent = store.recent(3).unwrap();
		assert_eq!(recent.len(), 3);
		let amounts: Vec<f64> = recent.iter().map(|r| r.amount).collect();
		assert_eq!(amounts, vec![4.0, 2.0, 3.0]);

		for pair in recent.windows(2) {
			assert!(pair[0].timestamp >= pair[1].timestamp);
		}

		assert_eq!(store.recent(100).unwrap().len(), 4);
		assert!(store.recent(0).unwrap().is_empty());
	}

	#[test]
	fn test_recent_ties_latest_insert_first() {
		let dir = scratch_dir("history_ties");
		let store = HistoryStore::new(&dir);
		store.append(record(1.0, 5)).unwrap();
		store.append(record(2.0, 5)).unwrap();
		store.append(record(3.0, 5)).unwrap();

		let ids: Vec<u64> =
			store.recent(3).unwrap().iter().map(|r| r.id).collect();
		assert_eq!(ids, vec![3, 2, 1]);
	}

	#[test]
	fn test_survives_reopen() {
		let dir = scratch_dir("history_reopen");
		HistoryStore::new(&dir).append(record(7.0, 0)).unwrap();

		let reopened = HistoryStore::new(&dir);
		let recent = reopened.recent(1).unwrap();
		assert_eq!(recent[0].amount, 7.0);
		assert_eq!(recent[0].from_currency, "IDR");
		assert_eq!(recent[0].to_currency, "USD");
	}

	#[test]
	fn test_corrupt_line_is_skipped() {
		let dir = scratch_dir("history_corrupt");
		let store = HistoryStore::new(&dir);
		store.append(record(1.0, 0)).unwrap();
		store.append(record(2.0, 1)).unwrap();

		// a hand edit, and a write that was cut short mid-row
		let mut content = fs::read_to_string(store.path()).unwrap();
		content.push_str("{\"id\":3,\"result\":null}\n{\"id\":4,\"from_cur");
		fs::write(store.path(), content).unwrap();

		let appended = store.append(record(5.0, 2)).unwrap();
		assert_eq!(appended.id, 4);

		let amounts: Vec<f64> =
			store.recent(10).unwrap().iter().map(|r| r.amount).collect();
		assert_eq!(amounts, vec![5.0, 2.0, 1.0]);
	}

	#[test]
	fn test_append_to_unreadable_file() {
		let dir = scratch_dir("history_garbage");
		let store = HistoryStore::new(&dir);
		fs::write(store.path(), "not json at all").unwrap();

		assert_eq!(store.append(record(1.0, 0)).unwrap().id, 1);
		assert_eq!(store.recent(10).unwrap().len(), 1);
	}
}
