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
use crate::fx::currency::BASE_CODE;
use crate::reports::table::Table;
use crate::store::history::ConversionRecord;
use crate::util::number::grouped;
use chrono::Local;

pub struct HistoryReporter {
	records: Vec<ConversionRecord>,
}

impl HistoryReporter {
	pub fn new(records: Vec<ConversionRecord>) -> Self {
		Self { records }
	}

	/// Renders records in the order given, which the store already has
	/// newest first.
	pub fn render(&self) -> String {
		if self.records.is_empty() {
			return "No conversions recorded\n".to_string();
		}

		let mut table = Table::new(4);
		table.add_header(vec!["#", "When", "From", "To"]);
		table.add_separator();
		table.right_align(vec![0, 2, 3]);

		for record in &self.records {
			table.add_row(vec![
				record.id.to_string(),
				record
					.timestamp
					.with_timezone(&Local)
					.format("%Y-%m-%d %H:%M:%S")
					.to_string(),
				format!(
					"{} {}",
					grouped(record.amount, places(&record.from_currency)),
					record.from_currency
				),
				format!(
					"{} {}",
					grouped(record.result, places(&record.to_currency)),
					record.to_currency
				),
			]);
		}

		table.render()
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}

fn places(code: &str) -> usize {
	if code == BASE_CODE {
		0
	} else {
		2
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};

	#[test]
	fn test_empty() {
		assert_eq!(
			HistoryReporter::new(vec![]).render(),
			"No conversions recorded\n"
		);
	}

	#[test]
	fn test_rows_keep_order() {
		let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
		let records = vec![
			ConversionRecord {
				id: 2,
				from_currency: "USD".to_string(),
				to_currency: "IDR".to_string(),
				amount: 50.0,
				result: 757_575.76,
				timestamp: at,
			},
			ConversionRecord {
				id: 1,
				from_currency: "IDR".to_string(),
				to_currency: "USD".to_string(),
				amount: 100_000.0,
				result: 6.6,
				timestamp: at,
			},
		];

		let out = HistoryReporter::new(records).render();
		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines.len(), 4);
		assert!(lines[2].trim_start().starts_with('2'));
		assert!(lines[2].contains("50.00 USD"));
		assert!(lines[2].contains("757,576 IDR"));
		assert!(lines[3].contains("100,000 IDR"));
		assert!(lines[3].contains("6.60 USD"));
	}
}
