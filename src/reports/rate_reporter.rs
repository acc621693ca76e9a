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
use crate::fx::currency::Currency;
use crate::fx::exchange_rate::RateTable;
use crate::reports::table::Table;
use crate::util::number::grouped;

pub struct RateReporter {
	rates: RateTable,
}

impl RateReporter {
	pub fn new(rates: RateTable) -> RateReporter {
		Self { rates }
	}

	/// One row per supported currency, including those with no rate yet.
	pub fn render_all_rates(&self) -> String {
		let mut table = Table::new(5);

		table.add_header(vec![
			"Code",
			"Name",
			"Per IDR",
			"IDR per unit",
			"Updated",
		]);
		table.add_separator();
		table.right_align(vec![2, 3]);

		for currency in Currency::ALL {
			let row = match self.rates.get(currency) {
				Some(rate) => vec![
					currency.code().to_string(),
					currency.display_name().to_string(),
					format!("{}", rate.rate),
					grouped(rate.inverse(), 2),
					rate.updated_at.format("%Y-%m-%d %H:%M").to_string(),
				],
				None => vec![
					currency.code().to_string(),
					currency.display_name().to_string(),
					"-".to_string(),
					"-".to_string(),
					"never".to_string(),
				],
			};
			table.add_row(row);
		}

		table.render()
	}

	pub fn print_all_rates(&self) {
		print!("{}", self.render_all_rates());
	}

	/// The supported currencies, without rates.
	pub fn print_currencies() {
		let mut table = Table::new(2);
		table.add_header(vec!["Code", "Name"]);
		table.add_separator();

		for currency in Currency::ALL {
			table.add_row(vec![
				currency.code().to_string(),
				currency.display_name().to_string(),
			]);
		}

		table.print();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fx::exchange_rate::ExchangeRate;
	use chrono::{TimeZone, Utc};

	#[test]
	fn test_missing_rates_shown() {
		let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
		let rates: RateTable =
			[ExchangeRate::new(Currency::Usd, 0.000066, at).unwrap()]
				.into_iter()
				.collect();

		let out = RateReporter::new(rates).render_all_rates();
		let lines: Vec<&str> = out.lines().collect();

		// header, separator, one row per currency
		assert_eq!(lines.len(), 2 + Currency::ALL.len());
		assert!(lines[2].starts_with("USD"));
		assert!(lines[2].contains("0.000066"));
		assert!(lines[2].contains("15,151.52"));
		assert!(lines[2].contains("2025-03-01 08:30"));
		assert!(lines[3].starts_with("KWD"));
		assert!(lines[3].contains("never"));
	}
}
