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
use crate::fx::convert::{parse_amount, Conversion, Direction};
use crate::fx::currency::Currency;
use crate::fx::error::FxError;
use crate::fx::source::RateSource;
use crate::store::history::{ConversionRecord, HistoryStore};
use chrono::Utc;

/// Holds the rate source and, optionally, the history log that a front end
/// needs to run conversions.
pub struct Converter {
	source: Box<dyn RateSource>,
	history: Option<HistoryStore>,
}

impl Converter {
	pub fn new(
		source: Box<dyn RateSource>,
		history: Option<HistoryStore>,
	) -> Self {
		Self { source, history }
	}

	/// Runs one conversion from raw user input. The amount and currency are
	/// validated before the rate source is consulted.
	pub fn convert(
		&self,
		amount: &str,
		currency: &str,
		direction: Direction,
	) -> Result<Conversion, FxError> {
		let amount = parse_amount(amount)?;
		let currency: Currency = currency.parse()?;

		let rate = self.source.resolve(currency)?;
		let conversion =
			Conversion::new(currency, direction, amount, rate.rate)?;

		// a failed append is logged, never returned
		if let Some(history) = &self.history {
			let record = ConversionRecord::new(&conversion, Utc::now());
			if let Err(e) = history.append(record) {
				log::warn!("could not record conversion: {}", e);
			}
		}

		Ok(conversion)
	}
}
