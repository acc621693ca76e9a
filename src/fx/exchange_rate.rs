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
use crate::fx::error::FxError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Units of a foreign currency per one rupiah, as of some moment.
/// A value object not intended to have much functionality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
	#[serde(rename = "code")]
	pub currency: Currency,
	pub rate: f64,
	pub updated_at: DateTime<Utc>,
}

impl ExchangeRate {
	/// Rates must be strictly positive and finite; anything else would turn
	/// a later division into infinity or NaN.
	pub fn new(
		currency: Currency,
		rate: f64,
		updated_at: DateTime<Utc>,
	) -> Result<Self, FxError> {
		if !rate.is_finite() || rate <= 0.0 {
			return Err(FxError::RateUnavailable(currency));
		}

		Ok(Self {
			currency,
			rate,
			updated_at,
		})
	}

	/// Rupiah per one unit of the foreign currency.
	pub fn inverse(&self) -> f64 {
		1.0 / self.rate
	}
}

/// The full set of known rates. Refreshes replace the whole table rather
/// than patching individual rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateTable {
	rates: BTreeMap<Currency, ExchangeRate>,
}

impl RateTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from raw code/rate pairs such as a provider returns.
	/// Codes we don't support are skipped, as are rates that fail
	/// validation.
	pub fn from_raw<'a, I>(raw: I, updated_at: DateTime<Utc>) -> Self
	where
		I: IntoIterator<Item = (&'a String, &'a f64)>,
	{
		let mut table = RateTable::new();

		for (code, rate) in raw {
			let Some(currency) = Currency::from_code(code) else {
				continue;
			};

			match ExchangeRate::new(currency, *rate, updated_at) {
				Ok(rate) => table.insert(rate),
				Err(_) => {
					log::warn!("ignoring unusable rate {} for {}", rate, code)
				},
			}
		}

		table
	}

	pub fn insert(&mut self, rate: ExchangeRate) {
		self.rates.insert(rate.currency, rate);
	}

	pub fn get(&self, currency: Currency) -> Option<&ExchangeRate> {
		self.rates.get(&currency)
	}

	/// Same as `get`, but a missing rate is an error.
	pub fn require(&self, currency: Currency) -> Result<ExchangeRate, FxError> {
		self.get(currency)
			.copied()
			.ok_or(FxError::RateUnavailable(currency))
	}

	pub fn len(&self) -> usize {
		self.rates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rates.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
		self.rates.values()
	}
}

impl FromIterator<ExchangeRate> for RateTable {
	fn from_iter<T: IntoIterator<Item = ExchangeRate>>(iter: T) -> Self {
		let mut table = RateTable::new();
		for rate in iter {
			table.insert(rate);
		}
		table
	}
}
