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
use crate::fx::currency::{Currency, BASE_CODE};
use crate::fx::error::FxError;
use crate::util::number::grouped;
use std::fmt;

/// Decimal places used when showing rupiah, which has no useful minor unit.
const IDR_PLACES: usize = 0;
const FOREIGN_PLACES: usize = 2;
const INVERSE_PLACES: usize = 2;

/// Which way a conversion runs relative to the rupiah.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	ToForeign,
	ToIdr,
}

/// Reads a user-typed amount. Thousands separators are tolerated, but the
/// result must be a finite number above zero.
pub fn parse_amount(input: &str) -> Result<f64, FxError> {
	let cleaned: String = input
		.chars()
		.filter(|c| *c != ',' && !c.is_whitespace())
		.collect();

	let amount: f64 = cleaned
		.parse()
		.map_err(|_| FxError::InvalidAmount(input.trim().to_string()))?;

	check_amount(amount)?;
	Ok(amount)
}

fn check_amount(amount: f64) -> Result<(), FxError> {
	if !amount.is_finite() || amount <= 0.0 {
		return Err(FxError::InvalidAmount(amount.to_string()));
	}
	Ok(())
}

/// Converts `amount` at `rate` (foreign units per rupiah). The rate is
/// checked before anything is divided by it, and a result that overflows
/// or underflows is refused rather than reported as infinity or zero.
pub fn convert(
	amount: f64,
	rate: f64,
	direction: Direction,
) -> Result<f64, FxError> {
	check_amount(amount)?;

	if !rate.is_finite() || rate <= 0.0 {
		return Err(FxError::InvalidRate(rate));
	}

	let result = match direction {
		Direction::ToForeign => amount * rate,
		Direction::ToIdr => amount / rate,
	};

	if !result.is_finite() || result <= 0.0 {
		return Err(FxError::InvalidAmount(format!(
			"{} converts out of range",
			amount
		)));
	}

	Ok(result)
}

/// A completed conversion. `result` is kept at full precision; only the
/// `Display` form is rounded.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
	pub currency: Currency,
	pub direction: Direction,
	pub amount: f64,
	pub rate: f64,
	pub result: f64,
}

impl Conversion {
	pub fn new(
		currency: Currency,
		direction: Direction,
		amount: f64,
		rate: f64,
	) -> Result<Self, FxError> {
		let result = convert(amount, rate, direction).map_err(|e| match e {
			FxError::InvalidRate(_) => FxError::RateUnavailable(currency),
			other => other,
		})?;

		Ok(Self {
			currency,
			direction,
			amount,
			rate,
			result,
		})
	}

	/// Codes of the (from, to) currencies.
	pub fn codes(&self) -> (&'static str, &'static str) {
		match self.direction {
			Direction::ToForeign => (BASE_CODE, self.currency.code()),
			Direction::ToIdr => (self.currency.code(), BASE_CODE),
		}
	}

	/// Rupiah per one unit of the foreign currency.
	pub fn inverse_rate(&self) -> f64 {
		1.0 / self.rate
	}
}

impl fmt::Display for Conversion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (from, to) = self.codes();
		let (amount_places, result_places) = match self.direction {
			Direction::ToForeign => (IDR_PLACES, FOREIGN_PLACES),
			Direction::ToIdr => (FOREIGN_PLACES, IDR_PLACES),
		};

		write!(
			f,
			"{} {} = {} {} (1 {} = {} {})",
			grouped(self.amount, amount_places),
			from,
			grouped(self.result, result_places),
			to,
			self.currency.code(),
			grouped(self.inverse_rate(), INVERSE_PLACES),
			BASE_CODE,
		)
	}
}
