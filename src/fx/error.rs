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
use thiserror::Error;

/// Everything that can go wrong between reading an amount off the command
/// line and printing a converted value.
#[derive(Debug, Error)]
pub enum FxError {
	/// Non-numeric, non-finite or non-positive input.
	#[error("invalid amount: {0}")]
	InvalidAmount(String),

	/// The currency is not one of the supported set.
	#[error("unknown currency: {0}")]
	NotFound(String),

	/// The currency is known but no usable rate exists for it.
	#[error("no exchange rate available for {0}")]
	RateUnavailable(Currency),

	#[error("exchange rate must be a positive number, got {0}")]
	InvalidRate(f64),

	/// The remote rate provider could not be reached or made no sense.
	#[error("rate source unavailable: {0}")]
	SourceUnavailable(String),

	/// Local rate or history files could not be read or written.
	#[error("storage error: {0}")]
	Storage(String),
}

impl From<reqwest::Error> for FxError {
	fn from(e: reqwest::Error) -> Self {
		FxError::SourceUnavailable(e.to_string())
	}
}

impl From<std::io::Error> for FxError {
	fn from(e: std::io::Error) -> Self {
		FxError::Storage(e.to_string())
	}
}

impl From<serde_json::Error> for FxError {
	fn from(e: serde_json::Error) -> Self {
		FxError::Storage(e.to_string())
	}
}
