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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Code of the base currency every rate is quoted against.
pub const BASE_CODE: &str = "IDR";

/// The foreign currencies that can be converted to and from rupiah.
#[derive(
	Clone,
	Copy,
	Debug,
	Eq,
	PartialEq,
	Hash,
	Ord,
	PartialOrd,
	Serialize,
	Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
	Usd,
	Kwd,
	Thb,
	Jpy,
	Eur,
}

impl Currency {
	pub const ALL: [Currency; 5] = [
		Currency::Usd,
		Currency::Kwd,
		Currency::Thb,
		Currency::Jpy,
		Currency::Eur,
	];

	pub fn code(&self) -> &'static str {
		match self {
			Currency::Usd => "USD",
			Currency::Kwd => "KWD",
			Currency::Thb => "THB",
			Currency::Jpy => "JPY",
			Currency::Eur => "EUR",
		}
	}

	/// The short name people pick from a list; not always the code.
	pub fn display_name(&self) -> &'static str {
		match self {
			Currency::Usd => "USD",
			Currency::Kwd => "Kuwait",
			Currency::Thb => "Baht",
			Currency::Jpy => "Yen",
			Currency::Eur => "Euro",
		}
	}

	/// Looks a currency up by its code alone, as rate providers report them.
	pub fn from_code(code: &str) -> Option<Currency> {
		Currency::ALL
			.into_iter()
			.find(|c| c.code().eq_ignore_ascii_case(code.trim()))
	}
}

/// Accepts either the code or the display name, ignoring case.
impl FromStr for Currency {
	type Err = FxError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		Currency::from_code(s)
			.or_else(|| {
				Currency::ALL
					.into_iter()
					.find(|c| c.display_name().eq_ignore_ascii_case(s))
			})
			.ok_or_else(|| FxError::NotFound(s.to_string()))
	}
}

impl TryFrom<String> for Currency {
	type Error = FxError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Currency::from_str(&value)
	}
}

impl From<Currency> for String {
	fn from(value: Currency) -> Self {
		value.code().to_string()
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_by_code_and_name() {
		assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
		assert_eq!(Currency::from_str("jpy").unwrap(), Currency::Jpy);
		assert_eq!(Currency::from_str("Kuwait").unwrap(), Currency::Kwd);
		assert_eq!(Currency::from_str(" baht ").unwrap(), Currency::Thb);
		assert_eq!(Currency::from_str("EURO").unwrap(), Currency::Eur);
	}

	#[test]
	fn test_parse_unknown() {
		assert!(matches!(
			Currency::from_str("GBP"),
			Err(FxError::NotFound(code)) if code == "GBP"
		));
		// the base is not a foreign currency
		assert!(Currency::from_str(BASE_CODE).is_err());
	}

	#[test]
	fn test_codes_unique() {
		for (i, a) in Currency::ALL.iter().enumerate() {
			for b in &Currency::ALL[i + 1..] {
				assert_ne!(a.code(), b.code());
				assert_ne!(a.display_name(), b.display_name());
			}
		}
	}

	#[test]
	fn test_serde_as_code() {
		let json = serde_json::to_string(&Currency::Thb).unwrap();
		assert_eq!(json, "\"THB\"");
		let back: Currency = serde_json::from_str(&json).unwrap();
		assert_eq!(back, Currency::Thb);
		assert!(serde_json::from_str::<Currency>("\"XYZ\"").is_err());
	}
}
