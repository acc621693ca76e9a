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
use crate::fx::exchange_rate::{ExchangeRate, RateTable};
use crate::fx::http::Client;
use crate::store::rate_store::RateStore;
use chrono::Utc;
use std::collections::BTreeMap;

/// Anything that can say how much of a foreign currency one rupiah buys.
pub trait RateSource {
	fn name(&self) -> &str;

	/// Every rate this source currently knows about.
	fn rates(&self) -> Result<RateTable, FxError>;

	/// The rate for a single currency.
	fn resolve(&self, currency: Currency) -> Result<ExchangeRate, FxError> {
		self.rates()?.require(currency)
	}
}

/// Asks the remote provider on every lookup.
pub struct RemoteSource {
	client: Client,
}

impl RemoteSource {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

impl RateSource for RemoteSource {
	fn name(&self) -> &str {
		self.client.url()
	}

	fn rates(&self) -> Result<RateTable, FxError> {
		let body = self.client.latest()?;
		Ok(RateTable::from_raw(&body.rates, Utc::now()))
	}
}

/// A fixed table held in memory.
pub struct StaticSource {
	table: RateTable,
}

impl StaticSource {
	/// Rough rates, good enough when no network is around.
	pub const DEFAULT_RATES: [(Currency, f64); 5] = [
		(Currency::Usd, 0.000066),
		(Currency::Kwd, 0.000020),
		(Currency::Thb, 0.0022),
		(Currency::Jpy, 0.0098),
		(Currency::Eur, 0.000061),
	];

	/// Starts from the defaults and applies overrides keyed by code or
	/// display name.
	pub fn new(overrides: &BTreeMap<String, f64>) -> Result<Self, FxError> {
		let now = Utc::now();
		let mut table = RateTable::new();

		for (currency, rate) in Self::DEFAULT_RATES {
			table.insert(ExchangeRate::new(currency, rate, now)?);
		}

		for (name, rate) in overrides {
			let currency: Currency = name.parse()?;
			table.insert(ExchangeRate::new(currency, *rate, now)?);
		}

		Ok(Self { table })
	}
}

impl RateSource for StaticSource {
	fn name(&self) -> &str {
		"static"
	}

	fn rates(&self) -> Result<RateTable, FxError> {
		Ok(self.table.clone())
	}

	fn resolve(&self, currency: Currency) -> Result<ExchangeRate, FxError> {
		self.table.require(currency)
	}
}

/// Reads whatever was last saved locally; see `refresh` for keeping it
/// current.
pub struct StoredSource {
	store: RateStore,
}

impl StoredSource {
	pub fn new(store: RateStore) -> Self {
		Self { store }
	}
}

impl RateSource for StoredSource {
	fn name(&self) -> &str {
		"stored"
	}

	fn rates(&self) -> Result<RateTable, FxError> {
		self.store.load()
	}
}

/// Outcome of a best-effort refresh. A failed refresh is not fatal: the
/// caller decides whether stale rates will do.
#[derive(Debug)]
pub enum Refresh {
	/// The store now holds this many fresh rates.
	Updated(usize),
	/// Nothing was written; the store keeps whatever it had.
	Stale(FxError),
}

impl Refresh {
	pub fn into_result(self) -> Result<usize, FxError> {
		match self {
			Refresh::Updated(count) => Ok(count),
			Refresh::Stale(e) => Err(e),
		}
	}
}

/// Pulls rates from `upstream` once and, if that worked and produced at
/// least one usable rate, replaces the stored table with them.
pub fn refresh(upstream: &dyn RateSource, store: &RateStore) -> Refresh {
	let table = match upstream.rates() {
		Ok(table) => table,
		Err(e) => return Refresh::Stale(e),
	};

	if table.is_empty() {
		return Refresh::Stale(FxError::SourceUnavailable(format!(
			"{} returned no supported rates",
			upstream.name()
		)));
	}

	match store.save(&table) {
		Ok(()) => Refresh::Updated(table.len()),
		Err(e) => Refresh::Stale(e),
	}
}
