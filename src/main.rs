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
use crate::config::config_file::{Config, Source as SourceConfig};
use crate::fx::convert::Direction;
use crate::fx::converter::Converter;
use crate::fx::error::FxError;
use crate::fx::http::Client;
use crate::fx::source::{
	refresh, RateSource, Refresh, RemoteSource, StaticSource, StoredSource,
};
use crate::reports::history_reporter::HistoryReporter;
use crate::reports::rate_reporter::RateReporter;
use crate::store::history::HistoryStore;
use crate::store::rate_store::RateStore;
use crate::util::filesystem;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use std::path::Path;

mod config;
mod fx;
mod reports;
mod store;
mod util;

#[derive(Parser)]
#[command(
	name = "kurs",
	version,
	about = "Converts between Indonesian rupiah and foreign currencies"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Amount to convert; thousands separators are allowed
	#[arg(required = false, allow_negative_numbers = true)]
	amount: Option<String>,

	/// Foreign currency, by code (JPY) or name (Yen)
	#[arg(required = false)]
	currency: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Where exchange rates come from
	#[arg(short, long, value_enum, default_value_t = SourceKind::Stored)]
	source: SourceKind,

	/// Custom config file location (default: ~/.config/kurs/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Directory for stored rates and history
	#[arg(long)]
	data_dir: Option<String>,

	/// Number of history entries to show
	#[arg(short = 'n', long, default_value_t = 10)]
	limit: usize,

	/// Don't record this conversion in the history
	#[arg(long)]
	no_history: bool,

	/// Don't try to refresh stored rates before using them
	#[arg(long)]
	no_refresh: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		match self.command {
			Directive::ToForeign | Directive::ToIdr => {
				if self.amount.is_none() {
					bail!("No amount specified");
				}
				if self.currency.is_none() {
					bail!("No currency specified");
				}
			},
			_ => {
				if self.amount.is_some() || self.currency.is_some() {
					bail!("This command takes no amount or currency");
				}
			},
		}

		if self.limit == 0 {
			bail!("History limit must be at least 1");
		}

		Ok(())
	}

	/// Whether this invocation may talk to the remote rate provider.
	fn needs_remote(&self) -> bool {
		match self.command {
			Directive::Refresh => true,
			Directive::History | Directive::Currencies => false,
			_ => match self.source {
				SourceKind::Live => true,
				SourceKind::Stored => !self.no_refresh,
				SourceKind::Static => false,
			},
		}
	}
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Directive {
	#[value(alias = "tf")]
	ToForeign, // rupiah to foreign currency
	#[value(alias = "ti")]
	ToIdr, // foreign currency to rupiah

	Rates,      // current rate table
	History,    // recent conversions, newest first
	Refresh,    // update stored rates from the provider
	Currencies, // supported currencies
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
enum SourceKind {
	/// Ask the rate provider on every lookup
	Live,
	/// Built-in table, adjustable in the config file
	Static,
	/// Locally saved rates, refreshed on startup when possible
	Stored,
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("warn"),
	)
	.init();

	let args = Cli::parse();
	args.validate()?;

	if args.command == Directive::Currencies {
		RateReporter::print_currencies();
		return Ok(());
	}

	let config =
		filesystem::get_config(args.config.as_ref(), args.needs_remote())?;
	let data_dir =
		filesystem::resolve_data_dir(args.data_dir.as_ref(), &config)?;
	log::debug!("using data directory {}", data_dir.display());

	match args.command {
		Directive::ToForeign | Directive::ToIdr => {
			let direction = if args.command == Directive::ToForeign {
				Direction::ToForeign
			} else {
				Direction::ToIdr
			};

			let converter = build_converter(&args, &config, &data_dir)?;
			let (Some(amount), Some(currency)) = (&args.amount, &args.currency)
			else {
				unreachable!("checked by Cli::validate")
			};

			let conversion = converter.convert(amount, currency, direction)?;
			println!("{}", conversion);
		},
		Directive::Rates => {
			let source = build_source(&args, &config, &data_dir)?;
			let reporter = RateReporter::new(source.rates()?);
			reporter.print_all_rates();
		},
		Directive::History => {
			let history = HistoryStore::new(&data_dir);
			log::debug!("reading history from {}", history.path().display());
			let reporter = HistoryReporter::new(history.recent(args.limit)?);
			reporter.print();
		},
		Directive::Refresh => {
			// an explicit refresh reports failure instead of falling back
			let remote = remote_source(&config)?;
			let store = RateStore::new(&data_dir);
			let count = refresh(&remote, &store).into_result()?;
			println!("Updated {} rates from {}", count, remote.name());
		},
		Directive::Currencies => unreachable!("handled above"),
	}

	Ok(())
}

fn build_converter(
	args: &Cli,
	config: &Config,
	data_dir: &Path,
) -> Result<Converter, Error> {
	let source = build_source(args, config, data_dir)?;

	let record = !args.no_history
		&& config
			.storage
			.as_ref()
			.and_then(|s| s.history)
			.unwrap_or(true);
	let history = record.then(|| HistoryStore::new(data_dir));

	Ok(Converter::new(source, history))
}

fn build_source(
	args: &Cli,
	config: &Config,
	data_dir: &Path,
) -> Result<Box<dyn RateSource>, Error> {
	let source: Box<dyn RateSource> = match args.source {
		SourceKind::Live => Box::new(remote_source(config)?),
		SourceKind::Static => {
			Box::new(StaticSource::new(&config.static_rates)?)
		},
		SourceKind::Stored => {
			let store = RateStore::new(data_dir);
			log::debug!("stored rates at {}", store.path().display());
			if !args.no_refresh {
				startup_refresh(config, &store);
			}
			Box::new(StoredSource::new(store))
		},
	};

	Ok(source)
}

/// One attempt to bring stored rates up to date. Failure only costs
/// freshness, so it is logged and otherwise ignored.
fn startup_refresh(config: &Config, store: &RateStore) {
	let outcome = match remote_source(config) {
		Ok(remote) => refresh(&remote, store),
		Err(e) => Refresh::Stale(e),
	};

	match outcome {
		Refresh::Updated(count) => {
			log::info!("refreshed {} stored rates", count)
		},
		Refresh::Stale(e) => log::warn!("using stored rates: {}", e),
	}
}

fn remote_source(config: &Config) -> Result<RemoteSource, FxError> {
	let defaults = SourceConfig::default();
	let source = config.source.as_ref().unwrap_or(&defaults);

	let client = Client::new(
		source.api_url(),
		source.api_key.clone(),
		source.timeout(),
	)?;
	Ok(RemoteSource::new(client))
}
