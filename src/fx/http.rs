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
use reqwest::Method;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Body of a "latest rates" response. Providers disagree on the name of the
/// rates field, so both common spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct LatestRates {
	#[serde(default)]
	pub base: Option<String>,

	#[serde(alias = "conversion_rates")]
	pub rates: HashMap<String, f64>,
}

pub struct Client {
	client: reqwest::blocking::Client,
	url: String,
	api_key: Option<String>,
}

impl Client {
	pub fn new(
		url: &str,
		api_key: Option<String>,
		timeout: Duration,
	) -> Result<Self, FxError> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()?;

		Ok(Client {
			client,
			url: url.to_string(),
			api_key,
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Sends one GET and decodes the body. Errors on non-2xx response codes.
	/// Single attempt, no retries.
	pub fn latest(&self) -> Result<LatestRates, FxError> {
		let mut request = self.client.request(Method::GET, &self.url);

		if let Some(api_key) = &self.api_key {
			request =
				request.header("Authorization", format!("Bearer {}", api_key));
		}

		log::debug!("sending GET to {}", self.url);
		let response = request.send()?;

		if !response.status().is_success() {
			return Err(FxError::SourceUnavailable(format!(
				"request failed with status: {}",
				response.status()
			)));
		}

		let body: LatestRates = response.json()?;

		if let Some(base) = &body.base {
			if base != crate::fx::currency::BASE_CODE {
				return Err(FxError::SourceUnavailable(format!(
					"rates are quoted against {}, not IDR",
					base
				)));
			}
		}

		Ok(body)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{BufRead, BufReader, Write};
	use std::net::TcpListener;
	use std::thread;

	/// Answers exactly one request on a loopback port with the given status
	/// line and JSON body, and returns the URL to ask.
	fn serve_once(status: &'static str, body: &'static str) -> String {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();

		thread::spawn(move || {
			let (mut stream, _) = listener.accept().unwrap();
			let mut reader = BufReader::new(stream.try_clone().unwrap());
			let mut line = String::new();
			while reader.read_line(&mut line).unwrap() > 0 {
				if line == "\r\n" {
					break;
				}
				line.clear();
			}

			let response = format!(
				"HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
				 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
				status,
				body.len(),
				body
			);
			stream.write_all(response.as_bytes()).unwrap();
		});

		format!("http://{}/latest/IDR", addr)
	}

	fn client(url: &str) -> Client {
		Client::new(url, None, Duration::from_secs(5)).unwrap()
	}

	#[test]
	fn test_latest_from_server() {
		let url =
			serve_once("200 OK", r#"{"base":"IDR","rates":{"JPY":0.0098}}"#);
		let latest = client(&url).latest().unwrap();
		assert_eq!(latest.rates["JPY"], 0.0098);
	}

	#[test]
	fn test_error_status_is_unavailable() {
		let url =
			serve_once("500 Internal Server Error", r#"{"error":"down"}"#);
		match client(&url).latest() {
			Err(FxError::SourceUnavailable(msg)) => {
				assert!(msg.contains("500"), "{}", msg)
			},
			other => panic!("expected SourceUnavailable, got {:?}", other),
		}
	}

	#[test]
	fn test_foreign_base_is_unavailable() {
		let url = serve_once("200 OK", r#"{"base":"USD","rates":{"JPY":1.0}}"#);
		match client(&url).latest() {
			Err(FxError::SourceUnavailable(msg)) => {
				assert!(msg.contains("USD"), "{}", msg)
			},
			other => panic!("expected SourceUnavailable, got {:?}", other),
		}
	}

	#[test]
	fn test_decode_v4_body() {
		let body = r#"{"base":"IDR","date":"2025-01-01","#.to_string()
			+ r#""rates":{"IDR":1,"USD":0.000066}}"#;
		let parsed: LatestRates = serde_json::from_str(&body).unwrap();
		assert_eq!(parsed.base.as_deref(), Some("IDR"));
		assert_eq!(parsed.rates["USD"], 0.000066);
	}

	#[test]
	fn test_decode_conversion_rates_body() {
		let body = r#"{"result":"success","conversion_rates":{"JPY":0.0098}}"#;
		let parsed: LatestRates = serde_json::from_str(body).unwrap();
		assert!(parsed.base.is_none());
		assert_eq!(parsed.rates["JPY"], 0.0098);
	}

	#[test]
	fn test_unreachable_host() {
		// nothing listens on port 9 of the loopback interface
		let client = Client::new(
			"http://127.0.0.1:9/latest/IDR",
			None,
			Duration::from_secs(2),
		)
		.unwrap();
		assert!(matches!(
			client.latest(),
			Err(FxError::SourceUnavailable(_))
		));
	}
}
