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

/// Renders a number rounded to `places` decimals with commas between
/// thousands, e.g. 1234567.891 at 2 places is "1,234,567.89".
///
/// Rounding here is for display only.
pub fn grouped(value: f64, places: usize) -> String {
	let rendered = format!("{:.*}", places, value.abs());

	let (whole, fraction) = match rendered.split_once('.') {
		Some((w, f)) => (w, Some(f)),
		None => (rendered.as_str(), None),
	};

	let mut out = String::with_capacity(rendered.len() + whole.len() / 3 + 1);

	// "-0.00" is not worth showing
	if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0')
	{
		out.push('-');
	}

	for (i, c) in whole.chars().enumerate() {
		if i > 0 && (whole.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}

	if let Some(fraction) = fraction {
		out.push('.');
		out.push_str(fraction);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_grouped() {
		assert_eq!(grouped(0.0, 0), "0");
		assert_eq!(grouped(999.0, 0), "999");
		assert_eq!(grouped(1000.0, 0), "1,000");
		assert_eq!(grouped(100000.0, 0), "100,000");
		assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
		assert_eq!(grouped(757575.7575, 0), "757,576");
		assert_eq!(grouped(6.6000000000000005, 2), "6.60");
	}

	#[test]
	fn test_grouped_negative() {
		assert_eq!(grouped(-1234.5, 1), "-1,234.5");
		assert_eq!(grouped(-0.001, 2), "0.00");
	}
}
