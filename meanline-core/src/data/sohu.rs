//! Sohu quote provider.
//!
//! Fetches daily bars from Sohu's historical quote endpoint
//! (`q.stock.sohu.com/hisHq`). The payload is a JSON array of `{"hq": ...}`
//! records where each quote row is ten strings:
//! date, open, close, change, change%, low, high, volume, turnover, volume ratio%.
//! Rows arrive newest-first; they are sorted ascending before returning.

use super::provider::{BarProvider, DataError};
use crate::domain::DailyBar;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct HisHqRecord {
    hq: Vec<Vec<String>>,
}

/// Sohu historical quote provider.
pub struct SohuProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl SohuProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Build the quote URL for a code and date range.
    fn quote_url(code: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "https://q.stock.sohu.com/hisHq?code=cn_{code}&start={}&end={}",
            start.format("%Y%m%d"),
            end.format("%Y%m%d")
        )
    }

    /// Parse one ten-column quote row into a bar.
    fn parse_row(row: &[String]) -> Result<DailyBar, DataError> {
        if row.len() < 10 {
            return Err(DataError::MalformedPayload(format!(
                "quote row has {} columns, expected 10",
                row.len()
            )));
        }
        let date = NaiveDate::parse_from_str(&row[0], "%Y-%m-%d").map_err(|e| {
            DataError::MalformedPayload(format!("bad date '{}': {e}", row[0]))
        })?;
        Ok(DailyBar {
            date,
            open: parse_decimal(&row[1])?,
            close: parse_decimal(&row[2])?,
            change: parse_decimal(&row[3])?,
            change_pct: parse_percent(&row[4])?,
            low: parse_decimal(&row[5])?,
            high: parse_decimal(&row[6])?,
            volume: row[7].parse().map_err(|e| {
                DataError::MalformedPayload(format!("bad volume '{}': {e}", row[7]))
            })?,
            turnover: parse_decimal(&row[8])?,
            volume_ratio: parse_percent(&row[9])?,
        })
    }

    fn parse_payload(
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
        records: Vec<HisHqRecord>,
    ) -> Result<Vec<DailyBar>, DataError> {
        if records.is_empty() {
            return Err(DataError::SymbolNotFound {
                code: code.to_string(),
            });
        }

        let mut bars = Vec::new();
        for record in &records {
            for row in &record.hq {
                bars.push(Self::parse_row(row)?);
            }
        }
        if bars.is_empty() {
            return Err(DataError::EmptyRange {
                code: code.to_string(),
                start,
                end,
            });
        }

        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }

    /// Execute the HTTP request with exponential-backoff retries.
    fn fetch_with_retry(&self, url: &str) -> Result<Vec<HisHqRecord>, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.base_delay * 2u32.pow(attempt - 1));
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        last_error = Some(DataError::Http {
                            status: status.as_u16(),
                        });
                        continue;
                    }
                    return resp.json().map_err(|e| {
                        DataError::MalformedPayload(format!("failed to decode response: {e}"))
                    });
                }
                Err(e) => last_error = Some(DataError::Network(e.to_string())),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Network("no attempts made".into())))
    }
}

impl Default for SohuProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BarProvider for SohuProvider {
    fn name(&self) -> &str {
        "sohu"
    }

    fn fetch(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        let records = self.fetch_with_retry(&Self::quote_url(code, start, end))?;
        Self::parse_payload(code, start, end, records)
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(s)
        .map_err(|e| DataError::MalformedPayload(format!("bad decimal '{s}': {e}")))
}

/// Percent fields ship with a trailing '%'.
fn parse_percent(s: &str) -> Result<Decimal, DataError> {
    parse_decimal(s.trim_end_matches('%'))
}
