//! Sync interval parsing
//!
//! DR policies carry their replication schedule as a short string such as
//! "5m", "2h" or "1d". The console shows it as "5 minutes".

use std::time::Duration;

use crate::error::{Error, Result};
use crate::i18n::Translate;

/// Unit of a scheduling interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Minutes,
    Hours,
    Days,
}

impl IntervalUnit {
    fn seconds(&self) -> u64 {
        match self {
            IntervalUnit::Minutes => 60,
            IntervalUnit::Hours => 3600,
            IntervalUnit::Days => 86400,
        }
    }

    pub fn display_text(&self, t: &dyn Translate) -> String {
        match self {
            IntervalUnit::Minutes => t.translate("minutes"),
            IntervalUnit::Hours => t.translate("hours"),
            IntervalUnit::Days => t.translate("days"),
        }
    }
}

/// A parsed `schedulingInterval`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncInterval {
    pub value: u32,
    pub unit: IntervalUnit,
}

impl SyncInterval {
    /// Parse an interval like "5m", "12h" or "1d"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::IntervalParse("empty interval string".to_string()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| Error::IntervalParse(format!("missing unit in interval: {}", s)))?;
        let (digits, unit) = s.split_at(split);

        let value: u32 = digits
            .parse()
            .map_err(|_| Error::IntervalParse(format!("invalid number in interval: {}", s)))?;

        let unit = match unit {
            "m" => IntervalUnit::Minutes,
            "h" => IntervalUnit::Hours,
            "d" => IntervalUnit::Days,
            other => {
                return Err(Error::IntervalParse(format!(
                    "unknown interval unit: {}",
                    other
                )))
            }
        };

        if value == 0 {
            return Err(Error::IntervalParse(
                "interval must be greater than 0".to_string(),
            ));
        }

        Ok(Self { value, unit })
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.value) * self.unit.seconds())
    }

    /// Display text such as "5 minutes"
    pub fn display_text(&self, t: &dyn Translate) -> String {
        format!("{} {}", self.value, self.unit.display_text(t))
    }
}
