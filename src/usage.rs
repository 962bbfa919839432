use chrono::NaiveDate;

pub const DAILY_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Over the daily quota; the caller shows the upsell prompt instead.
    Blocked,
}

/// Daily quota for the premium-limited correction action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageGate {
    pub premium: bool,
    pub used_today: u32,
}

impl UsageGate {
    pub fn new(premium: bool, used_today: u32) -> Self {
        Self {
            premium,
            used_today,
        }
    }

    pub fn check(&self) -> GateDecision {
        if self.premium || self.used_today < DAILY_LIMIT {
            GateDecision::Allowed
        } else {
            GateDecision::Blocked
        }
    }

    pub fn remaining(&self) -> u32 {
        DAILY_LIMIT.saturating_sub(self.used_today)
    }

    /// Counts one use. Premium uses are not counted.
    pub fn record_use(&mut self) {
        if !self.premium {
            self.used_today += 1;
        }
    }
}

/// Calendar date string used in the usage key, e.g. `Thu Oct 15 2026`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

pub fn today_label() -> String {
    date_label(chrono::Local::now().date_naive())
}
