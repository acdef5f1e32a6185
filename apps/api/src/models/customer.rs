use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Engagement lifecycle stage of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Milestone {
    Discovery,
    Pilot,
    Migration,
    Optimization,
    Expansion,
    #[serde(rename = "Closed Won")]
    ClosedWon,
}

impl Milestone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::Discovery => "Discovery",
            Milestone::Pilot => "Pilot",
            Milestone::Migration => "Migration",
            Milestone::Optimization => "Optimization",
            Milestone::Expansion => "Expansion",
            Milestone::ClosedWon => "Closed Won",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Milestone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discovery" => Ok(Milestone::Discovery),
            "pilot" => Ok(Milestone::Pilot),
            "migration" => Ok(Milestone::Migration),
            "optimization" => Ok(Milestone::Optimization),
            "expansion" => Ok(Milestone::Expansion),
            "closed won" | "closed_won" => Ok(Milestone::ClosedWon),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Score multiplier applied to every weighted need of a customer at this risk.
    pub fn multiplier(&self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Medium => 1.2,
            RiskLevel::High => 1.5,
        }
    }

    /// Lenient parse: anything unrecognized is treated as `Low`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityTrend {
    Increasing,
    #[default]
    Stable,
    Decreasing,
}

impl VelocityTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityTrend::Increasing => "Increasing",
            VelocityTrend::Stable => "Stable",
            VelocityTrend::Decreasing => "Decreasing",
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" => VelocityTrend::Increasing,
            "decreasing" => VelocityTrend::Decreasing,
            _ => VelocityTrend::Stable,
        }
    }
}

/// A tracked customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub risk: RiskLevel,
    #[serde(default)]
    pub blocker: Option<String>,
    /// Percent of target consumption, 0–100.
    #[serde(default)]
    pub consumption: u8,
    #[serde(default)]
    pub velocity: VelocityTrend,
}

impl Customer {
    /// Blocker text, if present and non-blank.
    pub fn active_blocker(&self) -> Option<&str> {
        self.blocker
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub milestone: Option<String>,
    pub risk: String,
    pub blocker: Option<String>,
    pub consumption: i16,
    pub velocity: String,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            milestone: row.milestone.as_deref().and_then(|m| m.parse().ok()),
            risk: RiskLevel::parse_lenient(&row.risk),
            blocker: row.blocker,
            consumption: row.consumption.clamp(0, 100) as u8,
            velocity: VelocityTrend::parse_lenient(&row.velocity),
        }
    }
}

/// Partial update for a customer. `blocker: Some(None)` clears the blocker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub blocker: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<VelocityTrend>,
}

impl CustomerPatch {
    pub fn apply_to(&self, customer: &Customer) -> Customer {
        let mut next = customer.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(milestone) = self.milestone {
            next.milestone = Some(milestone);
        }
        if let Some(risk) = self.risk {
            next.risk = risk;
        }
        if let Some(blocker) = &self.blocker {
            next.blocker = blocker.clone();
        }
        if let Some(consumption) = self.consumption {
            next.consumption = consumption.min(100);
        }
        if let Some(velocity) = self.velocity {
            next.velocity = velocity;
        }
        next
    }
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
