//! Simulated account events and the customer patch each one produces.

use serde::{Deserialize, Serialize};

use crate::models::customer::{Customer, CustomerPatch, Milestone, RiskLevel, VelocityTrend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerEvent {
    DealClose {
        /// Display-only deal size, e.g. "$1.2M".
        #[serde(default)]
        amount: Option<String>,
    },
    RiskAlert {
        risk: RiskLevel,
        reason: String,
    },
    UsageSpike {
        amount: u8,
    },
}

impl CustomerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            CustomerEvent::DealClose { .. } => "DEAL_CLOSE",
            CustomerEvent::RiskAlert { .. } => "RISK_ALERT",
            CustomerEvent::UsageSpike { .. } => "USAGE_SPIKE",
        }
    }
}

/// Computes the patch an event applies to `customer`. Pure; the caller persists it.
pub fn apply_event(customer: &Customer, event: &CustomerEvent) -> CustomerPatch {
    match event {
        CustomerEvent::DealClose { .. } => CustomerPatch {
            milestone: Some(Milestone::ClosedWon),
            velocity: Some(VelocityTrend::Increasing),
            blocker: Some(None),
            ..CustomerPatch::default()
        },
        CustomerEvent::RiskAlert { risk, reason } => CustomerPatch {
            risk: Some(*risk),
            blocker: Some(Some(reason.trim().to_string()).filter(|r| !r.is_empty())),
            ..CustomerPatch::default()
        },
        CustomerEvent::UsageSpike { amount } => CustomerPatch {
            consumption: Some(customer.consumption.saturating_add(*amount).min(100)),
            velocity: Some(VelocityTrend::Increasing),
            ..CustomerPatch::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(consumption: u8) -> Customer {
        Customer {
            id: "0014M00001kwMVDQA2".to_string(),
            name: "Snorkel AI".to_string(),
            milestone: Some(Milestone::Pilot),
            risk: RiskLevel::Medium,
            blocker: Some("Budget Approval Pending".to_string()),
            consumption,
            velocity: VelocityTrend::Stable,
        }
    }

    #[test]
    fn test_deal_close_clears_blocker() {
        let c = customer(40);
        let patch = apply_event(&c, &CustomerEvent::DealClose { amount: None });
        let next = patch.apply_to(&c);
        assert_eq!(next.milestone, Some(Milestone::ClosedWon));
        assert_eq!(next.velocity, VelocityTrend::Increasing);
        assert_eq!(next.blocker, None);
        assert_eq!(next.risk, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_alert_sets_blocker_to_reason() {
        let c = customer(40);
        let event = CustomerEvent::RiskAlert {
            risk: RiskLevel::High,
            reason: "Security Compliance Review".to_string(),
        };
        let next = apply_event(&c, &event).apply_to(&c);
        assert_eq!(next.risk, RiskLevel::High);
        assert_eq!(next.active_blocker(), Some("Security Compliance Review"));
        assert_eq!(next.consumption, 40);
    }

    #[test]
    fn test_usage_spike_caps_consumption() {
        let c = customer(95);
        let next = apply_event(&c, &CustomerEvent::UsageSpike { amount: 20 }).apply_to(&c);
        assert_eq!(next.consumption, 100);
        assert_eq!(next.velocity, VelocityTrend::Increasing);

        let c = customer(90);
        let patch = apply_event(&c, &CustomerEvent::UsageSpike { amount: 200 });
        assert_eq!(patch.consumption, Some(100));
    }

    #[test]
    fn test_event_wire_format() {
        let event: CustomerEvent =
            serde_json::from_str(r#"{"type": "USAGE_SPIKE", "amount": 15}"#).unwrap();
        assert_eq!(event, CustomerEvent::UsageSpike { amount: 15 });
        assert_eq!(event.kind(), "USAGE_SPIKE");

        let event: CustomerEvent = serde_json::from_str(
            r#"{"type": "RISK_ALERT", "risk": "High", "reason": "Data Sovereignty Concerns"}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), "RISK_ALERT");

        let event: CustomerEvent = serde_json::from_str(r#"{"type": "DEAL_CLOSE"}"#).unwrap();
        assert_eq!(event, CustomerEvent::DealClose { amount: None });
    }
}
