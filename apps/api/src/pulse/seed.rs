//! Reference account set loaded by `POST /api/v1/customers/seed`.

use crate::models::customer::{Customer, Milestone, RiskLevel, VelocityTrend};

pub struct SeedCustomer {
    pub id: &'static str,
    pub name: &'static str,
    pub milestone: Milestone,
    pub risk: RiskLevel,
    pub blocker: Option<&'static str>,
    pub consumption: u8,
    pub velocity: VelocityTrend,
}

use crate::models::customer::Milestone::{Discovery, Expansion, Migration, Optimization, Pilot};
use crate::models::customer::RiskLevel::{High, Low, Medium};
use crate::models::customer::VelocityTrend::{Decreasing, Increasing, Stable};

pub const INITIAL_CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer {
        id: "0014M00001kwMVDQA2",
        name: "Snorkel AI",
        milestone: Pilot,
        risk: Medium,
        blocker: Some("Lack of Trained Personnel"),
        consumption: 42,
        velocity: Increasing,
    },
    SeedCustomer {
        id: "0014M00001kwMVEQA2",
        name: "Northwind Health",
        milestone: Migration,
        risk: High,
        blocker: Some("Security Compliance Review"),
        consumption: 18,
        velocity: Decreasing,
    },
    SeedCustomer {
        id: "0014M00001kwMVFQA2",
        name: "Helios Grid",
        milestone: Discovery,
        risk: Low,
        blocker: None,
        consumption: 7,
        velocity: Stable,
    },
    SeedCustomer {
        id: "0014M00001kwMVGQA2",
        name: "Meridian Bank",
        milestone: Optimization,
        risk: Medium,
        blocker: Some("Data Sovereignty Concerns"),
        consumption: 76,
        velocity: Stable,
    },
    SeedCustomer {
        id: "0014M00001kwMVHQA2",
        name: "Atlas Retail Group",
        milestone: Expansion,
        risk: Low,
        blocker: None,
        consumption: 91,
        velocity: Increasing,
    },
    SeedCustomer {
        id: "0014M00001kwMVIQA2",
        name: "Quanta Logistics",
        milestone: Migration,
        risk: High,
        blocker: Some("Technical Debt in Legacy System"),
        consumption: 33,
        velocity: Decreasing,
    },
    SeedCustomer {
        id: "0014M00001kwMVJQA2",
        name: "Lumen Media",
        milestone: Pilot,
        risk: Medium,
        blocker: Some("Budget Approval Pending"),
        consumption: 25,
        velocity: Stable,
    },
    SeedCustomer {
        id: "0014M00001kwMVKQA2",
        name: "Cobalt Pharma",
        milestone: Discovery,
        risk: High,
        blocker: Some("Executive Sponsorship Gap"),
        consumption: 5,
        velocity: Decreasing,
    },
];

pub fn build_customers() -> Vec<Customer> {
    INITIAL_CUSTOMERS
        .iter()
        .map(|c| Customer {
            id: c.id.to_string(),
            name: c.name.to_string(),
            milestone: Some(c.milestone),
            risk: c.risk,
            blocker: c.blocker.map(String::from),
            consumption: c.consumption.min(100),
            velocity: c.velocity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let ids: HashSet<_> = INITIAL_CUSTOMERS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), INITIAL_CUSTOMERS.len());
    }

    #[test]
    fn test_only_at_risk_accounts_have_blockers() {
        for c in build_customers() {
            if c.risk == RiskLevel::Low {
                assert!(c.active_blocker().is_none(), "{} should be unblocked", c.name);
            } else {
                assert!(c.active_blocker().is_some(), "{} should be blocked", c.name);
            }
        }
    }
}
