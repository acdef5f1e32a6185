//! Intelligence brief: WHAT is happening (context), WHO to deploy (matches), WHY
//! (strategy) and HOW (actions). Composed deterministically from the customer record,
//! the optional news signal and the matcher's picks.

use serde::{Deserialize, Serialize};

use crate::models::customer::{Customer, Milestone, RiskLevel};
use crate::models::signal::NewsSignal;
use crate::talent::matching::{MatchResult, DEFAULT_PRIMARY_DOMAIN};

#[derive(Debug, Clone, Serialize)]
pub struct IntelligenceBrief<'a> {
    pub headline: String,
    pub context: String,
    pub matches: Vec<MatchResult<'a>>,
    pub strategy: String,
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<NewsSignal>,
}

/// The parts of a brief the diagram generator reads. Accepts a serialized
/// `IntelligenceBrief` as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BriefOutline {
    pub headline: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

fn objective(customer: &Customer) -> String {
    if let Some(blocker) = customer.active_blocker() {
        return format!("to clear the \"{blocker}\" blocker");
    }
    match customer.milestone {
        Some(Milestone::Discovery) => "to shape a first high-value use case",
        Some(Milestone::Pilot) => "to convert the pilot into a production commitment",
        Some(Milestone::Migration) => "to de-risk the migration path",
        Some(Milestone::Optimization) => "to lift efficiency and consumption",
        Some(Milestone::Expansion) => "to scale adoption across new workloads",
        Some(Milestone::ClosedWon) => "to land the first production workloads",
        None => "to accelerate the engagement",
    }
    .to_string()
}

fn headline(customer: &Customer, signal: Option<&NewsSignal>) -> String {
    if let Some(s) = signal.filter(|s| !s.headline.trim().is_empty()) {
        return s.headline.trim().to_string();
    }
    match customer.milestone {
        Some(m) => format!("{}: {} risk at {m}", customer.name, customer.risk),
        None => format!("{}: {} risk engagement", customer.name, customer.risk),
    }
}

fn context(customer: &Customer, signal: Option<&NewsSignal>) -> String {
    let stage = customer
        .milestone
        .map_or_else(|| "an early engagement".to_string(), |m| format!("{m}"));
    let mut text = format!(
        "{} is in {stage} at {}% of target consumption with {} velocity.",
        customer.name,
        customer.consumption,
        customer.velocity.as_str().to_lowercase()
    );
    match (customer.active_blocker(), signal) {
        (Some(blocker), _) => text.push_str(&format!(" The current blocker is {blocker}.")),
        (None, Some(s)) if !s.relevance.trim().is_empty() => {
            text.push(' ');
            text.push_str(s.relevance.trim());
        }
        _ => text.push_str(" No active blockers are reported."),
    }
    text
}

fn strategy(customer: &Customer, matches: &[MatchResult<'_>]) -> String {
    let goal = objective(customer);
    let Some(lead) = matches.first() else {
        return format!("Assign an account team {goal}.");
    };
    let domain = lead.member.primary_domain().unwrap_or(DEFAULT_PRIMARY_DOMAIN);
    match matches.get(1) {
        Some(support) => format!(
            "Deploy {} to lead with {domain} expertise, supported by {}, {goal}.",
            lead.member.name, support.member.name
        ),
        None => format!("Deploy {} to lead with {domain} expertise {goal}.", lead.member.name),
    }
}

fn actions(
    customer: &Customer,
    signal: Option<&NewsSignal>,
    matches: &[MatchResult<'_>],
) -> Vec<String> {
    let mut actions = Vec::with_capacity(4);

    actions.push(match matches.first() {
        Some(lead) if !lead.member.ldap.is_empty() => format!(
            "Schedule a technical deep-dive led by {} ({})",
            lead.member.name, lead.member.ldap
        ),
        Some(lead) => format!("Schedule a technical deep-dive led by {}", lead.member.name),
        None => format!("Identify an engagement lead for {}", customer.name),
    });

    actions.push(match (customer.active_blocker(), customer.milestone) {
        (Some(blocker), _) => format!("Build a resolution plan for: {blocker}"),
        (None, Some(m)) => format!("Agree success criteria for the {m} milestone"),
        (None, None) => "Agree success criteria for the next milestone".to_string(),
    });

    actions.push(match signal.filter(|s| !s.headline.trim().is_empty()) {
        Some(s) => format!(
            "Reference \"{}\" in the next executive touchpoint",
            s.headline.trim()
        ),
        None => format!(
            "Review the consumption trend ({}% of target, {})",
            customer.consumption,
            customer.velocity.as_str().to_lowercase()
        ),
    });

    if customer.risk == RiskLevel::High {
        actions.push("Escalate to account leadership for an executive sponsor review".to_string());
    }
    actions
}

pub fn compose_brief<'a>(
    customer: &Customer,
    signal: Option<&NewsSignal>,
    matches: Vec<MatchResult<'a>>,
) -> IntelligenceBrief<'a> {
    IntelligenceBrief {
        headline: headline(customer, signal),
        context: context(customer, signal),
        strategy: strategy(customer, &matches),
        actions: actions(customer, signal, &matches),
        matches,
        signal: signal.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::VelocityTrend;
    use crate::models::signal::Sentiment;
    use crate::models::team::TeamMember;
    use serde_json::json;

    fn member(name: &str, ldap: &str, domains: &[&str]) -> TeamMember {
        serde_json::from_value(json!({
            "id": ldap,
            "name": name,
            "role": "Customer Engineer",
            "location": "Remote",
            "ldap": ldap,
            "domains": domains,
        }))
        .unwrap()
    }

    fn customer(risk: RiskLevel, blocker: Option<&str>) -> Customer {
        Customer {
            id: "c-1".to_string(),
            name: "Helios Grid".to_string(),
            milestone: Some(Milestone::Migration),
            risk,
            blocker: blocker.map(String::from),
            consumption: 33,
            velocity: VelocityTrend::Decreasing,
        }
    }

    fn signal() -> NewsSignal {
        NewsSignal {
            headline: "Helios Grid launches AI forecasting unit".to_string(),
            category: "AI/ML Launch".to_string(),
            relevance: "New AI division - pitch Vertex.".to_string(),
            sentiment: Sentiment::Positive,
            link: None,
        }
    }

    fn picks(pool: &[TeamMember]) -> Vec<MatchResult<'_>> {
        pool.iter()
            .map(|m| MatchResult {
                member: m,
                reason: "fit".to_string(),
                score: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_strategy_names_lead_and_primary_domain() {
        let pool = vec![
            member("Priya Nair", "priyan", &["Data Analytics", "BigQuery"]),
            member("Tom Ellis", "tome", &["Security"]),
        ];
        let brief = compose_brief(&customer(RiskLevel::Medium, None), None, picks(&pool));
        assert!(brief.strategy.contains("Priya Nair"));
        assert!(brief.strategy.contains("Data Analytics"));
        assert!(brief.strategy.contains("Tom Ellis"));
        assert!(brief.strategy.contains("migration"));
        assert_eq!(brief.matches.len(), 2);
    }

    #[test]
    fn test_lead_without_domains_uses_default_domain() {
        let pool = vec![member("Sam Reyes", "samr", &[])];
        let brief = compose_brief(&customer(RiskLevel::Low, None), None, picks(&pool));
        assert!(brief.strategy.contains(DEFAULT_PRIMARY_DOMAIN));
    }

    #[test]
    fn test_escalation_only_for_high_risk() {
        let pool = vec![member("Priya Nair", "priyan", &["AI"])];
        let high = compose_brief(
            &customer(RiskLevel::High, Some("Security Compliance Review")),
            None,
            picks(&pool),
        );
        assert_eq!(high.actions.len(), 4);
        assert!(high.actions[3].starts_with("Escalate"));
        assert!(high.actions[1].contains("Security Compliance Review"));

        let low = compose_brief(&customer(RiskLevel::Low, None), None, picks(&pool));
        assert_eq!(low.actions.len(), 3);
        assert!(low.actions.iter().all(|a| !a.starts_with("Escalate")));
    }

    #[test]
    fn test_signal_drives_headline_and_actions() {
        let s = signal();
        let brief = compose_brief(&customer(RiskLevel::Low, None), Some(&s), Vec::new());
        assert_eq!(brief.headline, s.headline);
        assert!(brief.context.contains("pitch Vertex"));
        assert!(brief.actions[2].contains(&s.headline));
        assert!(brief.strategy.starts_with("Assign an account team"));
        assert!(brief.actions[0].contains("Helios Grid"));
    }

    #[test]
    fn test_fallback_headline_without_signal() {
        let brief = compose_brief(&customer(RiskLevel::High, None), None, Vec::new());
        assert_eq!(brief.headline, "Helios Grid: High risk at Migration");
        assert!(brief.context.contains("33% of target consumption"));
        assert!(brief.context.contains("decreasing velocity"));
    }

    #[test]
    fn test_outline_round_trips_through_json() {
        let pool = vec![member("Priya Nair", "priyan", &["AI"])];
        let brief = compose_brief(&customer(RiskLevel::Low, None), None, picks(&pool));
        let value = serde_json::to_value(&brief).unwrap();
        let outline: BriefOutline = serde_json::from_value(value).unwrap();
        assert_eq!(outline.actions, brief.actions);
        assert_eq!(outline.headline, brief.headline);
    }
}
