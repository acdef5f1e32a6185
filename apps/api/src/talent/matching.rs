//! Talent matching — ranks team members against a customer's current situation.
//!
//! Default: `KeywordTalentMatcher` (pure, deterministic, table-driven).
//! Alternative: `LlmTalentMatcher` (asks the AI service to pick members and falls back
//! to the keyword matcher whenever the answer is unusable).
//!
//! `AppState` holds an `Arc<dyn TalentMatcher>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::customer::{Customer, RiskLevel};
use crate::models::signal::NewsSignal;
use crate::models::team::TeamMember;
use crate::talent::prompts::TALENT_MATCH_PROMPT;
use crate::talent::tables::{contains_phrase, tokenize, MatchingTables, Need};

/// Number of suggestions shown on a customer card.
pub const CARD_TOP_N: usize = 3;
/// Number of members deployed in an intelligence brief.
pub const BRIEF_TOP_N: usize = 2;

pub const DEFAULT_PRIMARY_DOMAIN: &str = "Cloud Architecture";

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// A ranked suggestion. Borrows the member from the pool it was matched against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub member: &'a TeamMember,
    pub reason: String,
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait TalentMatcher: Send + Sync {
    async fn suggest<'a>(
        &self,
        customer: &Customer,
        signal: Option<&NewsSignal>,
        pool: &'a [TeamMember],
        top_n: usize,
    ) -> Result<Vec<MatchResult<'a>>, AppError>;

    /// "keyword" | "llm" — reported to callers for transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordTalentMatcher
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct KeywordTalentMatcher {
    tables: Arc<MatchingTables>,
}

impl KeywordTalentMatcher {
    pub fn new(tables: Arc<MatchingTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl TalentMatcher for KeywordTalentMatcher {
    async fn suggest<'a>(
        &self,
        customer: &Customer,
        signal: Option<&NewsSignal>,
        pool: &'a [TeamMember],
        top_n: usize,
    ) -> Result<Vec<MatchResult<'a>>, AppError> {
        Ok(match_talent(customer, signal, pool, top_n, &self.tables))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTalentMatcher
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmTalentMatcher {
    llm: LlmClient,
    keyword: KeywordTalentMatcher,
}

#[derive(Debug, Deserialize)]
struct LlmMatchResponse {
    matches: Vec<LlmPick>,
}

#[derive(Debug, Deserialize)]
struct LlmPick {
    ldap: String,
    reason: String,
}

#[derive(Serialize)]
struct PoolEntry<'a> {
    name: &'a str,
    role: &'a str,
    ldap: &'a str,
    domains: &'a [String],
}

impl LlmTalentMatcher {
    pub fn new(llm: LlmClient, keyword: KeywordTalentMatcher) -> Self {
        Self { llm, keyword }
    }

    fn build_prompt(
        customer: &Customer,
        signal: Option<&NewsSignal>,
        pool: &[TeamMember],
        top_n: usize,
    ) -> String {
        let entries: Vec<PoolEntry<'_>> = pool
            .iter()
            .map(|m| PoolEntry {
                name: &m.name,
                role: &m.role,
                ldap: &m.ldap,
                domains: &m.domains,
            })
            .collect();
        let talent_pool = serde_json::to_string_pretty(&entries).unwrap_or_default();
        let signal_text = signal
            .map(|s| format!("{} ({})", s.headline, s.category))
            .unwrap_or_else(|| "No specific recent news found.".to_string());

        TALENT_MATCH_PROMPT
            .replace("{name}", &customer.name)
            .replace(
                "{milestone}",
                customer.milestone.map(|m| m.as_str()).unwrap_or("Unknown"),
            )
            .replace("{risk}", customer.risk.as_str())
            .replace("{blocker}", customer.active_blocker().unwrap_or("None"))
            .replace("{consumption}", &customer.consumption.to_string())
            .replace("{signal}", &signal_text)
            .replace("{talent_pool}", &talent_pool)
            .replace("{top_n}", &top_n.to_string())
    }
}

/// Resolves AI picks against the pool. Unknown or repeated ldaps are dropped.
fn hydrate_picks<'a>(picks: Vec<LlmPick>, pool: &'a [TeamMember], top_n: usize) -> Vec<MatchResult<'a>> {
    let mut results: Vec<MatchResult<'a>> = Vec::new();
    for pick in picks {
        let Some(member) = pool
            .iter()
            .find(|m| m.ldap.eq_ignore_ascii_case(pick.ldap.trim()))
        else {
            debug!("Dropping AI pick with unknown ldap '{}'", pick.ldap);
            continue;
        };
        if results.iter().any(|r| r.member.id == member.id) {
            continue;
        }
        results.push(MatchResult {
            member,
            reason: pick.reason,
            score: 0.0,
        });
        if results.len() == top_n {
            break;
        }
    }
    // Rank order is the AI's order; expose it as a descending score.
    let count = results.len();
    for (i, result) in results.iter_mut().enumerate() {
        result.score = (count - i) as f64;
    }
    results
}

#[async_trait]
impl TalentMatcher for LlmTalentMatcher {
    async fn suggest<'a>(
        &self,
        customer: &Customer,
        signal: Option<&NewsSignal>,
        pool: &'a [TeamMember],
        top_n: usize,
    ) -> Result<Vec<MatchResult<'a>>, AppError> {
        if pool.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let prompt = Self::build_prompt(customer, signal, pool, top_n);
        match self
            .llm
            .call_json::<LlmMatchResponse>(&prompt, JSON_ONLY_SYSTEM)
            .await
        {
            Ok(response) => {
                let results = hydrate_picks(response.matches, pool, top_n);
                if !results.is_empty() {
                    return Ok(results);
                }
                warn!(
                    "AI matcher returned no usable picks for {}; using keyword matcher",
                    customer.id
                );
            }
            Err(e) => {
                warn!(
                    "AI matcher failed for {}: {e}; using keyword matcher",
                    customer.id
                );
            }
        }

        self.keyword.suggest(customer, signal, pool, top_n).await
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Adds a need, keeping one entry per domain at its highest weight.
fn merge_need(needs: &mut Vec<Need>, incoming: &Need) {
    match needs
        .iter_mut()
        .find(|n| n.domain.eq_ignore_ascii_case(&incoming.domain))
    {
        Some(existing) => {
            if incoming.weight > existing.weight {
                existing.weight = incoming.weight;
                existing.reason = incoming.reason.clone();
            }
        }
        None => needs.push(incoming.clone()),
    }
}

/// Derives the weighted skill domains a customer needs right now.
///
/// Order is stable: blocker rules, then milestone rules, then keyword rules, each in
/// table order.
pub fn infer_needs(
    customer: &Customer,
    signal: Option<&NewsSignal>,
    tables: &MatchingTables,
) -> Vec<Need> {
    let mut needs = Vec::new();

    let blocker_tokens = customer.active_blocker().map(tokenize).unwrap_or_default();
    let milestone_tokens = customer
        .milestone
        .map(|m| tokenize(m.as_str()))
        .unwrap_or_default();

    for rule in &tables.blocker_rules {
        if contains_phrase(&blocker_tokens, &tokenize(&rule.trigger)) {
            rule.needs.iter().for_each(|n| merge_need(&mut needs, n));
        }
    }

    for rule in &tables.milestone_rules {
        if contains_phrase(&milestone_tokens, &tokenize(&rule.trigger)) {
            rule.needs.iter().for_each(|n| merge_need(&mut needs, n));
        }
    }

    let mut keyword_sources = vec![blocker_tokens];
    if let Some(signal) = signal {
        keyword_sources.push(tokenize(&signal.headline));
        keyword_sources.push(tokenize(&signal.category));
    }
    for rule in &tables.keyword_rules {
        let trigger = tokenize(&rule.trigger);
        if keyword_sources.iter().any(|src| contains_phrase(src, &trigger)) {
            rule.needs.iter().for_each(|n| merge_need(&mut needs, n));
        }
    }

    needs
}

/// Case-insensitive containment in either direction between a member tag and a domain.
fn has_domain(member: &TeamMember, domain: &str) -> bool {
    let wanted = domain.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    member.domains.iter().any(|d| {
        let tag = d.trim().to_lowercase();
        !tag.is_empty() && (tag.contains(&wanted) || wanted.contains(&tag))
    })
}

fn member_covers(member: &TeamMember, domain: &str, tables: &MatchingTables) -> bool {
    match tables.alias_for(domain) {
        Some(alias) => alias.any_of.iter().any(|d| has_domain(member, d)),
        None => has_domain(member, domain),
    }
}

fn role_has_marker(role: &str, marker: &str) -> bool {
    let marker = tokenize(marker);
    contains_phrase(&tokenize(role), &marker)
}

fn is_senior(role: &str, tables: &MatchingTables) -> bool {
    tables
        .seniority_markers
        .iter()
        .any(|marker| role_has_marker(role, marker))
}

fn compose_reason(customer: &Customer, reasons: &[&str]) -> String {
    let joined = reasons
        .iter()
        .take(2)
        .copied()
        .collect::<Vec<_>>()
        .join(" & ");
    match (customer.active_blocker(), customer.milestone) {
        (Some(blocker), _) => format!("Can resolve \"{blocker}\": {joined}."),
        (None, Some(milestone)) => format!("{joined} to accelerate {milestone}."),
        (None, None) => format!("{joined}."),
    }
}

fn generic_reason(customer: &Customer, member: &TeamMember) -> String {
    let domain = member.primary_domain().unwrap_or(DEFAULT_PRIMARY_DOMAIN);
    let stage = match customer.milestone {
        Some(milestone) => format!("at the {milestone} milestone"),
        None => "across the engagement".to_string(),
    };
    format!(
        "General coverage and {domain} leadership to assess the {} risk {stage}.",
        customer.risk
    )
}

fn fallback_match<'a>(
    customer: &Customer,
    pool: &'a [TeamMember],
    tables: &MatchingTables,
) -> Option<MatchResult<'a>> {
    let member = pool
        .iter()
        .find(|m| role_has_marker(&m.role, &tables.fallback_marker))
        .or_else(|| pool.first())?;
    Some(MatchResult {
        member,
        reason: generic_reason(customer, member),
        score: 0.0,
    })
}

/// Ranks `pool` against `customer` and returns at most `top_n` suggestions.
///
/// Returns an empty list only when the pool is empty or `top_n` is zero; otherwise a
/// customer with no recognizable needs gets a single fallback suggestion.
pub fn match_talent<'a>(
    customer: &Customer,
    signal: Option<&NewsSignal>,
    pool: &'a [TeamMember],
    top_n: usize,
    tables: &MatchingTables,
) -> Vec<MatchResult<'a>> {
    if pool.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let needs = infer_needs(customer, signal, tables);
    let multiplier = customer.risk.multiplier();
    let critical = customer.risk == RiskLevel::High || customer.active_blocker().is_some();

    let mut candidates: Vec<MatchResult<'a>> = Vec::new();
    for member in pool {
        let mut score = 0.0_f64;
        let mut reasons: Vec<&str> = Vec::new();

        for need in &needs {
            if member_covers(member, &need.domain, tables) {
                score += need.weight * multiplier;
                if !reasons.contains(&need.reason.as_str()) {
                    reasons.push(&need.reason);
                }
            }
        }

        // The bonus only lifts members that already cover a need; a senior member with
        // no domain match is left to the fallback.
        if score <= 0.0 {
            continue;
        }
        if critical && is_senior(&member.role, tables) {
            score += tables.seniority_bonus;
        }

        candidates.push(MatchResult {
            member,
            reason: compose_reason(customer, &reasons),
            score,
        });
    }

    // sort_by is stable: equal scores keep pool order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(top_n);

    if candidates.is_empty() {
        debug!("No skill match for customer {}; using fallback", customer.id);
        return fallback_match(customer, pool, tables).into_iter().collect();
    }
    candidates
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::{Milestone, VelocityTrend};
    use crate::models::signal::Sentiment;
    use std::collections::BTreeMap;

    fn member(id: &str, role: &str, domains: &[&str]) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: format!("Member {id}"),
            role: role.to_string(),
            location: "Remote".to_string(),
            ldap: id.to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
            skills: BTreeMap::new(),
            languages: vec![],
            certifications: vec![],
            education: vec![],
            experience: vec![],
            outside_interests: vec![],
            linkedin_url: None,
            image_url: None,
            start_date: None,
        }
    }

    fn customer(milestone: Option<Milestone>, risk: RiskLevel, blocker: Option<&str>) -> Customer {
        Customer {
            id: "c-1".to_string(),
            name: "Acme Robotics".to_string(),
            milestone,
            risk,
            blocker: blocker.map(String::from),
            consumption: 40,
            velocity: VelocityTrend::Stable,
        }
    }

    fn signal(headline: &str, category: &str) -> NewsSignal {
        NewsSignal {
            headline: headline.to_string(),
            category: category.to_string(),
            relevance: String::new(),
            sentiment: Sentiment::Neutral,
            link: None,
        }
    }

    fn tables() -> MatchingTables {
        MatchingTables::default()
    }

    #[test]
    fn test_migration_high_risk_prefers_terraform_member() {
        let pool = vec![member("bq", "CE", &["BigQuery"]), member("tf", "CE", &["Terraform"])];
        let c = customer(Some(Milestone::Migration), RiskLevel::High, None);

        let results = match_talent(&c, None, &pool, 3, &tables());
        assert_eq!(results[0].member.id, "tf");
        assert!(results.iter().all(|r| r.member.id != "bq"));
        assert!((results[0].score - 3.0).abs() < 1e-9, "score was {}", results[0].score);
    }

    #[test]
    fn test_blocker_reason_references_blocker_resolution() {
        let pool = vec![member("sec", "CE", &["IAM Security"])];
        let c = customer(None, RiskLevel::Medium, Some("Security Compliance Review"));

        let results = match_talent(&c, None, &pool, 3, &tables());
        assert_eq!(results.len(), 1);
        assert!(results[0].reason.contains("Security Compliance Review"));
        assert!(results[0].reason.contains("Address security compliance blockers"));
        assert!(!results[0].reason.contains("accelerate"));
    }

    #[test]
    fn test_no_needs_returns_single_fallback() {
        let pool = vec![
            member("a", "CE", &["Looker"]),
            member("p", "Principal Architect", &["Enterprise Arch"]),
            member("b", "CE", &["BigQuery"]),
        ];
        for risk in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            let c = customer(None, risk, None);
            let results = match_talent(&c, None, &pool, 3, &tables());
            assert_eq!(results.len(), 1, "risk {risk}");
            assert_eq!(results[0].member.id, "p");
            assert!(results[0].reason.contains("Enterprise Arch"));
        }
    }

    #[test]
    fn test_fallback_without_principal_uses_first_member() {
        let pool = vec![member("first", "CE", &[]), member("second", "CE", &["GKE"])];
        let c = customer(Some(Milestone::ClosedWon), RiskLevel::Low, None);

        let results = match_talent(&c, None, &pool, 2, &tables());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].member.id, "first");
        assert!(results[0].reason.contains(DEFAULT_PRIMARY_DOMAIN));
        assert!(results[0].reason.contains("Closed Won"));
    }

    #[test]
    fn test_unrecognized_blocker_degrades_to_fallback() {
        let pool = vec![member("x", "CE", &["Terraform"])];
        let c = customer(None, RiskLevel::Low, Some("Procurement freeze"));
        let results = match_talent(&c, None, &pool, 3, &tables());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn test_empty_pool_returns_empty() {
        let c = customer(Some(Milestone::Pilot), RiskLevel::High, Some("Budget Approval Pending"));
        assert!(match_talent(&c, None, &[], 3, &tables()).is_empty());
    }

    #[test]
    fn test_zero_top_n_returns_empty() {
        let pool = vec![member("a", "CE", &["GKE"])];
        let c = customer(Some(Milestone::Optimization), RiskLevel::Low, None);
        assert!(match_talent(&c, None, &pool, 0, &tables()).is_empty());
    }

    #[test]
    fn test_never_exceeds_top_n() {
        let pool: Vec<TeamMember> = (0..8)
            .map(|i| member(&format!("k{i}"), "CE", &["Kubernetes", "Terraform"]))
            .collect();
        let c = customer(Some(Milestone::Migration), RiskLevel::High, None);
        for top_n in 1..=4 {
            assert_eq!(match_talent(&c, None, &pool, top_n, &tables()).len(), top_n);
        }
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let pool = vec![
            member("third", "CE", &["GKE"]),
            member("first", "CE", &["GKE"]),
            member("second", "CE", &["GKE"]),
        ];
        let c = customer(Some(Milestone::Optimization), RiskLevel::Low, None);
        let ids: Vec<&str> = match_talent(&c, None, &pool, 3, &tables())
            .iter()
            .map(|r| r.member.id.as_str())
            .collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_results_are_deterministic() {
        let pool = vec![
            member("a", "Principal Architect", &["Enterprise Arch", "Kubernetes", "Vertex AI"]),
            member("b", "CE, Infra Mod", &["Kubernetes", "Terraform"]),
            member("c", "ISV2 CE Team Lead", &["Kubernetes", "IAM Security"]),
        ];
        let c = customer(
            Some(Milestone::Migration),
            RiskLevel::High,
            Some("Data Sovereignty Concerns"),
        );
        let s = signal("Acme expands AI data platform", "Expansion");

        let first = serde_json::to_string(&match_talent(&c, Some(&s), &pool, 3, &tables())).unwrap();
        let second = serde_json::to_string(&match_talent(&c, Some(&s), &pool, 3, &tables())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raising_risk_never_lowers_scores() {
        let pool = vec![
            member("a", "Principal Architect", &["Enterprise Arch"]),
            member("b", "CE", &["Kubernetes", "Terraform"]),
            member("c", "Data Analytics Specialist", &["BigQuery"]),
        ];
        let scores = |risk: RiskLevel, blocker: Option<&str>| -> BTreeMap<String, f64> {
            let c = customer(Some(Milestone::Discovery), risk, blocker);
            match_talent(&c, None, &pool, pool.len(), &tables())
                .into_iter()
                .filter(|r| r.score > 0.0)
                .map(|r| (r.member.id.clone(), r.score))
                .collect()
        };

        for blocker in [None, Some("Data Sovereignty Concerns")] {
            let low = scores(RiskLevel::Low, blocker);
            let medium = scores(RiskLevel::Medium, blocker);
            let high = scores(RiskLevel::High, blocker);
            for (id, score) in &low {
                assert!(medium[id] >= *score, "{id}: medium < low");
                assert!(high[id] >= medium[id], "{id}: high < medium");
            }
        }
    }

    #[test]
    fn test_seniority_bonus_only_when_critical() {
        let pool = vec![member("lead", "ISV2 CE Team Lead", &["GKE"])];

        let calm = customer(Some(Milestone::Optimization), RiskLevel::Low, None);
        let calm_score = match_talent(&calm, None, &pool, 1, &tables())[0].score;
        assert!((calm_score - 2.0).abs() < 1e-9);

        let hot = customer(Some(Milestone::Optimization), RiskLevel::High, None);
        let hot_score = match_talent(&hot, None, &pool, 1, &tables())[0].score;
        assert!((hot_score - (2.0 * 1.5 + 3.0)).abs() < 1e-9, "score was {hot_score}");
    }

    #[test]
    fn test_seniority_bonus_never_admits_unmatched_member() {
        let pool = vec![
            member("arch", "Principal Architect", &["Looker"]),
            member("tf", "CE", &["Terraform"]),
        ];
        let c = customer(Some(Milestone::Migration), RiskLevel::High, None);

        let results = match_talent(&c, None, &pool, 3, &tables());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].member.id, "tf");
        assert!((results[0].score - 3.0).abs() < 1e-9, "score was {}", results[0].score);
    }

    #[test]
    fn test_seniority_marker_is_token_based() {
        let t = tables();
        assert!(is_senior("CE III, Infra Mod", &t));
        assert!(is_senior("Principal Architect", &t));
        assert!(!is_senior("CE II, App Mod", &t));
        assert!(!is_senior("Leadership Coach", &t));
    }

    #[test]
    fn test_app_mod_alias_matches_platform_domains() {
        let pool = vec![member("run", "CE, App Mod", &["Cloud Run"]), member("bq", "CE", &["BigQuery"])];
        let c = customer(None, RiskLevel::Low, Some("Technical Debt in Legacy System"));
        let results = match_talent(&c, None, &pool, 3, &tables());
        assert_eq!(results[0].member.id, "run");
        assert!(results[0].reason.contains("Modernize legacy systems"));
    }

    #[test]
    fn test_domain_containment_works_both_ways() {
        let broad = member("broad", "CE", &["Data Analytics"]);
        let narrow = member("narrow", "CE", &["Analytics"]);
        assert!(has_domain(&broad, "Analytics"));
        assert!(has_domain(&narrow, "Data Analytics"));
        assert!(!has_domain(&member("empty", "CE", &[""]), "Data Analytics"));
    }

    #[test]
    fn test_blocker_phrase_ignores_case_and_punctuation() {
        let t = tables();
        let c = customer(None, RiskLevel::Low, Some("security-compliance REVIEW"));
        let needs = infer_needs(&c, None, &t);
        let iam = needs.iter().find(|n| n.domain == "IAM Security").unwrap();
        assert_eq!(iam.weight, 3.0);
        assert_eq!(iam.reason, "Address security compliance blockers");
    }

    #[test]
    fn test_needs_keep_highest_weight_per_domain() {
        let t = tables();
        let c = customer(None, RiskLevel::Low, Some("Security Compliance Review"));
        let needs = infer_needs(&c, None, &t);
        let domains: Vec<&str> = needs.iter().map(|n| n.domain.as_str()).collect();
        assert_eq!(domains, vec!["IAM Security", "Enterprise Arch"]);
        assert_eq!(needs[1].weight, 2.0);
    }

    #[test]
    fn test_news_signal_adds_keyword_needs() {
        let t = tables();
        let pool = vec![member("ai", "CE, Strategic AI", &["Vertex AI", "Generative AI"])];
        let c = customer(Some(Milestone::ClosedWon), RiskLevel::Low, None);

        assert_eq!(match_talent(&c, None, &pool, 2, &t)[0].score, 0.0);

        let s = signal("Acme launches GenAI assistant", "AI/ML Launch");
        let results = match_talent(&c, Some(&s), &pool, 2, &t);
        assert!(results[0].score > 0.0);
        assert!(results[0].reason.contains("Drive AI adoption"));
    }

    #[test]
    fn test_reason_joins_at_most_two_reasons() {
        let pool = vec![member("k", "CE", &["Kubernetes", "Terraform", "Infra Mod"])];
        let c = customer(Some(Milestone::Migration), RiskLevel::Low, Some("legacy infrastructure migration"));
        let reason = &match_talent(&c, None, &pool, 1, &tables())[0].reason;
        assert_eq!(reason.matches(" & ").count(), 1, "reason was {reason}");
    }

    #[test]
    fn test_hydrate_picks_drops_unknown_and_duplicate_ldaps() {
        let pool = vec![member("a", "CE", &["GKE"]), member("b", "CE", &["BigQuery"])];
        let picks = vec![
            LlmPick { ldap: "ghost".into(), reason: "n/a".into() },
            LlmPick { ldap: "B".into(), reason: "Warehouse tuning".into() },
            LlmPick { ldap: "b".into(), reason: "again".into() },
            LlmPick { ldap: "a".into(), reason: "Cluster work".into() },
        ];
        let results = hydrate_picks(picks, &pool, 2);
        let ids: Vec<&str> = results.iter().map(|r| r.member.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_keyword_matcher_trait_matches_pure_function() {
        let t = Arc::new(tables());
        let matcher = KeywordTalentMatcher::new(t.clone());
        let pool = vec![member("tf", "CE", &["Terraform"])];
        let c = customer(Some(Milestone::Migration), RiskLevel::Medium, None);

        let via_trait = matcher.suggest(&c, None, &pool, 2).await.unwrap();
        assert_eq!(via_trait, match_talent(&c, None, &pool, 2, &t));
        assert_eq!(matcher.backend(), "keyword");
    }
}
