//! Lookup tables that drive needs inference in the talent matcher.
//!
//! Every trigger is a phrase. Text and triggers are both tokenized the same way
//! (lowercase, split on anything that is not alphanumeric) and a trigger fires when
//! its tokens appear as a contiguous run in the text. "Security Compliance Review",
//! "security-compliance review" and "SECURITY COMPLIANCE REVIEW!" all match the same
//! blocker rule, and a single-word trigger behaves as a plain token lookup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A single skill domain a customer needs, with its importance and the sentence shown
/// to the user when a member covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Need {
    pub domain: String,
    pub reason: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedRule {
    pub trigger: String,
    pub needs: Vec<Need>,
}

/// A needed domain that is satisfied by any of several concrete member domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAlias {
    pub domain: String,
    pub any_of: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingTables {
    /// Matched against the customer's blocker text.
    pub blocker_rules: Vec<NeedRule>,
    /// Matched against the customer's milestone.
    pub milestone_rules: Vec<NeedRule>,
    /// Matched against the blocker text and the recent news signal.
    pub keyword_rules: Vec<NeedRule>,
    pub aliases: Vec<DomainAlias>,
    /// Role tokens that mark a senior member (compared case-insensitively).
    pub seniority_markers: Vec<String>,
    pub seniority_bonus: f64,
    /// Role token that marks the preferred fallback member.
    pub fallback_marker: String,
}

impl MatchingTables {
    /// Loads tables from a JSON file. The file must contain every field.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read matching tables from {}", path.display()))?;
        let tables: MatchingTables = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid matching tables in {}", path.display()))?;
        tables
            .validate()
            .with_context(|| format!("Invalid matching tables in {}", path.display()))?;
        Ok(tables)
    }

    /// Weights must be positive and the bonus non-negative, otherwise raising the risk
    /// level could lower a member's score.
    pub fn validate(&self) -> Result<()> {
        let rules = self
            .blocker_rules
            .iter()
            .chain(&self.milestone_rules)
            .chain(&self.keyword_rules);
        for rule in rules {
            if let Some(bad) = rule
                .needs
                .iter()
                .find(|n| !n.weight.is_finite() || n.weight <= 0.0)
            {
                anyhow::bail!(
                    "rule '{}' has non-positive weight {} for {}",
                    rule.trigger,
                    bad.weight,
                    bad.domain
                );
            }
        }
        if !self.seniority_bonus.is_finite() || self.seniority_bonus < 0.0 {
            anyhow::bail!("seniority_bonus must be >= 0, got {}", self.seniority_bonus);
        }
        Ok(())
    }

    pub fn alias_for(&self, domain: &str) -> Option<&DomainAlias> {
        self.aliases
            .iter()
            .find(|a| a.domain.eq_ignore_ascii_case(domain.trim()))
    }
}

/// Splits text into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when `phrase` occurs as a contiguous token run inside `haystack`.
pub fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty()
        && phrase.len() <= haystack.len()
        && haystack.windows(phrase.len()).any(|w| w == phrase)
}

fn need(domain: &str, reason: &str, weight: f64) -> Need {
    Need {
        domain: domain.to_string(),
        reason: reason.to_string(),
        weight,
    }
}

fn rule(trigger: &str, needs: Vec<Need>) -> NeedRule {
    NeedRule {
        trigger: trigger.to_string(),
        needs,
    }
}

/// Keyword rules weigh 1 each and share one reason across their domains.
fn keyword(trigger: &str, domains: &[&str], reason: &str) -> NeedRule {
    rule(
        trigger,
        domains.iter().map(|d| need(d, reason, 1.0)).collect(),
    )
}

impl Default for MatchingTables {
    fn default() -> Self {
        let blocker_rules = vec![
            rule(
                "Technical Debt in Legacy System",
                vec![
                    need("App Mod", "Modernize legacy systems", 3.0),
                    need("Kubernetes", "Containerize legacy apps", 2.0),
                ],
            ),
            rule(
                "Security Compliance Review",
                vec![
                    need("IAM Security", "Address security compliance blockers", 3.0),
                    need("Enterprise Arch", "Design secure compliant architecture", 2.0),
                ],
            ),
            rule(
                "Data Sovereignty Concerns",
                vec![
                    need("IAM Security", "Ensure data sovereignty and access control", 3.0),
                    need("BigQuery", "Data governance and locality", 2.0),
                ],
            ),
            rule(
                "Lack of Trained Personnel",
                vec![
                    need("Generative AI", "Enable team with AI tools", 2.0),
                    need("Vertex AI", "Upskill team on Vertex AI", 2.0),
                ],
            ),
            rule(
                "Executive Sponsorship Gap",
                vec![
                    need("Enterprise Arch", "Build business value case", 3.0),
                    need("Strategy", "Strategic alignment", 2.0),
                ],
            ),
            rule(
                "Budget Approval Pending",
                vec![
                    need("Enterprise Arch", "Build business value case", 3.0),
                    need("Strategy", "Strategic alignment", 2.0),
                ],
            ),
        ];

        let milestone_rules = vec![
            rule(
                "Discovery",
                vec![
                    need("Enterprise Arch", "Discovery and solution definition", 2.0),
                    need("Data Analytics", "Assess data readiness", 1.0),
                ],
            ),
            rule(
                "Pilot",
                vec![
                    need("Generative AI", "Launch AI pilot", 2.0),
                    need("Cloud Run", "Rapid prototyping", 2.0),
                ],
            ),
            rule(
                "Migration",
                vec![
                    need("Terraform", "Infrastructure as Code for migration", 2.0),
                    need("Kubernetes", "Workload migration", 2.0),
                ],
            ),
            rule(
                "Optimization",
                vec![
                    need("GKE", "Cluster optimization", 2.0),
                    need("BigQuery", "Query performance tuning", 2.0),
                ],
            ),
            rule(
                "Expansion",
                vec![
                    need("Vertex AI", "Scale AI workloads", 2.0),
                    need("Looker", "Expand business intelligence", 1.0),
                ],
            ),
        ];

        let keyword_rules = vec![
            keyword("security", &["IAM Security", "Enterprise Arch"], "Harden security posture"),
            keyword("access", &["IAM Security"], "Tighten access control"),
            keyword("identity", &["IAM Security"], "Tighten access control"),
            keyword("compliance", &["IAM Security", "Enterprise Arch"], "Meet compliance requirements"),
            keyword(
                "sovereignty",
                &["IAM Security", "Data Analytics", "Enterprise Arch"],
                "Keep data resident and governed",
            ),
            keyword("governance", &["Enterprise Arch", "IAM Security"], "Establish governance"),
            keyword(
                "ai",
                &["Generative AI", "Vertex AI", "AI/ML Architecture", "Enterprise AI"],
                "Drive AI adoption",
            ),
            keyword("genai", &["Generative AI", "Vertex AI"], "Drive AI adoption"),
            keyword("learning", &["Generative AI", "Vertex AI"], "Enable machine learning"),
            keyword("model", &["Vertex AI", "AI/ML Architecture"], "Operationalize models"),
            keyword("data", &["BigQuery", "Looker", "Data Analytics"], "Unlock data value"),
            keyword("analytics", &["BigQuery", "Looker", "Data Analytics"], "Unlock data value"),
            keyword("warehouse", &["BigQuery"], "Modernize the warehouse"),
            keyword("dashboard", &["Looker"], "Deliver BI dashboards"),
            keyword("kubernetes", &["Kubernetes", "GKE"], "Run container platforms"),
            keyword("container", &["Kubernetes", "GKE", "Cloud Run"], "Run container platforms"),
            keyword(
                "scaling",
                &["Kubernetes", "GKE", "Cloud Run", "Terraform"],
                "Scale the platform",
            ),
            keyword(
                "infrastructure",
                &["Kubernetes", "Terraform", "Infra Mod"],
                "Modernize infrastructure",
            ),
            keyword(
                "migration",
                &["Terraform", "Enterprise Arch", "Infra Mod"],
                "Plan the migration",
            ),
            keyword("cloud", &["Enterprise Arch", "Terraform"], "Shape the cloud foundation"),
            keyword(
                "legacy",
                &["App Mod", "GKE", "Cloud Run", "Enterprise Arch"],
                "Modernize legacy systems",
            ),
            keyword("debt", &["App Mod", "GKE", "Enterprise Arch"], "Pay down technical debt"),
            keyword("modernization", &["App Mod", "GKE"], "Modernize applications"),
            keyword("sponsorship", &["Enterprise Arch", "Enterprise AI"], "Win executive sponsorship"),
            keyword("executive", &["Enterprise Arch", "Enterprise AI"], "Win executive sponsorship"),
            keyword("budget", &["Enterprise Arch", "Terraform"], "Control cost and budget"),
            keyword("personnel", &["Enterprise Arch", "Generative AI"], "Enable the customer team"),
            keyword(
                "optimization",
                &["Kubernetes", "BigQuery", "Terraform"],
                "Optimize workloads",
            ),
            keyword("performance", &["BigQuery", "GKE", "Cloud Run"], "Improve performance"),
            keyword("latency", &["GKE", "BigQuery"], "Reduce latency"),
            keyword("spanner", &["BigQuery", "Data Analytics"], "Tune database workloads"),
            keyword("kafka", &["Data Analytics", "GKE"], "Stabilize event streaming"),
            keyword("scale", &["GKE", "Cloud Run", "BigQuery"], "Scale the platform"),
        ];

        let aliases = vec![
            DomainAlias {
                domain: "App Mod".to_string(),
                any_of: vec![
                    "GKE".to_string(),
                    "Cloud Run".to_string(),
                    "Kubernetes".to_string(),
                ],
            },
            DomainAlias {
                domain: "Strategy".to_string(),
                any_of: vec!["Enterprise Arch".to_string()],
            },
        ];

        MatchingTables {
            blocker_rules,
            milestone_rules,
            keyword_rules,
            aliases,
            seniority_markers: ["Principal", "Lead", "III", "Specialist"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            seniority_bonus: 3.0,
            fallback_marker: "Principal".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("Security-Compliance  REVIEW!"),
            vec!["security", "compliance", "review"]
        );
        assert!(tokenize("  --  ").is_empty());
    }

    #[test]
    fn test_contains_phrase_requires_contiguous_run() {
        let text = tokenize("Data Sovereignty Concerns raised by legal");
        assert!(contains_phrase(&text, &tokenize("data sovereignty concerns")));
        assert!(contains_phrase(&text, &tokenize("legal")));
        assert!(!contains_phrase(&text, &tokenize("data concerns")));
        assert!(!contains_phrase(&text, &[]));
    }

    #[test]
    fn test_single_token_trigger_does_not_match_inside_words() {
        // "ai" must not fire on "maintenance" or "chain".
        let text = tokenize("Supply chain maintenance");
        assert!(!contains_phrase(&text, &tokenize("ai")));
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let tables = MatchingTables::default();
        let alias = tables.alias_for("app mod").expect("App Mod alias");
        assert!(alias.any_of.iter().any(|d| d == "Cloud Run"));
        assert!(tables.alias_for("Terraform").is_none());
    }

    #[test]
    fn test_default_tables_round_trip_through_json() {
        let tables = MatchingTables::default();
        let json = serde_json::to_string(&tables).unwrap();
        let parsed: MatchingTables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_validate_rejects_negative_weights() {
        let mut tables = MatchingTables::default();
        assert!(tables.validate().is_ok());
        tables.milestone_rules[0].needs[0].weight = -1.0;
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("Discovery"));
    }

    #[test]
    fn test_from_json_file_reports_missing_file() {
        let err = MatchingTables::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read matching tables"));
    }
}
