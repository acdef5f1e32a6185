//! Profile reconciliation: merging an incoming profile into an existing team member,
//! resolving free-form skill names to taxonomy IDs, and folding duplicate members.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::team::{clamp_level, Skill, SkillCategory, TeamMember};

pub const DEFAULT_ROLE: &str = "Specialist";
pub const DEFAULT_LOCATION: &str = "Remote";
pub const UNKNOWN_NAME: &str = "Unknown Agent";
const LDAP_MAX_LEN: usize = 8;
const NEW_SKILL_DEMAND: f64 = 0.5;

/// An incoming profile as submitted by the dashboard or produced by profile analysis.
/// `skills` is keyed by skill NAME, not ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub outside_interests: Vec<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl MemberDraft {
    /// Trimmed name, or `None` when blank.
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Category and icon for a skill name that is not in the taxonomy yet.
pub fn infer_category(name: &str) -> (SkillCategory, &'static str) {
    let lower = name.to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    if has_any(&["ai", "gpt", "llm", "neural", "vision"]) {
        (SkillCategory::Ai, "Brain")
    } else if has_any(&["data", "sql", "database", "analytics"]) {
        (SkillCategory::Data, "Database")
    } else if has_any(&["cloud", "aws", "gcp", "azure"]) {
        (SkillCategory::Infra, "Code")
    } else {
        (SkillCategory::Other, "Code")
    }
}

/// Lowercased name with whitespace removed, cut to eight characters.
pub fn derive_ldap(name: &str) -> String {
    let compact: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(LDAP_MAX_LEN)
        .collect();
    if compact.is_empty() {
        "unknown".to_string()
    } else {
        compact
    }
}

/// Order-preserving union: everything in `first`, then new entries from `second`.
pub fn merge_unique(first: &[String], second: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for item in first.iter().chain(second) {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Merges `incoming` into `existing`.
///
/// Identity, location and ldap always come from `existing`. Scalar fields take the
/// incoming value when it is present; proficiencies take the per-skill maximum; list
/// fields are unioned in order.
pub fn reconcile(existing: &TeamMember, incoming: &TeamMember) -> TeamMember {
    let mut skills = existing.skills.clone();
    for (skill_id, &level) in &incoming.skills {
        let slot = skills.entry(skill_id.clone()).or_insert(level);
        *slot = (*slot).max(level);
    }

    TeamMember {
        id: existing.id.clone(),
        name: non_blank(&incoming.name)
            .unwrap_or(&existing.name)
            .to_string(),
        role: non_blank(&incoming.role)
            .unwrap_or(&existing.role)
            .to_string(),
        location: existing.location.clone(),
        ldap: existing.ldap.clone(),
        domains: merge_unique(&existing.domains, &incoming.domains),
        skills,
        languages: merge_unique(&existing.languages, &incoming.languages),
        certifications: merge_unique(&existing.certifications, &incoming.certifications),
        education: merge_unique(&existing.education, &incoming.education),
        experience: merge_unique(&existing.experience, &incoming.experience),
        outside_interests: merge_unique(&existing.outside_interests, &incoming.outside_interests),
        linkedin_url: incoming
            .linkedin_url
            .clone()
            .or_else(|| existing.linkedin_url.clone()),
        image_url: incoming
            .image_url
            .clone()
            .or_else(|| existing.image_url.clone()),
        start_date: incoming.start_date.or(existing.start_date),
    }
}

/// Resolves a name-keyed proficiency map against the known skills.
///
/// Returns the ID-keyed map and any skills that had to be created.
pub fn resolve_skill_levels(
    by_name: &BTreeMap<String, f64>,
    known: &[Skill],
    mut new_id: impl FnMut() -> String,
) -> (BTreeMap<String, u8>, Vec<Skill>) {
    let mut index: HashMap<String, String> = HashMap::new();
    for skill in known {
        index
            .entry(skill.name_key())
            .or_insert_with(|| skill.id.clone());
    }

    let mut levels = BTreeMap::new();
    let mut created = Vec::new();
    for (raw_name, &raw_level) in by_name {
        let name = raw_name.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        let id = match index.get(&key) {
            Some(id) => id.clone(),
            None => {
                let id = new_id();
                let (category, icon_name) = infer_category(name);
                created.push(Skill {
                    id: id.clone(),
                    name: name.to_string(),
                    category,
                    icon_name: icon_name.to_string(),
                    demand: NEW_SKILL_DEMAND,
                    description: None,
                });
                index.insert(key, id.clone());
                id
            }
        };
        let level = clamp_level(raw_level);
        let slot = levels.entry(id).or_insert(level);
        *slot = (*slot).max(level);
    }
    (levels, created)
}

/// Builds the member record a draft describes, under `id`. The draft's own ID is only
/// a lookup key; a draft whose ID matches nothing gets a fresh record.
pub fn draft_to_member(draft: &MemberDraft, id: String, skills: BTreeMap<String, u8>) -> TeamMember {
    let name = draft.trimmed_name().unwrap_or(UNKNOWN_NAME).to_string();
    let domains: Vec<String> = draft
        .skills
        .keys()
        .filter_map(|k| non_blank(k))
        .map(String::from)
        .collect();
    TeamMember {
        id,
        ldap: String::new(),
        role: draft.role.as_deref().map(str::trim).unwrap_or_default().to_string(),
        location: String::new(),
        domains: merge_unique(&[], &domains),
        skills,
        languages: draft.languages.clone(),
        certifications: draft.certifications.clone(),
        education: draft.education.clone(),
        experience: draft.experience.clone(),
        outside_interests: draft.outside_interests.clone(),
        linkedin_url: draft.linkedin_url.clone().filter(|s| !s.trim().is_empty()),
        image_url: draft.image_url.clone().filter(|s| !s.trim().is_empty()),
        start_date: draft.start_date,
        name,
    }
}

/// Fills the defaults of a member that has no existing record to merge into.
pub fn with_defaults(mut member: TeamMember) -> TeamMember {
    if member.role.trim().is_empty() {
        member.role = DEFAULT_ROLE.to_string();
    }
    if member.location.trim().is_empty() {
        member.location = DEFAULT_LOCATION.to_string();
    }
    if member.ldap.trim().is_empty() {
        member.ldap = derive_ldap(&member.name);
    }
    member
}

/// Outcome of merging an incoming member into the stored set.
pub fn upsert_member(existing: Option<&TeamMember>, incoming: TeamMember) -> TeamMember {
    match existing {
        Some(existing) => reconcile(existing, &incoming),
        None => with_defaults(incoming),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupPlan {
    /// Survivors whose record changed after folding duplicates into them.
    pub merged: Vec<TeamMember>,
    pub deleted_ids: Vec<String>,
}

/// Folds members sharing a trimmed name into the first one seen.
pub fn plan_dedup(members: &[TeamMember]) -> DedupPlan {
    let mut survivors: Vec<TeamMember> = Vec::new();
    let mut slot_by_name: HashMap<&str, usize> = HashMap::new();
    let mut changed: Vec<bool> = Vec::new();
    let mut plan = DedupPlan::default();

    for member in members {
        let name = member.name.trim();
        match slot_by_name.get(name) {
            Some(&slot) => {
                let merged = reconcile(&survivors[slot], member);
                if merged != survivors[slot] {
                    survivors[slot] = merged;
                    changed[slot] = true;
                }
                plan.deleted_ids.push(member.id.clone());
            }
            None => {
                slot_by_name.insert(name, survivors.len());
                survivors.push(member.clone());
                changed.push(false);
            }
        }
    }

    plan.merged = survivors
        .into_iter()
        .zip(changed)
        .filter_map(|(m, c)| c.then_some(m))
        .collect();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            role: "CE".to_string(),
            location: "US-NYC-8510".to_string(),
            ldap: "existing".to_string(),
            domains: vec!["Kubernetes".to_string()],
            skills: BTreeMap::new(),
            languages: vec!["English".to_string()],
            certifications: vec![],
            education: vec![],
            experience: vec![],
            outside_interests: vec![],
            linkedin_url: None,
            image_url: None,
            start_date: None,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_keeps_highest_proficiency() {
        let mut existing = member("m1", "Paul Min");
        existing.skills.insert("k8s".to_string(), 2);
        existing.skills.insert("tf".to_string(), 5);
        let mut incoming = member("other", "Paul Min");
        incoming.skills.insert("k8s".to_string(), 4);
        incoming.skills.insert("tf".to_string(), 1);
        incoming.skills.insert("bq".to_string(), 3);

        let merged = reconcile(&existing, &incoming);
        assert_eq!(merged.skills.get("k8s"), Some(&4));
        assert_eq!(merged.skills.get("tf"), Some(&5));
        assert_eq!(merged.skills.get("bq"), Some(&3));
    }

    #[test]
    fn test_reconcile_unions_lists_without_duplicates() {
        let existing = member("m1", "Paul Min");
        let mut incoming = member("m2", "Paul Min");
        incoming.languages = strings(&["Spanish", "English"]);
        incoming.domains = strings(&["Terraform", "Kubernetes"]);

        let merged = reconcile(&existing, &incoming);
        assert_eq!(merged.languages, strings(&["English", "Spanish"]));
        assert_eq!(merged.domains, strings(&["Kubernetes", "Terraform"]));
    }

    #[test]
    fn test_reconcile_keeps_identity_location_and_ldap() {
        let existing = member("m1", "Paul Min");
        let mut incoming = member("m2", "Paul  Min Jr");
        incoming.location = "Remote".to_string();
        incoming.ldap = "pmin".to_string();
        incoming.role = "CE III, Infra Mod".to_string();

        let merged = reconcile(&existing, &incoming);
        assert_eq!(merged.id, "m1");
        assert_eq!(merged.location, "US-NYC-8510");
        assert_eq!(merged.ldap, "existing");
        assert_eq!(merged.role, "CE III, Infra Mod");
        assert_eq!(merged.name, "Paul  Min Jr");
    }

    #[test]
    fn test_reconcile_blank_incoming_fields_keep_existing() {
        let mut existing = member("m1", "Paul Min");
        existing.linkedin_url = Some("https://www.linkedin.com/in/paulmin".to_string());
        let mut incoming = member("m2", "  ");
        incoming.role = String::new();

        let merged = reconcile(&existing, &incoming);
        assert_eq!(merged.name, "Paul Min");
        assert_eq!(merged.role, "CE");
        assert_eq!(merged.linkedin_url, existing.linkedin_url);
    }

    #[test]
    fn test_infer_category_order() {
        assert_eq!(infer_category("LLM Ops").0, SkillCategory::Ai);
        assert_eq!(infer_category("Spark SQL"), (SkillCategory::Data, "Database"));
        assert_eq!(infer_category("Azure Functions").0, SkillCategory::Infra);
        assert_eq!(infer_category("Rust"), (SkillCategory::Other, "Code"));
    }

    #[test]
    fn test_derive_ldap() {
        assert_eq!(derive_ldap("Anirudh Murali"), "anirudhm");
        assert_eq!(derive_ldap("Al Li"), "alli");
        assert_eq!(derive_ldap("   "), "unknown");
    }

    #[test]
    fn test_resolve_skill_levels_reuses_and_creates() {
        let known = vec![Skill {
            id: "bq".to_string(),
            name: "BigQuery".to_string(),
            category: SkillCategory::Data,
            icon_name: "Database".to_string(),
            demand: 0.9,
            description: None,
        }];
        let by_name: BTreeMap<String, f64> = [
            ("bigquery ".to_string(), 4.0),
            ("Vision Models".to_string(), 9.0),
            ("vision models".to_string(), 2.0),
            ("".to_string(), 3.0),
        ]
        .into_iter()
        .collect();

        let (levels, created) = resolve_skill_levels(&by_name, &known, || "new-1".to_string());
        assert_eq!(levels.get("bq"), Some(&4));
        assert_eq!(levels.get("new-1"), Some(&5));
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].category, SkillCategory::Ai);
        assert_eq!(created[0].demand, 0.5);
    }

    #[test]
    fn test_new_member_gets_defaults() {
        let draft = MemberDraft {
            name: Some("  Dana Whitfield ".to_string()),
            skills: [("Terraform".to_string(), 3.0)].into_iter().collect(),
            ..MemberDraft::default()
        };
        let incoming = draft_to_member(&draft, "gen-1".to_string(), BTreeMap::new());
        let created = upsert_member(None, incoming);

        assert_eq!(created.id, "gen-1");
        assert_eq!(created.name, "Dana Whitfield");
        assert_eq!(created.role, DEFAULT_ROLE);
        assert_eq!(created.location, DEFAULT_LOCATION);
        assert_eq!(created.ldap, "danawhit");
        assert_eq!(created.domains, strings(&["Terraform"]));
    }

    #[test]
    fn test_plan_dedup_folds_into_first_seen() {
        let mut first = member("m1", "Trevor Young");
        first.skills.insert("gke".to_string(), 2);
        let mut dup = member("m2", " Trevor Young ");
        dup.skills.insert("gke".to_string(), 4);
        dup.certifications = strings(&["CKA"]);
        let other = member("m3", "Rachel Yuen");

        let plan = plan_dedup(&[first, dup, other]);
        assert_eq!(plan.deleted_ids, vec!["m2".to_string()]);
        assert_eq!(plan.merged.len(), 1);
        assert_eq!(plan.merged[0].id, "m1");
        assert_eq!(plan.merged[0].skills.get("gke"), Some(&4));
        assert_eq!(plan.merged[0].certifications, strings(&["CKA"]));
    }

    #[test]
    fn test_plan_dedup_identical_duplicates_only_delete() {
        let plan = plan_dedup(&[member("m1", "Joe"), member("m2", "Joe")]);
        assert!(plan.merged.is_empty());
        assert_eq!(plan.deleted_ids, vec!["m2".to_string()]);
    }
}
