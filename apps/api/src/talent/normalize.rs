//! Skill-taxonomy normalization.
//!
//! Folds raw and legacy skill names into the canonical master list. `plan_normalization`
//! is pure and computes every write; `store::apply_normalization` runs the writes in a
//! single transaction. Running the plan twice produces an empty second plan.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::team::{Skill, TeamMember};
use crate::talent::taxonomy::{MasterSkillDef, Taxonomy};

/// Demand assigned to master skills created by normalization.
const NEW_MASTER_DEMAND: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MemberSkillUpdate {
    pub member_id: String,
    pub skills: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationPlan {
    pub created_skills: Vec<Skill>,
    pub updated_skills: Vec<Skill>,
    pub member_updates: Vec<MemberSkillUpdate>,
    pub deleted_skill_ids: Vec<String>,
}

impl NormalizationPlan {
    pub fn is_empty(&self) -> bool {
        self.created_skills.is_empty()
            && self.updated_skills.is_empty()
            && self.member_updates.is_empty()
            && self.deleted_skill_ids.is_empty()
    }

    pub fn report(&self) -> NormalizationReport {
        NormalizationReport {
            created_skills: self.created_skills.len(),
            updated_skills: self.updated_skills.len(),
            updated_members: self.member_updates.len(),
            deleted_skills: self.deleted_skill_ids.len(),
        }
    }
}

/// Counts returned to the caller after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub created_skills: usize,
    pub updated_skills: usize,
    pub updated_members: usize,
    pub deleted_skills: usize,
}

fn refreshed(existing: &Skill, def: &MasterSkillDef) -> Option<Skill> {
    let description = Some(def.description.to_string());
    let unchanged = existing.name == def.name
        && existing.category == def.category
        && existing.icon_name == def.icon_name
        && existing.description == description;
    if unchanged {
        return None;
    }
    Some(Skill {
        id: existing.id.clone(),
        name: def.name.to_string(),
        category: def.category,
        icon_name: def.icon_name.to_string(),
        demand: existing.demand,
        description,
    })
}

/// Master IDs a raw skill name folds into. Empty when the name is unmapped or the
/// mapping points at a name that is not a master.
fn resolve_targets<'m>(
    taxonomy: &Taxonomy<'_>,
    master_ids: &'m HashMap<&str, String>,
    name_key: &str,
) -> Vec<&'m str> {
    taxonomy
        .targets_for(name_key)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|target| master_ids.get(target).map(String::as_str))
        .collect()
}

pub fn plan_normalization(
    taxonomy: &Taxonomy<'_>,
    skills: &[Skill],
    members: &[TeamMember],
    mut new_id: impl FnMut() -> String,
) -> NormalizationPlan {
    let mut plan = NormalizationPlan::default();

    let by_id: HashMap<&str, &Skill> = skills.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut id_by_name: HashMap<String, String> = HashMap::new();
    for skill in skills {
        id_by_name
            .entry(skill.name_key())
            .or_insert_with(|| skill.id.clone());
    }

    // 1. Ensure every master exists and carries the canonical metadata.
    let mut master_ids: HashMap<&str, String> = HashMap::new();
    for def in taxonomy.masters {
        let key = def.name.to_lowercase();
        let id = match id_by_name.get(&key) {
            Some(id) => {
                if let Some(update) = by_id.get(id.as_str()).and_then(|s| refreshed(s, def)) {
                    plan.updated_skills.push(update);
                }
                id.clone()
            }
            None => {
                let id = new_id();
                plan.created_skills.push(Skill {
                    id: id.clone(),
                    name: def.name.to_string(),
                    category: def.category,
                    icon_name: def.icon_name.to_string(),
                    demand: NEW_MASTER_DEMAND,
                    description: Some(def.description.to_string()),
                });
                id_by_name.insert(key, id.clone());
                id
            }
        };
        master_ids.insert(def.name, id);
    }
    let master_id_set: HashSet<&str> = master_ids.values().map(String::as_str).collect();

    // 2. Rewrite member proficiency maps.
    for member in members {
        let mut next = member.skills.clone();
        for (skill_id, &rating) in &member.skills {
            let Some(skill) = by_id.get(skill_id.as_str()) else {
                continue;
            };
            let targets = resolve_targets(taxonomy, &master_ids, &skill.name_key());
            if targets.is_empty() {
                continue;
            }
            for target in &targets {
                let level = next.entry(target.to_string()).or_insert(rating);
                *level = (*level).max(rating);
            }
            let keeps_raw = targets.contains(&skill_id.as_str())
                || master_id_set.contains(skill_id.as_str());
            if !keeps_raw {
                next.remove(skill_id);
            }
        }
        if next != member.skills {
            plan.member_updates.push(MemberSkillUpdate {
                member_id: member.id.clone(),
                skills: next,
            });
        }
    }

    // 3. Drop raw skills that were folded away.
    for skill in skills {
        if master_id_set.contains(skill.id.as_str()) {
            continue;
        }
        if !resolve_targets(taxonomy, &master_ids, &skill.name_key()).is_empty() {
            plan.deleted_skill_ids.push(skill.id.clone());
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::SkillCategory;

    fn skill(id: &str, name: &str) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            category: SkillCategory::Other,
            icon_name: "Code".to_string(),
            demand: 0.5,
            description: None,
        }
    }

    fn member(id: &str, skills: &[(&str, u8)]) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: id.to_string(),
            role: "CE".to_string(),
            location: "Remote".to_string(),
            ldap: id.to_string(),
            domains: vec![],
            skills: skills.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
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

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("new-{n}")
        }
    }

    /// Applies a plan in memory, the same way the store does in SQL.
    fn apply(
        plan: &NormalizationPlan,
        skills: &[Skill],
        members: &[TeamMember],
    ) -> (Vec<Skill>, Vec<TeamMember>) {
        let mut skills: Vec<Skill> = skills
            .iter()
            .filter(|s| !plan.deleted_skill_ids.contains(&s.id))
            .map(|s| {
                plan.updated_skills
                    .iter()
                    .find(|u| u.id == s.id)
                    .cloned()
                    .unwrap_or_else(|| s.clone())
            })
            .collect();
        skills.extend(plan.created_skills.iter().cloned());
        let members = members
            .iter()
            .map(|m| {
                let mut m = m.clone();
                if let Some(u) = plan.member_updates.iter().find(|u| u.member_id == m.id) {
                    m.skills = u.skills.clone();
                }
                m
            })
            .collect();
        (skills, members)
    }

    fn master_id(skills: &[Skill], name: &str) -> String {
        skills.iter().find(|s| s.name == name).unwrap().id.clone()
    }

    #[test]
    fn test_missing_masters_are_created() {
        let taxonomy = Taxonomy::builtin();
        let plan = plan_normalization(&taxonomy, &[], &[], counter());
        assert_eq!(plan.created_skills.len(), taxonomy.masters.len());
        assert!(plan.created_skills.iter().all(|s| s.demand == 1.0));
        assert!(plan.deleted_skill_ids.is_empty());
    }

    #[test]
    fn test_existing_master_metadata_is_refreshed_once() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("k8s", "kubernetes")];
        let plan = plan_normalization(&taxonomy, &skills, &[], counter());

        let update = plan.updated_skills.iter().find(|s| s.id == "k8s").unwrap();
        assert_eq!(update.name, "Kubernetes");
        assert_eq!(update.category, SkillCategory::AppMod);
        assert_eq!(update.demand, 0.5);
        assert!(plan.created_skills.iter().all(|s| s.name != "Kubernetes"));
        assert!(!plan.deleted_skill_ids.contains(&"k8s".to_string()));
    }

    #[test]
    fn test_raw_ratings_fold_by_maximum_not_sum() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![
            skill("gke", "GKE"),
            skill("k-docker", "Kubernetes & Docker"),
        ];
        let members = vec![member("m1", &[("gke", 2), ("k-docker", 4)])];

        let plan = plan_normalization(&taxonomy, &skills, &members, counter());
        let (after, _) = apply(&plan, &skills, &members);
        let k8s = master_id(&after, "Kubernetes");

        let update = &plan.member_updates[0];
        assert_eq!(update.skills.get(&k8s), Some(&4));
        assert!(!update.skills.contains_key("gke"));
        assert!(!update.skills.contains_key("k-docker"));
        assert_eq!(update.skills.len(), 1);
    }

    #[test]
    fn test_existing_master_rating_is_not_lowered() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("k8s", "Kubernetes"), skill("gke", "GKE")];
        let members = vec![member("m1", &[("k8s", 5), ("gke", 2)])];

        let plan = plan_normalization(&taxonomy, &skills, &members, counter());
        let update = &plan.member_updates[0];
        assert_eq!(update.skills.get("k8s"), Some(&5));
        assert!(!update.skills.contains_key("gke"));
    }

    #[test]
    fn test_split_skill_feeds_every_target() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("combo", "Generative AI / Vertex AI")];
        let members = vec![member("m1", &[("combo", 3)])];

        let plan = plan_normalization(&taxonomy, &skills, &members, counter());
        let (after, _) = apply(&plan, &skills, &members);
        let update = &plan.member_updates[0];

        assert_eq!(update.skills.get(&master_id(&after, "Generative AI")), Some(&3));
        assert_eq!(update.skills.get(&master_id(&after, "Vertex AI")), Some(&3));
        assert!(!update.skills.contains_key("combo"));
        assert!(plan.deleted_skill_ids.contains(&"combo".to_string()));
    }

    #[test]
    fn test_unmapped_skills_are_left_alone() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("weave", "Basket Weaving"), skill("grid", "Smart Grid & Energy Systems")];
        let members = vec![member("m1", &[("weave", 4), ("grid", 2), ("ghost", 1)])];

        let plan = plan_normalization(&taxonomy, &skills, &members, counter());
        assert!(plan.member_updates.is_empty());
        assert!(plan.deleted_skill_ids.is_empty());
    }

    #[test]
    fn test_masters_are_never_deleted() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("py", "Python"), skill("gcp", "GCP")];
        let plan = plan_normalization(&taxonomy, &skills, &[], counter());
        assert_eq!(plan.deleted_skill_ids, vec!["gcp".to_string()]);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![
            skill("gke", "GKE"),
            skill("tf", "Terraform"),
            skill("combo", "Generative AI & Vertex AI"),
            skill("weave", "Basket Weaving"),
            skill("py", "python"),
        ];
        let members = vec![
            member("m1", &[("gke", 3), ("tf", 5), ("weave", 2)]),
            member("m2", &[("combo", 4), ("py", 1)]),
        ];

        let first = plan_normalization(&taxonomy, &skills, &members, counter());
        assert!(!first.is_empty());
        let (skills, members) = apply(&first, &skills, &members);

        let second = plan_normalization(&taxonomy, &skills, &members, counter());
        assert!(second.is_empty(), "second plan was {second:?}");
    }

    #[test]
    fn test_report_counts_plan_entries() {
        let taxonomy = Taxonomy::builtin();
        let skills = vec![skill("gke", "GKE")];
        let members = vec![member("m1", &[("gke", 3)])];
        let report = plan_normalization(&taxonomy, &skills, &members, counter()).report();
        assert_eq!(report.created_skills, taxonomy.masters.len());
        assert_eq!(report.updated_members, 1);
        assert_eq!(report.deleted_skills, 1);
    }
}
