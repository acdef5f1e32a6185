//! Static reference data for seeding the skills and team tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::team::{Skill, SkillCategory, TeamMember};

/// Proficiency given to a seeded member for each domain that matches a seeded skill.
const SEED_LEVEL: u8 = 3;

pub struct SeedSkill {
    pub name: &'static str,
    pub category: SkillCategory,
    pub icon_name: &'static str,
    pub demand: f64,
    pub description: &'static str,
}

pub struct SeedMember {
    pub name: &'static str,
    pub role: &'static str,
    pub location: &'static str,
    pub ldap: &'static str,
    pub domains: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub education: &'static [&'static str],
    pub experience: &'static [&'static str],
    pub outside_interests: &'static [&'static str],
    pub linkedin_url: Option<&'static str>,
    pub image_url: &'static str,
    pub start_date: &'static str,
}

const fn base(
    name: &'static str,
    role: &'static str,
    location: &'static str,
    ldap: &'static str,
    domains: &'static [&'static str],
    image_url: &'static str,
    start_date: &'static str,
) -> SeedMember {
    SeedMember {
        name,
        role,
        location,
        ldap,
        domains,
        languages: &["English"],
        certifications: &[],
        education: &[],
        experience: &[],
        outside_interests: &[],
        linkedin_url: None,
        image_url,
        start_date,
    }
}

const MALE_1: &str = "/images/team/avatar_male_1.png";
const MALE_2: &str = "/images/team/avatar_male_2.png";
const FEMALE_1: &str = "/images/team/avatar_female_1.png";
const FEMALE_2: &str = "/images/team/avatar_female_2.png";

pub const INITIAL_SKILLS: &[SeedSkill] = &[
    SeedSkill {
        name: "Kubernetes",
        category: SkillCategory::Infra,
        icon_name: "Globe",
        demand: 0.8,
        description: "Container orchestration, cluster management, GKE.",
    },
    SeedSkill {
        name: "Terraform",
        category: SkillCategory::Infra,
        icon_name: "Box",
        demand: 0.7,
        description: "IaC, state management, module design.",
    },
    SeedSkill {
        name: "Cloud Run",
        category: SkillCategory::AppMod,
        icon_name: "Zap",
        demand: 0.8,
        description: "Serverless container deployment, scaling configuration.",
    },
    SeedSkill {
        name: "GKE",
        category: SkillCategory::AppMod,
        icon_name: "Container",
        demand: 0.9,
        description: "Advanced Kubernetes networking, security, storage.",
    },
    SeedSkill {
        name: "BigQuery",
        category: SkillCategory::Data,
        icon_name: "Database",
        demand: 0.9,
        description: "Data warehousing, SQL, performance tuning.",
    },
    SeedSkill {
        name: "Looker",
        category: SkillCategory::Data,
        icon_name: "BarChart",
        demand: 0.6,
        description: "BI semantic modeling, dashboard creation.",
    },
    SeedSkill {
        name: "Vertex AI",
        category: SkillCategory::Ai,
        icon_name: "Brain",
        demand: 1.0,
        description: "Technical mastery of Google Cloud AI platform, Agent Builder, Model Garden, and deployment.",
    },
    SeedSkill {
        name: "Generative AI",
        category: SkillCategory::Ai,
        icon_name: "Sparkles",
        demand: 1.0,
        description: "Core proficiency with LLMs (Gemini, GPT, Claude), Prompt Engineering, and Model capability.",
    },
    SeedSkill {
        name: "Enterprise AI",
        category: SkillCategory::Strategy,
        icon_name: "Layers",
        demand: 0.8,
        description: "Strategy for adopting AI at scale, Governance, Security, and high-value business use cases.",
    },
    SeedSkill {
        name: "AI/ML Architecture",
        category: SkillCategory::Ai,
        icon_name: "Network",
        demand: 0.9,
        description: "Designing end-to-end ML systems, RAG integration patterns, MLOps, and rigorous engineering.",
    },
    SeedSkill {
        name: "IAM Security",
        category: SkillCategory::Security,
        icon_name: "Shield",
        demand: 0.85,
        description: "Identity access management, policy design.",
    },
];

pub const INITIAL_TEAM: &[SeedMember] = &[
    SeedMember {
        linkedin_url: Some("https://www.linkedin.com/in/albertsunwoo"),
        ..base("Albert Sunwoo", "CE, Analytics", "US-SFO-SPE", "asunwoo", &["BigQuery", "Looker", "Data Analytics"], MALE_1, "2021-03-15")
    },
    SeedMember {
        certifications: &["GCP Professional Cloud Architect"],
        linkedin_url: Some("https://www.linkedin.com/in/anabellstvincent"),
        ..base("Anabell St Vincent", "Principal Architect", "US-SFO-SPE", "astvincent", &["Enterprise Arch", "Kubernetes", "Vertex AI"], FEMALE_1, "2019-08-01")
    },
    SeedMember {
        linkedin_url: Some("https://www.linkedin.com/in/anirudhmurali"),
        ..base("Anirudh Murali", "CE, Strategic AI", "US-SVL-MP4", "anihm", &["Vertex AI", "Generative AI"], MALE_2, "2022-05-10")
    },
    SeedMember {
        education: &["MS ECE - Carnegie Mellon", "MBA - INSEAD"],
        experience: &["Energy Market Authority", "Enterprise Singapore"],
        outside_interests: &["Portrait Drawing", "Singing", "Ukulele"],
        linkedin_url: Some("https://www.linkedin.com/in/eugenetoh"),
        ..base("Eugene Toh", "ISV2 CE Team Lead", "US-SVL-MP4", "eugenetoh", &["Kubernetes", "IAM Security"], MALE_1, "2020-11-01")
    },
    SeedMember {
        education: &["MS EE - Universidad de Los Andes", "MBA - Kellogg"],
        experience: &["Strata Analytics Group", "Millicom", "Cima Telecom", "Bell Labs"],
        languages: &["English", "Spanish"],
        linkedin_url: Some("https://www.linkedin.com/in/humbertorico"),
        ..base("Humberto Rico", "CE, Infra Mod", "US-NYC-8510", "humbertorico", &["Kubernetes", "Terraform", "Vertex AI"], MALE_2, "2021-01-15")
    },
    base("Jason Delosrios", "CE, Infra Mod", "US-NYC-8510", "jasondelosrios", &["Kubernetes", "IAM Security"], MALE_1, "2022-02-20"),
    base("Joe Truncale", "CE, App Mod", "US-NYC-8510", "joetruncale", &["GKE", "Cloud Run"], MALE_2, "2023-06-01"),
    base("Lola Pushkar", "CE, App Mod", "US-SVL-MP4", "lolha", &["GKE", "Cloud Run"], FEMALE_2, "2021-09-01"),
    base("Marcelo Ventura", "CE, App Mod", "US-SFO-SPE", "marceloventura", &["GKE", "Cloud Run"], MALE_1, "2020-05-01"),
    base("Mike Choe", "CE II, App Mod", "US-SVL-MP4", "mikechoe", &["GKE", "Cloud Run"], MALE_2, "2022-11-01"),
    base("Paul Min", "CE, Infra Mod", "US-NYC-8510", "paulmin", &["Kubernetes", "Terraform"], MALE_1, "2023-01-15"),
    base("Prasad Alle", "Data Analytics Specialist", "US-IRV-FAIR", "prasadalle", &["BigQuery", "Vertex AI"], MALE_2, "2021-07-01"),
    base("Priya Kumari", "CE, Analytics", "US-SVL-MP4", "kpriyaa", &["BigQuery", "Data Analytics"], FEMALE_1, "2022-04-01"),
    base("Rachel Yuen", "CE", "US-IRV-FAIR", "rachelyuen", &["BigQuery", "Data Analytics"], FEMALE_2, "2023-03-01"),
    base("S.D. Hines", "CE, Analytics", "US-IRV-FAIR", "saritta", &["BigQuery", "Looker", "IAM Security"], MALE_1, "2020-02-01"),
    base("Steven Chung", "CE, Infra Mod", "US-NYC-8510", "stevenchung", &["Kubernetes", "Terraform"], MALE_2, "2021-12-01"),
    base("Tema Johnson", "CE, Data Analytics", "US-SFO-SPE", "temaj", &["Looker", "BigQuery"], FEMALE_1, "2022-08-01"),
    base("Thyge Knuhtsen", "CE III, Infra Mod", "US-NYC-8510", "thygek", &["Kubernetes", "Terraform"], MALE_1, "2019-11-01"),
    base("Trevor Young", "CE", "US-NYC-8510", "trev", &["Kubernetes", "GKE"], MALE_2, "2023-05-01"),
    base("Vineet Agarwal", "Principal Architect", "Remote", "vineetagarwal", &["Enterprise Arch", "Kubernetes", "IAM Security"], MALE_1, "2018-06-01"),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Materializes the seed set with fresh IDs. Each member gets `SEED_LEVEL` for every
/// domain that names a seeded skill or its category.
pub fn build_seed(mut new_id: impl FnMut() -> String) -> (Vec<Skill>, Vec<TeamMember>) {
    let skills: Vec<Skill> = INITIAL_SKILLS
        .iter()
        .map(|s| Skill {
            id: new_id(),
            name: s.name.to_string(),
            category: s.category,
            icon_name: s.icon_name.to_string(),
            demand: s.demand,
            description: Some(s.description.to_string()),
        })
        .collect();

    let members = INITIAL_TEAM
        .iter()
        .map(|m| {
            let mut levels = BTreeMap::new();
            for domain in m.domains {
                if let Some(skill) = skills
                    .iter()
                    .find(|s| s.name == *domain || s.category.as_str() == *domain)
                {
                    levels.insert(skill.id.clone(), SEED_LEVEL);
                }
            }
            TeamMember {
                id: new_id(),
                name: m.name.to_string(),
                role: m.role.to_string(),
                location: m.location.to_string(),
                ldap: m.ldap.to_string(),
                domains: owned(m.domains),
                skills: levels,
                languages: owned(m.languages),
                certifications: owned(m.certifications),
                education: owned(m.education),
                experience: owned(m.experience),
                outside_interests: owned(m.outside_interests),
                linkedin_url: m.linkedin_url.map(String::from),
                image_url: Some(m.image_url.to_string()),
                start_date: NaiveDate::parse_from_str(m.start_date, "%Y-%m-%d").ok(),
            }
        })
        .collect();

    (skills, members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("id-{n}")
        }
    }

    #[test]
    fn test_seed_sizes() {
        let (skills, members) = build_seed(ids());
        assert_eq!(skills.len(), 11);
        assert_eq!(members.len(), 20);
    }

    #[test]
    fn test_seed_levels_follow_domains() {
        let (skills, members) = build_seed(ids());
        let id_of = |name: &str| skills.iter().find(|s| s.name == name).unwrap().id.clone();

        let albert = members.iter().find(|m| m.ldap == "asunwoo").unwrap();
        assert_eq!(albert.skills.len(), 2); // "Data Analytics" names no skill
        assert_eq!(albert.skills.get(&id_of("BigQuery")), Some(&3));
        assert_eq!(albert.skills.get(&id_of("Looker")), Some(&3));
    }

    #[test]
    fn test_seed_dates_and_ldaps_are_valid() {
        let (_, members) = build_seed(ids());
        assert!(members.iter().all(|m| m.start_date.is_some()));
        let mut ldaps: Vec<&str> = members.iter().map(|m| m.ldap.as_str()).collect();
        ldaps.sort();
        ldaps.dedup();
        assert_eq!(ldaps.len(), members.len());
    }
}
