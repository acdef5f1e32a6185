use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

pub const MIN_PROFICIENCY: u8 = 1;
pub const MAX_PROFICIENCY: u8 = 5;

/// Clamps an arbitrary numeric rating into the 1–5 proficiency scale.
/// Non-finite input is treated as the minimum level.
pub fn clamp_level(raw: f64) -> u8 {
    if !raw.is_finite() {
        return MIN_PROFICIENCY;
    }
    raw.round()
        .clamp(MIN_PROFICIENCY as f64, MAX_PROFICIENCY as f64) as u8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "AI")]
    Ai,
    Infra,
    Data,
    AppMod,
    Security,
    Strategy,
    Industry,
    #[default]
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Ai => "AI",
            SkillCategory::Infra => "Infra",
            SkillCategory::Data => "Data",
            SkillCategory::AppMod => "AppMod",
            SkillCategory::Security => "Security",
            SkillCategory::Strategy => "Strategy",
            SkillCategory::Industry => "Industry",
            SkillCategory::Other => "Other",
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai" => SkillCategory::Ai,
            "infra" => SkillCategory::Infra,
            "data" => SkillCategory::Data,
            "appmod" | "app mod" => SkillCategory::AppMod,
            "security" => SkillCategory::Security,
            "strategy" => SkillCategory::Strategy,
            "industry" => SkillCategory::Industry,
            _ => SkillCategory::Other,
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A competency taxonomy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub icon_name: String,
    /// Demand score in [0, 1].
    pub demand: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Skill {
    /// Case-insensitive lookup key for the skill name.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SkillRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon_name: String,
    pub demand: f64,
    pub description: Option<String>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill {
            id: row.id,
            name: row.name,
            category: SkillCategory::parse_lenient(&row.category),
            icon_name: row.icon_name,
            demand: row.demand.clamp(0.0, 1.0),
            description: row.description,
        }
    }
}

/// A staff profile. `skills` maps skill ID to a 1–5 proficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub location: String,
    pub ldap: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl TeamMember {
    /// First domain tag, used as the member's headline expertise.
    pub fn primary_domain(&self) -> Option<&str> {
        self.domains
            .iter()
            .map(|d| d.trim())
            .find(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub location: String,
    pub ldap: String,
    pub domains: Vec<String>,
    pub skills: Json<BTreeMap<String, f64>>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub outside_interests: Vec<String>,
    pub linkedin_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        TeamMember {
            id: row.id,
            name: row.name,
            role: row.role,
            location: row.location,
            ldap: row.ldap,
            domains: row.domains,
            skills: row
                .skills
                .0
                .into_iter()
                .map(|(id, level)| (id, clamp_level(level)))
                .collect(),
            languages: row.languages,
            certifications: row.certifications,
            education: row.education,
            experience: row.experience,
            outside_interests: row.outside_interests,
            linkedin_url: row.linkedin_url.filter(|s| !s.is_empty()),
            image_url: row.image_url.filter(|s| !s.is_empty()),
            start_date: row.start_date,
        }
    }
}

/// Partial update for a team member. Absent fields are left untouched; `skills` is
/// keyed by skill ID and replaces the whole map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub ldap: Option<String>,
    pub domains: Option<Vec<String>>,
    pub skills: Option<BTreeMap<String, f64>>,
    pub languages: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
    pub experience: Option<Vec<String>>,
    pub outside_interests: Option<Vec<String>>,
    pub linkedin_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl TeamMemberPatch {
    pub fn apply_to(self, member: &TeamMember) -> TeamMember {
        let mut next = member.clone();
        let keep_text = |current: &mut String, value: Option<String>| {
            if let Some(v) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                *current = v;
            }
        };
        keep_text(&mut next.name, self.name);
        keep_text(&mut next.role, self.role);
        keep_text(&mut next.location, self.location);
        keep_text(&mut next.ldap, self.ldap);

        if let Some(skills) = self.skills {
            next.skills = skills
                .into_iter()
                .map(|(id, level)| (id, clamp_level(level)))
                .collect();
        }
        let lists = [
            (&mut next.domains, self.domains),
            (&mut next.languages, self.languages),
            (&mut next.certifications, self.certifications),
            (&mut next.education, self.education),
            (&mut next.experience, self.experience),
            (&mut next.outside_interests, self.outside_interests),
        ];
        for (slot, value) in lists {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(url) = self.linkedin_url {
            next.linkedin_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(url) = self.image_url {
            next.image_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if self.start_date.is_some() {
            next.start_date = self.start_date;
        }
        next
    }
}
