//! Canonical skill taxonomy: the master skill list and the raw-name mappings that fold
//! legacy or free-form skill names into it.

use crate::models::team::SkillCategory;
use crate::models::team::SkillCategory::{Ai, AppMod, Data, Industry, Infra, Security, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterSkillDef {
    pub name: &'static str,
    pub category: SkillCategory,
    pub description: &'static str,
    pub icon_name: &'static str,
}

const fn master(
    name: &'static str,
    category: SkillCategory,
    description: &'static str,
    icon_name: &'static str,
) -> MasterSkillDef {
    MasterSkillDef {
        name,
        category,
        description,
        icon_name,
    }
}

pub const MASTER_SKILLS: &[MasterSkillDef] = &[
    // AI & machine learning
    master("Generative AI", Ai, "LLMs, Prompt Engineering, Agents (Gemini/GPT/Claude)", "Sparkles"),
    master("Vertex AI", Ai, "Google Cloud Vertex AI Platform", "BrainCircuit"),
    master("Enterprise AI", Ai, "AI Strategy, Adoption, Governance", "Briefcase"),
    master("AI/ML Architecture", Ai, "Designing scalable AI systems", "Network"),
    master("Machine Learning", Ai, "Classic ML, Predictive Modeling, TensorFlow/PyTorch", "Brain"),
    // Cloud infrastructure
    master("AWS", Infra, "Amazon Web Services Ecology", "Cloud"),
    master("Azure", Infra, "Microsoft Azure Ecology", "Cloud"),
    master("Google Cloud Platform", Infra, "Core GCP Infrastructure & Services", "CloudFog"),
    master("Multi-Cloud Strategy", Infra, "Hybrid/Multi-cloud architecture & governance", "Globe"),
    master("SRE & DevOps", Infra, "Reliability, CI/CD, Automation, Observability", "Infinity"),
    master("Infrastructure as Code", Infra, "Terraform, Ansible, Pulumi", "Code2"),
    master("Linux & OS", Infra, "Kernel tuning, Shell scripting, OS management", "Terminal"),
    master("Virtualization", Infra, "VMware, Hyper-V, HCI", "Layers"),
    master("Networking", Infra, "SDN, VPC, DNS, CDN, Interconnects", "Network"),
    // Application modernization
    master("Kubernetes", AppMod, "K8s, GKE, EKS, AKS", "Container"),
    master("OpenShift", AppMod, "Red Hat OpenShift Platform", "RedHat"),
    master("Serverless", AppMod, "Lambda, Cloud Run, Functions", "Zap"),
    master("Service Mesh", AppMod, "Istio, Anthos Service Mesh", "Network"),
    master("Microservices Architecture", AppMod, "Distributed systems design", "Boxes"),
    master("Java", AppMod, "Spring Boot, JEE, JVM tuning", "Coffee"),
    master("Python", AppMod, "Django, Flask, Scripting", "Snake"),
    master("Go", AppMod, "Golang systems programming", "Code"),
    master("JavaScript/TypeScript", AppMod, "React, Node.js, Frontend/Backend", "Code"),
    // Data & analytics
    master("Data Strategy", Data, "Governance, Data Mesh, Monetization", "LineChart"),
    master("Data Engineering", Data, "Pipelines, ETL, Spark, DBT", "Database"),
    master("Data Analytics/BI", Data, "Warehousing, Visualization, Tableau, Looker", "BarChart"),
    master("Database Management", Data, "SQL, NoSQL, Migration, Optimization", "Database"),
    master("Event Streaming", Data, "Kafka, Pub/Sub", "Activity"),
    // Security
    master("Identity & Access Management", Security, "OAuth, OIDC, Active Directory, IAM", "ShieldCheck"),
    master("Cybersecurity", Security, "Threat detection, Compliance, SecOps", "Lock"),
    // Strategy & leadership
    master("Digital Transformation", Strategy, "Modernization roadmaps, C-Level advisory", "Compass"),
    master("Product Strategy", Strategy, "Product Management, GTM, Roadmap", "Target"),
    master("Technical Leadership", Strategy, "Mentoring, Team Building, Pre-sales", "Users"),
    master("Sales Engineering", Strategy, "Discovery, Prototyping, Value Engineering", "Presentation"),
    // Industry
    master("Financial Services", Industry, "Trading, Banking, Insurance Tech", "DollarSign"),
    master("Telecommunications", Industry, "5G, Telco Cloud, NFV", "RadioTower"),
    master("IoT & Edge", Industry, "Embedded, Edge Compute, IoT Platforms", "Cpu"),
    master("Healthcare", Industry, "HIPAA, HL7, MedTech", "HeartPulse"),
    master("Media & Entertainment", Industry, "Streaming, Content Supply Chain", "Film"),
];

/// Lowercase raw name -> canonical master name.
pub const SKILL_MAPPING: &[(&str, &str)] = &[
    // AI
    ("generative ai", "Generative AI"),
    ("generative ai & llms", "Generative AI"),
    ("generative ai & prompt engineering", "Generative AI"),
    ("generative ai (gemini/claude/gpt)", "Generative AI"),
    ("generative ai & machine learning", "Generative AI"),
    ("vertex ai / generative ai", "Generative AI"),
    ("vertex ai", "Vertex AI"),
    ("vertex ai / strategic ai", "Vertex AI"),
    ("vertex ai & machine learning inferences", "Vertex AI"),
    ("vertex ai & machine learning", "Vertex AI"),
    ("enterprise ai solutioning", "Enterprise AI"),
    ("enterprise ai", "Enterprise AI"),
    ("enterprise arch", "Enterprise AI"),
    ("ai/ml integration patterning", "AI/ML Architecture"),
    ("ai/ml architecture", "AI/ML Architecture"),
    ("machine learning & mlops", "Machine Learning"),
    ("predictive modeling", "Machine Learning"),
    ("ai/machine learning (vertex ai/tensorflow)", "Machine Learning"),
    // Infra
    ("aws", "AWS"),
    ("amazon web services (aws)", "AWS"),
    ("microsoft azure", "Azure"),
    ("google cloud platform", "Google Cloud Platform"),
    ("google cloud platform (gcp)", "Google Cloud Platform"),
    ("gcp", "Google Cloud Platform"),
    ("cloud infrastructure (gcp)", "Google Cloud Platform"),
    ("cloud infrastructure (gcp/aws)", "Google Cloud Platform"),
    ("multi-cloud solutions", "Multi-Cloud Strategy"),
    ("multi-cloud strategy", "Multi-Cloud Strategy"),
    ("public cloud (aws/azure/gcp)", "Multi-Cloud Strategy"),
    ("cloud architecture (gcp/aws)", "Multi-Cloud Strategy"),
    ("cloud architecture (gcp/aws/azure)", "Multi-Cloud Strategy"),
    ("cloud architecture & strategy", "Multi-Cloud Strategy"),
    ("cloud solutions architecture", "Multi-Cloud Strategy"),
    ("cloud architecture", "Multi-Cloud Strategy"),
    ("site reliability engineering (sre)", "SRE & DevOps"),
    ("devops & ci/cd", "SRE & DevOps"),
    ("devops & platform engineering", "SRE & DevOps"),
    ("ci/cd / jenkins", "SRE & DevOps"),
    ("ci/cd pipelines", "SRE & DevOps"),
    ("gitops", "SRE & DevOps"),
    ("python & automation", "SRE & DevOps"),
    ("terraform", "Infrastructure as Code"),
    ("infrastructure as code (iac)", "Infrastructure as Code"),
    ("infrastructure as code (terraform)", "Infrastructure as Code"),
    ("infrastructure as code (terraform/puppet)", "Infrastructure as Code"),
    ("terraform/iac", "Infrastructure as Code"),
    ("linux (ubuntu/centos/redhat)", "Linux & OS"),
    ("unix/linux systems programming", "Linux & OS"),
    ("vmware & virtualization", "Virtualization"),
    ("virtualization (vmware/vsphere)", "Virtualization"),
    ("hyper-converged infrastructure (hci)", "Virtualization"),
    ("vmware / data center virtualization", "Virtualization"),
    ("compute infrastructure (arm/axion)", "Virtualization"),
    ("network engineering", "Networking"),
    ("network engineering (cisco)", "Networking"),
    ("network infrastructure (sdn/voip)", "Networking"),
    ("sd-wan & network security", "Networking"),
    ("enterprise network design", "Networking"),
    // App mod
    ("kubernetes", "Kubernetes"),
    ("kubernetes & docker", "Kubernetes"),
    ("kubernetes & gke", "Kubernetes"),
    ("google kubernetes engine (gke)", "Kubernetes"),
    ("gke", "Kubernetes"),
    ("gke (google kubernetes engine)", "Kubernetes"),
    ("kubernetes (gke)", "Kubernetes"),
    ("kubernetes & cloud native apps", "Kubernetes"),
    ("kubernetes & containerization", "Kubernetes"),
    ("openshift", "OpenShift"),
    ("red hat openshift", "OpenShift"),
    ("serverless computing", "Serverless"),
    ("cloud run", "Serverless"),
    ("service mesh", "Service Mesh"),
    ("service mesh (istio)", "Service Mesh"),
    ("distributed systems", "Microservices Architecture"),
    ("enterprise integration (mulesoft/soa)", "Microservices Architecture"),
    ("enterprise system architecture", "Microservices Architecture"),
    ("enterprise technical architecture", "Microservices Architecture"),
    ("enterprise systems architecture", "Microservices Architecture"),
    ("java", "Java"),
    ("java enterprise edition", "Java"),
    ("java & elasticsearch", "Java"),
    ("python", "Python"),
    ("python & bot development", "Python"),
    ("go (golang)", "Go"),
    ("javascript", "JavaScript/TypeScript"),
    ("next.js", "JavaScript/TypeScript"),
    ("full-stack development (react/nodejs)", "JavaScript/TypeScript"),
    ("full-stack development", "JavaScript/TypeScript"),
    ("mobile app development", "JavaScript/TypeScript"),
    // Data
    ("big data strategy", "Data Strategy"),
    ("data engineering", "Data Engineering"),
    ("data engineering & etl pipelines", "Data Engineering"),
    ("etl/data pipelines", "Data Engineering"),
    ("pyspark", "Data Engineering"),
    ("hadoop/hive", "Data Engineering"),
    ("big data architecture (hadoop, kafka, hbase)", "Data Engineering"),
    ("etl architecture", "Data Engineering"),
    ("data analytics", "Data Analytics/BI"),
    ("tableau", "Data Analytics/BI"),
    ("looker", "Data Analytics/BI"),
    ("business intelligence", "Data Analytics/BI"),
    ("data science & analytics", "Data Analytics/BI"),
    ("sql", "Database Management"),
    ("sql/dbt", "Database Management"),
    ("google bigquery", "Database Management"),
    ("bigquery", "Database Management"),
    ("storage & data management", "Database Management"),
    ("data modeling", "Database Management"),
    ("data architecture", "Database Management"),
    ("apache kafka & event streaming", "Event Streaming"),
    // Security
    ("identity & access management (iam)", "Identity & Access Management"),
    ("iam security", "Identity & Access Management"),
    ("disaster recovery & business continuity", "Cybersecurity"),
    // Strategy
    ("strategic business alignment", "Digital Transformation"),
    ("enterprise migrations", "Digital Transformation"),
    ("infrastructure modernization", "Digital Transformation"),
    ("cloud-native architecture", "Digital Transformation"),
    ("product management", "Product Strategy"),
    ("product management/founding", "Product Strategy"),
    ("gtm strategy", "Product Strategy"),
    ("solution strategy & gtm", "Product Strategy"),
    ("technical leadership", "Technical Leadership"),
    ("technical mentorship", "Technical Leadership"),
    ("solution design & pre-sales", "Technical Leadership"),
    ("solutions architecture & sales engineering", "Technical Leadership"),
    ("sales engineering", "Sales Engineering"),
    ("strategic account management", "Sales Engineering"),
    ("vendor negotiation & budget management", "Sales Engineering"),
    // Industry
    ("electronic trading systems", "Financial Services"),
    ("market data infrastructure", "Financial Services"),
    ("ultra-low latency performance tuning", "Financial Services"),
    ("telecommunications / nfvi", "Telecommunications"),
    ("iot & 5g systems", "Telecommunications"),
    ("iot & edge computing", "IoT & Edge"),
    ("iot & smart home automation", "IoT & Edge"),
    ("embedded systems & can bus", "IoT & Edge"),
    ("robotics & autonomous services", "IoT & Edge"),
    ("healthcare informatics", "Healthcare"),
    ("ott & media streaming (cdn/drm)", "Media & Entertainment"),
    // Misc
    ("agile methodologies (scrum/devops)", "SRE & DevOps"),
    ("content management systems (cms)", "JavaScript/TypeScript"),
    ("e-commerce strategy & personalization", "Digital Transformation"),
    ("six sigma", "Digital Transformation"),
    ("salesforce crm", "Digital Transformation"),
    // No "Industry" master exists; this entry never resolves and is left alone.
    ("smart grid & energy systems", "Industry"),
    ("itsm / itil framework", "SRE & DevOps"),
];

/// Lowercase raw name -> several canonical master names.
pub const SPLIT_SKILLS: &[(&str, &[&str])] = &[
    ("generative ai / vertex ai", &["Generative AI", "Vertex AI"]),
    ("generative ai & vertex ai", &["Generative AI", "Vertex AI"]),
];

/// The taxonomy a normalization run works against.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy<'t> {
    pub masters: &'t [MasterSkillDef],
    pub mapping: &'t [(&'t str, &'t str)],
    pub splits: &'t [(&'t str, &'t [&'t str])],
}

impl Taxonomy<'static> {
    pub fn builtin() -> Self {
        Taxonomy {
            masters: MASTER_SKILLS,
            mapping: SKILL_MAPPING,
            splits: SPLIT_SKILLS,
        }
    }
}

impl<'t> Taxonomy<'t> {
    /// Canonical names a raw skill folds into. Direct mappings win over splits.
    /// `name_key` must already be trimmed and lowercased.
    pub fn targets_for(&self, name_key: &str) -> Option<Vec<&'t str>> {
        if let Some((_, target)) = self.mapping.iter().find(|(raw, _)| *raw == name_key) {
            return Some(vec![*target]);
        }
        self.splits
            .iter()
            .find(|(raw, _)| *raw == name_key)
            .map(|(_, targets)| targets.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_keys_are_lowercase_and_unique() {
        let keys = SKILL_MAPPING
            .iter()
            .map(|(raw, _)| *raw)
            .chain(SPLIT_SKILLS.iter().map(|(raw, _)| *raw));
        let mut seen = HashSet::new();
        for raw in keys {
            assert_eq!(raw, raw.to_lowercase().trim(), "key {raw} is not normalized");
            assert!(seen.insert(raw), "duplicate key {raw}");
        }
    }

    #[test]
    fn test_split_targets_are_masters() {
        for (_, targets) in SPLIT_SKILLS {
            for target in *targets {
                assert!(
                    MASTER_SKILLS.iter().any(|m| m.name == *target),
                    "{target} is not a master"
                );
            }
        }
    }

    #[test]
    fn test_targets_for_prefers_direct_mapping() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.targets_for("gke"), Some(vec!["Kubernetes"]));
        assert_eq!(
            taxonomy.targets_for("generative ai / vertex ai"),
            Some(vec!["Generative AI", "Vertex AI"])
        );
        assert_eq!(taxonomy.targets_for("basket weaving"), None);
    }
}
