// Prompts for the talent service. Placeholders are `{name}`-style and filled with
// `str::replace` by the caller.

/// Asks the model to pick members from the pool by ldap.
pub const TALENT_MATCH_PROMPT: &str = r#"You are the OutcomeOS Intelligence Engine. Your goal is to deploy the best squad for a customer.

CUSTOMER:
Name: {name}
Milestone: {milestone}
Risk: {risk}
Current Blocker: {blocker}
Consumption: {consumption}%

SIGNAL (NEWS):
{signal}

TALENT POOL:
{talent_pool}

TASK:
Choose exactly {top_n} team members from the pool who are best suited to help this customer.
Only use ldaps that appear in the pool. Order them best first.

Return JSON with this structure:
{
  "matches": [
    { "ldap": "ldap_of_member", "reason": "One sentence: which of their domains address which customer need." }
  ]
}"#;

/// Extracts a structured profile from resume text.
pub const PROFILE_EXTRACT_PROMPT: &str = r#"You are an expert Technical Recruiter and AI Architect.
Analyze the following resume/profile text and extract structured data for a talent matrix.

Text:
"""
{text}
"""

Return JSON with this structure:
{
  "name": "Full Name",
  "role": "One of: CE_L1, CE_L2, SPECIALIST, ARCHITECT",
  "skills": { "Skill Name": 3, "Another Skill": 5 },
  "languages": ["Language 1"],
  "education": ["Degree - School"],
  "experience": ["Role - Company (Year)"],
  "certifications": ["Cert Name"],
  "outsideInterests": ["Interest 1"],
  "assessmentSummary": "2-3 sentence assessment of fit for a high-performance cloud/AI team.",
  "linkedInUrl": "url if present in the text, otherwise null"
}

- Skill proficiency is 1 (Awareness) to 5 (Thought Leader), inferred from context.
- Map skills to modern cloud/AI technology names (Kubernetes, Vertex AI, BigQuery, Terraform, ...).
- Infer the role from seniority.
- outsideInterests captures hobbies and non-technical traits."#;
