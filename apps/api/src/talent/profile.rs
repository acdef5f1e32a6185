//! Resume/profile analysis: PDF upload -> text -> AI extraction -> `MemberDraft`.
//!
//! The raw PDF is archived to object storage under `profiles/{uuid}.pdf` so a draft can
//! always be traced back to the document it came from.

use std::collections::BTreeMap;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::talent::prompts::PROFILE_EXTRACT_PROMPT;
use crate::talent::reconcile::MemberDraft;

/// Upper bound on the resume text sent to the model.
pub const MAX_PROFILE_CHARS: usize = 30_000;

/// What the model returns for a profile. Field names follow the prompt's camelCase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub outside_interests: Vec<String>,
    #[serde(default)]
    pub assessment_summary: Option<String>,
    #[serde(default, alias = "linkedInUrl")]
    pub linkedin_url: Option<String>,
}

impl ExtractedProfile {
    pub fn into_draft(self) -> MemberDraft {
        MemberDraft {
            id: None,
            name: self.name,
            role: self.role,
            skills: self.skills,
            languages: self.languages,
            certifications: self.certifications,
            education: self.education,
            experience: self.experience,
            outside_interests: self.outside_interests,
            linkedin_url: self.linkedin_url.filter(|u| u.starts_with("http")),
            image_url: None,
            start_date: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileAnalysis {
    pub draft: MemberDraft,
    pub assessment_summary: Option<String>,
    /// Object key of the archived PDF.
    pub source_key: String,
}

/// Cuts `text` to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Extracts plain text from PDF bytes on the blocking pool.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to parse PDF: {e}")))
}

async fn archive_pdf(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    pdf: Bytes,
) -> Result<String, AppError> {
    let key = format!("profiles/{}.pdf", Uuid::new_v4());
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(pdf))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Profile upload failed: {e}")))?;
    info!("Archived profile PDF to s3://{bucket}/{key}");
    Ok(key)
}

pub async fn analyze_profile(
    llm: &LlmClient,
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    pdf: Bytes,
) -> Result<ProfileAnalysis, AppError> {
    let text = extract_pdf_text(pdf.clone()).await?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }

    let source_key = archive_pdf(s3, bucket, pdf).await?;

    let prompt = PROFILE_EXTRACT_PROMPT.replace("{text}", truncate_chars(&text, MAX_PROFILE_CHARS));
    let extracted: ExtractedProfile = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Profile extraction failed: {e}")))?;

    info!(
        "Extracted profile '{}' with {} skills",
        extracted.name.as_deref().unwrap_or("?"),
        extracted.skills.len()
    );

    let assessment_summary = extracted.assessment_summary.clone();
    Ok(ProfileAnalysis {
        draft: extracted.into_draft(),
        assessment_summary,
        source_key,
    })
}
