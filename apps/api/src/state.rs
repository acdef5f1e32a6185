use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pulse::news::NewsFeed;
use crate::talent::matching::TalentMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// News-signal cache.
    pub redis: RedisClient,
    /// Archive for uploaded profile PDFs.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub news: NewsFeed,
    pub config: Config,
    /// Pluggable talent matcher. Default: KeywordTalentMatcher. Swap via ENABLE_LLM_MATCHING.
    pub talent_matcher: Arc<dyn TalentMatcher>,
}
