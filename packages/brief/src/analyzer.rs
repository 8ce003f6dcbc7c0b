// ABOUTME: Brief analyzer turning a free-text idea into a structured brief via one model call
// ABOUTME: Any model failure is logged and converted to the fixed fallback brief

use async_trait::async_trait;
use rockspace_ai::{AIServiceError, AIServiceResult, GeminiService, Schema};
use rockspace_core::{truncate, AIAnalysis};
use tracing::{debug, error, info};

use crate::prompts::{brief_prompt, brief_schema, SYSTEM_INSTRUCTION};

/// A single structured-generation request for a brief
#[derive(Debug, Clone, PartialEq)]
pub struct BriefRequest {
    pub prompt: String,
    pub system_instruction: String,
    pub schema: Schema,
}

impl BriefRequest {
    pub fn for_idea(idea: &str) -> Self {
        Self {
            prompt: brief_prompt(idea),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            schema: brief_schema(),
        }
    }
}

/// Generative model able to answer a [`BriefRequest`] with schema-shaped output
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BriefModel: Send + Sync {
    async fn generate_brief(&self, request: BriefRequest) -> AIServiceResult<AIAnalysis>;
}

#[async_trait]
impl BriefModel for GeminiService {
    async fn generate_brief(&self, request: BriefRequest) -> AIServiceResult<AIAnalysis> {
        let response = self
            .generate_structured::<AIAnalysis>(
                request.prompt,
                Some(request.system_instruction),
                &request.schema,
            )
            .await?;

        debug!(
            "Brief generated with {} total tokens",
            response.usage.total_tokens()
        );
        Ok(response.data)
    }
}

/// Something that turns an idea into a brief and never fails from the caller's view
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analyze: Send + Sync {
    async fn analyze(&self, idea: &str) -> AIAnalysis;
}

/// Stateless analyzer issuing exactly one model call per invocation
pub struct BriefAnalyzer<M> {
    model: M,
}

impl<M: BriefModel> BriefAnalyzer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Run the model call and surface its error. Length is not re-validated here.
    pub async fn try_analyze(&self, idea: &str) -> AIServiceResult<AIAnalysis> {
        info!(
            "Analyzing project idea ({} chars): {}",
            idea.chars().count(),
            truncate(idea, 80)
        );

        let analysis = self.model.generate_brief(BriefRequest::for_idea(idea)).await?;

        if analysis.refined_brief.trim().is_empty() {
            return Err(AIServiceError::InvalidResponse);
        }

        info!(
            "Brief ready: {} technologies, timeline {}",
            analysis.suggested_stack.len(),
            analysis.estimated_timeline
        );
        Ok(analysis)
    }
}

#[async_trait]
impl<M: BriefModel> Analyze for BriefAnalyzer<M> {
    async fn analyze(&self, idea: &str) -> AIAnalysis {
        match self.try_analyze(idea).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("Brief analysis failed, returning fallback brief: {}", e);
                AIAnalysis::fallback()
            }
        }
    }
}
