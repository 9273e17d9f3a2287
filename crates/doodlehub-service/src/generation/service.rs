//! The generation use case: quota gate, prompt derivation, invocation,
//! commit, and activity logging.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;
use doodlehub_database::repositories::activity::ActivityRepository;
use doodlehub_entity::activity::{ActivityKind, CreateActivity};
use doodlehub_generate::ImageGenerator;
use doodlehub_prompt::TracingSpec;
use doodlehub_quota::{CallerIdentity, Decision, QuotaPolicy};

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// What was generated.
    pub kind: ActivityKind,
    /// URL of the generated image.
    pub image_url: String,
    /// The prompt actually sent to the image API.
    pub prompt: String,
    /// The prompt as the user typed it.
    pub original_prompt: String,
    /// Residual guest quota after this generation (guests only).
    pub guest_remaining: Option<u32>,
    /// Derived tracing specification (tracing worksheets only).
    pub trace: Option<TracingSpec>,
}

/// Orchestrates one generation request end to end.
///
/// Ordering matters: the quota is charged *after* the generation call
/// succeeds, so upstream failures never consume quota.
#[derive(Debug, Clone)]
pub struct GenerationService {
    quota: Arc<QuotaPolicy>,
    generator: Arc<dyn ImageGenerator>,
    activities: Arc<ActivityRepository>,
}

impl GenerationService {
    /// Creates a new generation service.
    pub fn new(
        quota: Arc<QuotaPolicy>,
        generator: Arc<dyn ImageGenerator>,
        activities: Arc<ActivityRepository>,
    ) -> Self {
        Self {
            quota,
            generator,
            activities,
        }
    }

    /// Run one generation for the given caller.
    pub async fn generate(
        &self,
        identity: &CallerIdentity,
        kind: ActivityKind,
        raw_prompt: &str,
    ) -> AppResult<GenerationOutput> {
        let original_prompt = raw_prompt.trim();
        if original_prompt.is_empty() {
            return Err(AppError::validation("Prompt is required"));
        }

        let now = Utc::now();
        let decision = self.quota.evaluate(identity, now).await?;
        if let Decision::Denied { reason } = decision {
            info!(reason = reason.code(), "Generation denied by quota");
            return Err(AppError::quota_exceeded(reason.code(), reason.message()));
        }

        let (image_prompt, trace) = match kind {
            ActivityKind::Coloring => (build_coloring_prompt(original_prompt), None),
            ActivityKind::Tracing => {
                let spec = doodlehub_prompt::classify(original_prompt);
                (build_tracing_prompt(&spec), Some(spec))
            }
        };

        // Invoke first, charge after: a failed generation must leave the
        // caller's counter at its pre-request value.
        let image = self.generator.generate(&image_prompt).await?;
        let remaining = self.quota.commit(identity, now).await?;

        if let Some(user_id) = identity.user_id() {
            self.activities
                .create(&CreateActivity {
                    user_id: Some(user_id),
                    kind,
                    prompt: original_prompt.to_string(),
                    image_url: image.url.clone(),
                })
                .await?;
        }

        if let Some(revised) = &image.revised_prompt {
            warn!(revised = %revised, "Provider revised the generation prompt");
        }

        info!(kind = %kind, guest = identity.is_guest(), "Generation completed");

        Ok(GenerationOutput {
            kind,
            image_url: image.url,
            prompt: image_prompt,
            original_prompt: original_prompt.to_string(),
            guest_remaining: if identity.is_guest() { remaining } else { None },
            trace,
        })
    }
}

/// Decorate a free-text prompt into a coloring page instruction.
fn build_coloring_prompt(prompt: &str) -> String {
    format!(
        "A black and white coloring page for young children: {prompt}. \
         Simple thick outlines, no shading, large shapes, white background."
    )
}

/// Build the worksheet instruction from a tracing specification.
fn build_tracing_prompt(spec: &TracingSpec) -> String {
    format!(
        "A handwriting practice worksheet for young children showing {} \
         as large dotted outlines for tracing. Black and white, ruled \
         guide lines, white background.",
        spec.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coloring_prompt_keeps_user_text() {
        let prompt = build_coloring_prompt("a friendly dinosaur");
        assert!(prompt.contains("a friendly dinosaur"));
        assert!(prompt.contains("coloring page"));
    }

    #[test]
    fn test_tracing_prompt_uses_description() {
        let spec = doodlehub_prompt::classify("trace the letter b in lowercase");
        let prompt = build_tracing_prompt(&spec);
        assert!(prompt.contains("the lowercase letter b"));
    }
}
