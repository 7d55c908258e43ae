//! Extraction orchestration.
//!
//! One extraction is a bounded pipeline: resolve the prompt, normalize the
//! schema for strict mode, consult the response cache, pass local rate-limit
//! admission, call the provider with retries, parse and validate the reply,
//! then record cost and memoize the outcome. Every path ends in exactly one
//! [`ExtractionResult`]; expected failures never propagate as errors.

use std::time::Duration;

use exstruct_core::{ExtractError, ExtractionResult, ExtractorConfig, Result, TokenUsage};
use exstruct_schema::{to_strict_schema, ExtractionSchema, LoadedSchema};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{fingerprint, ResponseCache};
use crate::cost::{CostSummary, CostTracker};
use crate::rate_limit::CallLimiter;
use crate::retry::RetryPolicy;
use crate::types::{
    ApiErrorPayload, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};

/// Wire-level schema name for ad-hoc schema extractions.
const CUSTOM_SCHEMA_NAME: &str = "custom_extraction";

/// One parsed provider reply, before schema validation.
struct Generation {
    raw: Value,
    model: String,
    usage: Option<TokenUsage>,
}

/// Structured extraction pipeline over a chat completions endpoint.
///
/// The extractor is safe to share across tasks; the rate limiter, response
/// cache, and cost ledger are the only mutable state and each guards its own
/// critical section.
pub struct Extractor {
    config: ExtractorConfig,
    client: Client,
    limiter: CallLimiter,
    cache: ResponseCache,
    costs: CostTracker,
    retry: RetryPolicy,
}

impl Extractor {
    /// Create an extractor from a validated configuration.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let limiter = CallLimiter::new(
            config.rate_limit_calls,
            Duration::from_secs(config.rate_limit_interval_seconds),
        );
        let cache = ResponseCache::new(config.cache_capacity);
        Ok(Self {
            config,
            client: Client::new(),
            limiter,
            cache,
            costs: CostTracker::new(),
            retry: RetryPolicy::default(),
        })
    }

    /// Create an extractor from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(ExtractorConfig::from_env()?)
    }

    /// Replace the backoff policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configuration this extractor runs with.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Aggregate cost figures for the calls made so far.
    #[must_use]
    pub fn cost_summary(&self) -> CostSummary {
        self.costs.summary()
    }

    /// Extract structured data from `input` using the schema's own prompt.
    pub async fn extract(&self, schema: &dyn ExtractionSchema, input: &str) -> ExtractionResult {
        self.extract_with_prompt(schema, input, None).await
    }

    /// Extract structured data, optionally overriding the system prompt.
    pub async fn extract_with_prompt(
        &self,
        schema: &dyn ExtractionSchema,
        input: &str,
        prompt_override: Option<&str>,
    ) -> ExtractionResult {
        let prompt = prompt_override.unwrap_or_else(|| schema.extraction_prompt());
        if prompt.trim().is_empty() {
            return ExtractionResult::error("No extraction prompt provided");
        }

        info!(schema = schema.name(), "starting extraction");
        let wire_name = schema.name().to_lowercase();
        let mapping = schema.schema_mapping();
        self.run(schema.name(), &wire_name, prompt, &mapping, input, Some(schema))
            .await
    }

    /// Extract using an ad-hoc JSON-Schema mapping.
    ///
    /// The decoded reply is returned as-is; without a schema definition there
    /// is no typed contract to validate against.
    pub async fn extract_with_custom_schema(
        &self,
        input: &str,
        schema: &Value,
        prompt: &str,
    ) -> ExtractionResult {
        if prompt.trim().is_empty() {
            return ExtractionResult::error("No extraction prompt provided");
        }

        info!("starting extraction with custom schema");
        // Anonymous schemas are identified by their serialized shape so two
        // different mappings never share a cache slot.
        let identity = schema.to_string();
        self.run(&identity, CUSTOM_SCHEMA_NAME, prompt, schema, input, None)
            .await
    }

    /// Extract using a schema loaded from a declarative document.
    pub async fn extract_with_loaded_schema(
        &self,
        schema: &LoadedSchema,
        input: &str,
    ) -> ExtractionResult {
        self.extract(schema, input).await
    }

    async fn run(
        &self,
        identity: &str,
        wire_name: &str,
        prompt: &str,
        schema_mapping: &Value,
        input: &str,
        validator: Option<&dyn ExtractionSchema>,
    ) -> ExtractionResult {
        let strict = to_strict_schema(schema_mapping);

        let key = fingerprint(identity, prompt, input, &self.config.model);
        if let Some(hit) = self.cache.get(&key) {
            debug!(fingerprint = %key, "returning cached extraction result");
            return hit;
        }

        let admitted = if self.config.rate_limit_wait {
            self.limiter.admit(self.config.rate_limit_max_wait()).await
        } else {
            self.limiter.try_admit()
        };
        if let Err(retry_after) = admitted {
            warn!(retry_after = ?retry_after, "extraction rejected by local rate limiter");
            let err = ExtractError::rate_limited(Some(retry_after));
            return ExtractionResult::error(err.to_string());
        }

        let mut attempt = 0u32;
        let generation = loop {
            attempt += 1;
            match self.request(wire_name, prompt, input, &strict).await {
                Ok(generation) => break generation,
                Err(err) if attempt < self.config.max_retries && err.is_retryable() => {
                    // Malformed generations are re-requested without backoff;
                    // the provider samples fresh output on every attempt.
                    let delay = match &err {
                        ExtractError::Decode(_) => Duration::ZERO,
                        _ => self.retry.delay(attempt, err.retry_after()),
                    };
                    warn!(attempt, error = %err, delay = ?delay, "extraction attempt failed, retrying");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => {
                    warn!(attempt, error = %err, "extraction failed");
                    return ExtractionResult::error(err.to_string());
                }
            }
        };

        let data = match validator {
            Some(schema) => match schema.validate(&generation.raw) {
                Ok(data) => data,
                Err(err) => {
                    warn!(error = %err, "response failed schema validation");
                    return ExtractionResult::error(err.to_string());
                }
            },
            None => generation.raw,
        };

        if let Some(usage) = generation.usage {
            let cost = self.costs.record(&generation.model, usage);
            info!(
                tokens = usage.total_tokens,
                cost = %cost.call_cost,
                total_cost = %cost.cumulative_cost,
                "extraction completed"
            );
        } else {
            info!("extraction completed");
        }

        let result = ExtractionResult::ok(
            data,
            generation.model,
            generation.usage.map(|usage| usage.total_tokens),
        );
        self.cache.put(key, &result);
        result
    }

    /// One provider round trip: send the request, surface API failures, and
    /// decode the generated content as JSON.
    async fn request(
        &self,
        wire_name: &str,
        prompt: &str,
        input: &str,
        strict_schema: &Value,
    ) -> Result<Generation> {
        let body = ChatCompletionRequest::new(
            self.config.model.clone(),
            vec![ChatMessage::system(prompt), ChatMessage::user(input)],
        )
        .with_response_format(ResponseFormat::json_schema(
            wire_name,
            strict_schema.clone(),
            true,
        ));

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.config.timeout())
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(handle_error_response(status, &body, &headers));
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ExtractError::decode(err.to_string()))?;

        let usage = response
            .usage
            .map(|usage| TokenUsage::with_tokens(usage.prompt_tokens, usage.completion_tokens));
        let model = response.model;

        let Some(message) = response.choices.into_iter().next().map(|choice| choice.message)
        else {
            return Err(ExtractError::EmptyResponse);
        };
        if let Some(refusal) = &message.refusal {
            warn!(refusal = %refusal, "model refused the extraction request");
        }
        let content = message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ExtractError::EmptyResponse);
        }

        let raw = serde_json::from_str::<Value>(&content)
            .map_err(|err| ExtractError::decode(err.to_string()))?;

        Ok(Generation { raw, model, usage })
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn handle_error_response(status: u16, body: &str, headers: &HeaderMap) -> ExtractError {
    if status == 429 {
        return ExtractError::rate_limited(parse_retry_after(headers));
    }
    if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(body) {
        return ExtractError::api(status, payload.error.message);
    }
    let message = if body.trim().is_empty() {
        "<empty body>".to_string()
    } else {
        body.trim().to_string()
    };
    ExtractError::api(status, message)
}
