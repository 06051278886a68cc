//! ReAct pattern — Thought → Action → Observation loop.
//!
//! Each iteration composes a prompt from the instruction, the tool
//! catalogue and the steps taken so far, asks the model to continue,
//! and parses the reply. An action is dispatched and its observation
//! appended to the trace; a final answer ends the run.
//!
//! # Run state
//!
//! The trace and the cost totals belong to a single run: both are created
//! inside [`ReactAgent::run`] / [`ReactAgent::stream`] and returned in the
//! [`AgentOutput`]. The agent itself only holds shared, immutable
//! configuration, so one agent can serve concurrent runs.
//!
//! # Termination
//!
//! - A final answer returns its text.
//! - Exhausting the iteration budget returns the last raw model reply.
//!   This is not an error.
//! - Every other failure (model call, parsing, unknown tool, tool error,
//!   unpriced model) aborts the run.

use crate::dispatcher::ToolDispatcher;
use crate::output::{ChannelSink, OutputSink};
use crate::parser::{ParseResult, parse_output};
use crate::prompt::{PromptComposer, PromptTemplate};
use crate::scratchpad::TraceEntry;
use crate::stream_event::AgentStreamEvent;
use reasonact_config::AppConfig;
use reasonact_core::error::{Error, Result};
use reasonact_core::message::Message;
use reasonact_core::provider::{Provider, ProviderRequest, Usage};
use reasonact_core::tool::ToolRegistry;
use reasonact_telemetry::{CostAccumulator, ModelPricing, PricingTable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stop sequence sent with every model call.
pub const STOP_MARKER: &str = "Observation:";

pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// A ReAct agent.
///
/// Cheap to clone: the provider, tools and pricing are shared.
#[derive(Clone)]
pub struct ReactAgent {
    name: String,
    version: String,
    description: String,
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Model name; also the pricing key for every call.
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    /// Maximum reasoning iterations per run.
    max_iterations: u32,
    dispatcher: ToolDispatcher,
    composer: PromptComposer,
    pricing: Arc<PricingTable>,
}

/// The result of a ReAct run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    pub run_id: String,
    /// The final answer, or the last model reply if the budget ran out.
    pub output: String,
    /// Total cost in USD, including nested agents.
    pub cost: f64,
    /// Total tokens, including nested agents.
    pub tokens: u64,
    /// Completed Action/Observation steps, in order.
    pub trace: Vec<TraceEntry>,
    /// Number of model calls made.
    pub iterations: u32,
}

/// Text and usage of one model reply.
struct ModelReply {
    content: String,
    usage: Option<Usage>,
}

impl ReactAgent {
    /// Create a new ReAct agent with default settings and built-in pricing.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            name: "ReactAgent".into(),
            version: "0.0.1".into(),
            description: "A reasoning agent that answers questions by thinking step by step and using tools.".into(),
            provider,
            model: model.into(),
            temperature: 0.0,
            max_tokens: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            dispatcher: ToolDispatcher::new(tools),
            composer: PromptComposer::default(),
            pricing: Arc::new(PricingTable::with_defaults()),
        }
    }

    /// Build an agent from loaded configuration.
    ///
    /// Applies `[agent]` settings, model defaults, `[pricing.*]` overrides,
    /// and loads the prompt template file if one is configured.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
    ) -> Result<Self> {
        let pricing = pricing_from_config(config);
        let mut agent = Self::new(provider, &config.default_model, tools)
            .with_name(&config.agent.name)
            .with_version(&config.agent.version)
            .with_description(&config.agent.description)
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_max_iterations(config.agent.max_iterations)
            .with_pricing(Arc::new(pricing));

        if let Some(path) = &config.agent.prompt_template {
            agent = agent.with_prompt_template(PromptTemplate::from_file(path)?);
        }
        Ok(agent)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description advertised when this agent is used as a tool.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set max iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Replace the zero-shot ReAct prompt.
    pub fn with_prompt_template(mut self, template: PromptTemplate) -> Self {
        self.composer = PromptComposer::new(Some(Arc::new(template)));
        self
    }

    pub fn with_pricing(mut self, pricing: Arc<PricingTable>) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    /// Execute the ReAct loop, waiting for each model reply in full.
    pub async fn run(&self, instruction: &str) -> Result<AgentOutput> {
        self.execute(instruction, None).await
    }

    /// Execute the ReAct loop, streaming model text and tool activity to
    /// `sink` as it happens.
    ///
    /// Each reply is parsed only once its stream is exhausted, so this
    /// takes exactly the same decisions as [`run`](Self::run).
    pub async fn stream(&self, instruction: &str, sink: &mut dyn OutputSink) -> Result<AgentOutput> {
        self.execute(instruction, Some(sink)).await
    }

    /// Spawn a streaming run and return its events.
    ///
    /// The last event is always `done` or `error`.
    pub fn run_stream(&self, instruction: impl Into<String>) -> mpsc::UnboundedReceiver<AgentStreamEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let agent = self.clone();
        let instruction = instruction.into();

        tokio::spawn(async move {
            let mut sink = ChannelSink::new(tx.clone());
            let last = match agent.stream(&instruction, &mut sink).await {
                Ok(out) => AgentStreamEvent::Done {
                    run_id: out.run_id,
                    output: out.output,
                    cost: out.cost,
                    tokens: out.tokens,
                    iterations: out.iterations,
                },
                Err(e) => AgentStreamEvent::Error {
                    message: e.to_string(),
                },
            };
            let _ = tx.send(last);
        });

        rx
    }

    async fn execute(&self, instruction: &str, mut sink: Option<&mut dyn OutputSink>) -> Result<AgentOutput> {
        let run_id = Uuid::new_v4().to_string();
        let mut trace: Vec<TraceEntry> = Vec::new();
        let mut usage = CostAccumulator::new(&self.pricing, &self.model);
        let mut last_reply = String::new();
        let mut iterations = 0u32;

        info!(
            run_id = %run_id,
            agent = %self.name,
            version = %self.version,
            model = %self.model,
            max_iter = self.max_iterations,
            streaming = sink.is_some(),
            "ReAct run starting"
        );

        while iterations < self.max_iterations {
            iterations += 1;

            // ── Compose ──
            let prompt = self.composer.compose(instruction, self.tools(), &trace)?;
            debug!(iteration = iterations, prompt = %prompt, "Prompt");

            // ── Invoke model ──
            let request = self.request(prompt, sink.is_some());
            let reply = match sink.as_deref_mut() {
                Some(sink) => self.stream_reply(request, sink).await?,
                None => self.complete_reply(request).await?,
            };
            debug!(iteration = iterations, response = %reply.content, "Response");

            // ── Parse, then account ──
            let decision = parse_output(&reply.content)?;
            self.account(&mut usage, reply.usage)?;
            last_reply = reply.content;

            let action = match decision {
                ParseResult::Finish(finish) => {
                    info!(run_id = %run_id, iterations, "ReAct run completed");
                    if let Some(sink) = sink {
                        sink.done();
                    }
                    return Ok(finished(run_id, finish.output, &usage, trace, iterations));
                }
                ParseResult::Action(action) => action,
            };

            // ── Dispatch ──
            if let Some(sink) = sink.as_deref_mut() {
                sink.tool_call(&action.tool, &action.tool_input);
            }
            let result = self.dispatcher.dispatch(&action).await?;
            if let Some((cost, tokens)) = result.usage() {
                usage.record_nested(cost, tokens);
            }
            let observation = result.observation().to_string();
            if let Some(sink) = sink.as_deref_mut() {
                sink.tool_result(&action.tool, &observation);
            }
            trace.push(TraceEntry::new(action, observation));
        }

        warn!(
            run_id = %run_id,
            max_iter = self.max_iterations,
            "ReAct: max iterations reached without a final answer"
        );
        if let Some(sink) = sink {
            sink.done();
        }
        Ok(finished(run_id, last_reply, &usage, trace, iterations))
    }

    fn request(&self, prompt: String, stream: bool) -> ProviderRequest {
        ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream,
            stop: vec![STOP_MARKER.into()],
        }
    }

    async fn complete_reply(&self, request: ProviderRequest) -> Result<ModelReply> {
        let response = self.provider.complete(request).await?;
        Ok(ModelReply {
            content: response.content,
            usage: response.usage,
        })
    }

    /// Concatenate streamed fragments until the stream ends.
    async fn stream_reply(&self, request: ProviderRequest, sink: &mut dyn OutputSink) -> Result<ModelReply> {
        sink.thinking(&self.name);
        let mut rx = self.provider.stream(request).await?;
        let mut content = String::new();
        let mut usage = None;

        while let Some(chunk) = rx.recv().await {
            let chunk = chunk?;
            if let Some(text) = chunk.content.as_deref().filter(|t| !t.is_empty()) {
                sink.fragment(&self.name, text);
                content.push_str(text);
            }
            if chunk.usage.is_some() {
                usage = chunk.usage;
            }
            if chunk.done {
                break;
            }
        }

        Ok(ModelReply { content, usage })
    }

    fn account(&self, totals: &mut CostAccumulator<'_>, usage: Option<Usage>) -> Result<()> {
        let Some(usage) = usage else {
            warn!(model = %self.model, "Provider reported no usage; call not priced");
            return Ok(());
        };
        totals
            .record_call(usage.prompt_tokens, usage.completion_tokens)
            .map_err(|e| Error::Pricing(e.to_string()))?;
        Ok(())
    }
}

/// Built-in prices with the `[pricing.*]` overrides from `config` applied.
pub fn pricing_from_config(config: &AppConfig) -> PricingTable {
    let pricing = PricingTable::with_defaults();
    for (model, price) in &config.pricing {
        pricing.set(model.clone(), ModelPricing::new(price.input_per_m, price.output_per_m));
    }
    pricing
}

fn finished(
    run_id: String,
    output: String,
    usage: &CostAccumulator<'_>,
    trace: Vec<TraceEntry>,
    iterations: u32,
) -> AgentOutput {
    let totals = usage.totals();
    AgentOutput {
        run_id,
        output,
        cost: totals.cost,
        tokens: totals.tokens,
        trace,
        iterations,
    }
}
