//! `reasonact run` — Answer one instruction with the ReAct agent.

use super::terminal::TerminalSink;
use reasonact_agent::{AgentOutput, ReactAgent};
use reasonact_config::AppConfig;
use std::sync::Arc;

pub struct RunOptions {
    pub message: String,
    pub stream: bool,
    pub max_iterations: Option<u32>,
    pub json: bool,
}

/// Providers that run locally and need no key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "vllm", "llamacpp", "llama.cpp"];

pub async fn run(opts: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Fail early with setup instructions when no key is configured
    let provider_key = config
        .providers
        .get(&config.default_provider)
        .is_some_and(|p| p.api_key.is_some());
    if !config.has_api_key()
        && !provider_key
        && !KEYLESS_PROVIDERS.contains(&config.default_provider.as_str())
    {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    REASONACT_API_KEY    generic");
        eprintln!("    OPENROUTER_API_KEY   for OpenRouter");
        eprintln!("    OPENAI_API_KEY       for OpenAI direct");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    // Build provider from config
    let router = reasonact_providers::build_from_config(&config);
    let provider = router.default().ok_or("No default provider configured")?;

    let tools = Arc::new(reasonact_tools::default_registry());
    let mut agent = ReactAgent::from_config(&config, provider, tools)?;
    if let Some(max) = opts.max_iterations {
        agent = agent.with_max_iterations(max);
    }

    tracing::debug!(
        provider = router.default_name(),
        model = agent.model(),
        "Agent ready"
    );

    if opts.stream {
        let mut sink = TerminalSink::stdout();
        let output = agent.stream(&opts.message, &mut sink).await?;
        eprintln!("{}", summary(&output));
    } else if opts.json {
        let output = agent.run(&opts.message).await?;
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        eprint!("  Thinking...");
        let output = agent.run(&opts.message).await;
        eprint!("\r              \r");
        let output = output?;
        println!("{}", output.output);
        eprintln!("{}", summary(&output));
    }

    Ok(())
}

fn summary(output: &AgentOutput) -> String {
    format!(
        "  {} iteration{} · {} tool call{} · {} tokens · ${:.6}",
        output.iterations,
        if output.iterations == 1 { "" } else { "s" },
        output.trace.len(),
        if output.trace.len() == 1 { "" } else { "s" },
        output.tokens,
        output.cost
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_pluralizes() {
        let output = AgentOutput {
            run_id: "r".into(),
            output: "4".into(),
            cost: 0.00002,
            tokens: 15,
            trace: vec![],
            iterations: 1,
        };
        assert_eq!(
            summary(&output),
            "  1 iteration · 0 tool calls · 15 tokens · $0.000020"
        );
    }
}
