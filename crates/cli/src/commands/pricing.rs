//! `reasonact pricing` — List the prices used for cost accounting.

use reasonact_agent::pricing_from_config;
use reasonact_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let table = pricing_from_config(&config);
    let models = table.models();

    println!("💰 Model Pricing (per 1M tokens)");
    println!("─────────────────────────────────────────────────────");
    println!("{:<40} {:>10} {:>10}", "Model", "Input", "Output");
    println!("{:<40} {:>10} {:>10}", "─────", "─────", "──────");

    for name in &models {
        if let Some(p) = table.get(name) {
            let marker = if config.pricing.contains_key(name) { " *" } else { "" };
            println!(
                "{:<40} ${:>8.3} ${:>8.3}{marker}",
                name, p.input_per_m, p.output_per_m
            );
        }
    }

    println!();
    println!("  {} models with pricing data", models.len());
    if !config.pricing.is_empty() {
        println!("  * overridden in config.toml");
    }

    match table.resolve(&config.default_model) {
        Ok(p) => println!(
            "  Default model {} → ${:.3} in / ${:.3} out",
            config.default_model, p.input_per_m, p.output_per_m
        ),
        Err(e) => println!("  ⚠ {e}; runs will fail until it is priced"),
    }

    Ok(())
}
