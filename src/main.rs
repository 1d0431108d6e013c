use std::path::Path;
use std::process;

use u_assign::config::GaConfig;
use u_assign::ga::{EvolutionResult, GaRunner};
use u_assign::validation::validate_config;

const DEFAULT_CONFIG: &str = "config.toml";

/// Loads the configuration named on the command line, falling back to
/// `config.toml` and then to the built-in defaults.
fn load_config() -> Result<GaConfig, String> {
    let explicit = std::env::args().nth(1);
    let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    if explicit.is_none() && !Path::new(&path).exists() {
        log::warn!("No '{}' found, using built-in building table", path);
        return Ok(GaConfig::default());
    }

    log::info!("Loading configuration from '{}'...", path);
    GaConfig::load(Path::new(&path)).map_err(|e| format!("Failed to load '{}': {}", path, e))
}

fn print_result(result: &EvolutionResult, config: &GaConfig) {
    let best = &result.best;
    println!(
        "Stopped at generation {} ({:?})",
        result.final_generation, result.stop_reason
    );
    if let Some(lineage) = best.parents() {
        println!("Parents:");
        println!("  {} (fitness {})", lineage.first, lineage.first.fitness);
        println!("  {} (fitness {})", lineage.second, lineage.second.fitness);
    }
    let ceiling = match config.suitability.best_score(config.encoding) {
        Some(optimum) => format!("optimum {}", optimum),
        None => format!("upper bound {}", config.suitability.upper_bound(config.encoding)),
    };
    println!(
        "Solution: {} | generation {} | fitness {} ({})",
        best,
        best.generation(),
        best.fitness(),
        ceiling
    );
    for (slot, assigned) in best.assignments(config.encoding).iter().enumerate() {
        match assigned {
            Some(use_index) => println!("  slot {} -> use {}", slot, use_index),
            None => println!("  slot {} -> unassigned", slot),
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Booting u-assign...");

    // 1. Load and validate configuration
    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            log::error!("Invalid configuration: {}", e);
        }
        process::exit(1);
    }
    log::info!("Configuration loaded and validated.");

    // 2. Evolve
    let runner = match GaRunner::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to build runner: {}", e);
            process::exit(1);
        }
    };
    let mut rng = config.rng();
    let result = runner.run_with(&mut rng, |report| {
        println!(
            "Generation {} Best: {} Max Fitness: {}",
            report.generation, report.best, report.best_fitness
        );
    });

    // 3. Report
    match result {
        Ok(result) => print_result(&result, &config),
        Err(e) => {
            log::error!("Evolution failed: {}", e);
            process::exit(1);
        }
    }
}
