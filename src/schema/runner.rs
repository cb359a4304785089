//! Runner configuration and its command line rendering.
//!
//! The evolutionary runner takes its settings as a flat list of positional
//! arguments. This module maps the JSON experiment configuration onto that
//! list so experiments can be launched as `runner $(ea-runlog args cfg problem)`.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Experiment configuration consumed by the evolutionary runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Where the runner writes the best solution.
    pub solution_file: String,
    /// Where the runner writes the run-log.
    pub log_file: String,
    /// Random seed. Falls back to the current UNIX time when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of independent runs.
    pub runs: u32,
    pub num_parents: u32,
    pub num_offspring: u32,
    pub parent_selection: ParentSelection,
    pub survival_selection: SurvivalSelection,
    #[serde(default)]
    pub terminations: Terminations,
    pub mutations: Mutations,
    pub force_valid: bool,
    pub penalty_weight: f64,
    pub adaptive_penalty: bool,
    pub adaptive_repair: bool,
    pub init_repair_chance: f64,
}

/// Parent selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentSelection {
    /// Weighting scheme name understood by the runner.
    pub selection_weight: String,
    pub select_k: u32,
    pub num_mates: u32,
    pub replacement: bool,
    pub rate_p: f64,
}

/// Survival selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalSelection {
    pub selection_weight: String,
    pub select_k: u32,
    pub drop_parents: bool,
    pub replacement: bool,
    pub rate_p: f64,
}

/// Termination limits; zero disables a limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terminations {
    #[serde(default)]
    pub eval_limit: u64,
    #[serde(default)]
    pub generation_limit: u64,
    #[serde(default)]
    pub unchanged_avg_gen_limit: u64,
    #[serde(default)]
    pub unchanged_best_gen_limit: u64,
}

/// Offspring mutation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mutations {
    pub adaptive: bool,
    pub rate_per_offspring: f64,
    pub creep_random: f64,
    pub creep_stable_random: f64,
    pub swap_position: f64,
    pub swap_insertion: f64,
}

impl RunnerConfig {
    /// Seed to hand to the runner.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        })
    }

    /// Positional arguments in the order the runner parses them.
    pub fn to_arguments(&self, config_file: &str, problem_file: &str, seed: u64) -> Vec<String> {
        fn arg(value: impl Display) -> String {
            value.to_string()
        }

        let parent = &self.parent_selection;
        let survival = &self.survival_selection;
        let limits = &self.terminations;
        let mutations = &self.mutations;

        vec![
            arg(config_file),
            arg(problem_file),
            arg(&self.solution_file),
            arg(&self.log_file),
            arg(seed),
            arg(self.runs),
            arg(self.num_parents),
            arg(self.num_offspring),
            arg(&parent.selection_weight),
            arg(parent.select_k),
            arg(parent.num_mates),
            arg(parent.replacement),
            arg(parent.rate_p),
            arg(&survival.selection_weight),
            arg(survival.select_k),
            arg(survival.drop_parents),
            arg(survival.replacement),
            arg(survival.rate_p),
            arg(limits.eval_limit),
            arg(limits.generation_limit),
            arg(limits.unchanged_avg_gen_limit),
            arg(limits.unchanged_best_gen_limit),
            arg(mutations.adaptive),
            arg(mutations.rate_per_offspring),
            arg(mutations.creep_random),
            arg(mutations.creep_stable_random),
            arg(mutations.swap_position),
            arg(mutations.swap_insertion),
            arg(self.force_valid),
            arg(self.penalty_weight),
            arg(self.adaptive_penalty),
            arg(self.adaptive_repair),
            arg(self.init_repair_chance),
        ]
    }

    /// Space-joined argument line, resolving the seed.
    pub fn command_line(&self, config_file: &str, problem_file: &str) -> String {
        self.to_arguments(config_file, problem_file, self.effective_seed())
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "solution_file": "solutions/s1.txt",
        "log_file": "logs/s1.txt",
        "seed": 42,
        "runs": 30,
        "num_parents": 100,
        "num_offspring": 50,
        "parent_selection": {
            "selection_weight": "FitnessProportional",
            "select_k": 5, "num_mates": 2, "replacement": true, "rate_p": 0.5
        },
        "survival_selection": {
            "selection_weight": "Truncation",
            "select_k": 5, "drop_parents": false, "replacement": false, "rate_p": 0.25
        },
        "terminations": { "eval_limit": 10000 },
        "mutations": {
            "adaptive": true, "rate_per_offspring": 0.1, "creep_random": 0.2,
            "creep_stable_random": 0.3, "swap_position": 0.4, "swap_insertion": 0.5
        },
        "force_valid": false,
        "penalty_weight": 2.5,
        "adaptive_penalty": true,
        "adaptive_repair": false,
        "init_repair_chance": 0.75
    }"#;

    #[test]
    fn test_argument_order() {
        let config: RunnerConfig = serde_json::from_str(CONFIG).unwrap();
        let args = config.to_arguments("cfg.json", "problem.txt", 42);

        assert_eq!(args.len(), 33);
        assert_eq!(&args[..5], ["cfg.json", "problem.txt", "solutions/s1.txt", "logs/s1.txt", "42"]);
        assert_eq!(args[8], "FitnessProportional");
        assert_eq!(args[11], "true");
        assert_eq!(args[13], "Truncation");
        assert_eq!(args[18], "10000");
        // missing limits default to zero
        assert_eq!(&args[19..22], ["0", "0", "0"]);
        assert_eq!(args[29], "2.5");
        assert_eq!(args[32], "0.75");
    }

    #[test]
    fn test_command_line_uses_configured_seed() {
        let config: RunnerConfig = serde_json::from_str(CONFIG).unwrap();
        let line = config.command_line("cfg.json", "problem.txt");
        assert!(line.starts_with("cfg.json problem.txt solutions/s1.txt logs/s1.txt 42 30 "));
    }

    #[test]
    fn test_missing_seed_falls_back_to_clock() {
        let mut config: RunnerConfig = serde_json::from_str(CONFIG).unwrap();
        config.seed = None;
        assert!(config.effective_seed() > 1_500_000_000);
    }

    #[test]
    fn test_missing_required_key_rejected() {
        let broken = CONFIG.replace("\"runs\": 30,", "");
        assert!(serde_json::from_str::<RunnerConfig>(&broken).is_err());
    }
}
