use crate::classification::RuleSet;
use crate::config::{discover_config, load_config_from_path, ArchmapConfig};
use crate::io::{self, OutputFormat};
use crate::pipeline::{self, AnalysisOutput};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub activity: Option<PathBuf>,
    pub jobs: usize,
    pub parallel: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    let rules = resolve_rules(&config, &settings)?;

    let mut snapshot = io::load_snapshot(&config.path, &settings.corpus)
        .with_context(|| format!("Failed to load repository from {}", config.path.display()))?;
    if let Some(activity_path) = &config.activity {
        let activity = io::load_activity(activity_path).with_context(|| {
            format!("Failed to load activity metadata from {}", activity_path.display())
        })?;
        snapshot.activity = Some(activity);
    }

    let results = pipeline::analyze_with_rules(&snapshot, &settings, rules);
    write_results(&results, config.format, config.output.as_deref())
}

/// Config file settings with CLI flags applied on top
fn resolve_settings(config: &AnalyzeConfig) -> Result<ArchmapConfig> {
    let mut settings = match &config.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => discover_config(&discovery_root(&config.path)),
    };

    if !config.parallel {
        settings.parallel.enabled = false;
    }
    if config.jobs > 0 {
        settings.parallel.max_concurrency = Some(config.jobs);
    }
    if config.rules.is_some() {
        settings.rules_path = config.rules.clone();
    }
    Ok(settings)
}

/// An explicit `--rules` file must load; one named in the config file falls back.
fn resolve_rules(config: &AnalyzeConfig, settings: &ArchmapConfig) -> Result<RuleSet> {
    match &config.rules {
        Some(path) => RuleSet::from_path(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(pipeline::load_rules(settings)),
    }
}

fn discovery_root(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

fn write_results(
    results: &AnalysisOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let sink: Box<dyn std::io::Write> = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(std::io::BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut writer = io::create_writer(format, sink);
    writer.write_results(results)?;
    if let Some(path) = output {
        log::info!("Wrote report to {}", path.display());
    }
    Ok(())
}
