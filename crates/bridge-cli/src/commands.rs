use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use bridge_analyze::{TextAnalyzer, generate_recommendations};
use bridge_cli::config::{Config, load_dataset, reference_from_env};
use bridge_cli::pipeline::{SurveyInput, analyze_survey};
use bridge_map::{MappingEngine, mapping_confidence_stats};
use bridge_model::{AnalysisOptions, SurveyAnswer};
use bridge_standards::DoctorReport;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::cli::{
    AnalyzeArgs, BatchArgs, Cli, GenerateArgs, InterventionArgs, MapArgs, SearchArgs, SummaryArgs,
    SurveyArgs,
};
use crate::output;

/// Services and settings shared by every command.
pub struct Session {
    pub engine: MappingEngine,
    pub analyzer: TextAnalyzer,
    pub options: AnalysisOptions,
    pub json: bool,
}

impl Session {
    pub fn open(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("resolve working directory")?;
        let config = Config::discover(cli.config.as_deref(), &cwd)?;
        let choice = reference_from_env(cli.reference_dir.as_deref(), &config);
        let dataset = Arc::new(load_dataset(&choice)?);
        let analyzer =
            TextAnalyzer::new(Arc::clone(&dataset)).context("compile analyzer rules")?;
        Ok(Self {
            engine: MappingEngine::new(dataset),
            analyzer,
            options: config.analysis,
            json: cli.json,
        })
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn run_map(session: &Session, args: &MapArgs) -> Result<()> {
    let result = session.engine.map(&args.code, args.from, args.to)?;
    if session.json {
        return print_json(&result);
    }
    output::print_mapping(&result);
    Ok(())
}

pub fn run_map_all(session: &Session, code: &str) -> Result<()> {
    let results = session.engine.map_to_all(code);
    if session.json {
        return print_json(&results);
    }
    output::print_mapping_overview(&results);
    Ok(())
}

pub fn run_generate(session: &Session, args: &GenerateArgs) -> Result<()> {
    let generated = session
        .engine
        .generate(&args.icf_code, args.action, args.status)
        .ok_or_else(|| anyhow!("no KSI target for ICF code: {}", args.icf_code.trim()))?;
    if session.json {
        return print_json(&generated);
    }
    output::print_generated(&generated);
    Ok(())
}

pub fn run_reverse_bbic(session: &Session, dimension: &str) -> Result<()> {
    let result = session.engine.bbic_to_icf(dimension);
    if session.json {
        return print_json(&result);
    }
    output::print_mapping(&result);
    Ok(())
}

pub fn run_interventions(session: &Session, args: &InterventionArgs) -> Result<()> {
    let suggestions = session
        .engine
        .suggest_interventions(&args.codes, args.context);
    if session.json {
        return print_json(&suggestions);
    }
    output::print_interventions(&suggestions);
    Ok(())
}

pub fn run_analyze(session: &Session, args: &AnalyzeArgs) -> Result<()> {
    let min_confidence = args
        .min_confidence
        .unwrap_or(session.options.min_confidence);
    let context = args.context.as_deref().or(session.options.context.as_deref());
    let suggestions = session
        .analyzer
        .analyze_text(&args.text, context, min_confidence);
    if session.json {
        return print_json(&suggestions);
    }
    output::print_suggestions(&suggestions);
    Ok(())
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    #[serde(flatten)]
    batch: &'a bridge_model::BatchAnalysis,
    recommendations: &'a [String],
}

pub fn run_batch(session: &Session, args: &BatchArgs) -> Result<()> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();
    let contents = read_input(&args.input)?;
    let texts: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
    debug!(texts = texts.len(), "read batch");

    let batch = session.analyzer.analyze_batch(
        &texts,
        args.min_frequency.unwrap_or(session.options.min_frequency),
        args.min_confidence
            .unwrap_or(session.options.batch_min_confidence),
    );
    let recommendations = generate_recommendations(&batch.clusters);
    if session.json {
        return print_json(&BatchOutput {
            batch: &batch,
            recommendations: &recommendations,
        });
    }
    output::print_batch(&batch, &recommendations);
    Ok(())
}

pub fn run_summary(session: &Session, args: &SummaryArgs) -> Result<()> {
    let contents = read_input(&args.input)?;
    let answers: Vec<SurveyAnswer> = serde_json::from_str(&contents)
        .with_context(|| format!("parse answers in {}", args.input.display()))?;
    let summary = session.analyzer.domain_summary(&answers, &args.domain);
    if session.json {
        return print_json(&summary);
    }
    output::print_domain_summary(&summary);
    Ok(())
}

pub fn run_survey(session: &Session, args: &SurveyArgs) -> Result<()> {
    let contents = read_input(&args.input)?;
    let survey: SurveyInput = serde_json::from_str(&contents)
        .with_context(|| format!("parse survey in {}", args.input.display()))?;
    let analysis = analyze_survey(&session.analyzer, &session.engine, &survey, Utc::now());
    if session.json {
        return print_json(&analysis);
    }
    output::print_survey(&analysis);
    Ok(())
}

pub fn run_core_set(session: &Session, condition: Option<&str>) -> Result<()> {
    let Some(condition) = condition else {
        let conditions = session.engine.core_set_conditions();
        if session.json {
            return print_json(&conditions);
        }
        for condition in conditions {
            println!("{condition}");
        }
        return Ok(());
    };
    let core_set = session.engine.core_set(condition);
    if session.json {
        return print_json(&core_set);
    }
    output::print_core_set(&core_set);
    Ok(())
}

pub fn run_search(session: &Session, args: &SearchArgs) -> Result<()> {
    let hits = session.engine.search_codes(&args.query, &args.systems);
    if session.json {
        return print_json(&hits);
    }
    output::print_search_hits(&hits);
    Ok(())
}

pub fn run_stats(json: bool) -> Result<()> {
    let stats = mapping_confidence_stats();
    if json {
        return print_json(&stats);
    }
    output::print_stats(&stats);
    Ok(())
}

/// Prints the doctor report. Returns whether the dataset is healthy.
pub fn run_doctor(session: &Session) -> Result<bool> {
    let report = DoctorReport::from_dataset(session.engine.dataset());
    if session.json {
        print_json(&report)?;
    } else {
        output::print_doctor(&report);
    }
    Ok(report.is_healthy())
}
