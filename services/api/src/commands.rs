use crate::infra::{parse_date, InMemorySessionStore};
use assessment_ai::config::AppConfig;
use assessment_ai::error::AppError;
use assessment_ai::telemetry;
use assessment_ai::workflows::gateway::{CompletionGateway, GeminiGateway};
use assessment_ai::workflows::intake::AssessmentImporter;
use assessment_ai::workflows::report::ReportPromptBuilder;
use assessment_ai::workflows::scoring::{self, format_score, AssessmentScores, DiscProfile};
use assessment_ai::workflows::session::{AnalysisService, SessionId, SessionStore, GREETING};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

const BAR_WIDTH: usize = 30;
const QUIT_COMMAND: &str = "/quit";

#[derive(Args, Debug)]
pub(crate) struct PeopleArgs {
    /// Assessment export (CSV) to read
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// Assessment export (CSV) to read
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Value of the "Assessment Taker Name" column to score
    #[arg(long)]
    pub(crate) person: String,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Assessment export (CSV) to read
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Value of the "Assessment Taker Name" column to analyze
    #[arg(long)]
    pub(crate) person: String,
    /// Evaluation date written into the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) evaluation_date: Option<NaiveDate>,
    /// Keep reading follow-up questions from stdin after the report
    #[arg(long)]
    pub(crate) interactive: bool,
}

pub(crate) fn run_people(args: PeopleArgs) -> Result<(), AppError> {
    let table = AssessmentImporter::from_path(&args.csv)?;
    print!("{}", render_people(&table.people()));
    Ok(())
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let table = AssessmentImporter::from_path(&args.csv)?;
    let row = table.find(&args.person)?;
    print!("{}", render_inspection(&scoring::analyze(row)));
    Ok(())
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let gateway = GeminiGateway::from_config(&config.gemini)?;
    let service = AnalysisService::new(
        Arc::new(InMemorySessionStore::default()),
        Some(Arc::new(gateway)),
        ReportPromptBuilder::new(&config.report),
    );

    let record = service.open(File::open(&args.csv)?)?;
    let evaluation_date = args
        .evaluation_date
        .unwrap_or_else(|| Local::now().date_naive());

    eprintln!("Gerando relatório para {}...", args.person.trim());
    let outcome = service
        .generate_report(&record.id, &args.person, evaluation_date)
        .await?;

    println!("{}", outcome.report.render_labeled());
    eprintln!(
        "Relatório gerado em {:.1}s",
        outcome.elapsed.as_secs_f64()
    );

    if args.interactive {
        let stdin = std::io::stdin();
        chat_loop(&service, &record.id, stdin.lock(), std::io::stdout()).await?;
    }

    Ok(())
}

/// Reads one question per line until an empty line, `/quit` or end of input.
pub(crate) async fn chat_loop<G, S, R, W>(
    service: &AnalysisService<G, S>,
    session_id: &SessionId,
    mut input: R,
    mut output: W,
) -> Result<(), AppError>
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{GREETING}")?;
    writeln!(
        output,
        "Digite uma pergunta (linha vazia ou {QUIT_COMMAND} para sair)."
    )?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() || question == QUIT_COMMAND {
            break;
        }

        writeln!(output, "Pensando...")?;
        let outcome = service.ask(session_id, question).await?;
        writeln!(
            output,
            "{}\n({:.1}s)",
            outcome.answer.content,
            outcome.elapsed.as_secs_f64()
        )?;
    }

    Ok(())
}

fn render_people(people: &[String]) -> String {
    if people.is_empty() {
        return "Nenhum avaliado encontrado.\n".to_string();
    }

    let mut output = format!("{} avaliado(s):\n", people.len());
    for name in people {
        output.push_str(&format!("- {name}\n"));
    }
    output
}

fn render_inspection(scores: &AssessmentScores) -> String {
    let mut output = format!("Avaliado(a): {}\n\nDISC\n", scores.person);

    if scores.disc.is_empty() {
        output.push_str("  nenhum fator DISC disponível\n");
    } else {
        for result in &scores.disc.factors {
            output.push_str(&format!(
                "  {:<14} Natural {:>5} | Adaptado {:>5} | Adaptação {:>5} | {}\n",
                result.factor.label(),
                format_score(result.natural),
                format_score(result.adapted),
                format_score(result.adaptation),
                result.effort.label(),
            ));
        }
        output.push('\n');
        output.push_str(&render_disc_chart(&scores.disc));
    }

    output.push_str("\nMotivadores (paixões)\n");
    push_entries(
        &mut output,
        scores
            .motivators
            .passions
            .iter()
            .map(|entry| (entry.motivator.label(), entry.score)),
    );

    output.push_str("\nCompetências fortes\n");
    push_entries(
        &mut output,
        scores
            .competencies
            .strengths
            .iter()
            .map(|entry| (entry.competency.label(), entry.score)),
    );

    output.push_str("\nCompetências a desenvolver\n");
    push_entries(
        &mut output,
        scores
            .competencies
            .gaps
            .iter()
            .map(|entry| (entry.competency.label(), entry.score)),
    );

    if let Some(reliability) = scores.competencies.reliability {
        output.push_str(&format!("\nConfiabilidade: {}\n", format_score(reliability)));
    }

    output
}

fn push_entries<'a>(output: &mut String, entries: impl Iterator<Item = (&'a str, f64)>) {
    let mut empty = true;
    for (label, score) in entries {
        empty = false;
        output.push_str(&format!("  - {label}: {}\n", format_score(score)));
    }
    if empty {
        output.push_str("  nenhum\n");
    }
}

/// Horizontal grouped bars, scaled to the largest value in the profile.
fn render_disc_chart(profile: &DiscProfile) -> String {
    let chart = profile.chart();
    let max = chart
        .series
        .iter()
        .flat_map(|series| series.values.iter().copied())
        .fold(1.0_f64, f64::max);

    let mut output = String::new();
    for (index, category) in chart.categories.iter().enumerate() {
        for (position, series) in chart.series.iter().enumerate() {
            let label = if position == 0 { *category } else { "" };
            let value = series.values.get(index).copied().unwrap_or(0.0);
            let filled = ((value.max(0.0) / max) * BAR_WIDTH as f64).round() as usize;
            output.push_str(&format!(
                "  {:<14} {:<8} {:<width$} {}\n",
                label,
                series.name,
                "#".repeat(filled.min(BAR_WIDTH)),
                format_score(value),
                width = BAR_WIDTH,
            ));
        }
    }
    output
}
