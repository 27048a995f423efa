use crate::commands::{run_inspect, run_people, run_report, InspectArgs, PeopleArgs, ReportArgs};
use crate::server;
use assessment_ai::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Insight Service",
    about = "Score behavioral assessment exports and generate AI-assisted reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the people found in an assessment export
    People(PeopleArgs),
    /// Print DISC, motivator and competency scores for one person (no AI call)
    Inspect(InspectArgs),
    /// Generate the AI report for one person, optionally followed by a chat loop
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::People(args) => run_people(args),
        Command::Inspect(args) => run_inspect(args),
        Command::Report(args) => run_report(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["assessment-ai-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_accepts_interactive_flag_and_date() {
        let cli = Cli::try_parse_from([
            "assessment-ai-api",
            "report",
            "--csv",
            "export.csv",
            "--person",
            "Ana",
            "--evaluation-date",
            "2024-03-15",
            "--interactive",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.person, "Ana");
                assert!(args.interactive);
                assert!(args.evaluation_date.is_some());
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn inspect_requires_person() {
        assert!(Cli::try_parse_from(["assessment-ai-api", "inspect", "--csv", "export.csv"]).is_err());
    }
}
