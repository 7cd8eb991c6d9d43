use crate::demo::{run_assess, run_demo, run_plan, run_programs};
use crate::server;
use biz_finder::error::AppError;
use biz_finder::workflows::eligibility::{BonusFlags, ProfileSubmission, Sector};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Biz Finder",
    about = "Score SME policy-fund eligibility, match programs and draft loan applications",
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
    /// Score a business profile and print the dashboard report
    Assess(AssessArgs),
    /// Draft a policy-fund loan application for a matched program
    Plan(PlanArgs),
    /// List the policy-fund program table
    Programs(ProgramsArgs),
    /// Walk through strong, typical and ineligible showcase profiles
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured program catalog CSV
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

/// Intake form fields. Amounts are in 100M KRW.
#[derive(Args, Debug, Clone)]
pub(crate) struct ProfileArgs {
    /// Industry sector (e.g. manufacturing, it_software, 제조업)
    #[arg(long, default_value = "manufacturing", value_parser = crate::infra::parse_sector)]
    pub(crate) sector: Sector,
    /// Years since founding
    #[arg(long, default_value_t = 3)]
    pub(crate) years: i64,
    /// Annual revenue
    #[arg(long, default_value_t = 10.0)]
    pub(crate) revenue: f64,
    /// Operating profit (negative for a loss)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub(crate) profit: f64,
    /// Outstanding policy-fund loan balance
    #[arg(long, default_value_t = 2.0)]
    pub(crate) loan: f64,
    /// Debt ratio in percent
    #[arg(long, default_value_t = 250)]
    pub(crate) debt_ratio: i64,
    /// Full-time employees
    #[arg(long, default_value_t = 5)]
    pub(crate) employees: i64,
    /// Headcount grew compared to last year
    #[arg(long)]
    pub(crate) employees_grew: bool,
    /// CEO personal credit score (0-1000)
    #[arg(long, default_value_t = 850)]
    pub(crate) credit_score: i64,
    /// Registered corporate research lab
    #[arg(long)]
    pub(crate) research_lab: bool,
    /// Holds a registered patent
    #[arg(long)]
    pub(crate) patent: bool,
    /// Venture or Inno-Biz certified
    #[arg(long)]
    pub(crate) venture: bool,
    /// Women- or youth-led business
    #[arg(long)]
    pub(crate) women_or_youth: bool,
}

impl ProfileArgs {
    pub(crate) fn into_submission(self) -> ProfileSubmission {
        ProfileSubmission {
            sector: self.sector,
            years_established: self.years,
            annual_revenue: self.revenue,
            operating_profit: self.profit,
            policy_loan_balance: self.loan,
            debt_ratio: self.debt_ratio,
            employee_count: self.employees,
            employee_grew_yoy: self.employees_grew,
            ceo_credit_score: self.credit_score,
            bonus_flags: BonusFlags {
                has_research_lab: self.research_lab,
                has_patent: self.patent,
                is_venture_certified: self.venture,
                is_women_or_youth_led: self.women_or_youth,
            },
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Program catalog CSV (defaults to the built-in table)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Program key to apply for (defaults to the first matched program)
    #[arg(long)]
    pub(crate) program: Option<String>,
    /// Issue date for the draft (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) issued_on: Option<NaiveDate>,
    /// Program catalog CSV (defaults to the built-in table)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the draft as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramsArgs {
    /// Program catalog CSV (defaults to the built-in table)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Issue date for the showcase draft (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) issued_on: Option<NaiveDate>,
    /// Skip the business-plan portion of the demo
    #[arg(long)]
    pub(crate) skip_plan: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Plan(args) => run_plan(args),
        Command::Programs(args) => run_programs(args),
        Command::Demo(args) => run_demo(args),
    }
}
