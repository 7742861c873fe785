use crate::infra::{build_planning_service, PlanningService};
use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;
use travel_desk::config::AppConfig;
use travel_desk::error::AppError;
use travel_desk::workflows::planning::{ComplianceResult, NoteKind, TripRequestPayload};

#[derive(Args, Debug)]
pub(crate) struct TripArgs {
    /// Departure city
    #[arg(long, default_value = "")]
    pub(crate) origin: String,
    /// Destination city
    #[arg(long)]
    pub(crate) destination: String,
    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) depart: Option<NaiveDate>,
    /// Return date (YYYY-MM-DD)
    #[arg(long = "return", value_parser = crate::infra::parse_date)]
    pub(crate) return_date: Option<NaiveDate>,
    /// Business purpose of the trip
    #[arg(long)]
    pub(crate) purpose: Option<String>,
    /// Total trip budget in dollars
    #[arg(long)]
    pub(crate) budget: Option<String>,
}

impl TripArgs {
    fn into_payload(self) -> TripRequestPayload {
        TripRequestPayload {
            origin: Some(self.origin),
            destination: Some(self.destination),
            depart_date: self.depart.map(|date| date.to_string()),
            return_date: self.return_date.map(|date| date.to_string()),
            purpose: self.purpose,
            budget: self.budget.map(Value::String),
            ..TripRequestPayload::default()
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    #[command(flatten)]
    pub(crate) trip: TripArgs,
    /// Print the plan as JSON instead of the markdown report
    #[arg(long)]
    pub(crate) json: bool,
    /// Book the numbered package (1-3) once the plan is built
    #[arg(long)]
    pub(crate) book: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct PolicyArgs {
    /// Keywords to look up in the policy document
    pub(crate) query: String,
    /// Maximum number of excerpts to show
    #[arg(long, default_value_t = 3)]
    pub(crate) limit: usize,
}

fn planning_service() -> Result<PlanningService, AppError> {
    let config = AppConfig::load()?;
    let service = build_planning_service(&config.data);
    Ok(service)
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs { trip, json, book } = args;
    let service = planning_service()?;

    let plan = service.plan(trip.into_payload())?;
    if json {
        let rendered = serde_json::to_string_pretty(&plan).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{}", plan.to_markdown());
    }

    if let Some(number) = book {
        let confirmation = service.book(&plan.plan_id, number)?;
        println!("\n{}", confirmation.to_text());
    }

    Ok(())
}

pub(crate) fn run_compliance(args: TripArgs) -> Result<(), AppError> {
    let service = planning_service()?;
    let result = service.check_compliance(args.into_payload());
    render_compliance(&result);
    Ok(())
}

pub(crate) fn run_preferences() -> Result<(), AppError> {
    let service = planning_service()?;
    let context = service.context();

    println!("{}", context.preference_summary());
    println!(
        "\nBased on {} trips in the travel history.",
        context.preferences().total_trips
    );
    Ok(())
}

pub(crate) fn run_policy_search(args: PolicyArgs) -> Result<(), AppError> {
    let service = planning_service()?;
    let excerpts = service.search_policy(&args.query, args.limit);

    if excerpts.is_empty() {
        println!("No policy sections mention \"{}\".", args.query);
        return Ok(());
    }

    println!("Policy excerpts for \"{}\"", args.query);
    for excerpt in excerpts {
        println!(
            "\n[section {} | {} matching terms]\n{}",
            excerpt.chunk + 1,
            excerpt.score,
            excerpt.text
        );
    }
    Ok(())
}

fn render_compliance(result: &ComplianceResult) {
    println!("Policy status: {}", result.status.label());
    if !result.violations.is_empty() {
        println!("Violations:");
        for violation in &result.violations {
            println!("  - {violation}");
        }
    }
    for note in &result.notes {
        let marker = match note.kind {
            NoteKind::Confirmed => "ok",
            NoteKind::Caution => "check",
            NoteKind::Detail => "detail",
        };
        println!("  [{marker}] {}", note.message);
    }
}
