use std::path::PathBuf;

use borla::api::types::{
    Approval, CollectorRegistration, CompanyProfileUpdate, CompanyRegistration, Role,
    SupervisorProfileUpdate, SupervisorRegistration, Weekday, WorkingDays,
};
use borla::api::{auth, collector, company, scheduled, split_list, supervisor};
use borla::config::{ClientConfig, ConfigError};
use borla::routes::{self, Route};
use borla::{ApiClient, ApiError, FileStore, Session};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no company in session; pass --company or log in as a company owner")]
    MissingCompany,
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "borla", about = "Borla Tracker administration CLI")]
struct Cli {
    /// Backend origin; defaults to the hosted backend.
    #[arg(long, env = "BORLA_BASE_URL")]
    base_url: Option<String>,

    /// Session file; defaults to `$HOME/.borla/session.json`.
    #[arg(long, env = "BORLA_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long, env = "BORLA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "supervisor")]
        role: Role,
    },
    Logout,
    /// Show the stored user and company snapshots.
    Whoami,
    Company(CompanyCommand),
    Supervisor(SupervisorCommand),
    Collector(CollectorCommand),
    Requests(RequestsCommand),
    /// Resolve a console path and the redirect that applies to it.
    Route {
        path: String,
    },
}

#[derive(Args, Debug)]
struct CompanyCommand {
    #[command(subcommand)]
    command: CompanySubcommand,
}

#[derive(Subcommand, Debug)]
enum CompanySubcommand {
    Register(CompanyRegisterArgs),
    Profile,
    Update(CompanyUpdateArgs),
}

#[derive(Args, Debug)]
struct CompanyRegisterArgs {
    #[arg(long)]
    company_name: String,
    #[arg(long, help = "Logo URL")]
    profile_photo: String,
    #[arg(long)]
    phone: String,
    #[arg(long, env = "BORLA_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    gst_number: String,
    #[arg(long, help = "Complaint resolution SLA in hours")]
    sla: Option<u32>,
    #[arg(long, value_delimiter = ',', help = "Working days, e.g. mon,tue,wed (default: every day)")]
    working_days: Vec<Weekday>,
    #[arg(long)]
    opening_time: String,
    #[arg(long)]
    closing_time: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "", help = "Comma-separated city names")]
    cities: String,
    #[arg(long, default_value = "")]
    price_min: String,
    #[arg(long, default_value = "")]
    price_max: String,
}

#[derive(Args, Debug)]
struct CompanyUpdateArgs {
    #[arg(long)]
    company_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    profile_photo: Option<String>,
    #[arg(long)]
    opening_time: Option<String>,
    #[arg(long)]
    closing_time: Option<String>,
    #[arg(long)]
    price_min: Option<String>,
    #[arg(long)]
    price_max: Option<String>,
    #[arg(long)]
    sla: Option<u32>,
    #[arg(long, value_delimiter = ',')]
    working_days: Option<Vec<Weekday>>,
    #[arg(long)]
    cities: Option<String>,
}

#[derive(Args, Debug)]
struct SupervisorCommand {
    #[command(subcommand)]
    command: SupervisorSubcommand,
}

#[derive(Subcommand, Debug)]
enum SupervisorSubcommand {
    Create {
        #[arg(long)]
        phone: String,
        #[arg(long, env = "BORLA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, help = "Company id (default: the session's company)")]
        company: Option<u64>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "", help = "Comma-separated areas")]
        areas: String,
        #[arg(long)]
        team_size: Option<u32>,
        #[arg(long)]
        photo_url: Option<String>,
    },
    List {
        #[arg(long, help = "Only supervisors of this company (default: the session's company)")]
        company: Option<u64>,
        #[arg(long, default_value_t = false, conflicts_with = "company")]
        all: bool,
    },
    Profile,
    Update {
        #[arg(long)]
        team_size: Option<u32>,
        #[arg(long)]
        photo_url: Option<String>,
    },
}

#[derive(Args, Debug)]
struct CollectorCommand {
    #[command(subcommand)]
    command: CollectorSubcommand,
}

#[derive(Subcommand, Debug)]
enum CollectorSubcommand {
    Register(CollectorRegisterArgs),
    List,
    /// Collectors of one company (default: the session's company).
    Company {
        company_id: Option<u64>,
    },
    /// Collectors awaiting approval.
    Pending,
    Approve {
        collector_id: u64,
    },
    Reject {
        collector_id: u64,
    },
}

#[derive(Args, Debug)]
struct CollectorRegisterArgs {
    #[arg(long)]
    phone: String,
    #[arg(long, env = "BORLA_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    vehicle_number: String,
    #[arg(long)]
    vehicle_type: String,
    #[arg(long)]
    rate: String,
    #[arg(long, default_value = "")]
    zone: String,
    #[arg(long, default_value = "full_time")]
    employment_type: String,
    #[arg(long, default_value_t = false)]
    private: bool,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, help = "Company id (default: the session's company)")]
    company: Option<u64>,
    #[arg(long)]
    supervisor: Option<String>,
    #[arg(long)]
    bank_account: Option<String>,
}

#[derive(Args, Debug)]
struct RequestsCommand {
    #[command(subcommand)]
    command: RequestsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RequestsSubcommand {
    /// Pickups waiting for a collector.
    Pending,
    Assign {
        request_id: u64,
        collector_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;
    if let Err(CliError::Api(error)) = &result {
        if let Some(route) = routes::redirect_for(error) {
            eprintln!("hint: run `borla login` to start a new session ({route})");
        } else if error.retryable() {
            eprintln!("hint: the backend may be temporarily unavailable; try again");
        }
    }
    result
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = build_client(cli.base_url.as_deref(), cli.session_file)?;
    match cli.command {
        Command::Login { phone, password, role } => {
            let grant = auth::login(&client, &phone, &password, role).await?;
            print_json(&json!({
                "user": grant.user,
                "company": grant.company,
                "next": Route::after_login(role).path(),
            }))
        }
        Command::Logout => {
            auth::logout(&client).await?;
            print_json(&json!({ "next": Route::Login.path() }))
        }
        Command::Whoami => {
            let session = client.session();
            print_json(&json!({
                "authenticated": session.is_authenticated(),
                "user": session.user::<Value>(),
                "company": session.company::<Value>(),
            }))
        }
        Command::Company(cmd) => run_company(&client, cmd).await,
        Command::Supervisor(cmd) => run_supervisor(&client, cmd).await,
        Command::Collector(cmd) => run_collector(&client, cmd).await,
        Command::Requests(cmd) => run_requests(&client, cmd).await,
        Command::Route { path } => run_route(&client, &path),
    }
}

fn build_client(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<ApiClient, CliError> {
    let config = ClientConfig::resolve(base_url, session_file)?;
    tracing::debug!(base_url = %config.base_url, session = %config.session_file.display(), "client configured");
    let session = Session::new(FileStore::new(config.session_file.clone()));
    Ok(ApiClient::new(&config, session)?)
}

async fn run_company(client: &ApiClient, cmd: CompanyCommand) -> Result<(), CliError> {
    match cmd.command {
        CompanySubcommand::Register(args) => {
            let working_days = if args.working_days.is_empty() {
                WorkingDays::all()
            } else {
                WorkingDays::only(&args.working_days)
            };
            let registration = CompanyRegistration {
                company_name: args.company_name,
                profile_photo: args.profile_photo,
                phone_number: args.phone,
                password: args.password,
                gst_number: args.gst_number,
                complaint_resolution_sla: args.sla,
                working_days,
                opening_time: args.opening_time,
                closing_time: args.closing_time,
                email: args.email,
                address: args.address,
                operational_cities: split_list(&args.cities),
                price_min: args.price_min,
                price_max: args.price_max,
            };
            let grant = company::register(client, &registration).await?;
            print_json(&json!({
                "user": grant.user,
                "company": grant.company,
                "next": Route::after_login(Role::Supervisor).path(),
            }))
        }
        CompanySubcommand::Profile => print_json(&company::profile(client).await?),
        CompanySubcommand::Update(args) => {
            let update = CompanyProfileUpdate {
                company_name: args.company_name,
                email: args.email,
                phone_number: args.phone,
                address: args.address,
                profile_photo: args.profile_photo,
                opening_time: args.opening_time,
                closing_time: args.closing_time,
                price_min: args.price_min,
                price_max: args.price_max,
                complaint_resolution_sla: args.sla,
                working_days: args.working_days.as_deref().map(WorkingDays::only),
                operational_cities: args.cities.as_deref().map(split_list),
            };
            print_json(&company::update_profile(client, &update).await?)
        }
    }
}

async fn run_supervisor(client: &ApiClient, cmd: SupervisorCommand) -> Result<(), CliError> {
    match cmd.command {
        SupervisorSubcommand::Create { phone, password, company, email, areas, team_size, photo_url } => {
            let registration = SupervisorRegistration {
                phone_number: phone,
                password,
                company: company_or_session(client, company)?,
                email,
                assigned_areas: split_list(&areas),
                team_size,
                photo_url,
            };
            print_json(&supervisor::create(client, &registration).await?)
        }
        SupervisorSubcommand::List { company, all } => {
            let company = if all { None } else { company.or_else(|| client.session().company_id()) };
            let supervisors = match company {
                Some(company_id) => supervisor::list_for_company(client, company_id).await?,
                None => supervisor::list(client).await?,
            };
            print_json(&supervisors)
        }
        SupervisorSubcommand::Profile => print_json(&supervisor::profile(client).await?),
        SupervisorSubcommand::Update { team_size, photo_url } => {
            let update = SupervisorProfileUpdate { team_size, photo_url };
            print_json(&supervisor::update_profile(client, &update).await?)
        }
    }
}

async fn run_collector(client: &ApiClient, cmd: CollectorCommand) -> Result<(), CliError> {
    match cmd.command {
        CollectorSubcommand::Register(args) => {
            let company = args.company.or_else(|| client.session().company_id());
            let registration = CollectorRegistration {
                phone_number: args.phone,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
                vehicle_number: args.vehicle_number,
                vehicle_type: args.vehicle_type,
                daily_wage_or_incentive_rate: args.rate,
                assigned_area_zone: args.zone,
                employment_type: args.employment_type,
                is_private_collector: args.private,
                email: args.email,
                company,
                supervisor: args.supervisor,
                bank_account_details: args.bank_account,
            };
            print_json(&collector::register(client, &registration).await?)
        }
        CollectorSubcommand::List => print_json(&collector::list(client).await?),
        CollectorSubcommand::Company { company_id } => {
            let company_id = company_or_session(client, company_id)?;
            print_json(&collector::for_company(client, company_id).await?)
        }
        CollectorSubcommand::Pending => print_json(&collector::pending_approval(client).await?),
        CollectorSubcommand::Approve { collector_id } => {
            print_json(&collector::set_approval(client, collector_id, Approval::Approve).await?)
        }
        CollectorSubcommand::Reject { collector_id } => {
            print_json(&collector::set_approval(client, collector_id, Approval::Reject).await?)
        }
    }
}

async fn run_requests(client: &ApiClient, cmd: RequestsCommand) -> Result<(), CliError> {
    match cmd.command {
        RequestsSubcommand::Pending => print_json(&scheduled::list_pending(client).await?),
        RequestsSubcommand::Assign { request_id, collector_id } => {
            print_json(&scheduled::assign(client, request_id, collector_id).await?)
        }
    }
}

/// Print the route for `path` and where the current session would be sent
/// instead, if anywhere.
fn run_route(client: &ApiClient, path: &str) -> Result<(), CliError> {
    let route = Route::from_path(path).ok_or_else(|| CliError::UnknownRoute(path.to_owned()))?;
    let redirect = routes::guard(route, client.session().is_authenticated());
    print_json(&json!({
        "route": format!("{route:?}"),
        "path": route.path(),
        "public": route.is_public(),
        "redirect": redirect.map(Route::path),
    }))
}

fn company_or_session(client: &ApiClient, explicit: Option<u64>) -> Result<u64, CliError> {
    match explicit {
        Some(id) => Ok(id),
        None => client.session().company_id().ok_or(CliError::MissingCompany),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
