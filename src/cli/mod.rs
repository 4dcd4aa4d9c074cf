//! CLI module for the samuday command-line interface.
//!
//! Provides subcommands for working against a society management
//! backend:
//! - `login` / `logout` / `register` - session management
//! - `menu` - show the sections available to the current role
//! - `dashboard` - profile, latest notices, and latest complaints
//! - `complaints`, `bookings`, `payments`, `notices`, `visitors`,
//!   `residents` - the role-scoped resource surfaces
//! - `report` - CSV report download

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::profile::ProfileUpdate;
use crate::api::residents::ResidentUpdate;
use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::nav::{visible_routes, Role};
use crate::session::SessionStore;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "samuday")]
#[command(author, version, about = "A command-line client for society and apartment management", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "samuday.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (default: http://localhost:8000)
    #[arg(long, env = "SAMUDAY_API_URL")]
    pub api_url: Option<String>,

    /// Authentication token, overriding the stored session
    #[arg(long, env = "SAMUDAY_TOKEN")]
    pub token: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        username: String,
        password: String,
    },

    /// Create a new account
    Register {
        username: String,
        password: String,
        /// Contact phone number
        #[arg(long)]
        phone: String,
        /// Apartment number, e.g. B-204
        #[arg(long)]
        apartment: String,
        /// Account role
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        email: Option<String>,
    },

    /// Invalidate the token and clear the stored session
    Logout,

    /// Show who the backend thinks you are
    Whoami,

    /// List the sections available to the current session
    Menu,

    /// Profile, latest notices, and latest complaints at a glance
    Dashboard,

    /// Profile management
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Complaints (residents file, admins resolve)
    #[command(subcommand)]
    Complaints(ComplaintsCommands),

    /// Facilities available for booking
    #[command(subcommand)]
    Facilities(FacilitiesCommands),

    /// Facility bookings
    #[command(subcommand)]
    Bookings(BookingsCommands),

    /// Maintenance payments
    #[command(subcommand)]
    Payments(PaymentsCommands),

    /// Notice board
    #[command(subcommand)]
    Notices(NoticesCommands),

    /// Visitor log (security desk)
    #[command(subcommand)]
    Visitors(VisitorsCommands),

    /// Resident administration (admin)
    #[command(subcommand)]
    Residents(ResidentsCommands),

    /// Download a CSV report (admin)
    Report {
        #[arg(value_enum)]
        report_type: ReportType,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the authenticated user's profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ComplaintsCommands {
    /// List complaints (admins see all, residents their own)
    List,
    /// File a complaint
    Create {
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Change a complaint's status (admin)
    SetStatus {
        id: i64,
        #[arg(value_enum)]
        status: ComplaintStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum FacilitiesCommands {
    /// List facilities
    List,
    /// Add a facility (admin)
    Add {
        name: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommands {
    /// List facility bookings
    List,
    /// Request a booking
    Create {
        /// Facility name, e.g. "Community Hall"
        facility: String,
        /// Start time (RFC 3339 or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: String,
        /// End time (RFC 3339 or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        end: String,
    },
    /// Approve a pending booking (admin)
    Approve { id: i64 },
    /// Reject a pending booking (admin)
    Reject { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PaymentsCommands {
    /// List payments
    List,
    /// Record a payment (starts pending)
    Create {
        amount: f64,
        /// Payment method, e.g. UPI, cash
        #[arg(long)]
        method: String,
    },
    /// Settle a pending payment (admin)
    SetStatus {
        id: i64,
        #[arg(value_enum)]
        status: PaymentStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoticesCommands {
    /// List notices, newest first
    List,
    /// Post a notice (admin)
    Post {
        title: String,
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum VisitorsCommands {
    /// Log a visitor entry (security)
    Checkin {
        /// Visitor name
        name: String,
        #[arg(long)]
        phone: String,
        /// Id of the resident being visited
        #[arg(long)]
        resident_id: i64,
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// List security log entries
    Logs,
    /// Stamp a visitor's exit time
    Checkout {
        /// Security log entry id
        log_id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResidentsCommands {
    /// List residents (admin)
    List,
    /// Update a resident's record (admin)
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        apartment: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// active or inactive
        #[arg(long)]
        status: Option<String>,
    },
    /// Remove a resident (admin)
    Remove { id: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Resident,
    Admin,
    Security,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Resident => Role::Resident,
            RoleArg::Admin => Role::Admin,
            RoleArg::Security => Role::Security,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ComplaintStatus {
    Open,
    #[value(name = "in_progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentStatus {
    Completed,
    Rejected,
}

impl PaymentStatus {
    fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportType {
    Complaints,
    Payments,
    Bookings,
}

impl ReportType {
    fn as_str(&self) -> &'static str {
        match self {
            ReportType::Complaints => "complaints",
            ReportType::Payments => "payments",
            ReportType::Bookings => "bookings",
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: &Config) -> Result<()> {
    let mut store = SessionStore::load(config.session_path());

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let token = cli
        .token
        .clone()
        .or_else(|| store.token().map(String::from));
    let api = ApiClient::new(base_url, config.api.timeout, token)?;

    match &cli.command {
        Commands::Login { username, password } => {
            cmd_login(&api, &mut store, username, password).await
        }
        Commands::Register {
            username,
            password,
            phone,
            apartment,
            role,
            email,
        } => {
            cmd_register(
                &api,
                username,
                password,
                phone,
                apartment,
                (*role).into(),
                email.clone(),
            )
            .await
        }
        Commands::Logout => cmd_logout(&api, &mut store).await,
        Commands::Whoami => cmd_whoami(&api).await,
        Commands::Menu => cmd_menu(&store, cli.token.is_some()),
        Commands::Dashboard => cmd_dashboard(&api).await,
        Commands::Profile(cmd) => match cmd {
            ProfileCommands::Show => cmd_profile_show(&api).await,
            ProfileCommands::Update {
                first_name,
                last_name,
                email,
                phone,
            } => {
                let update = ProfileUpdate {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    email: email.clone(),
                    phone_number: phone.clone(),
                };
                cmd_profile_update(&api, update).await
            }
        },
        Commands::Complaints(cmd) => match cmd {
            ComplaintsCommands::List => cmd_complaints_list(&api).await,
            ComplaintsCommands::Create { title, description } => {
                cmd_complaints_create(&api, title, description).await
            }
            ComplaintsCommands::SetStatus { id, status } => {
                cmd_complaints_set_status(&api, *id, *status).await
            }
        },
        Commands::Facilities(cmd) => match cmd {
            FacilitiesCommands::List => cmd_facilities_list(&api).await,
            FacilitiesCommands::Add { name, description } => {
                cmd_facilities_add(&api, name, description).await
            }
        },
        Commands::Bookings(cmd) => match cmd {
            BookingsCommands::List => cmd_bookings_list(&api).await,
            BookingsCommands::Create {
                facility,
                start,
                end,
            } => cmd_bookings_create(&api, facility, start, end).await,
            BookingsCommands::Approve { id } => cmd_bookings_approve(&api, *id, true).await,
            BookingsCommands::Reject { id } => cmd_bookings_approve(&api, *id, false).await,
        },
        Commands::Payments(cmd) => match cmd {
            PaymentsCommands::List => cmd_payments_list(&api).await,
            PaymentsCommands::Create { amount, method } => {
                cmd_payments_create(&api, *amount, method).await
            }
            PaymentsCommands::SetStatus { id, status } => {
                cmd_payments_set_status(&api, *id, *status).await
            }
        },
        Commands::Notices(cmd) => match cmd {
            NoticesCommands::List => cmd_notices_list(&api).await,
            NoticesCommands::Post { title, content } => {
                cmd_notices_post(&api, title, content).await
            }
        },
        Commands::Visitors(cmd) => match cmd {
            VisitorsCommands::Checkin {
                name,
                phone,
                resident_id,
                vehicle,
            } => cmd_visitors_checkin(&api, name, phone, *resident_id, vehicle.as_deref()).await,
            VisitorsCommands::Logs => cmd_visitors_logs(&api).await,
            VisitorsCommands::Checkout { log_id } => cmd_visitors_checkout(&api, *log_id).await,
        },
        Commands::Residents(cmd) => match cmd {
            ResidentsCommands::List => cmd_residents_list(&api).await,
            ResidentsCommands::Update {
                id,
                email,
                apartment,
                phone,
                status,
            } => {
                let update = ResidentUpdate {
                    email: email.clone(),
                    apartment_no: apartment.clone(),
                    phone_number: phone.clone(),
                    status: status.clone(),
                };
                cmd_residents_update(&api, *id, update).await
            }
            ResidentsCommands::Remove { id } => cmd_residents_remove(&api, *id).await,
        },
        Commands::Report {
            report_type,
            output,
        } => cmd_report(&api, *report_type, output.as_deref()).await,
    }
}

/// Turn an API failure into the message shown to the user. A 401 gets
/// a login hint appended, since the stored token is the usual culprit.
fn explain(err: ApiError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow::anyhow!("{}\nYour session may have expired. Run `samuday login` again.", err)
    } else {
        anyhow::Error::new(err)
    }
}

// ============================================================================
// Session commands
// ============================================================================

async fn cmd_login(
    api: &ApiClient,
    store: &mut SessionStore,
    username: &str,
    password: &str,
) -> Result<()> {
    let response = api.login(username, password).await.map_err(explain)?;

    store.set(response.token, response.role)?;

    println!("Logged in as {} ({})", username, response.role);
    println!();
    println!("Available sections:");
    for route in visible_routes(true, Some(response.role)) {
        println!("  {:<20} {}", route.label, route.path);
    }
    println!();
    Ok(())
}

async fn cmd_register(
    api: &ApiClient,
    username: &str,
    password: &str,
    phone: &str,
    apartment: &str,
    role: Role,
    email: Option<String>,
) -> Result<()> {
    let account = crate::api::auth::NewAccount {
        username: username.to_string(),
        password: password.to_string(),
        email,
        phone_number: phone.to_string(),
        apartment_no: apartment.to_string(),
        role,
    };

    let response = api.register(&account).await.map_err(explain)?;

    println!("{}", response.message);
    println!("Run `samuday login {}` to sign in.", username);
    Ok(())
}

async fn cmd_logout(api: &ApiClient, store: &mut SessionStore) -> Result<()> {
    if api.has_session() {
        // Best effort: the local session goes away even if the server
        // side fails.
        if let Err(e) = api.logout().await {
            tracing::warn!("Server-side logout failed: {}", e);
        }
    }

    store.clear()?;
    println!("Logged out.");
    Ok(())
}

async fn cmd_whoami(api: &ApiClient) -> Result<()> {
    let profile = api.user_profile().await.map_err(explain)?;
    let name = match (profile.first_name.as_str(), profile.last_name.as_str()) {
        ("", "") => profile.username.clone(),
        (first, last) => format!("{} {}", first, last).trim().to_string(),
    };
    println!("{} ({}) - apartment {}", name, profile.role, profile.apartment_no);
    Ok(())
}

/// Session state the menu renders from. A token passed on the command
/// line counts as authenticated even without a stored session, but its
/// role is unknown, so the stored role (which belongs to a different
/// token) is discarded and only the always-visible sections show.
fn menu_state(store: &SessionStore, token_override: bool) -> (bool, Option<Role>) {
    if token_override {
        (true, None)
    } else {
        (store.is_authenticated(), store.role())
    }
}

fn cmd_menu(store: &SessionStore, token_override: bool) -> Result<()> {
    let (authenticated, role) = menu_state(store, token_override);

    if authenticated {
        match role {
            Some(role) if role != Role::Unknown => println!("Signed in as role: {}", role),
            _ => println!("Signed in (role not recognized; showing common sections only)"),
        }
    } else {
        println!("Not signed in.");
    }
    println!();

    for route in visible_routes(authenticated, role) {
        println!("  {:<20} {}", route.label, route.path);
    }
    println!();
    Ok(())
}

// ============================================================================
// Dashboard
// ============================================================================

async fn cmd_dashboard(api: &ApiClient) -> Result<()> {
    // The three fetches are independent: one failing section renders
    // an error line while the others still display.
    let (profile, notices, complaints) =
        tokio::join!(api.user_profile(), api.notices(), api.complaints());

    println!();
    match profile {
        Ok(profile) => {
            println!("Welcome, {}!", profile.username);
            println!("Role: {}", profile.role);
        }
        Err(e) => println!("[!!] Failed to fetch user details: {}", e),
    }

    println!();
    println!("=== Notice Board ===");
    match notices {
        Ok(notices) if notices.is_empty() => println!("No notices."),
        Ok(notices) => {
            for notice in notices.iter().take(5) {
                println!(
                    "  {}  {:<30}  {}",
                    short_timestamp(&notice.created_at),
                    truncate(&notice.title, 30),
                    truncate(&notice.content, 50)
                );
            }
        }
        Err(e) => println!("[!!] Error fetching notices: {}", e),
    }

    println!();
    println!("=== Recent Complaints ===");
    match complaints {
        Ok(complaints) if complaints.is_empty() => println!("No complaints."),
        Ok(complaints) => {
            for complaint in complaints.iter().take(5) {
                println!(
                    "  #{:<5} {:<30}  [{}]",
                    complaint.id,
                    truncate(&complaint.title, 30),
                    complaint.status
                );
            }
        }
        Err(e) => println!("[!!] Error fetching complaints: {}", e),
    }

    println!();
    Ok(())
}

// ============================================================================
// Profile
// ============================================================================

async fn cmd_profile_show(api: &ApiClient) -> Result<()> {
    let profile = api.user_profile().await.map_err(explain)?;

    println!();
    println!("=== Profile: {} ===", profile.username);
    println!();
    println!("Id:         {}", profile.id);
    println!("Name:       {} {}", profile.first_name, profile.last_name);
    println!("Email:      {}", profile.email);
    println!("Role:       {}", profile.role);
    println!("Apartment:  {}", profile.apartment_no);
    println!("Phone:      {}", profile.phone_number);
    println!();
    Ok(())
}

async fn cmd_profile_update(api: &ApiClient, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one of --first-name, --last-name, --email, --phone.");
    }

    let response = api.update_profile(&update).await.map_err(explain)?;
    if response.success {
        println!(
            "{}",
            response
                .message
                .unwrap_or_else(|| "Profile updated.".to_string())
        );
    } else {
        anyhow::bail!("Profile update failed");
    }
    Ok(())
}

// ============================================================================
// Complaints
// ============================================================================

async fn cmd_complaints_list(api: &ApiClient) -> Result<()> {
    let complaints = api.complaints().await.map_err(explain)?;

    if complaints.is_empty() {
        println!("No complaints found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<30}  {:<12}  {:<16}  {:<15}",
        "ID", "TITLE", "STATUS", "CREATED", "FILED BY"
    );
    println!("{}", "-".repeat(90));
    for complaint in complaints {
        println!(
            "{:<6}  {:<30}  {:<12}  {:<16}  {:<15}",
            complaint.id,
            truncate(&complaint.title, 30),
            complaint.status,
            short_timestamp(&complaint.created_at),
            complaint.resident_name.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

async fn cmd_complaints_create(api: &ApiClient, title: &str, description: &str) -> Result<()> {
    let complaint = api
        .create_complaint(title, description)
        .await
        .map_err(explain)?;
    println!("Complaint #{} filed ({}).", complaint.id, complaint.status);
    Ok(())
}

async fn cmd_complaints_set_status(
    api: &ApiClient,
    id: i64,
    status: ComplaintStatus,
) -> Result<()> {
    let response = api
        .update_complaint_status(id, status.as_str())
        .await
        .map_err(explain)?;
    println!("{} (now {})", response.message, response.status);
    Ok(())
}

// ============================================================================
// Facilities & bookings
// ============================================================================

async fn cmd_facilities_list(api: &ApiClient) -> Result<()> {
    let facilities = api.facilities().await.map_err(explain)?;

    if facilities.is_empty() {
        println!("No facilities found.");
        return Ok(());
    }

    println!();
    println!("{:<6}  {:<25}  {:<12}  {}", "ID", "NAME", "STATUS", "DESCRIPTION");
    println!("{}", "-".repeat(90));
    for facility in facilities {
        println!(
            "{:<6}  {:<25}  {:<12}  {}",
            facility.id,
            truncate(&facility.name, 25),
            facility.availability_status,
            truncate(&facility.description, 40)
        );
    }
    println!();
    Ok(())
}

async fn cmd_facilities_add(api: &ApiClient, name: &str, description: &str) -> Result<()> {
    let facility = api
        .create_facility(name, description)
        .await
        .map_err(explain)?;
    println!("Facility #{} added: {}", facility.id, facility.name);
    Ok(())
}

async fn cmd_bookings_list(api: &ApiClient) -> Result<()> {
    let bookings = api.facility_bookings().await.map_err(explain)?;

    if bookings.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<20}  {:<16}  {:<16}  {:<10}  {:<15}",
        "ID", "FACILITY", "START", "END", "STATUS", "RESIDENT"
    );
    println!("{}", "-".repeat(95));
    for booking in bookings {
        println!(
            "{:<6}  {:<20}  {:<16}  {:<16}  {:<10}  {:<15}",
            booking.id,
            truncate(&booking.facility_name, 20),
            short_timestamp(&booking.start_time),
            booking
                .end_time
                .as_deref()
                .map(short_timestamp)
                .unwrap_or_else(|| "-".to_string()),
            booking.status,
            booking.resident.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

async fn cmd_bookings_create(api: &ApiClient, facility: &str, start: &str, end: &str) -> Result<()> {
    let start = parse_datetime(start).context("Invalid --start time")?;
    let end = parse_datetime(end).context("Invalid --end time")?;

    let booking = api
        .create_booking(facility, &start, &end)
        .await
        .map_err(explain)?;
    println!(
        "Booking #{} requested for {} ({}).",
        booking.id, booking.facility_name, booking.status
    );
    println!("An admin has to approve it before it is confirmed.");
    Ok(())
}

async fn cmd_bookings_approve(api: &ApiClient, id: i64, approve: bool) -> Result<()> {
    let response = if approve {
        api.approve_booking(id).await.map_err(explain)?
    } else {
        api.reject_booking(id).await.map_err(explain)?
    };
    println!("{}", response.message);
    Ok(())
}

// ============================================================================
// Payments
// ============================================================================

async fn cmd_payments_list(api: &ApiClient) -> Result<()> {
    let payments = api.payments().await.map_err(explain)?;

    if payments.is_empty() {
        println!("No payments found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:>10}  {:<12}  {:<15}  {:<16}",
        "ID", "AMOUNT", "STATUS", "METHOD", "DATE"
    );
    println!("{}", "-".repeat(70));
    for payment in payments {
        println!(
            "{:<6}  {:>10}  {:<12}  {:<15}  {:<16}",
            payment.id,
            payment.amount,
            payment.payment_status,
            truncate(&payment.payment_method, 15),
            short_timestamp(&payment.payment_date)
        );
    }
    println!();
    Ok(())
}

async fn cmd_payments_create(api: &ApiClient, amount: f64, method: &str) -> Result<()> {
    if amount <= 0.0 {
        anyhow::bail!("Amount must be positive");
    }

    let payment = api.create_payment(amount, method).await.map_err(explain)?;
    println!(
        "Payment #{} of {} recorded ({}).",
        payment.id, payment.amount, payment.payment_status
    );
    Ok(())
}

async fn cmd_payments_set_status(api: &ApiClient, id: i64, status: PaymentStatus) -> Result<()> {
    let response = api
        .settle_payment(id, status.as_str())
        .await
        .map_err(explain)?;
    println!("{}", response.message);
    Ok(())
}

// ============================================================================
// Notices
// ============================================================================

async fn cmd_notices_list(api: &ApiClient) -> Result<()> {
    let notices = api.notices().await.map_err(explain)?;

    if notices.is_empty() {
        println!("No notices found.");
        return Ok(());
    }

    println!();
    for notice in notices {
        println!(
            "[{}] {} (by {})",
            short_timestamp(&notice.created_at),
            notice.title,
            notice.posted_by.as_deref().unwrap_or("-")
        );
        println!("    {}", notice.content);
        println!();
    }
    Ok(())
}

async fn cmd_notices_post(api: &ApiClient, title: &str, content: &str) -> Result<()> {
    let notice = api.post_notice(title, content).await.map_err(explain)?;
    println!("Notice #{} posted: {}", notice.id, notice.title);
    Ok(())
}

// ============================================================================
// Visitors
// ============================================================================

async fn cmd_visitors_checkin(
    api: &ApiClient,
    name: &str,
    phone: &str,
    resident_id: i64,
    vehicle: Option<&str>,
) -> Result<()> {
    let response = api
        .log_visitor_entry(name, phone, resident_id, vehicle)
        .await
        .map_err(explain)?;
    println!("{}", response.message);
    Ok(())
}

async fn cmd_visitors_logs(api: &ApiClient) -> Result<()> {
    let logs = api.security_logs().await.map_err(explain)?;

    if logs.is_empty() {
        println!("No visitor logs found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<10}  {:<16}  {:<16}  {:<15}",
        "LOG", "VISITOR", "ENTRY", "EXIT", "GUARD"
    );
    println!("{}", "-".repeat(75));
    for log in logs {
        println!(
            "{:<6}  {:<10}  {:<16}  {:<16}  {:<15}",
            log.id,
            log.visitor,
            short_timestamp(&log.entry_time),
            log.exit_time
                .as_deref()
                .map(short_timestamp)
                .unwrap_or_else(|| "on premises".to_string()),
            truncate(&log.guard_name, 15)
        );
    }
    println!();
    Ok(())
}

async fn cmd_visitors_checkout(api: &ApiClient, log_id: i64) -> Result<()> {
    let response = api.checkout_visitor(log_id).await.map_err(explain)?;
    println!(
        "{} (exit at {})",
        response.message,
        short_timestamp(&response.exit_time)
    );
    Ok(())
}

// ============================================================================
// Residents
// ============================================================================

async fn cmd_residents_list(api: &ApiClient) -> Result<()> {
    let residents = api.residents().await.map_err(explain)?;

    if residents.is_empty() {
        println!("No residents found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<15}  {:<12}  {:<10}  {:<12}  {:<10}",
        "ID", "USERNAME", "APARTMENT", "ROLE", "PHONE", "STATUS"
    );
    println!("{}", "-".repeat(75));
    for resident in residents {
        println!(
            "{:<6}  {:<15}  {:<12}  {:<10}  {:<12}  {:<10}",
            resident.id,
            truncate(&resident.username, 15),
            resident.apartment_no,
            resident.role,
            resident.phone_number,
            resident.status.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

async fn cmd_residents_update(api: &ApiClient, id: i64, update: ResidentUpdate) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one of --email, --apartment, --phone, --status.");
    }

    let resident = api.update_resident(id, &update).await.map_err(explain)?;
    println!("Resident #{} ({}) updated.", resident.id, resident.username);
    Ok(())
}

async fn cmd_residents_remove(api: &ApiClient, id: i64) -> Result<()> {
    api.remove_resident(id).await.map_err(explain)?;
    println!("Resident #{} removed.", id);
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

async fn cmd_report(
    api: &ApiClient,
    report_type: ReportType,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let csv = api.report_csv(report_type.as_str()).await.map_err(explain)?;

    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Accept an RFC 3339 timestamp or a local `YYYY-MM-DDTHH:MM`
/// (optionally with seconds, or a space separator) and normalize to
/// what the backend accepts.
fn parse_datetime(input: &str) -> Result<String> {
    if chrono::DateTime::parse_from_rfc3339(input).is_ok() {
        return Ok(input.to_string());
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }

    anyhow::bail!(
        "Could not parse '{}' as a date-time (expected e.g. 2025-04-10T18:00)",
        input
    )
}

/// Trim a server timestamp down to `YYYY-MM-DD HH:MM` for table cells.
fn short_timestamp(ts: &str) -> String {
    ts.get(..16).unwrap_or(ts).replacen('T', " ", 1)
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
