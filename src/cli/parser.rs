use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for staffcheck
/// CLI application to track the daily staff attendance workflow with SQLite
#[derive(Parser)]
#[command(
    name = "staffcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Staff attendance workflow tracker: previous-day plan, wake-up, departure, arrival and daily report",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Staff member the command acts for (defaults to `default_staff` in the config)
    #[arg(global = true, long = "staff")]
    pub staff: Option<String>,

    /// Override the current calendar date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal access log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register or list staff members
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },

    /// Submit the previous-day report (plan for the next working day)
    Plan {
        #[arg(long = "for", help = "Date the plan is for (YYYY-MM-DD, default: tomorrow)")]
        report_date: Option<String>,

        #[arg(long = "wake", help = "Planned wake-up time (HH:MM)")]
        wake: Option<String>,

        #[arg(long = "depart", help = "Planned departure time (HH:MM)")]
        depart: Option<String>,

        #[arg(long = "arrive", help = "Planned arrival time (HH:MM)")]
        arrive: Option<String>,

        #[arg(long = "route-photo", help = "Reference to the planned route photo")]
        route_photo: Option<String>,

        #[arg(long = "appearance-photo", help = "Reference to the appearance photo")]
        appearance_photo: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Report the wake-up time
    Wakeup {
        /// Wake-up time (HH:MM)
        time: Option<String>,

        #[arg(long = "now", conflicts_with = "time", help = "Use the current time")]
        now: bool,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Report the departure time
    Depart {
        /// Departure time (HH:MM)
        time: Option<String>,

        #[arg(long = "now", conflicts_with = "time", help = "Use the current time")]
        now: bool,

        #[arg(long = "route-photo", help = "Reference to the route photo")]
        route_photo: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Report the arrival at the worksite
    Arrive {
        /// Arrival time (HH:MM)
        time: Option<String>,

        #[arg(long = "now", conflicts_with = "time", help = "Use the current time")]
        now: bool,

        #[arg(long = "location", help = "Worksite or place of arrival")]
        location: Option<String>,

        #[arg(long = "gps", help = "GPS position as LAT,LON in decimal degrees")]
        gps: Option<String>,

        #[arg(long = "appearance-photo", help = "Reference to the appearance photo")]
        appearance_photo: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Submit the daily work report
    Report {
        #[arg(long = "content", help = "Report text")]
        content: Option<String>,

        #[arg(long = "draft", help = "Save as draft without submitting")]
        draft: bool,
    },

    /// Show the workflow status and the next action
    Status {
        #[arg(long = "all", help = "Dashboard over all registered staff members")]
        all: bool,
    },

    /// End the reporting day
    Complete {
        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Start a new day after the previous one was completed
    NewDay,

    /// List attendance records
    History {
        #[arg(
            long = "period",
            help = "Filter by period: YYYY, YYYY-MM, YYYY-MM-DD, ranges A:B, or 'all'"
        )]
        period: Option<String>,
    },

    /// Export attendance records
    Export {
        #[arg(long = "format", value_enum, help = "Export format: csv or json")]
        format: ExportFormat,

        #[arg(long = "file", help = "Absolute path of the output file")]
        file: String,

        #[arg(long = "range", help = "Period to export (same syntax as history --period)")]
        range: Option<String>,

        #[arg(long = "force", help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Manage shift schedules
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// List alerts raised by the tracker
    Alerts,
}

#[derive(Subcommand)]
pub enum StaffAction {
    /// Register a staff member
    Add {
        id: String,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "manager", help = "Register with the manager role")]
        manager: bool,
    },

    /// List registered staff members
    List,
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Add a pending shift for the selected staff member
    Add {
        /// Shift date (YYYY-MM-DD)
        date: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,

        #[arg(long = "worksite")]
        worksite: Option<String>,
    },

    /// Approve a pending shift
    Approve { id: i64 },

    /// List shifts
    List {
        #[arg(long = "period")]
        period: Option<String>,
    },

    /// Show overlapping shifts
    Conflicts {
        #[arg(long = "period")]
        period: Option<String>,
    },
}
