use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimesheet
/// Submit work hours and review them as a manager, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Submit work-hour entries and let managers approve or reject them (SQLite backed)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user id (defaults to `default_user` from the configuration)
    #[arg(global = true, long = "as", value_name = "USER_ID")]
    pub actor: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(long = "seed", value_name = "FILE", help = "SQL script used to seed user profiles")]
        seed: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// List user profiles
    Users,

    /// Provision a new user profile (administrative)
    AddUser {
        id: String,
        name: String,
        #[arg(help = "Employee or Manager")]
        role: String,
        #[arg(long = "reports-to", value_name = "MANAGER_ID")]
        reports_to: Option<String>,
    },

    /// Change a user's role (administrative)
    Role {
        #[arg(help = "Employee or Manager")]
        role: String,
        #[arg(long = "user", help = "User to change (defaults to the acting user)")]
        user: Option<String>,
    },

    /// Show the dashboard of the acting user
    Dashboard,

    /// Submit a timesheet entry for the acting user
    Submit {
        #[arg(allow_negative_numbers = true, help = "Hours worked (0.5 - 24)")]
        hours: String,

        #[arg(long = "date", help = "Work date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long = "task", help = "Task description")]
        task: Option<String>,
    },

    /// List timesheets of the acting user (or of the team with --team)
    List {
        #[arg(long = "status", help = "Filter by status: Pending, Approved, Rejected")]
        status: Option<String>,

        #[arg(long = "limit", help = "Show at most N entries")]
        limit: Option<usize>,

        #[arg(long = "team", help = "List entries assigned to the acting manager")]
        team: bool,
    },

    /// List timesheets waiting for the acting manager's decision
    Pending,

    /// Approve a timesheet
    Approve { timesheet_id: String },

    /// Reject a timesheet
    Reject { timesheet_id: String },

    /// Invoke a tool by name with JSON arguments and print the JSON result
    Call {
        tool: String,

        #[arg(long = "args", value_name = "JSON", help = "Tool arguments as a JSON object")]
        args: Option<String>,
    },

    /// Print the JSON schema of the available tools
    Tools,
}
