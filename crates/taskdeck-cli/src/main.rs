//! # taskdeck
//!
//! Command-line client for the taskdeck API. Results are printed to stdout
//! as pretty JSON; logs go to stderr.

#![deny(unsafe_code)]

mod app;
mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskdeck_client::auth_context;
use taskdeck_settings::TaskdeckSettings;

use crate::app::App;
use crate::commands::auth::{LoginArgs, RegisterArgs};
use crate::commands::projects::ProjectsCommand;
use crate::commands::tasks::TasksCommand;
use crate::commands::users::UsersCommand;

/// taskdeck command-line client.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Projects and tasks from the terminal")]
struct Cli {
    /// API base URL (overrides settings and `TASKDECK_API_URL`).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log filter, e.g. `debug` or `taskdeck_client=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Create a company and sign in as its admin.
    Register(RegisterArgs),
    /// Sign out and remove the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Summary counts and project progress.
    Dashboard {
        /// How many projects and tasks to summarize.
        #[arg(long, default_value_t = 100)]
        per_page: u32,
    },
    /// Manage projects.
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Manage tasks.
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Manage company users.
    #[command(subcommand)]
    Users(UsersCommand),
}

impl Cli {
    fn settings(&self) -> TaskdeckSettings {
        let mut settings = taskdeck_settings::get_settings().clone();
        if let Some(url) = &self.api_url {
            settings.api.base_url.clone_from(url);
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
        settings
    }
}

async fn dispatch(command: Command, app: &App) -> Result<serde_json::Value> {
    match command {
        Command::Login(args) => commands::auth::login(args).await,
        Command::Register(args) => commands::auth::register(args).await,
        Command::Logout => commands::auth::logout(),
        Command::Whoami => commands::auth::whoami(),
        Command::Dashboard { per_page } => commands::dashboard::run(per_page, app).await,
        Command::Projects(cmd) => commands::projects::run(cmd, app).await,
        Command::Tasks(cmd) => commands::tasks::run(cmd, app).await,
        Command::Users(cmd) => commands::users::run(cmd, app).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings();

    if settings.logging.json {
        taskdeck_core::logging::init_json_subscriber(&settings.logging.level);
    } else {
        taskdeck_core::logging::init_subscriber(&settings.logging.level);
    }
    tracing::debug!(api = %settings.api.base_url, "starting");

    let app = App::new(&settings)?;
    let is_logout = matches!(cli.command, Command::Logout);
    let result = auth_context::scope(app.auth(), dispatch(cli.command, &app)).await;

    if app.session_ended() && !is_logout {
        eprintln!("Session expired. Run `taskdeck login` to sign in again.");
    }

    let value = result?;
    let out = serde_json::to_string_pretty(&value).context("Failed to render output")?;
    println!("{out}");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{FilterCriterion, SortDirection};

    #[test]
    fn parses_project_list_flags() {
        let cli = Cli::parse_from([
            "taskdeck",
            "projects",
            "list",
            "--page",
            "2",
            "--filter",
            "name:like:web",
            "--filter",
            "status:eq:in_progress",
            "--order-type",
            "asc",
            "--repeated-filters",
        ]);
        let Command::Projects(ProjectsCommand::List(args)) = cli.command else {
            panic!("expected projects list");
        };
        assert_eq!(args.page, 2);
        assert_eq!(
            args.filters,
            vec![
                FilterCriterion::like("name", "web"),
                FilterCriterion::eq("status", "in_progress"),
            ]
        );
        assert_eq!(args.order_type, Some(SortDirection::Asc));
        assert!(args.repeated_filters);
    }

    #[test]
    fn rejects_malformed_filter() {
        let err = Cli::try_parse_from(["taskdeck", "tasks", "list", "--filter", "name=web"]);
        assert!(err.is_err());
    }

    #[test]
    fn global_overrides_apply_to_settings() {
        let cli = Cli::parse_from([
            "taskdeck",
            "whoami",
            "--api-url",
            "https://api.example.com",
            "--log-level",
            "debug",
        ]);
        let settings = cli.settings();
        assert_eq!(settings.api.base_url, "https://api.example.com");
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn dashboard_default_page_size() {
        let cli = Cli::parse_from(["taskdeck", "dashboard"]);
        assert!(matches!(cli.command, Command::Dashboard { per_page: 100 }));
    }

    #[test]
    fn task_list_with_project() {
        let cli = Cli::parse_from(["taskdeck", "tasks", "list", "--project", "p1"]);
        let Command::Tasks(TasksCommand::List { project, list }) = cli.command else {
            panic!("expected tasks list");
        };
        assert_eq!(project.as_deref(), Some("p1"));
        assert_eq!(list.page, 1);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
