//! `projects` subcommands.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde_json::{Value, json};
use taskdeck_client::FetchPhase;
use taskdeck_client::fetch::{ProjectFetcher, ProjectsFetcher};
use taskdeck_core::ProjectId;
use taskdeck_core::models::{CreateProject, UpdateProject};

use super::{ListArgs, fetch_page, to_json};
use crate::app::App;

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectsCommand {
    /// List projects.
    List(ListArgs),
    /// Show one project with its progress.
    Show {
        /// Project ID.
        id: String,
    },
    /// Create a project.
    Create(CreateProjectArgs),
    /// Update fields of a project.
    Update(UpdateProjectArgs),
    /// Delete a project.
    Delete {
        /// Project ID.
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateProjectArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// planning, in_progress, completed, on_hold.
    #[arg(long, default_value = "planning")]
    pub status: String,
    /// low, medium, high.
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub start_date: String,
    /// YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub end_date: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateProjectArgs {
    /// Project ID.
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
}

pub async fn run(cmd: ProjectsCommand, app: &App) -> Result<Value> {
    let service = app.projects();
    match cmd {
        ProjectsCommand::List(args) => {
            let fetcher = ProjectsFetcher::new(service, args.params(app.lists()))
                .with_encoding(args.encoding(app.lists()));
            let page = fetch_page(&fetcher).await?;
            to_json(&page)
        }
        ProjectsCommand::Show { id } => {
            let fetcher = ProjectFetcher::new(service);
            let _ = fetcher.load(ProjectId::from(id)).await;
            let snapshot = fetcher.snapshot();
            match (snapshot.entity, snapshot.phase) {
                (Some(project), _) => {
                    let progress = project.progress();
                    let mut value = to_json(&project)?;
                    value["progress"] = json!(progress);
                    Ok(value)
                }
                (None, FetchPhase::Error(message)) => bail!(message),
                (None, _) => bail!("No project selected"),
            }
        }
        ProjectsCommand::Create(args) => {
            let project = service
                .create(&CreateProject {
                    name: args.name,
                    description: args.description,
                    status: args.status,
                    priority: args.priority,
                    start_date: args.start_date,
                    end_date: args.end_date,
                })
                .await?;
            to_json(&project)
        }
        ProjectsCommand::Update(args) => {
            let project = service
                .update(
                    &ProjectId::from(args.id),
                    &UpdateProject {
                        name: args.name,
                        description: args.description,
                        status: args.status,
                        priority: args.priority,
                        start_date: args.start_date,
                        end_date: args.end_date,
                    },
                )
                .await?;
            to_json(&project)
        }
        ProjectsCommand::Delete { id } => {
            service.remove(&ProjectId::from(id.clone())).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}
