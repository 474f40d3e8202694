//! `tasks` subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{Value, json};
use taskdeck_client::fetch::TasksFetcher;
use taskdeck_core::models::{CreateTask, UpdateTask};
use taskdeck_core::{FilterCriterion, TaskId};

use super::{ListArgs, fetch_page, to_json};
use crate::app::App;

#[derive(Subcommand, Debug, Clone)]
pub enum TasksCommand {
    /// List tasks.
    List {
        /// Only tasks of this project (adds a `project_id:eq:<id>` filter).
        #[arg(long)]
        project: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one task.
    Show {
        /// Task ID.
        id: String,
    },
    /// Create a task.
    Create(CreateTaskArgs),
    /// Update fields of a task.
    Update(UpdateTaskArgs),
    /// Delete a task.
    Delete {
        /// Task ID.
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateTaskArgs {
    #[arg(long)]
    pub title: String,
    /// Owning project ID.
    #[arg(long)]
    pub project: String,
    /// Assigned user ID.
    #[arg(long, default_value = "")]
    pub assignee: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// todo, in_progress, completed.
    #[arg(long, default_value = "todo")]
    pub status: String,
    /// low, medium, high.
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub due_date: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateTaskArgs {
    /// Task ID.
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Move to another project.
    #[arg(long)]
    pub project: Option<String>,
    /// Reassign.
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub due_date: Option<String>,
}

pub async fn run(cmd: TasksCommand, app: &App) -> Result<Value> {
    let service = app.tasks();
    match cmd {
        TasksCommand::List { project, list } => {
            let mut params = list.params(app.lists());
            if let Some(project) = project {
                params.filters.push(FilterCriterion::eq("project_id", project));
            }
            let fetcher =
                TasksFetcher::new(service, params).with_encoding(list.encoding(app.lists()));
            let page = fetch_page(&fetcher).await?;
            to_json(&page)
        }
        TasksCommand::Show { id } => to_json(&service.get_one(&TaskId::from(id)).await?),
        TasksCommand::Create(args) => {
            let task = service
                .create(&CreateTask {
                    title: args.title,
                    description: args.description,
                    status: args.status,
                    priority: args.priority,
                    project_id: args.project.into(),
                    assignee_id: args.assignee.into(),
                    due_date: args.due_date,
                })
                .await?;
            to_json(&task)
        }
        TasksCommand::Update(args) => {
            let task = service
                .update(
                    &TaskId::from(args.id),
                    &UpdateTask {
                        title: args.title,
                        description: args.description,
                        status: args.status,
                        priority: args.priority,
                        project_id: args.project.map(Into::into),
                        assignee_id: args.assignee.map(Into::into),
                        due_date: args.due_date,
                    },
                )
                .await?;
            to_json(&task)
        }
        TasksCommand::Delete { id } => {
            service.remove(&TaskId::from(id.clone())).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}
