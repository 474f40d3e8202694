//! `users` subcommands.

use anyhow::Result;
use clap::Subcommand;
use serde_json::Value;
use taskdeck_client::fetch::UsersFetcher;
use taskdeck_core::UserId;
use taskdeck_core::models::CreateCompanyUser;

use super::{ListArgs, fetch_page, to_json};
use crate::app::App;

#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommand {
    /// List users of your company.
    List(ListArgs),
    /// Show one user.
    Show {
        /// User ID.
        id: String,
    },
    /// Add a member to your company.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Initial password.
        #[arg(long, env = "TASKDECK_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn run(cmd: UsersCommand, app: &App) -> Result<Value> {
    let service = app.users();
    match cmd {
        UsersCommand::List(args) => {
            let fetcher = UsersFetcher::new(service, args.params(app.lists()))
                .with_encoding(args.encoding(app.lists()));
            let page = fetch_page(&fetcher).await?;
            to_json(&page)
        }
        UsersCommand::Show { id } => to_json(&service.get_one(&UserId::from(id)).await?),
        UsersCommand::Create {
            name,
            email,
            password,
        } => {
            let user = service
                .create_company_user(&CreateCompanyUser {
                    name,
                    email,
                    password,
                })
                .await?;
            to_json(&user)
        }
    }
}
