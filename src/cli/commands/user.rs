use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_one_time_password, PasswordService};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Stores};
use crate::services::admin::SuperAdminInput;
use crate::services::AdminService;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create the first SuperAdmin account directly in the database")]
    CreateSuperAdmin {
        #[arg(long, help = "Login email")]
        email: String,
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long, help = "Password or pre-computed argon2 hash (generated when omitted)")]
        password: Option<String>,
    },

    #[command(about = "Print the argon2 hash of a password")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        plain: String,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let passwords = PasswordService::new(&config.security).context("invalid hashing parameters")?;

    match cmd {
        UserCommands::CreateSuperAdmin { email, first_name, last_name, password } => {
            let generated = password.is_none();
            let plain = password.unwrap_or_else(generate_one_time_password);

            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("create-super-admin needs DATABASE_URL")?;
            let stores = Stores::postgres(&manager);
            let created = AdminService::new(stores.users.clone(), passwords)
                .create_super_admin(SuperAdminInput { email, first_name, last_name, password: plain.clone() })
                .await;
            manager.close().await;
            let user = created?;

            let mut data = json!({ "id": user.id.to_string(), "email": user.email });
            if generated {
                data["generatedPassword"] = json!(plain);
            }
            output_success(output_format, "SuperAdmin account created", Some(data))
        }
        UserCommands::HashPassword { plain } => {
            let hash = passwords.hash(&plain).await?;
            output_success(output_format, "Password hashed", Some(json!({ "hash": hash })))
        }
    }
}
