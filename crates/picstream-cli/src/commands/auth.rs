//! Auth commands - register, login, logout, and status
//!
//! Each forwards to the session use case; provider rejections print their
//! own message verbatim, exactly as the service returned it.

use anyhow::{Context, Result};
use clap::Subcommand;
use picstream_core::domain::Email;

use crate::context::AppContext;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Create a new account
    Register {
        /// Account email address
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Sign in to an existing account
    Login {
        /// Account email address
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the current session
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let fmt = get_formatter(ctx.format);
        match self {
            AuthCommand::Register { email, password } => {
                let email = Email::new(email.clone()).context("Invalid email address")?;
                let session = ctx.session_usecase()?.register(&email, password).await?;
                fmt.success(&format!("Account created; signed in as {}", session.user_id));
                Ok(())
            }
            AuthCommand::Login { email, password } => {
                let email = Email::new(email.clone()).context("Invalid email address")?;
                let session = ctx.session_usecase()?.login(&email, password).await?;
                fmt.success(&format!("Signed in as {}", session.user_id));
                Ok(())
            }
            AuthCommand::Logout => {
                ctx.session_usecase()?.logout().await?;
                fmt.success("Signed out");
                Ok(())
            }
            AuthCommand::Status => {
                match ctx.session_usecase()?.current().await? {
                    Some(session) => {
                        if ctx.format == OutputFormat::Json {
                            fmt.print_json(&serde_json::json!({
                                "signedIn": true,
                                "userId": session.user_id.as_str(),
                                "expired": session.is_expired(),
                                "expiresAt": session.expires_at.to_rfc3339(),
                            }));
                        } else {
                            fmt.success(&format!("Signed in as {}", session.user_id));
                            let status = if session.is_expired() {
                                "expired"
                            } else {
                                "valid"
                            };
                            fmt.info(&format!("Token: {status}"));
                            fmt.info(&format!(
                                "Expires: {}",
                                session.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
                            ));
                        }
                    }
                    None => {
                        fmt.info("Not signed in");
                        fmt.info("Run 'picstream auth login' to sign in");
                    }
                }
                Ok(())
            }
        }
    }
}
