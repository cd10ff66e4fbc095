//! Profile commands - view and edit profiles
//!
//! `show` renders any user's profile header and post grid; `--follow` keeps
//! the caller's own screen current from the live watches. `edit` updates
//! the display name and/or avatar, creating the profile document on first
//! edit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use picstream_core::domain::UserId;
use picstream_core::ports::{IDocumentStore, IImageGallery, IMediaStore};
use picstream_core::usecases::ProfileUseCase;

use crate::context::AppContext;
use crate::gallery::FsImageGallery;
use crate::output::{get_formatter, render_posts, render_profile};

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show a profile and its post grid
    Show {
        /// User to show; your own profile when omitted
        #[arg(long)]
        user: Option<String>,
        /// Keep following live updates (own profile only)
        #[arg(long)]
        follow: bool,
    },
    /// Edit your profile
    Edit {
        /// New display name
        #[arg(long)]
        username: Option<String>,
        /// New profile image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

impl ProfileCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let fmt = get_formatter(ctx.format);
        let session = ctx.require_session().await?;
        let provider = ctx.provider(&session)?;
        let profiles = ProfileUseCase::new(
            Arc::clone(&provider) as Arc<dyn IDocumentStore>,
            Arc::clone(&provider) as Arc<dyn IMediaStore>,
        );

        match self {
            ProfileCommand::Show { user, follow } => {
                let target = match user {
                    Some(id) => id.parse::<UserId>().context("Invalid user id")?,
                    None => session.user_id.clone(),
                };

                if *follow {
                    anyhow::ensure!(
                        target == session.user_id,
                        "--follow is only available for your own profile"
                    );
                    let (mut profile_sub, mut posts_sub) = profiles.watch_own(&target).await?;
                    // Runs until interrupted
                    loop {
                        tokio::select! {
                            profile = profile_sub.next() => match profile {
                                Some(profile) => render_profile(&*fmt, ctx.format, &profile),
                                None => break,
                            },
                            posts = posts_sub.next() => match posts {
                                Some(posts) => render_posts(&*fmt, ctx.format, &posts),
                                None => break,
                            },
                        }
                    }
                    return Ok(());
                }

                let view = profiles.view(&target).await;
                render_profile(&*fmt, ctx.format, &view.profile);
                render_posts(&*fmt, ctx.format, &view.posts);
                Ok(())
            }
            ProfileCommand::Edit { username, image } => {
                anyhow::ensure!(
                    username.is_some() || image.is_some(),
                    "Nothing to change; pass --username and/or --image"
                );

                let picked = match image {
                    Some(path) => {
                        let gallery = FsImageGallery::new(ctx.config.gallery.pictures_dir.clone())
                            .with_selection(path.clone());
                        gallery.pick_image().await?
                    }
                    None => None,
                };

                let updated = profiles
                    .update(&session.user_id, username.clone(), picked)
                    .await?;
                fmt.success("Profile updated");
                render_profile(&*fmt, ctx.format, &updated);
                Ok(())
            }
        }
    }
}
