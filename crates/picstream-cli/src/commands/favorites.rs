//! Favorites commands - list, follow, and toggle
//!
//! Toggling is the double-tap affordance: present posts get removed, absent
//! posts get added, and the outcome (or the failure) arrives as a one-shot
//! notice from the use case.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use picstream_core::domain::PostId;
use picstream_core::ports::{IDocumentStore, IUserNotice};
use picstream_core::usecases::FavoritesUseCase;

use crate::context::AppContext;
use crate::output::{get_formatter, render_posts};

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Show the favorites list, newest first
    List {
        /// Keep following live updates until interrupted
        #[arg(long)]
        follow: bool,
    },
    /// Favorite or unfavorite a post
    Toggle {
        /// The post id
        post_id: String,
    },
}

impl FavoritesCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let fmt = get_formatter(ctx.format);
        let session = ctx.require_session().await?;
        let provider = ctx.provider(&session)?;
        let favorites = FavoritesUseCase::new(
            Arc::clone(&provider) as Arc<dyn IDocumentStore>,
            ctx.notices() as Arc<dyn IUserNotice>,
            session.user_id.clone(),
        );

        match self {
            FavoritesCommand::List { follow: false } => {
                let posts = favorites.list().await?;
                render_posts(&*fmt, ctx.format, &posts);
                Ok(())
            }
            FavoritesCommand::List { follow: true } => {
                let mut sub = favorites.subscribe().await?;
                // Runs until interrupted; dropping the subscription on exit
                // tears the watch down
                while let Some(posts) = sub.next().await {
                    render_posts(&*fmt, ctx.format, &posts);
                }
                Ok(())
            }
            FavoritesCommand::Toggle { post_id } => {
                let post_id: PostId = post_id.parse().context("Invalid post id")?;
                let post = provider
                    .fetch_post(&post_id)
                    .await?
                    .with_context(|| format!("Post {post_id} was not found"))?;

                // Outcome and failure notices come from the use case; a
                // failed toggle still exits nonzero for scripts
                favorites.toggle(&post).await?;
                Ok(())
            }
        }
    }
}
