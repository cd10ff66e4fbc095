//! Feed commands - browse the paginated feed and reveal captions
//!
//! `feed list` walks the cursor through as many pages as asked for within
//! one run (the cursor lives only in memory). `feed show` is the long-press
//! affordance: a haptic tick, then the caption.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use picstream_core::domain::PostId;
use picstream_core::ports::{IDocumentStore, IHaptics, ImpactStyle};
use picstream_core::usecases::FeedUseCase;

use crate::context::AppContext;
use crate::notice::TerminalHaptics;
use crate::output::{get_formatter, render_posts};

#[derive(Debug, Subcommand)]
pub enum FeedCommand {
    /// Show the most recent posts
    List {
        /// Number of pages to load in this run
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Reveal a post's caption
    Show {
        /// The post id
        post_id: String,
    },
}

impl FeedCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let fmt = get_formatter(ctx.format);
        let session = ctx.require_session().await?;
        let provider = ctx.provider(&session)?;

        match self {
            FeedCommand::List { pages } => {
                let feed = FeedUseCase::with_page_size(
                    Arc::clone(&provider) as Arc<dyn IDocumentStore>,
                    ctx.config.feed.page_size,
                );

                feed.load_initial_page().await;
                for _ in 1..*pages {
                    feed.load_next_page().await;
                }

                let posts = feed.posts().await;
                render_posts(&*fmt, ctx.format, &posts);
                Ok(())
            }
            FeedCommand::Show { post_id } => {
                let post_id: PostId = post_id.parse().context("Invalid post id")?;
                let post = provider
                    .fetch_post(&post_id)
                    .await?
                    .with_context(|| format!("Post {post_id} was not found"))?;

                TerminalHaptics.impact(ImpactStyle::Medium).await;
                fmt.success(&format!("{}", post.caption));
                fmt.info(&format!("by {}", post.author));
                Ok(())
            }
        }
    }
}
