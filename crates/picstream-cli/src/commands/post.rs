//! Post command - compose and publish a photo
//!
//! Wires the filesystem gallery into the compose use case, then mirrors the
//! app's flow: validate, upload, create, and on success land on the feed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use picstream_core::ports::{IDocumentStore, IImageGallery, IMediaStore, IUserNotice};
use picstream_core::usecases::{ComposeUseCase, FeedUseCase, SubmitOutcome};

use crate::context::AppContext;
use crate::gallery::FsImageGallery;
use crate::output::{get_formatter, render_posts};

#[derive(Debug, Args)]
pub struct PostCommand {
    /// Image file to post; the newest image in the pictures directory
    /// when omitted
    #[arg(long)]
    image: Option<PathBuf>,

    /// Caption text
    #[arg(long, default_value = "")]
    caption: String,
}

impl PostCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let fmt = get_formatter(ctx.format);
        let session = ctx.require_session().await?;
        let provider = ctx.provider(&session)?;

        let gallery = {
            let base = FsImageGallery::new(ctx.config.gallery.pictures_dir.clone());
            match &self.image {
                Some(path) => base.with_selection(path.clone()),
                None => base,
            }
        };

        let compose = ComposeUseCase::new(
            Arc::clone(&provider) as Arc<dyn IDocumentStore>,
            Arc::clone(&provider) as Arc<dyn IMediaStore>,
            Arc::new(gallery) as Arc<dyn IImageGallery>,
            ctx.notices() as Arc<dyn IUserNotice>,
            session.user_id.clone(),
        );

        compose.select_image().await?;
        compose.set_caption(self.caption.clone()).await;

        match compose.submit().await? {
            SubmitOutcome::Posted(_) => {
                // The app navigates to the feed after posting; show it
                let feed = FeedUseCase::with_page_size(
                    Arc::clone(&provider) as Arc<dyn IDocumentStore>,
                    ctx.config.feed.page_size,
                );
                feed.load_initial_page().await;
                render_posts(&*fmt, ctx.format, &feed.posts().await);
                Ok(())
            }
            // Validation notices have already been shown
            SubmitOutcome::Rejected => Ok(()),
        }
    }
}
