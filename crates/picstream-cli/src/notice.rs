//! Console adapters for the user-facing ports
//!
//! [`ConsoleNotice`] renders one-shot notices (the CLI's stand-in for alert
//! dialogs) and [`TerminalHaptics`] maps haptic impacts to the terminal
//! bell. Both are fire-and-forget per their port contracts.

use picstream_core::ports::{IHaptics, IUserNotice, ImpactStyle, Notice, NoticeKind};

use crate::output::OutputFormat;

/// Shows notices on the console
pub struct ConsoleNotice {
    format: OutputFormat,
}

impl ConsoleNotice {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait::async_trait]
impl IUserNotice for ConsoleNotice {
    async fn show(&self, notice: &Notice) {
        if self.format == OutputFormat::Json {
            let level = match notice.kind {
                NoticeKind::Info => "info",
                NoticeKind::Success => "success",
                NoticeKind::Error => "error",
            };
            eprintln!(
                "{}",
                serde_json::json!({
                    "notice": level,
                    "title": notice.title,
                    "body": notice.body,
                })
            );
            return;
        }

        match notice.kind {
            NoticeKind::Info => println!("  {}: {}", notice.title, notice.body),
            NoticeKind::Success => println!("\u{2713} {}: {}", notice.title, notice.body),
            NoticeKind::Error => eprintln!("\u{2717} {}: {}", notice.title, notice.body),
        }
    }
}

/// Maps haptic impacts to the terminal bell
pub struct TerminalHaptics;

#[async_trait::async_trait]
impl IHaptics for TerminalHaptics {
    async fn impact(&self, style: ImpactStyle) {
        // One bell for light/medium, two for heavy
        let bells = match style {
            ImpactStyle::Light | ImpactStyle::Medium => 1,
            ImpactStyle::Heavy => 2,
        };
        for _ in 0..bells {
            eprint!("\u{7}");
        }
    }
}
