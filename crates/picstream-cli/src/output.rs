//! CLI output formatting
//!
//! Human and JSON formatters plus the renderers for the app's two main
//! shapes of output: post lists (feed, favorites, profile grid) and profile
//! headers.

use chrono::{DateTime, Utc};
use picstream_core::domain::{Post, UserProfile};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {message}");
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {message}");
    }
    fn info(&self, message: &str) {
        println!("  {message}");
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Human formatter doesn't print JSON
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Renders a post list (feed page, favorites, profile grid)
pub fn render_posts(fmt: &dyn OutputFormatter, format: OutputFormat, posts: &[Post]) {
    if format == OutputFormat::Json {
        let json: Vec<serde_json::Value> = posts
            .iter()
            .map(|post| {
                serde_json::json!({
                    "id": post.id.as_str(),
                    "imageUrl": post.image_url.as_str(),
                    "caption": post.caption.as_str(),
                    "userId": post.author.as_str(),
                    "createdAt": post.created_at.map(|t| t.to_rfc3339()),
                })
            })
            .collect();
        fmt.print_json(&serde_json::Value::Array(json));
        return;
    }

    if posts.is_empty() {
        fmt.info("No posts.");
        return;
    }
    for post in posts {
        fmt.info(&format!(
            "{}  by {}  ({})",
            post.id,
            post.author,
            format_timestamp(post.created_at)
        ));
        fmt.info(&format!("    {}", post.image_url));
    }
}

/// Renders a profile header
pub fn render_profile(fmt: &dyn OutputFormatter, format: OutputFormat, profile: &UserProfile) {
    if format == OutputFormat::Json {
        fmt.print_json(&serde_json::json!({
            "userId": profile.user.as_str(),
            "username": profile.username,
            "profileImage": profile.profile_image.as_ref().map(|url| url.as_str()),
        }));
        return;
    }

    let username = if profile.username.is_empty() {
        "No Username"
    } else {
        &profile.username
    };
    fmt.success(&format!("{} ({})", username, profile.user));
    match &profile.profile_image {
        Some(url) => fmt.info(&format!("Avatar: {url}")),
        None => fmt.info("Avatar: (default)"),
    }
}
