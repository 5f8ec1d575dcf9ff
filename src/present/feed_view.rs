use std::fmt::Write as _;
use std::time::Duration;

use chrono::FixedOffset;

use crate::config::Config;
use crate::domain::{Announcement, ItemKey, SyncState};
use crate::present::time_format::{format_last_update, format_timestamp};

const TITLE: &str = "Market News | NSE High Impact Corporate Announcements";
const RULE: &str = "------------------------------------------------------------";

#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub offset: FixedOffset,
    pub poll_interval: Duration,
    pub retention_hours: u64,
}

impl DisplayOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            offset: config.display_offset,
            poll_interval: config.poll_interval,
            retention_hours: config.retention_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactBadge {
    High(String),
    Elevated(String),
}

impl ImpactBadge {
    fn from_tag(tag: &str) -> Self {
        if tag == "HIGH" {
            ImpactBadge::High(tag.to_string())
        } else {
            ImpactBadge::Elevated(tag.to_string())
        }
    }

    fn label(&self) -> String {
        match self {
            ImpactBadge::High(tag) => format!("!! {}", tag),
            ImpactBadge::Elevated(tag) => format!("! {}", tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: ItemKey,
    pub source: String,
    pub symbol: String,
    pub impact: Option<ImpactBadge>,
    pub headline: String,
    pub company: String,
    pub time: String,
}

impl CardView {
    fn from_item(index: usize, item: &Announcement, offset: &FixedOffset) -> Self {
        Self {
            key: item.key(index),
            source: item.source.clone(),
            symbol: item.symbol.clone(),
            impact: item.impact().map(ImpactBadge::from_tag),
            headline: item.headline.clone(),
            company: item.company.clone(),
            time: format_timestamp(item.timestamp.as_deref(), offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedBody {
    Loading,
    Empty,
    Cards(Vec<CardView>),
}

/// Everything shown for one [`SyncState`]. Building it only reads the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub updated_at: Option<String>,
    pub refreshing: bool,
    pub body: FeedBody,
    pub footer: Option<String>,
}

impl FeedView {
    pub fn from_state(state: &SyncState, options: &DisplayOptions) -> Self {
        let body = if state.is_loading {
            FeedBody::Loading
        } else if state.items.is_empty() {
            FeedBody::Empty
        } else {
            FeedBody::Cards(
                state
                    .items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| CardView::from_item(index, item, &options.offset))
                    .collect(),
            )
        };

        let footer = (!state.items.is_empty()).then(|| {
            format!(
                "Showing {} announcements • Auto-refreshes every {} • {}-hour retention",
                state.items.len(),
                describe_interval(options.poll_interval),
                options.retention_hours
            )
        });

        Self {
            updated_at: state
                .last_update
                .as_ref()
                .map(|at| format_last_update(at, &options.offset)),
            refreshing: state.is_refreshing,
            body,
            footer,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", TITLE);
        let mut status = Vec::new();
        if let Some(updated) = &self.updated_at {
            status.push(format!("Updated {}", updated));
        }
        if self.refreshing {
            status.push("Refreshing...".to_string());
        }
        if !status.is_empty() {
            let _ = writeln!(out, "{}", status.join("  "));
        }
        let _ = writeln!(out, "{}", RULE);

        match &self.body {
            FeedBody::Loading => {
                let _ = writeln!(out, "Loading news...");
            }
            FeedBody::Empty => {
                let _ = writeln!(out, "No announcements available");
                let _ = writeln!(out, "Check back in a few minutes");
            }
            FeedBody::Cards(cards) => {
                for card in cards {
                    render_card(&mut out, card);
                }
            }
        }

        if let Some(footer) = &self.footer {
            let _ = writeln!(out, "{}", RULE);
            let _ = writeln!(out, "{}", footer);
        }

        out
    }
}

fn render_card(out: &mut String, card: &CardView) {
    let mut badges = vec![format!("[{}]", card.source), format!("[{}]", card.symbol)];
    if let Some(impact) = &card.impact {
        badges.push(format!("[{}]", impact.label()));
    }

    let _ = writeln!(out, "{}  ({})", badges.join(" "), card.key);
    let _ = writeln!(out, "  {}", card.headline);
    let _ = writeln!(out, "  {} · {}", card.company, card.time);
    let _ = writeln!(out);
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "minute".to_string()
        } else {
            format!("{} minutes", minutes)
        }
    } else {
        format!("{} seconds", secs)
    }
}
