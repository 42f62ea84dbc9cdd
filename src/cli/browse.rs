//! Browse command: drive the list view from command-line flags and print a page

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use courselens::catalog::{load_or_empty, Course, FileCourseSource};
use courselens::config::Config;
use courselens::lists::{
    BoundSide, FilterAttribute, FilterToggle, PageLabel, SortAttribute, SortConfig, ViewEvent,
    ViewStateController,
};

/// Show one page of the filtered, sorted catalog
#[derive(Debug, Args)]
pub struct BrowseCommand {
    /// Catalog file (JSON or YAML); overrides the configured catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    pub min_reviews: Option<String>,
    #[arg(long, value_name = "N")]
    pub max_reviews: Option<String>,
    #[arg(long, value_name = "X")]
    pub min_rating: Option<String>,
    #[arg(long, value_name = "X")]
    pub max_rating: Option<String>,
    #[arg(long, value_name = "X")]
    pub min_difficulty: Option<String>,
    #[arg(long, value_name = "X")]
    pub max_difficulty: Option<String>,
    #[arg(long, value_name = "X")]
    pub min_workload: Option<String>,
    #[arg(long, value_name = "X")]
    pub max_workload: Option<String>,

    /// Hide courses that are no longer offered
    #[arg(long)]
    pub hide_deprecated: bool,

    /// Only show foundational courses
    #[arg(long)]
    pub only_foundational: bool,

    /// Sort column; repeat to click the header again and flip the direction
    #[arg(short, long = "sort", value_name = "ATTR")]
    pub sort: Vec<SortAttribute>,

    /// Results per page (must be one of the configured page sizes)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Machine readable rendering of the visible page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    total_results: usize,
    total_pages: usize,
    page: usize,
    page_size: usize,
    showing: Option<(usize, usize)>,
    sort: SortConfig,
    navigator: Vec<PageLabel>,
    courses: Vec<&'a Course>,
}

impl BrowseCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let path = self
            .catalog
            .clone()
            .or_else(|| config.catalog_path.clone())
            .ok_or_else(|| anyhow!("No catalog given. Pass --catalog or set COURSELENS_CATALOG."))?;

        if self.page == 0 {
            return Err(anyhow!("Pages are numbered from 1"));
        }

        let courses = load_or_empty(&FileCourseSource::new(path)).await;
        let mut controller =
            ViewStateController::with_config(courses, config.pagination(), config.default_sort);

        for event in self.events() {
            debug!("Applying {:?}", event);
            controller.apply(event);
        }

        if let Some(size) = self.page_size {
            if !controller.set_page_size(size) {
                return Err(anyhow!(
                    "Page size {} is not one of {:?}",
                    size,
                    config.page_sizes
                ));
            }
        }

        controller.set_page_number(self.page - 1);
        if controller.current_page() + 1 != self.page && controller.total_results() > 0 {
            info!(
                "Page {} is past the end, showing page {}",
                self.page,
                controller.current_page() + 1
            );
        }

        let output = match self.format {
            OutputFormat::Text => render_text(&controller),
            OutputFormat::Json => render_json(&controller)?,
        };
        println!("{}", output);

        Ok(())
    }

    /// Translate flags into the events a user would have produced
    fn events(&self) -> Vec<ViewEvent> {
        let bounds = [
            (FilterAttribute::ReviewCount, BoundSide::Min, &self.min_reviews),
            (FilterAttribute::ReviewCount, BoundSide::Max, &self.max_reviews),
            (FilterAttribute::Rating, BoundSide::Min, &self.min_rating),
            (FilterAttribute::Rating, BoundSide::Max, &self.max_rating),
            (FilterAttribute::Difficulty, BoundSide::Min, &self.min_difficulty),
            (FilterAttribute::Difficulty, BoundSide::Max, &self.max_difficulty),
            (FilterAttribute::Workload, BoundSide::Min, &self.min_workload),
            (FilterAttribute::Workload, BoundSide::Max, &self.max_workload),
        ];

        let mut events: Vec<ViewEvent> = bounds
            .into_iter()
            .filter_map(|(attribute, side, input)| {
                input.as_ref().map(|input| ViewEvent::SetBound {
                    attribute,
                    side,
                    input: input.clone(),
                })
            })
            .collect();

        if self.hide_deprecated {
            events.push(ViewEvent::Toggle {
                toggle: FilterToggle::HideDeprecated,
            });
        }
        if self.only_foundational {
            events.push(ViewEvent::Toggle {
                toggle: FilterToggle::OnlyShowFoundational,
            });
        }

        events.extend(
            self.sort
                .iter()
                .map(|attribute| ViewEvent::SetSort { attribute: *attribute }),
        );

        events
    }
}

fn format_aggregate(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.1}", value),
        None => "—".to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn render_text(controller: &ViewStateController) -> String {
    let visible = controller.visible();
    let sort = controller.state().sort;
    let mut lines = Vec::new();

    let name_width = visible
        .iter()
        .map(|course| course.name.width())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(4);

    lines.push(format!(
        "{}  {:>6}  {:>10}  {:>8}  {:>7}",
        pad("Name", name_width),
        "Rating",
        "Difficulty",
        "Workload",
        "Reviews"
    ));

    for course in &visible {
        let mut flags = Vec::new();
        if course.is_foundational {
            flags.push("foundational");
        }
        if course.is_deprecated {
            flags.push("deprecated");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  ({})", flags.join(", "))
        };

        lines.push(format!(
            "{}  {:>6}  {:>10}  {:>8}  {:>7}{}",
            pad(&course.name, name_width),
            format_aggregate(course.rating),
            format_aggregate(course.difficulty),
            format_aggregate(course.workload),
            course.review_count,
            flags
        ));
    }

    lines.push(String::new());
    match controller.result_range() {
        Some((first, last)) => lines.push(format!(
            "Showing {}–{} of {} courses, sorted by {} {}",
            first,
            last,
            controller.total_results(),
            sort.attribute,
            sort.direction
        )),
        None => lines.push("No courses match the current filters".to_string()),
    }

    if !controller.window().is_empty() {
        lines.push(format!("Pages: {}", controller.window()));
    }

    lines.join("\n")
}

fn render_json(controller: &ViewStateController) -> Result<String> {
    let report = BrowseReport {
        total_results: controller.total_results(),
        total_pages: controller.total_pages(),
        page: controller.current_page() + 1,
        page_size: controller.page_size(),
        showing: controller.result_range(),
        sort: controller.state().sort,
        navigator: controller.window().labels(),
        courses: controller.visible(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
