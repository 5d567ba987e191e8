//! The rich card: metric tiles, language bars, top repositories and the
//! optional monthly chart, laid out on a dark canvas.
//!
//! Output is SVG; [`super::raster`] turns it into the PNG artifact.

use std::fmt::Write;

use super::format::{compact, escape_xml, truncate};
use super::metrics;
use crate::types::{ActivityStats, MonthlyActivity, RepoCommits};

const WIDTH: u32 = 1200;
const MARGIN: u32 = 48;
const GAP: u32 = 24;
const PAD: u32 = 24;
const TILE_W: u32 = (WIDTH - 2 * MARGIN - 2 * GAP) / 3;
const TILE_H: u32 = 150;
const TILES_Y: u32 = 116;
const PANEL_HEADER: u32 = 60;
const ROW_H: u32 = 30;
const BAR_MAX_W: f64 = 380.0;
const MONTHLY_H: u32 = 210;
const MONTHLY_BAR_MAX: f64 = 110.0;
const REPO_NAME_CHARS: usize = 28;

const FONT: &str = "'Segoe UI', 'DejaVu Sans', Arial, sans-serif";
const BG: &str = "#0b1220";
const PANEL_FILL: &str = "#0f1724";
const PANEL_STROKE: &str = "#233044";
const TITLE: &str = "#D7E6FF";
const LABEL: &str = "#cfe8ff";
const MUTED: &str = "#98a8bf";
const FOOTER: &str = "#6b7c8f";
const VALUE: &str = "#dff2ff";
const TILE_ACCENTS: [&str; 3] = ["#7DD3FC", "#A78BFA", "#60A5FA"];
const BAR_COLORS: [&str; 6] = [
    "#4c9ed9", "#7DD3FC", "#A78BFA", "#60A5FA", "#34D399", "#F472B6",
];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: u32,
    weight: u32,
    fill: &'static str,
    anchor: &'static str,
}

impl TextStyle {
    const fn new(size: u32, weight: u32, fill: &'static str) -> Self {
        Self {
            size,
            weight,
            fill,
            anchor: "start",
        }
    }

    const fn end(self) -> Self {
        Self {
            anchor: "end",
            ..self
        }
    }

    const fn middle(self) -> Self {
        Self {
            anchor: "middle",
            ..self
        }
    }

    const fn fill(self, fill: &'static str) -> Self {
        Self { fill, ..self }
    }
}

const TITLE_TEXT: TextStyle = TextStyle::new(28, 700, TITLE);
const SUBTITLE_TEXT: TextStyle = TextStyle::new(14, 400, MUTED);
const HEADING_TEXT: TextStyle = TextStyle::new(16, 600, LABEL);
const PLACEHOLDER_TEXT: TextStyle = TextStyle::new(14, 400, MUTED);
const TILE_VALUE_TEXT: TextStyle = TextStyle::new(44, 700, VALUE);
const TILE_SOURCE_TEXT: TextStyle = TextStyle::new(12, 400, MUTED);
const ROW_LABEL_TEXT: TextStyle = TextStyle::new(14, 500, VALUE);
const ROW_VALUE_TEXT: TextStyle = TextStyle::new(13, 400, MUTED).end();
const BAR_COUNT_TEXT: TextStyle = TextStyle::new(11, 400, VALUE).middle();
const MONTH_TEXT: TextStyle = TextStyle::new(12, 400, MUTED).middle();
const FOOTER_TEXT: TextStyle = TextStyle::new(11, 400, FOOTER);

fn text(out: &mut String, x: f64, y: f64, style: TextStyle, content: &str) {
    let TextStyle {
        size,
        weight,
        fill,
        anchor,
    } = style;
    let _ = writeln!(
        out,
        r#"  <text x="{x:.1}" y="{y:.1}" font-size="{size}" font-weight="{weight}" fill="{fill}" text-anchor="{anchor}">{}</text>"#,
        escape_xml(content)
    );
}

fn panel(out: &mut String, x: u32, y: u32, w: u32, h: u32) {
    let _ = writeln!(
        out,
        r#"  <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="12" fill="{PANEL_FILL}" stroke="{PANEL_STROKE}" stroke-width="1.2"/>"#
    );
}

fn subtitle(stats: &ActivityStats) -> String {
    let mut line = format!(
        "{} repositories · {} stars",
        stats.repo_count,
        compact(stats.stars)
    );
    if let Some((lang, repos)) = stats.primary_languages.top(1).first() {
        let _ = write!(line, " · most declared: {lang} ({repos})");
    }
    line
}

fn tiles(out: &mut String, stats: &ActivityStats) {
    for (i, (metric, accent)) in metrics(stats).iter().zip(TILE_ACCENTS).enumerate() {
        let x = MARGIN + i as u32 * (TILE_W + GAP);
        let (xf, yf) = (f64::from(x + PAD), f64::from(TILES_Y));
        panel(out, x, TILES_Y, TILE_W, TILE_H);
        text(out, xf, yf + 40.0, HEADING_TEXT, metric.label);
        text(out, xf, yf + 100.0, TILE_VALUE_TEXT.fill(accent), &metric.value);
        text(out, xf, yf + 130.0, TILE_SOURCE_TEXT, metric.source);
    }
}

fn language_panel(out: &mut String, stats: &ActivityStats, top_n: usize, y: u32, h: u32) {
    let x = MARGIN;
    let w = 2 * TILE_W + GAP;
    let langs = stats.languages.top(top_n);
    let total = stats.languages.total();
    let left = f64::from(x + PAD);
    panel(out, x, y, w, h);
    text(
        out,
        left,
        f64::from(y + 36),
        HEADING_TEXT,
        &format!("Languages (top {}) · bytes of source", langs.len()),
    );

    let Some(&(_, max)) = langs.first() else {
        text(
            out,
            left,
            f64::from(y + PANEL_HEADER + 14),
            PLACEHOLDER_TEXT,
            "No languages detected.",
        );
        return;
    };

    for (i, (lang, bytes)) in langs.iter().enumerate() {
        let row_y = y + PANEL_HEADER + i as u32 * ROW_H;
        let bar_w = if max > 0 {
            (*bytes as f64 / max as f64 * BAR_MAX_W).max(2.0)
        } else {
            2.0
        };
        let pct = if total > 0 {
            *bytes as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let color = BAR_COLORS[i % BAR_COLORS.len()];
        text(out, left, f64::from(row_y + 13), ROW_LABEL_TEXT, &truncate(lang, 18));
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{row_y}" width="{bar_w:.1}" height="16" rx="4" fill="{color}" fill-opacity="0.95"/>"#,
            x + 180
        );
        text(
            out,
            f64::from(x + w - PAD),
            f64::from(row_y + 13),
            ROW_VALUE_TEXT,
            &format!("{} · {pct:.1}%", compact(*bytes)),
        );
    }
}

fn repo_panel(out: &mut String, repos: &[RepoCommits], y: u32, h: u32) {
    let x = MARGIN + 2 * (TILE_W + GAP);
    let left = f64::from(x + PAD);
    panel(out, x, y, TILE_W, h);
    text(out, left, f64::from(y + 36), HEADING_TEXT, "Most active repositories");

    if repos.is_empty() {
        text(
            out,
            left,
            f64::from(y + PANEL_HEADER + 14),
            PLACEHOLDER_TEXT,
            "No commits found.",
        );
        return;
    }

    for (i, repo) in repos.iter().enumerate() {
        let row_y = f64::from(y + PANEL_HEADER + i as u32 * ROW_H + 13);
        text(
            out,
            left,
            row_y,
            ROW_LABEL_TEXT,
            &truncate(&repo.repo, REPO_NAME_CHARS),
        );
        text(
            out,
            f64::from(x + TILE_W - PAD),
            row_y,
            ROW_VALUE_TEXT,
            &compact(repo.commits),
        );
    }
}

fn monthly_heading(activity: &MonthlyActivity) -> String {
    let noun = if activity.active_repos == 1 {
        "repository"
    } else {
        "repositories"
    };
    format!(
        "Commits per month · {} · {} total · {} active {noun}",
        activity.year,
        compact(activity.total()),
        activity.active_repos
    )
}

fn monthly_panel(out: &mut String, activity: &MonthlyActivity, y: u32) {
    let w = WIDTH - 2 * MARGIN;
    panel(out, MARGIN, y, w, MONTHLY_H);
    text(
        out,
        f64::from(MARGIN + PAD),
        f64::from(y + 36),
        HEADING_TEXT,
        &monthly_heading(activity),
    );

    let slot = f64::from(w - 2 * PAD) / 12.0;
    let bar_w = slot * 0.55;
    let base_y = f64::from(y + PANEL_HEADER) + MONTHLY_BAR_MAX + 10.0;
    let max = activity.months.iter().copied().max().unwrap_or(0);

    for (i, (&count, name)) in activity.months.iter().zip(MONTHS).enumerate() {
        let cx = f64::from(MARGIN + PAD) + slot * (i as f64 + 0.5);
        let h = if max > 0 {
            count as f64 / max as f64 * MONTHLY_BAR_MAX
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            r#"  <rect x="{:.1}" y="{:.1}" width="{bar_w:.1}" height="{h:.1}" rx="3" fill="{}"/>"#,
            cx - bar_w / 2.0,
            base_y - h,
            BAR_COLORS[0]
        );
        if count > 0 {
            text(out, cx, base_y - h - 6.0, BAR_COUNT_TEXT, &compact(count));
        }
        text(out, cx, base_y + 20.0, MONTH_TEXT, name);
    }
}

/// Build the rich card SVG.
pub fn render(stats: &ActivityStats, top_languages: usize, generated_at: &str) -> String {
    let lang_rows = stats.languages.len().min(top_languages);
    let rows = lang_rows.max(stats.top_repos.len()).max(1) as u32;
    let panels_y = TILES_Y + TILE_H + GAP;
    let panel_h = PANEL_HEADER + rows * ROW_H + 12;

    let mut next_y = panels_y + panel_h + GAP;
    let monthly_y = stats.monthly.as_ref().map(|_| {
        let y = next_y;
        next_y += MONTHLY_H + GAP;
        y
    });
    let footer_y = next_y + 8;
    let height = footer_y + 24;
    let left = f64::from(MARGIN);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="{FONT}">"#
    );
    let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="{BG}"/>"#);

    text(
        &mut out,
        left,
        60.0,
        TITLE_TEXT,
        &format!("{} · GitHub Activity", stats.username),
    );
    text(&mut out, left, 90.0, SUBTITLE_TEXT, &subtitle(stats));

    tiles(&mut out, stats);
    language_panel(&mut out, stats, top_languages, panels_y, panel_h);
    repo_panel(&mut out, &stats.top_repos, panels_y, panel_h);
    if let (Some(activity), Some(y)) = (&stats.monthly, monthly_y) {
        monthly_panel(&mut out, activity, y);
    }

    text(
        &mut out,
        left,
        f64::from(footer_y),
        FOOTER_TEXT,
        &format!(
            "Generated {generated_at} · contribution count is scraped from the public profile (best-effort)"
        ),
    );
    out.push_str("</svg>\n");
    out
}
