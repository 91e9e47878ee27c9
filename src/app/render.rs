//! Plain-text rendering of the admin views for the terminal.

use strum::IntoEnumIterator;

use crate::config::Config;
use crate::org::{OrgLevel, OrgOverview, TreeStats, TreeView};
use crate::preferences::{Language, Preferences};
use crate::providers::{ListingSource, ModelListing, ProviderType, classify_model};
use crate::ui::style as ui;
use crate::utils::text::mask_secret;

const EXPAND_MARKER: &str = "▾";
const LEAF_PLACEHOLDER: &str = " ";

/// Model list with the preselected entry marked.
pub fn render_listing(listing: &ModelListing) -> String {
    let mut lines = vec![format!(
        "{} {} models from {}",
        ui::accent("◆"),
        listing.model_type,
        ui::header(listing.provider_type.service_name())
    )];

    if let Some(warning) = &listing.warning {
        lines.push(format!("  {}", ui::warning(warning)));
    } else if listing.source == ListingSource::Fallback {
        lines.push(format!(
            "  {}",
            ui::warning("No matching models reported, showing common models.")
        ));
    }

    if listing.models.is_empty() {
        lines.push(format!("  {}", ui::dim("No models available.")));
    }

    for model in &listing.models {
        if listing.selected.as_deref() == Some(model.as_str()) {
            lines.push(format!("  {} {}", ui::success("●"), ui::value(model)));
        } else {
            lines.push(format!("  ○ {model}"));
        }
    }

    if let Some(selected) = &listing.selected {
        if !listing.models.contains(selected) {
            lines.push(format!(
                "  {} {} {}",
                ui::success("●"),
                ui::value(selected),
                ui::dim("(configured, not reported by provider)")
            ));
        }
    }

    lines.join("\n")
}

/// Every raw name with its heuristic classification.
pub fn render_classified(raw: &[String], provider_type: ProviderType) -> String {
    if raw.is_empty() {
        return ui::dim("Provider reported no models.");
    }
    raw.iter()
        .map(|name| format!("  {name:<48} {}", ui::dim(classify_model(name, provider_type))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indented tree, one line per row, or the empty state.
pub fn render_tree(view: &TreeView, language: Language) -> String {
    let mut lines = Vec::new();
    if let Some(warning) = &view.warning {
        lines.push(ui::warning(warning));
    }

    if view.is_empty() {
        lines.push(ui::dim(match language {
            Language::Th => "ไม่พบข้อมูลโครงสร้างองค์กร",
            Language::En => "No organization data.",
        }));
        return lines.join("\n");
    }

    for row in &view.rows {
        // Two terminal columns per depth level stand in for the indent.
        let pad = " ".repeat(row.indent / crate::org::INDENT_STEP * 2);
        let marker = if row.expandable {
            EXPAND_MARKER
        } else {
            LEAF_PLACEHOLDER
        };
        lines.push(format!(
            "{pad}{marker} {} {} {}",
            row.name,
            ui::badge(&row.badge, row.color),
            ui::dim(&row.user_label)
        ));
    }
    lines.join("\n")
}

fn level_name(level: OrgLevel, language: Language) -> &'static str {
    match language {
        Language::Th => level.label_th(),
        Language::En => level.label_en(),
    }
}

/// Overview summary; each section reports its own outcome.
pub fn render_overview(overview: &OrgOverview, language: Language) -> String {
    let mut lines = vec![format!("{} {}", ui::accent("◆"), ui::header("Organization overview"))];

    match overview.effective_stats() {
        Some(stats) => {
            lines.push(format!("  Units      {}", stats.total_units));
            lines.push(format!("  Users      {}", stats.total_users));
            lines.push(format!("  Positions  {}", stats.total_positions));
        }
        None => lines.push(format!("  {}", ui::dim("Statistics unavailable."))),
    }

    if let Some(forest) = overview.tree.loaded() {
        let counted = TreeStats::collect(forest);
        for level in OrgLevel::iter() {
            let count = counted.count(level);
            if count > 0 {
                lines.push(format!(
                    "    {} {count}",
                    ui::badge(level_name(level, language), level.color())
                ));
            }
        }
    }

    if let Some(positions) = overview.positions.loaded() {
        lines.push(format!("  {} positions defined", positions.len()));
    }

    for warning in overview.warnings() {
        lines.push(format!("  {}", ui::warning(warning)));
    }
    lines.join("\n")
}

pub fn render_preferences(prefs: &Preferences) -> String {
    [
        format!("theme     {}", prefs.theme),
        format!("density   {}", prefs.density),
        format!("language  {}", prefs.language),
    ]
    .join("\n")
}

fn masked(secret: Option<&str>) -> String {
    secret.map_or_else(|| "(none)".to_string(), mask_secret)
}

pub fn render_config(config: &Config) -> String {
    let mut lines = vec![
        format!("config         {}", config.config_path.display()),
        format!("api_base_url   {}", config.api_base_url),
        format!("api_token      {}", masked(config.api_token.as_deref())),
        format!("timeout        {}s", config.request_timeout_secs),
    ];
    for (label, provider) in [("llm", &config.llm), ("embedding", &config.embedding)] {
        lines.push(String::new());
        lines.push(format!("[{label}]"));
        lines.push(format!("provider       {}", provider.provider_type));
        lines.push(format!("url            {}", provider.endpoint()));
        lines.push(format!("api_key        {}", masked(provider.api_key.as_deref())));
        lines.push(format!(
            "model          {}",
            provider.model.as_deref().unwrap_or("(not selected)")
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::{OrgUnit, SubFetch, render_rows};
    use crate::providers::{ModelType, listing_from_raw};

    #[test]
    fn listing_marks_selected_model() {
        let raw = vec!["llama3.1".to_string(), "phi3".to_string()];
        let listing = listing_from_raw(&raw, ProviderType::Ollama, ModelType::Llm, None, None);
        let out = render_listing(&listing);
        assert!(out.contains("llama3.1"));
        assert!(out.contains("○ phi3"));
        assert!(!out.contains("showing common models"));
    }

    #[test]
    fn listing_notes_fallback() {
        let listing = listing_from_raw(&[], ProviderType::Vllm, ModelType::Embedding, None, None);
        assert!(render_listing(&listing).contains("showing common models"));
    }

    #[test]
    fn tree_lines_follow_rows() {
        let forest = vec![
            OrgUnit::new("A", "ministry", "กระทรวงเอ")
                .with_children(vec![OrgUnit::new("B", "bureau", "สำนักบี").with_users(2)]),
        ];
        let view = TreeView {
            rows: render_rows(&forest, Language::Th).unwrap(),
            warning: None,
        };
        let out = render_tree(&view, Language::Th);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("▾ กระทรวงเอ"));
        assert!(lines[1].starts_with("    สำนักบี"));
        assert!(lines[1].contains("2 คน"));
    }

    #[test]
    fn empty_tree_shows_empty_state() {
        let view = TreeView {
            rows: Vec::new(),
            warning: Some("Could not load the organization tree".into()),
        };
        let out = render_tree(&view, Language::En);
        assert!(out.contains("Could not load"));
        assert!(out.contains("No organization data."));
    }

    #[test]
    fn overview_reports_each_section() {
        let overview = OrgOverview {
            stats: SubFetch::Failed("stats down".into()),
            tree: SubFetch::Loaded(vec![OrgUnit::new("A", "ministry", "A").with_users(3)]),
            positions: SubFetch::Loaded(Vec::new()),
        };
        let out = render_overview(&overview, Language::En);
        assert!(out.contains("Units      1"));
        assert!(out.contains("Ministry"));
        assert!(out.contains("0 positions defined"));
        assert!(out.contains("stats down"));
    }

    #[test]
    fn config_masks_secrets() {
        let mut config = Config::default();
        config.api_token = Some("super-secret-token".into());
        let out = render_config(&config);
        assert!(!out.contains("super-secret-token"));
        assert!(out.contains("sup****"));
        assert!(out.contains("(not selected)"));
    }
}
