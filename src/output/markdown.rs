//! Markdown summary generation
//!
//! This module renders a harvest summary and its statistics reports as a
//! human-readable markdown document.

use crate::output::stats::{CharacterReport, Coverage, EquipmentReport};
use crate::output::summary::{HarvestSummary, OutputResult};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a harvest
///
/// # Arguments
///
/// * `summary` - The harvest summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &HarvestSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a harvest summary as markdown
pub fn format_markdown_summary(summary: &HarvestSummary) -> String {
    let mut md = String::new();

    md.push_str("# Open5e Harvest Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    if let Some(duration) = summary.duration_seconds {
        md.push_str(&format!("- **Duration**: {} seconds\n", duration));
    }
    md.push_str(&format!("- **API**: {}\n", summary.base_url));
    md.push_str(&format!("- **Config Hash**: {}\n\n", summary.config_hash));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Raw Records**: {}\n", summary.raw_records));
    md.push_str(&format!("- **Records Kept**: {}\n", summary.total_records()));
    md.push_str(&format!(
        "- **Duplicates Skipped**: {} ({:.1}%)\n\n",
        summary.duplicates_skipped,
        summary.duplicate_rate()
    ));

    if let Some(report) = &summary.character {
        push_character_report(&mut md, report);
    }

    if let Some(report) = &summary.equipment {
        push_equipment_report(&mut md, report);
    }

    if !summary.exported.is_empty() {
        md.push_str("## Exported Files\n\n");
        md.push_str("| File | Rows |\n");
        md.push_str("|------|------|\n");
        for file in &summary.exported {
            md.push_str(&format!("| {} | {} |\n", file.path.display(), file.rows));
        }
        md.push('\n');
    }

    md
}

fn push_character_report(md: &mut String, report: &CharacterReport) {
    md.push_str("## Character Data\n\n");
    md.push_str("| Kind | Count |\n");
    md.push_str("|------|-------|\n");
    md.push_str(&format!("| Races | {} |\n", report.total_races));
    md.push_str(&format!("| Classes | {} |\n", report.total_classes));
    md.push_str(&format!("| Backgrounds | {} |\n\n", report.total_backgrounds));

    push_counts(md, "Races by Source", "Source", &report.races_by_source);
    push_counts(md, "Classes by Source", "Source", &report.classes_by_source);
    push_counts(md, "Backgrounds by Source", "Source", &report.backgrounds_by_source);
    push_coverage(md, &report.coverage);

    push_samples(md, "Sample Races with ASI", &report.race_samples);
    push_samples(md, "Sample Classes", &report.class_samples);
    push_samples(md, "Sample Backgrounds with Features", &report.background_samples);
}

fn push_equipment_report(md: &mut String, report: &EquipmentReport) {
    md.push_str("## Equipment Data\n\n");
    md.push_str(&format!("- **Total Items**: {}\n\n", report.total_items));

    push_counts(md, "Items by Type", "Type", &report.by_type);
    push_counts(md, "Items by Rarity", "Rarity", &report.by_rarity);
    push_counts(md, "Items by Source", "Source", &report.by_source);
    push_coverage(md, &report.coverage);

    push_samples(md, "Sample Items with AC", &report.ac_samples);
    push_samples(md, "Sample Weapons with Damage", &report.damage_samples);
}

fn push_counts(md: &mut String, title: &str, key_label: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }

    md.push_str(&format!("### {}\n\n", title));
    md.push_str(&format!("| {} | Count |\n", key_label));
    md.push_str("|--------|-------|\n");
    for (key, count) in counts {
        md.push_str(&format!("| {} | {} |\n", key, count));
    }
    md.push('\n');
}

fn push_coverage(md: &mut String, coverage: &[Coverage]) {
    md.push_str("### Coverage\n\n");
    md.push_str("| Field | Coverage |\n");
    md.push_str("|-------|----------|\n");
    for line in coverage {
        md.push_str(&format!("| {} | {} |\n", line.label, line.display_percent()));
    }
    md.push('\n');
}

fn push_samples(md: &mut String, title: &str, samples: &[String]) {
    if samples.is_empty() {
        return;
    }

    md.push_str(&format!("### {}\n\n", title));
    for line in samples {
        md.push_str(&format!("- {}\n", line));
    }
    md.push('\n');
}
