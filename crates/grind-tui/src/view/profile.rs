#![forbid(unsafe_code)]

//! Profile rendering.

use grind_client::SkillStat;
use grind_text::{pad_left, pad_right};

use crate::model::AppModel;
use crate::screens::ProfileModel;
use crate::view::style;

pub(super) fn render(screen: &ProfileModel, model: &AppModel) -> Vec<String> {
    let mut lines = Vec::new();

    if screen.loading {
        lines.push(format!(" {}loading profile…{}", style::DIM, style::RESET));
        return lines;
    }
    if let Some(error) = &screen.error {
        lines.push(format!(" {}error:{} {error}", style::RED, style::RESET));
        lines.push(format!(
            " {}press r to retry{}",
            style::DIM,
            style::RESET
        ));
        return lines;
    }
    let Some(profile) = &screen.profile else {
        return lines;
    };

    lines.push(format!(
        " {}{}{}",
        style::BOLD,
        profile.real_name.as_deref().unwrap_or(&profile.username),
        style::RESET
    ));
    lines.push(format!(" @{}", profile.username));
    if let Some(ranking) = profile.ranking {
        lines.push(format!(" ranking #{ranking}"));
    }
    lines.push(String::new());
    lines.push(format!(" {}solved{}", style::BOLD, style::RESET));
    lines.push(solved_row(
        "easy",
        style::GREEN,
        profile.solved_easy,
        profile.total_easy,
    ));
    lines.push(solved_row(
        "medium",
        style::YELLOW,
        profile.solved_medium,
        profile.total_medium,
    ));
    lines.push(solved_row(
        "hard",
        style::RED,
        profile.solved_hard,
        profile.total_hard,
    ));

    if let Some(skills) = &screen.skills {
        for (label, stats) in [
            ("fundamental", &skills.fundamental),
            ("intermediate", &skills.intermediate),
            ("advanced", &skills.advanced),
        ] {
            if stats.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!(" {}{label}{}", style::BOLD, style::RESET));
            for stat in stats {
                lines.push(skill_row(stat));
            }
        }
    }

    // Scroll window.
    lines.into_iter().skip(screen.scroll).collect()
}

fn solved_row(label: &str, color: &str, solved: u32, total: u32) -> String {
    format!(
        "   {color}{}{} {}  {}",
        pad_right(label, 7),
        style::RESET,
        pad_left(&solved.to_string(), 5),
        meter(solved, total),
    )
}

fn skill_row(stat: &SkillStat) -> String {
    format!(
        "   {} {}",
        pad_right(&stat.tag, 24),
        pad_left(&stat.problems_solved.to_string(), 4)
    )
}

/// Ten-cell progress meter.
fn meter(solved: u32, total: u32) -> String {
    if total == 0 {
        return String::new();
    }
    let filled = ((solved as usize * 10) / total as usize).min(10);
    format!("{}{}", "▰".repeat(filled), "▱".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_client::{SkillStats, UserProfile};
    use grind_store::Config;
    use std::collections::BTreeSet;

    #[test]
    fn renders_counts_and_skills() {
        let model = AppModel::new(Config::default(), BTreeSet::new());
        let mut screen = ProfileModel::loading("kay".into());
        screen.on_loaded(
            "kay",
            Box::new(UserProfile {
                username: "kay".into(),
                real_name: Some("Kay Doe".into()),
                ranking: Some(12345),
                solved_easy: 50,
                solved_medium: 20,
                solved_hard: 5,
                total_easy: 100,
                total_medium: 200,
                total_hard: 100,
            }),
            Box::new(SkillStats {
                fundamental: vec![SkillStat {
                    tag: "array".into(),
                    problems_solved: 31,
                }],
                intermediate: vec![],
                advanced: vec![],
            }),
        );
        let joined = render(&screen, &model).join("\n");
        assert!(joined.contains("Kay Doe"));
        assert!(joined.contains("#12345"));
        assert!(joined.contains("array"));
        assert!(joined.contains("▰▰▰▰▰▱▱▱▱▱"));
    }

    #[test]
    fn loading_placeholder() {
        let model = AppModel::new(Config::default(), BTreeSet::new());
        let screen = ProfileModel::loading("kay".into());
        let joined = render(&screen, &model).join("\n");
        assert!(joined.contains("loading profile…"));
    }
}
