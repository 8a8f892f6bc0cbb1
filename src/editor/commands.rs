//! View commands for the command palette
//!
//! A fixed table of named actions, each mapped to a direct toggle on
//! [`ViewOptions`]. The palette's drawing lives with the front end; this module
//! only names, looks up, filters and applies commands.

use crate::config::ViewOptions;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// A command-palette action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ToggleLineNumbers,
    ToggleLineWrapping,
    ToggleEditorColumn,
    TogglePreviewColumn,
    ToggleOutlineColumn,
}

impl Command {
    /// Get all available commands, in palette order.
    pub fn all() -> &'static [Command] {
        &[
            Command::ToggleLineNumbers,
            Command::ToggleLineWrapping,
            Command::ToggleEditorColumn,
            Command::TogglePreviewColumn,
            Command::ToggleOutlineColumn,
        ]
    }

    /// Label shown in the palette.
    pub fn label(&self) -> &'static str {
        match self {
            Command::ToggleLineNumbers => "Line numbers",
            Command::ToggleLineWrapping => "Line wrapping",
            Command::ToggleEditorColumn => "Column editor",
            Command::TogglePreviewColumn => "Column preview",
            Command::ToggleOutlineColumn => "Column outline",
        }
    }

    /// Stable dotted name, as stored in keymaps and older configs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleLineNumbers => "options.lineNumbers",
            Command::ToggleLineWrapping => "options.lineWrapping",
            Command::ToggleEditorColumn => "columns.editor",
            Command::TogglePreviewColumn => "columns.preview",
            Command::ToggleOutlineColumn => "columns.outline",
        }
    }

    /// Look up a command by its dotted name.
    pub fn from_name(name: &str) -> Option<Command> {
        Self::all().iter().copied().find(|cmd| cmd.name() == name)
    }

    /// Apply the command, returning the new value of the toggled flag.
    pub fn apply(&self, view: &mut ViewOptions) -> bool {
        let flag = match self {
            Command::ToggleLineNumbers => &mut view.line_numbers,
            Command::ToggleLineWrapping => &mut view.line_wrapping,
            Command::ToggleEditorColumn => &mut view.columns.editor,
            Command::TogglePreviewColumn => &mut view.columns.preview,
            Command::ToggleOutlineColumn => &mut view.columns.outline,
        };
        *flag = !*flag;
        *flag
    }

    /// Commands whose label fuzzily matches `query`, best match first.
    ///
    /// An empty query returns every command in palette order.
    pub fn search(query: &str) -> Vec<Command> {
        let query = query.trim();
        if query.is_empty() {
            return Self::all().to_vec();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(Command, i64)> = Self::all()
            .iter()
            .filter_map(|cmd| {
                matcher
                    .fuzzy_match(cmd.label(), query)
                    .map(|score| (*cmd, score))
            })
            .collect();

        // Stable sort keeps palette order among equal scores
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(cmd, _)| cmd).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for cmd in Command::all() {
            assert_eq!(Command::from_name(cmd.name()), Some(*cmd));
        }
        assert_eq!(Command::from_name("options.theme"), None);
    }

    #[test]
    fn test_apply_toggles_one_flag() {
        let mut view = ViewOptions::default();
        assert!(!view.columns.outline);

        assert!(Command::ToggleOutlineColumn.apply(&mut view));
        assert!(view.columns.outline);
        assert!(view.columns.editor);
        assert!(view.columns.preview);

        assert!(!Command::ToggleOutlineColumn.apply(&mut view));
        assert!(!view.columns.outline);
    }

    #[test]
    fn test_apply_editor_options() {
        let mut view = ViewOptions::default();
        assert!(!Command::ToggleLineNumbers.apply(&mut view));
        assert!(!view.line_numbers);
        assert!(!Command::ToggleLineWrapping.apply(&mut view));
        assert!(!view.line_wrapping);
    }

    #[test]
    fn test_search_empty_query_lists_all() {
        assert_eq!(Command::search("  "), Command::all().to_vec());
    }

    #[test]
    fn test_search_filters_by_label() {
        let results = Command::search("outline");
        assert_eq!(results.first(), Some(&Command::ToggleOutlineColumn));

        let results = Command::search("wrap");
        assert_eq!(results, vec![Command::ToggleLineWrapping]);

        assert!(Command::search("zzzz").is_empty());
    }
}
