// nav.rs
//
// Guide navigation: an active step (index into the fixed step order) and a
// view mode. All transitions are index arithmetic clamped at the ends, so
// the position shared in a URL can never point outside the step list.

use std::fmt;

use crate::content::{self, STEPS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    Accordion,
    #[default]
    Focus,
}

impl ViewMode {
    /// Anything other than a literal `accordion` falls back to focus view,
    /// so stale or hand-edited links still resolve.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("accordion") => ViewMode::Accordion,
            _ => ViewMode::Focus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Accordion => "accordion",
            ViewMode::Focus => "focus",
        }
    }

    pub fn is_accordion(&self) -> bool {
        matches!(self, ViewMode::Accordion)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown or absent step ids resolve to the first step.
pub fn sanitize_step(value: Option<&str>) -> &'static str {
    value
        .and_then(|id| STEPS.iter().find(|s| s.id == id))
        .map(|s| s.id)
        .unwrap_or(STEPS[0].id)
}

pub fn sanitize_index(value: Option<&str>) -> usize {
    content::step_index(sanitize_step(value)).unwrap_or(0)
}

pub fn next_index(idx: usize) -> usize {
    (idx + 1).min(STEPS.len() - 1)
}

pub fn prev_index(idx: usize) -> usize {
    idx.saturating_sub(1)
}

/// Step to move to after completing the step at `idx` in focus view, or
/// `None` when already on the last step.
pub fn advance_target(idx: usize) -> Option<&'static str> {
    if idx + 1 < STEPS.len() {
        Some(STEPS[idx + 1].id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_sanitizing_prefers_focus() {
        assert_eq!(ViewMode::from_query(Some("accordion")), ViewMode::Accordion);
        assert_eq!(ViewMode::from_query(Some("focus")), ViewMode::Focus);
        assert_eq!(ViewMode::from_query(Some("garbage")), ViewMode::Focus);
        assert_eq!(ViewMode::from_query(None), ViewMode::Focus);
    }

    #[test]
    fn unknown_step_resolves_to_first() {
        assert_eq!(sanitize_step(None), STEPS[0].id);
        assert_eq!(sanitize_step(Some("not_a_step")), STEPS[0].id);
        assert_eq!(sanitize_step(Some("breadboard")), "breadboard");
        assert_eq!(sanitize_index(Some("dashboard")), STEPS.len() - 1);
    }

    #[test]
    fn next_clamps_at_last_step() {
        let last = STEPS.len() - 1;
        assert_eq!(next_index(last), last);
        assert_eq!(next_index(0), 1);
    }

    #[test]
    fn previous_clamps_at_first_step() {
        assert_eq!(prev_index(0), 0);
        assert_eq!(prev_index(3), 2);
    }

    #[test]
    fn advance_stops_at_last_step() {
        assert_eq!(advance_target(0), Some(STEPS[1].id));
        assert_eq!(advance_target(STEPS.len() - 1), None);
    }
}

// EOF
