//! Tray menu model.

use std::fmt;

/// Entries in the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrayAction {
    ShowMain,
    HideMain,
    ShowFloating,
    HideFloating,
    Quit,
}

impl TrayAction {
    pub const ALL: [TrayAction; 5] = [
        TrayAction::ShowMain,
        TrayAction::HideMain,
        TrayAction::ShowFloating,
        TrayAction::HideFloating,
        TrayAction::Quit,
    ];

    /// Stable menu item id.
    pub fn id(self) -> &'static str {
        match self {
            Self::ShowMain => "show-main",
            Self::HideMain => "hide-main",
            Self::ShowFloating => "show-floating",
            Self::HideFloating => "hide-floating",
            Self::Quit => "quit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShowMain => "Show Hubdesk",
            Self::HideMain => "Hide Hubdesk",
            Self::ShowFloating => "Show Search",
            Self::HideFloating => "Hide Search",
            Self::Quit => "Quit",
        }
    }

    /// Whether a separator precedes this entry in the menu.
    pub fn separated(self) -> bool {
        matches!(self, Self::ShowFloating | Self::Quit)
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

impl fmt::Display for TrayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for action in TrayAction::ALL {
            assert_eq!(TrayAction::from_id(action.id()), Some(action));
        }
        assert_eq!(TrayAction::from_id("restart"), None);
    }

    #[test]
    fn quit_is_last_and_separated() {
        assert_eq!(TrayAction::ALL.last(), Some(&TrayAction::Quit));
        assert!(TrayAction::Quit.separated());
        assert!(!TrayAction::ShowMain.separated());
    }
}
