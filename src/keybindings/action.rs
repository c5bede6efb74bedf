//! Bindable actions.

use crate::commands::NavCommand;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Everything a gesture can trigger: the navigation commands plus the
/// interactive session controls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    NextSibling,
    PreviousSibling,
    NextSiblingForce,
    PreviousSiblingForce,
    LastSibling,
    FirstSibling,
    Child,
    Parent,
    SpeakParent,

    // === Session ===
    /// Leave interactive mode
    Quit,
    /// List the active gestures
    ToggleHelp,
}

impl Action {
    /// The navigation command this action runs, if any.
    pub fn command(self) -> Option<NavCommand> {
        match self {
            Action::NextSibling => Some(NavCommand::NextSibling),
            Action::PreviousSibling => Some(NavCommand::PreviousSibling),
            Action::NextSiblingForce => Some(NavCommand::NextSiblingForce),
            Action::PreviousSiblingForce => Some(NavCommand::PreviousSiblingForce),
            Action::LastSibling => Some(NavCommand::LastSibling),
            Action::FirstSibling => Some(NavCommand::FirstSibling),
            Action::Child => Some(NavCommand::Child),
            Action::Parent => Some(NavCommand::Parent),
            Action::SpeakParent => Some(NavCommand::SpeakParent),
            Action::Quit | Action::ToggleHelp => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self.command() {
            Some(command) => command.description(),
            None => match self {
                Action::Quit => "Quit",
                _ => "Show gestures",
            },
        }
    }

    pub fn category(&self) -> &'static str {
        if self.command().is_some() {
            "Navigation"
        } else {
            "Session"
        }
    }
}

impl From<NavCommand> for Action {
    fn from(command: NavCommand) -> Self {
        match command {
            NavCommand::NextSibling => Action::NextSibling,
            NavCommand::PreviousSibling => Action::PreviousSibling,
            NavCommand::NextSiblingForce => Action::NextSiblingForce,
            NavCommand::PreviousSiblingForce => Action::PreviousSiblingForce,
            NavCommand::LastSibling => Action::LastSibling,
            NavCommand::FirstSibling => Action::FirstSibling,
            NavCommand::Child => Action::Child,
            NavCommand::Parent => Action::Parent,
            NavCommand::SpeakParent => Action::SpeakParent,
        }
    }
}
