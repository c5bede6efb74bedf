//! User-facing navigation commands.
//!
//! Each command is a fixed [`ScanRequest`] plus the boundary messages spoken
//! when it finds nothing, one wording for editable text and one for trees.

use crate::nav::{Comparison, REPEAT_TO_END, ScanRequest};
use crate::source::{Direction, UnitKind};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NavCommand {
    NextSibling,
    PreviousSibling,
    NextSiblingForce,
    PreviousSiblingForce,
    LastSibling,
    FirstSibling,
    Child,
    Parent,
    SpeakParent,
}

impl NavCommand {
    /// Scan request for this command.
    ///
    /// `repeat_count` is how many times the command was just repeated in a
    /// row (0 for a single press). Only [`NavCommand::SpeakParent`] uses it:
    /// each repeat goes one ancestor further up.
    pub fn request(self, repeat_count: usize) -> ScanRequest {
        use Comparison::*;
        use Direction::*;

        match self {
            NavCommand::NextSibling => ScanRequest::new(Forward, Equal).bounded(),
            NavCommand::PreviousSibling => ScanRequest::new(Backward, Equal).bounded(),
            NavCommand::NextSiblingForce => ScanRequest::new(Forward, Equal),
            NavCommand::PreviousSiblingForce => ScanRequest::new(Backward, Equal),
            NavCommand::LastSibling => ScanRequest::new(Forward, Equal)
                .bounded()
                .repeat(REPEAT_TO_END),
            NavCommand::FirstSibling => ScanRequest::new(Backward, Equal)
                .bounded()
                .repeat(REPEAT_TO_END),
            NavCommand::Child => ScanRequest::new(Forward, Greater).bounded(),
            NavCommand::Parent => ScanRequest::new(Backward, Less),
            NavCommand::SpeakParent => ScanRequest::new(Backward, Less)
                .repeat(repeat_count.saturating_add(1))
                .speak_only(),
        }
    }

    /// Message for when the command finds nothing.
    pub fn boundary_message(self, kind: UnitKind) -> &'static str {
        match kind {
            UnitKind::Editable => match self {
                NavCommand::NextSibling => "No next line within indentation block",
                NavCommand::PreviousSibling => "No previous line within indentation block",
                NavCommand::NextSiblingForce | NavCommand::LastSibling => {
                    "No next line in the document"
                }
                NavCommand::PreviousSiblingForce | NavCommand::FirstSibling => {
                    "No previous line in the document"
                }
                NavCommand::Child => "No child block within indentation block",
                NavCommand::Parent | NavCommand::SpeakParent => "No parent of indentation block",
            },
            UnitKind::Tree => match self {
                NavCommand::NextSibling | NavCommand::LastSibling => {
                    "No next item on the same level within this subtree"
                }
                NavCommand::PreviousSibling | NavCommand::FirstSibling => {
                    "No previous item on the same level within this subtree"
                }
                NavCommand::NextSiblingForce => "No next item on the same level in this tree view",
                NavCommand::PreviousSiblingForce => {
                    "No previous item on the same level in this tree view"
                }
                NavCommand::Child => "No child",
                NavCommand::Parent => "No parent",
                NavCommand::SpeakParent => "No parent item in this tree view",
            },
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NavCommand::NextSibling => {
                "Move to the next line with the same indentation within the current block"
            }
            NavCommand::PreviousSibling => {
                "Move to the previous line with the same indentation within the current block"
            }
            NavCommand::NextSiblingForce => {
                "Move to the next line with the same indentation, possibly in a following block"
            }
            NavCommand::PreviousSiblingForce => {
                "Move to the previous line with the same indentation, possibly in an earlier block"
            }
            NavCommand::LastSibling => {
                "Move to the last line with the same indentation within the current block"
            }
            NavCommand::FirstSibling => {
                "Move to the first line with the same indentation within the current block"
            }
            NavCommand::Child => "Move to the next deeper line within the current block",
            NavCommand::Parent => "Move to the parent line",
            NavCommand::SpeakParent => "Speak the parent line; repeat to go further up",
        }
    }
}
