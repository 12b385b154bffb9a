//! Whether a clipboard event is handled at block level

use std::fmt;

use crate::event::ClipboardEventKind;
use crate::selection::SelectionSnapshot;

/// Facts about the event itself, independent of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFacts {
    pub kind: ClipboardEventKind,
    /// A block-level interceptor already took over the event
    pub already_claimed: bool,
    /// The event target lies inside the managed container
    pub target_in_container: bool,
}

/// Why an event was left to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclineReason {
    /// Another block-level interceptor already took over the event
    AlreadyClaimed,
    EmptySelection,
    /// A single block is selected and native text selection takes precedence
    NativeTextSelection,
    /// The event came from outside the managed container
    ForeignTarget,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::AlreadyClaimed => "event already claimed",
            Self::EmptySelection => "no block selected",
            Self::NativeTextSelection => "native text selection",
            Self::ForeignTarget => "target outside container",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Decline(DeclineReason),
    Intercept(ClipboardEventKind),
}

impl Decision {
    pub fn is_intercept(&self) -> bool {
        matches!(self, Self::Intercept(_))
    }
}

/// Decide whether to take over an event.
///
/// Checks run in order and the first decline wins. A multi-block selection
/// skips the native text selection check; it never skips containment.
pub fn decide(facts: &EventFacts, snapshot: &SelectionSnapshot) -> Decision {
    if facts.already_claimed {
        return Decision::Decline(DeclineReason::AlreadyClaimed);
    }
    if snapshot.is_empty() {
        return Decision::Decline(DeclineReason::EmptySelection);
    }
    if !snapshot.has_multi_selection && snapshot.has_native_text_selection {
        return Decision::Decline(DeclineReason::NativeTextSelection);
    }
    if !facts.target_in_container {
        return Decision::Decline(DeclineReason::ForeignTarget);
    }
    Decision::Intercept(facts.kind)
}
