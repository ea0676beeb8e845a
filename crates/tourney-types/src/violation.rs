use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Coarse classification of a field violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An empty required text field or selection.
    MissingRequiredField,
    /// A numeric or date value outside its documented bound.
    RangeViolation,
    /// A sibling with an earlier sort order already holds the same key.
    UniquenessViolation,
    /// A relationship between two fields (or a field and its parent) is broken.
    CrossFieldInvariantViolation,
}

/// A problem with one field of one record.
///
/// Violations are attached to the offending field and carry everything needed
/// to render the message shown to the user; `Display` is that message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldViolation {
    Required {
        label: &'static str,
    },
    /// A selection that names a record which does not exist.
    UnknownReference {
        label: &'static str,
    },
    OutOfRange {
        label: &'static str,
        min: String,
        max: String,
    },
    NotOdd {
        label: &'static str,
    },
    NotEven {
        label: &'static str,
    },
    DateOutsideTournament {
        start: NaiveDate,
        end: NaiveDate,
    },
    EndBeforeStart,
    Duplicate {
        label: &'static str,
        value: String,
    },
    /// Lineage + prize fund + other + expenses must equal the entry fee exactly.
    LpoxMismatch {
        entry_fee: Decimal,
        lpox: Decimal,
    },
    GamesExceedEvent {
        games: i32,
        event_games: i32,
    },
    SpanExceedsSquad {
        start: i32,
        games: i32,
        squad_games: i32,
    },
}

impl FieldViolation {
    pub fn out_of_range(label: &'static str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::OutOfRange {
            label,
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Required { .. } | Self::UnknownReference { .. } => {
                ViolationKind::MissingRequiredField
            }
            Self::OutOfRange { .. }
            | Self::NotOdd { .. }
            | Self::NotEven { .. }
            | Self::DateOutsideTournament { .. } => ViolationKind::RangeViolation,
            Self::Duplicate { .. } => ViolationKind::UniquenessViolation,
            Self::EndBeforeStart
            | Self::LpoxMismatch { .. }
            | Self::GamesExceedEvent { .. }
            | Self::SpanExceedsSquad { .. } => ViolationKind::CrossFieldInvariantViolation,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { label } => write!(f, "{label} is required"),
            Self::UnknownReference { label } => write!(f, "{label} is not a valid selection"),
            Self::OutOfRange { label, min, max } => {
                write!(f, "{label} must be between {min} and {max}")
            }
            Self::NotOdd { label } => write!(f, "{label} must be an odd number"),
            Self::NotEven { label } => write!(f, "{label} must be an even number"),
            Self::DateOutsideTournament { start, end } => {
                write!(f, "Date must be between {start} and {end}")
            }
            Self::EndBeforeStart => write!(f, "End date must be on or after the start date"),
            Self::Duplicate { label, value } => {
                write!(f, "{label} \"{value}\" has already been used")
            }
            Self::LpoxMismatch { entry_fee, lpox } => write!(
                f,
                "Entry fee {:.2} does not equal LPOX {:.2}",
                entry_fee, lpox
            ),
            Self::GamesExceedEvent { games, event_games } => write!(
                f,
                "Games {games} exceeds the event's {event_games} games"
            ),
            Self::SpanExceedsSquad {
                start,
                games,
                squad_games,
            } => write!(
                f,
                "Games {start} through {} exceed the squad's {squad_games} games",
                i64::from(*start) + i64::from(*games) - 1
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lpox_mismatch_renders_two_decimals() {
        let v = FieldViolation::LpoxMismatch {
            entry_fee: Decimal::new(80, 0),
            lpox: Decimal::new(81, 0),
        };
        insta::assert_snapshot!(v.to_string(), @"Entry fee 80.00 does not equal LPOX 81.00");
        assert_eq!(v.kind(), ViolationKind::CrossFieldInvariantViolation);
    }

    #[test]
    fn span_message_names_last_game() {
        let v = FieldViolation::SpanExceedsSquad {
            start: 4,
            games: 3,
            squad_games: 5,
        };
        insta::assert_snapshot!(v.to_string(), @"Games 4 through 6 exceed the squad's 5 games");
    }

    #[test]
    fn span_message_does_not_overflow() {
        let v = FieldViolation::SpanExceedsSquad {
            start: 99,
            games: i32::MAX,
            squad_games: 99,
        };
        insta::assert_snapshot!(v.to_string(), @"Games 99 through 2147483745 exceed the squad's 99 games");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            FieldViolation::Required { label: "Name" }.kind(),
            ViolationKind::MissingRequiredField
        );
        assert_eq!(
            FieldViolation::out_of_range("Games", 1, 99).kind(),
            ViolationKind::RangeViolation
        );
        assert_eq!(
            FieldViolation::Duplicate {
                label: "Name",
                value: "Singles".into()
            }
            .kind(),
            ViolationKind::UniquenessViolation
        );
    }
}
