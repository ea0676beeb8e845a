use rust_decimal::Decimal;
use tourney_types::{Division, DivisionField, FieldViolation};

use super::{int_in_range, required_text};
use crate::duplicates;

/// 125%, stored as a fraction.
pub const MAX_HDCP_PER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);
pub const MAX_HDCP_FROM: i32 = 300;

/// Check order: name, handicap percentage, handicap base.
///
/// The base is only checked while the percentage is above zero. At zero the
/// base is disabled and any violation it carried is dropped.
pub fn validate(division: &Division) -> (Division, Option<FieldViolation>) {
    let mut out = division.clone();

    out.errors.record(
        DivisionField::Name,
        required_text("Division name", &division.name),
    );

    let per = if division.hdcp_per < Decimal::ZERO || division.hdcp_per > MAX_HDCP_PER {
        Err(FieldViolation::out_of_range("Handicap %", "0%", "125%"))
    } else {
        Ok(())
    };
    out.errors.record(DivisionField::HdcpPer, per);

    if division.handicap_enabled() {
        out.errors.record(
            DivisionField::HdcpFrom,
            int_in_range("Handicap from", division.hdcp_from, 0, MAX_HDCP_FROM),
        );
    } else {
        out.errors.clear(DivisionField::HdcpFrom);
    }

    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

/// [`validate`] plus the division-name uniqueness scan.
pub fn check(division: &Division, siblings: &[Division]) -> (Division, Option<FieldViolation>) {
    let (mut out, _) = validate(division);
    if !out.errors.has(DivisionField::Name)
        && duplicates::duplicate_name(siblings, division, |d| &d.name)
    {
        out.errors.set(
            DivisionField::Name,
            FieldViolation::Duplicate {
                label: "Division name",
                value: division.name.trim().to_string(),
            },
        );
    }
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}
