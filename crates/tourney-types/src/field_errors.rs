use crate::violation::FieldViolation;
use std::collections::BTreeMap;

/// Per-field violations of one record.
///
/// Keyed by a field enum whose declaration order is the record's check order,
/// so [`FieldErrors::first`] yields the violation a group summary reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    by_field: BTreeMap<F, FieldViolation>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            by_field: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: F, violation: FieldViolation) {
        self.by_field.insert(field, violation);
    }

    pub fn clear(&mut self, field: F) {
        self.by_field.remove(&field);
    }

    /// Set the field's violation on `Err`, clear it on `Ok`.
    pub fn record(&mut self, field: F, outcome: Result<(), FieldViolation>) {
        match outcome {
            Ok(()) => self.clear(field),
            Err(violation) => self.set(field, violation),
        }
    }

    pub fn get(&self, field: F) -> Option<&FieldViolation> {
        self.by_field.get(&field)
    }

    pub fn has(&self, field: F) -> bool {
        self.by_field.contains_key(&field)
    }

    /// The violation on the earliest field in check order.
    pub fn first(&self) -> Option<(F, &FieldViolation)> {
        self.by_field.iter().next().map(|(f, v)| (*f, v))
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldViolation)> {
        self.by_field.iter().map(|(f, v)| (*f, v))
    }
}
