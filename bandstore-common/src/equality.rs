//! No-op update detection
//!
//! Compares the user-editable fields of two band records. Derived data
//! (`albums`, `overallRating`) is never part of the comparison.

use crate::models::BandFields;

/// Names (wire form) of the fields that differ between `old` and `new`
///
/// List fields compare element-wise and in order, so reordering genres or
/// members counts as a change.
pub fn changed_fields(old: &BandFields, new: &BandFields) -> Vec<&'static str> {
    let mut changed = Vec::new();

    if old.name != new.name {
        changed.push("name");
    }
    if old.genre != new.genre {
        changed.push("genre");
    }
    if old.website != new.website {
        changed.push("website");
    }
    if old.record_company != new.record_company {
        changed.push("recordCompany");
    }
    if old.group_members != new.group_members {
        changed.push("groupMembers");
    }
    if old.year_formed != new.year_formed {
        changed.push("yearBandWasFormed");
    }

    changed
}

/// True when applying `new` over `old` would not change anything
pub fn is_unchanged(old: &BandFields, new: &BandFields) -> bool {
    changed_fields(old, new).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> BandFields {
        BandFields {
            name: "Chase Atlantic".to_string(),
            genre: vec!["Alternative".to_string(), "Indie".to_string()],
            website: "http://www.chaseatlantic.com".to_string(),
            record_company: "Warner Bros".to_string(),
            group_members: vec![
                "Mitchel Cave".to_string(),
                "Clinton Cave".to_string(),
                "Christian Anthony".to_string(),
            ],
            year_formed: 2011,
        }
    }

    #[test]
    fn test_identical_records_are_unchanged() {
        assert!(is_unchanged(&fields(), &fields()));
    }

    #[test]
    fn test_each_scalar_field_detected() {
        let old = fields();

        let mut new = fields();
        new.name = "Chase".to_string();
        assert_eq!(changed_fields(&old, &new), vec!["name"]);

        let mut new = fields();
        new.website = "http://www.chaseatlantic2.com".to_string();
        assert_eq!(changed_fields(&old, &new), vec!["website"]);

        let mut new = fields();
        new.record_company = "Atlantic".to_string();
        assert_eq!(changed_fields(&old, &new), vec!["recordCompany"]);

        let mut new = fields();
        new.year_formed = 2012;
        assert_eq!(changed_fields(&old, &new), vec!["yearBandWasFormed"]);
    }

    #[test]
    fn test_list_order_is_significant() {
        let old = fields();
        let mut new = fields();
        new.genre.reverse();

        assert_eq!(changed_fields(&old, &new), vec!["genre"]);
    }

    #[test]
    fn test_list_length_change_detected() {
        let old = fields();
        let mut new = fields();
        new.group_members.pop();

        assert_eq!(changed_fields(&old, &new), vec!["groupMembers"]);
    }

    #[test]
    fn test_multiple_changes_reported_in_field_order() {
        let old = fields();
        let mut new = fields();
        new.year_formed = 2010;
        new.name = "CA".to_string();

        assert_eq!(changed_fields(&old, &new), vec!["name", "yearBandWasFormed"]);
    }
}
