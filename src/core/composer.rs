use crate::domain::model::FilterCriteria;
use crate::domain::query::{Comparison, CompanyQuery, Field, Predicate, SortDirection};

/// Build the backend query for one search invocation.
///
/// Every query restricts to verified rows. Each non-empty criterion adds one
/// more AND-combined predicate: free text matches name or description as a
/// case-insensitive substring or the services list as an exact tag; location
/// matches city, state or zip code as a substring; a state code must match
/// exactly; a non-empty service selection must overlap the row's tags.
/// Results always come back in ascending name order.
pub fn compose(criteria: &FilterCriteria) -> CompanyQuery {
    let mut predicates = vec![Predicate::Single(Comparison::EqualsBool(
        Field::Verified,
        true,
    ))];

    if !criteria.query.is_empty() {
        predicates.push(Predicate::AnyOf(vec![
            Comparison::Contains(Field::Name, criteria.query.clone()),
            Comparison::Contains(Field::Description, criteria.query.clone()),
            Comparison::HasTag(Field::Services, criteria.query.clone()),
        ]));
    }

    if !criteria.location.is_empty() {
        predicates.push(Predicate::AnyOf(vec![
            Comparison::Contains(Field::City, criteria.location.clone()),
            Comparison::Contains(Field::State, criteria.location.clone()),
            Comparison::Contains(Field::ZipCode, criteria.location.clone()),
        ]));
    }

    if !criteria.state.is_empty() {
        predicates.push(Predicate::Single(Comparison::Equals(
            Field::State,
            criteria.state.clone(),
        )));
    }

    if !criteria.services.is_empty() {
        predicates.push(Predicate::Single(Comparison::Overlaps(
            Field::Services,
            criteria.services.clone(),
        )));
    }

    // verified_only adds nothing: the verified clause above is unconditional.

    CompanyQuery {
        predicates,
        order_by: Field::Name,
        direction: SortDirection::Asc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_compose_to_verified_only() {
        let query = compose(&FilterCriteria::default());

        assert_eq!(query.predicates.len(), 1);
        assert_eq!(
            query.predicates[0],
            Predicate::Single(Comparison::EqualsBool(Field::Verified, true))
        );
        assert_eq!(query.order_by, Field::Name);
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[test]
    fn test_text_query_adds_three_way_or_group() {
        let criteria = FilterCriteria {
            query: "wheelchair".to_string(),
            ..Default::default()
        };
        let query = compose(&criteria);

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(
            query.predicates[1],
            Predicate::AnyOf(vec![
                Comparison::Contains(Field::Name, "wheelchair".to_string()),
                Comparison::Contains(Field::Description, "wheelchair".to_string()),
                Comparison::HasTag(Field::Services, "wheelchair".to_string()),
            ])
        );
    }

    #[test]
    fn test_location_adds_three_way_or_group() {
        let criteria = FilterCriteria {
            location: "San Diego".to_string(),
            ..Default::default()
        };
        let query = compose(&criteria);

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(
            query.predicates[1],
            Predicate::AnyOf(vec![
                Comparison::Contains(Field::City, "San Diego".to_string()),
                Comparison::Contains(Field::State, "San Diego".to_string()),
                Comparison::Contains(Field::ZipCode, "San Diego".to_string()),
            ])
        );
    }

    #[test]
    fn test_state_adds_exact_equality() {
        let criteria = FilterCriteria {
            state: "CA".to_string(),
            ..Default::default()
        };
        let query = compose(&criteria);

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(
            query.predicates[1],
            Predicate::Single(Comparison::Equals(Field::State, "CA".to_string()))
        );
    }

    #[test]
    fn test_services_add_overlap() {
        let criteria = FilterCriteria {
            services: vec!["Wheelchairs".to_string(), "Hospital Beds".to_string()],
            ..Default::default()
        };
        let query = compose(&criteria);

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(
            query.predicates[1],
            Predicate::Single(Comparison::Overlaps(
                Field::Services,
                vec!["Wheelchairs".to_string(), "Hospital Beds".to_string()],
            ))
        );
    }

    #[test]
    fn test_empty_services_add_no_predicate() {
        let criteria = FilterCriteria {
            services: Vec::new(),
            ..Default::default()
        };
        assert_eq!(compose(&criteria).predicates.len(), 1);
    }

    #[test]
    fn test_verified_only_flag_never_duplicates_the_clause() {
        let criteria = FilterCriteria {
            verified_only: true,
            ..Default::default()
        };
        let query = compose(&criteria);

        let verified_clauses = query
            .predicates
            .iter()
            .filter(|p| {
                **p == Predicate::Single(Comparison::EqualsBool(Field::Verified, true))
            })
            .count();
        assert_eq!(verified_clauses, 1);
    }

    #[test]
    fn test_all_criteria_compose_in_fixed_order() {
        let criteria = FilterCriteria {
            query: "oxygen".to_string(),
            location: "92101".to_string(),
            state: "CA".to_string(),
            services: vec!["Oxygen Equipment".to_string()],
            verified_only: true,
        };
        let query = compose(&criteria);

        assert_eq!(query.predicates.len(), 5);
        assert!(matches!(query.predicates[0], Predicate::Single(_)));
        assert!(matches!(query.predicates[1], Predicate::AnyOf(_)));
        assert!(matches!(query.predicates[2], Predicate::AnyOf(_)));
        assert!(matches!(query.predicates[3], Predicate::Single(_)));
        assert!(matches!(query.predicates[4], Predicate::Single(_)));
    }

    #[test]
    fn test_compose_is_pure() {
        let criteria = FilterCriteria {
            query: "cpap".to_string(),
            state: "TX".to_string(),
            ..Default::default()
        };
        assert_eq!(compose(&criteria), compose(&criteria));
    }
}
