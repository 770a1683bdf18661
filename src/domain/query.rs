use crate::domain::model::Company;
use serde::{Deserialize, Serialize};

/// Column of the companies table a comparison applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Description,
    City,
    State,
    ZipCode,
    Services,
    Verified,
}

impl Field {
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zip_code",
            Field::Services => "services",
            Field::Verified => "verified",
        }
    }

    fn text_of<'a>(&self, company: &'a Company) -> Option<&'a str> {
        match self {
            Field::Name => Some(&company.name),
            Field::Description => company.description.as_deref(),
            Field::City => Some(&company.city),
            Field::State => Some(&company.state),
            Field::ZipCode => Some(&company.zip_code),
            Field::Services | Field::Verified => None,
        }
    }

    fn tags_of<'a>(&self, company: &'a Company) -> Option<&'a [String]> {
        match self {
            Field::Services => Some(&company.services),
            _ => None,
        }
    }
}

/// One column comparison. The set is fixed to what the search flow emits;
/// arbitrary operators are deliberately not representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Exact string equality.
    Equals(Field, String),
    /// Boolean equality.
    EqualsBool(Field, bool),
    /// Case-insensitive substring match.
    Contains(Field, String),
    /// Tag list contains the value as one exact tag.
    HasTag(Field, String),
    /// Tag list shares at least one tag with the given set.
    Overlaps(Field, Vec<String>),
}

impl Comparison {
    /// Evaluate against one row. NULL text columns never match, mirroring
    /// the backend's ILIKE semantics.
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            Comparison::Equals(field, value) => field.text_of(company) == Some(value.as_str()),
            Comparison::EqualsBool(field, value) => match field {
                Field::Verified => company.verified == *value,
                _ => false,
            },
            Comparison::Contains(field, needle) => field
                .text_of(company)
                .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            Comparison::HasTag(field, tag) => field
                .tags_of(company)
                .map(|tags| tags.iter().any(|t| t == tag))
                .unwrap_or(false),
            Comparison::Overlaps(field, wanted) => field
                .tags_of(company)
                .map(|tags| tags.iter().any(|t| wanted.iter().any(|w| w == t)))
                .unwrap_or(false),
        }
    }
}

/// A top-level predicate: one comparison, or an OR-group of comparisons.
/// Predicates combine with AND; deeper nesting is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Single(Comparison),
    AnyOf(Vec<Comparison>),
}

impl Predicate {
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            Predicate::Single(comparison) => comparison.matches(company),
            Predicate::AnyOf(comparisons) => comparisons.iter().any(|c| c.matches(company)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The composed read query: AND-combined predicates plus one sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyQuery {
    pub predicates: Vec<Predicate>,
    pub order_by: Field,
    pub direction: SortDirection,
}

impl CompanyQuery {
    pub fn matches(&self, company: &Company) -> bool {
        self.predicates.iter().all(|p| p.matches(company))
    }

    /// Filter and sort a row set in memory. The sort is stable: rows with
    /// equal keys keep their source order.
    pub fn apply(&self, rows: Vec<Company>) -> Vec<Company> {
        let mut hits: Vec<Company> = rows.into_iter().filter(|c| self.matches(c)).collect();
        hits.sort_by(|a, b| {
            let left = self.order_by.text_of(a).unwrap_or("");
            let right = self.order_by.text_of(b).unwrap_or("");
            match self.direction {
                SortDirection::Asc => left.cmp(right),
                SortDirection::Desc => right.cmp(left),
            }
        });
        hits
    }
}
