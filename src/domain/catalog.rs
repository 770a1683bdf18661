use regex::Regex;

/// Two-letter codes offered by the state filter.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Equipment and service categories offered by the services filter and the
/// browse-by-category links.
pub const DME_SERVICES: [&str; 10] = [
    "Wheelchairs",
    "Hospital Beds",
    "Oxygen Equipment",
    "CPAP/BiPAP",
    "Walkers & Canes",
    "Bathroom Safety",
    "Diabetic Supplies",
    "Prosthetics",
    "Home Monitoring",
    "Compression Garments",
];

/// Category link slug for a service name: lowercase, then every character
/// outside [a-z0-9] becomes a hyphen. Runs are NOT collapsed, so
/// "Walkers & Canes" is "walkers---canes".
pub fn slugify(name: &str) -> String {
    let re = Regex::new("[^a-z0-9]").unwrap();
    re.replace_all(&name.to_lowercase(), "-").to_string()
}

/// Resolve a category slug back to its catalog service name.
pub fn service_for_slug(slug: &str) -> Option<&'static str> {
    DME_SERVICES
        .iter()
        .find(|service| slugify(service) == slug)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugify_matches_site_links() {
        assert_eq!(slugify("Wheelchairs"), "wheelchairs");
        assert_eq!(slugify("Hospital Beds"), "hospital-beds");
        assert_eq!(slugify("CPAP/BiPAP"), "cpap-bipap");
        assert_eq!(slugify("Walkers & Canes"), "walkers---canes");
        assert_eq!(slugify("Bathroom Safety"), "bathroom-safety");
    }

    #[test]
    fn test_every_service_slug_resolves_back() {
        for service in DME_SERVICES {
            let slug = slugify(service);
            assert_eq!(service_for_slug(&slug), Some(service));
        }
    }

    #[test]
    fn test_unknown_slug_resolves_to_none() {
        assert_eq!(service_for_slug("stair-lifts"), None);
        assert_eq!(service_for_slug(""), None);
    }

    #[test]
    fn test_state_list_is_fifty_unique_codes() {
        let unique: HashSet<&str> = US_STATES.iter().copied().collect();
        assert_eq!(unique.len(), 50);
        assert!(US_STATES.iter().all(|s| s.len() == 2));
    }
}
