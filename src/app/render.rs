use crate::domain::model::{Company, FilterCriteria};
use crate::utils::error::{DirectoryError, Result};

/// Header line above the result list, e.g. `3 results found for "oxygen" in CA`.
pub fn results_summary(count: usize, criteria: &FilterCriteria) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    let mut summary = format!("{} {} found", count, noun);

    if !criteria.query.is_empty() {
        summary.push_str(&format!(" for \"{}\"", criteria.query));
    }
    if !criteria.location.is_empty() {
        summary.push_str(&format!(" near {}", criteria.location));
    }
    if !criteria.state.is_empty() {
        summary.push_str(&format!(" in {}", criteria.state));
    }

    summary
}

fn company_card(company: &Company) -> String {
    let mut card = String::new();
    let badge = if company.verified { " ✓ Verified" } else { "" };

    card.push_str(&format!("{}{}\n", company.name, badge));
    card.push_str(&format!(
        "  {}, {} {}\n",
        company.city, company.state, company.zip_code
    ));
    if let Some(description) = &company.description {
        card.push_str(&format!("  {}\n", description));
    }
    if !company.services.is_empty() {
        card.push_str(&format!("  Services: {}\n", company.services.join(", ")));
    }

    card
}

pub fn render_text(companies: &[Company], criteria: &FilterCriteria) -> String {
    let mut out = String::new();
    out.push_str(&results_summary(companies.len(), criteria));
    out.push('\n');

    if companies.is_empty() {
        out.push_str("\nNo companies found. Try adjusting your search or filter criteria.\n");
        return out;
    }

    for company in companies {
        out.push('\n');
        out.push_str(&company_card(company));
    }

    out
}

pub fn render_detail_text(company: &Company) -> String {
    let mut out = String::new();
    let badge = if company.verified { " ✓ Verified" } else { "" };

    out.push_str(&format!("{}{}\n", company.name, badge));
    if let Some(description) = &company.description {
        out.push_str(&format!("{}\n", description));
    }
    out.push('\n');
    out.push_str(&format!(
        "Address: {}, {}, {} {}\n",
        company.address, company.city, company.state, company.zip_code
    ));
    if let Some(phone) = &company.phone {
        out.push_str(&format!("Phone: {}\n", phone));
    }
    if let Some(email) = &company.email {
        out.push_str(&format!("Email: {}\n", email));
    }
    if let Some(website) = &company.website {
        out.push_str(&format!("Website: {}\n", website));
    }
    if !company.services.is_empty() {
        out.push_str(&format!("Services: {}\n", company.services.join(", ")));
    }
    if !company.certifications.is_empty() {
        out.push_str(&format!(
            "Certifications: {}\n",
            company.certifications.join(", ")
        ));
    }

    out
}

pub fn render_json(companies: &[Company]) -> Result<String> {
    Ok(serde_json::to_string_pretty(companies)?)
}

pub fn render_detail_json(company: &Company) -> Result<String> {
    Ok(serde_json::to_string_pretty(company)?)
}

/// CSV rendition. Columns mirror the seed file format, so an exported result
/// set can be fed straight back in as a seed.
pub fn render_csv(companies: &[Company]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "id",
        "name",
        "description",
        "address",
        "city",
        "state",
        "zip_code",
        "phone",
        "email",
        "website",
        "logo_url",
        "services",
        "certifications",
        "verified",
    ])?;

    for company in companies {
        writer.write_record([
            company.id.to_string().as_str(),
            company.name.as_str(),
            company.description.as_deref().unwrap_or(""),
            company.address.as_str(),
            company.city.as_str(),
            company.state.as_str(),
            company.zip_code.as_str(),
            company.phone.as_deref().unwrap_or(""),
            company.email.as_deref().unwrap_or(""),
            company.website.as_deref().unwrap_or(""),
            company.logo_url.as_deref().unwrap_or(""),
            company.services.join(";").as_str(),
            company.certifications.join(";").as_str(),
            if company.verified { "true" } else { "false" },
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DirectoryError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_results(
    companies: &[Company],
    criteria: &FilterCriteria,
    format: &str,
) -> Result<String> {
    match format {
        "json" => render_json(companies),
        "csv" => render_csv(companies),
        _ => Ok(render_text(companies, criteria)),
    }
}

pub fn render_detail(company: &Company, format: &str) -> Result<String> {
    match format {
        "json" => render_detail_json(company),
        _ => Ok(render_detail_text(company)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn company(name: &str, verified: bool) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some("Full-service DME provider".to_string()),
            address: "1 Main St".to_string(),
            city: "San Diego".to_string(),
            state: "CA".to_string(),
            zip_code: "92101".to_string(),
            phone: Some("555-0100".to_string()),
            email: None,
            website: None,
            logo_url: None,
            services: vec!["Wheelchairs".to_string(), "Hospital Beds".to_string()],
            certifications: vec!["JCAHO".to_string()],
            verified,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts_and_context() {
        let criteria = FilterCriteria {
            query: "oxygen".to_string(),
            state: "CA".to_string(),
            ..Default::default()
        };

        assert_eq!(
            results_summary(1, &criteria),
            "1 result found for \"oxygen\" in CA"
        );
        assert_eq!(
            results_summary(3, &criteria),
            "3 results found for \"oxygen\" in CA"
        );
    }

    #[test]
    fn test_summary_without_criteria_has_no_context() {
        assert_eq!(
            results_summary(2, &FilterCriteria::default()),
            "2 results found"
        );
    }

    #[test]
    fn test_text_rendition_shows_empty_state() {
        let out = render_text(&[], &FilterCriteria::default());

        assert!(out.starts_with("0 results found"));
        assert!(out.contains("No companies found"));
    }

    #[test]
    fn test_text_rendition_badges_verified_companies_only() {
        let rows = vec![company("Acme Medical", true)];
        let out = render_text(&rows, &FilterCriteria::default());
        assert!(out.contains("Acme Medical ✓ Verified"));

        let rows = vec![company("Acme Medical", false)];
        let out = render_text(&rows, &FilterCriteria::default());
        assert!(out.contains("Acme Medical\n"));
        assert!(!out.contains("✓ Verified"));
    }

    #[test]
    fn test_detail_lists_contact_and_tags() {
        let out = render_detail_text(&company("Acme Medical", true));

        assert!(out.contains("Address: 1 Main St, San Diego, CA 92101"));
        assert!(out.contains("Phone: 555-0100"));
        assert!(!out.contains("Email:"));
        assert!(out.contains("Services: Wheelchairs, Hospital Beds"));
        assert!(out.contains("Certifications: JCAHO"));
    }

    #[test]
    fn test_json_rendition_round_trips() {
        let rows = vec![company("Acme Medical", true)];
        let out = render_json(&rows).unwrap();

        let parsed: Vec<Company> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_csv_rendition_has_header_and_one_line_per_company() {
        let rows = vec![company("Acme Medical", true), company("Bay Care", true)];
        let out = render_csv(&rows).unwrap();

        let lines: Vec<&str> = out.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,name,description"));
        assert!(lines[1].contains("Wheelchairs;Hospital Beds"));
    }
}
