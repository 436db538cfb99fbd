//! Client-side lead search.

use crate::types::Lead;

/// Case-insensitive substring match of `term` against the display name,
/// email and mobile phone. An empty term matches everything.
pub fn matches_search(lead: &Lead, term: &str) -> bool {
    let needle = term.to_lowercase();
    let name = lead.display_name();
    [&*name, lead.email.as_str(), lead.mobile_phone.as_str()]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

pub fn filter_leads<'a>(leads: &'a [Lead], term: &str) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| matches_search(lead, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadId;

    fn lead(id: &str, full_name: &str, email: &str, phone: &str) -> Lead {
        Lead {
            id: LeadId::new(id).unwrap(),
            incremental: None,
            first_name: String::new(),
            last_name: String::new(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            mobile_phone: phone.to_string(),
            interest_program: String::new(),
            deleted: false,
        }
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead("1", "Ana Gomez", "ana@x.com", "111"),
            lead("2", "Beto Ruiz", "beto@x.com", "222"),
        ]
    }

    fn ids(found: Vec<&Lead>) -> Vec<&str> {
        found.into_iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn name_term_keeps_only_matching_lead() {
        assert_eq!(ids(filter_leads(&sample(), "ana")), vec!["1"]);
    }

    #[test]
    fn shared_domain_keeps_both() {
        assert_eq!(ids(filter_leads(&sample(), "x.com")), vec!["1", "2"]);
    }

    #[test]
    fn unknown_phone_keeps_none() {
        assert!(filter_leads(&sample(), "999").is_empty());
    }

    #[test]
    fn match_ignores_case() {
        assert_eq!(ids(filter_leads(&sample(), "RUIZ")), vec!["2"]);
        assert_eq!(ids(filter_leads(&sample(), "BeTo@X")), vec!["2"]);
    }

    #[test]
    fn phone_digits_match() {
        assert_eq!(ids(filter_leads(&sample(), "22")), vec!["2"]);
    }

    #[test]
    fn empty_term_keeps_all() {
        assert_eq!(filter_leads(&sample(), "").len(), 2);
    }

    #[test]
    fn falls_back_to_first_and_last_name() {
        let mut unnamed = lead("3", "", "c@y.com", "333");
        unnamed.first_name = "Carla".to_string();
        unnamed.last_name = "Diaz".to_string();
        assert!(matches_search(&unnamed, "carla d"));
    }
}
