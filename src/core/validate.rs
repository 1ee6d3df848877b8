use crate::config::Config;
use crate::models::coordinates::Coordinates;
use crate::models::lead_type::LeadType;
use crate::models::location_answer::LocationAnswer;
use crate::models::product::Product;
use crate::models::store_category::StoreCategory;
use crate::models::visit_type::VisitType;
use chrono::NaiveDate;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("valid phone regex"));

/// Raw report fields as entered by the salesperson.
#[derive(Debug, Clone)]
pub struct VisitForm {
    pub sr_name: String,
    pub store_name: String,
    pub visit_type: VisitType,
    pub store_category: StoreCategory,
    pub phone: String,
    pub lead_type: LeadType,
    pub follow_up_date: Option<NaiveDate>,
    pub products: Vec<Product>,
    pub order_details: Option<String>,
    pub photo: Option<PathBuf>,
    pub location_answer: LocationAnswer,
}

/// A form that passed validation. Text fields are trimmed, the
/// salesperson uses the configured spelling.
#[derive(Debug, Clone)]
pub struct ValidVisit {
    pub sr_name: String,
    pub store_name: String,
    pub visit_type: VisitType,
    pub store_category: StoreCategory,
    pub phone: String,
    pub lead_type: LeadType,
    pub follow_up_date: Option<NaiveDate>,
    pub products: String,
    pub order_details: Option<String>,
    pub photo: PathBuf,
    pub location: Option<Coordinates>,
    pub location_answer: LocationAnswer,
}

fn phone_is_valid(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    PHONE_CHARS.is_match(phone) && (6..=15).contains(&digits)
}

impl VisitForm {
    /// Check every field and report all problems at once.
    ///
    /// `location` is the captured position, if any. It is only kept when
    /// the salesperson answered YES.
    pub fn validate(
        &self,
        cfg: &Config,
        location: Option<Coordinates>,
    ) -> Result<ValidVisit, Vec<String>> {
        let mut errors = Vec::new();

        let store_name = self.store_name.trim();
        if store_name.is_empty() {
            errors.push("Store Name is required.".to_string());
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push("Phone Number is required.".to_string());
        } else if !phone_is_valid(phone) {
            errors.push("Phone Number is not valid.".to_string());
        }

        if self.photo.is_none() {
            errors.push("Photograph is required.".to_string());
        }

        if self.products.is_empty() {
            errors.push("Select at least one Product.".to_string());
        }

        let location = if self.location_answer.is_yes() {
            if location.is_none() {
                errors.push(
                    "You said YES to location, but none is recorded. Please check 'Record Location'."
                        .to_string(),
                );
            }
            location
        } else {
            None
        };

        let sr_name = cfg.resolve_sales_rep(&self.sr_name);
        if sr_name.is_none() {
            errors.push(format!(
                "Unknown salesperson '{}'. Expected one of: {}.",
                self.sr_name.trim(),
                cfg.sales_reps.join(", ")
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let order_details = self
            .order_details
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ValidVisit {
            sr_name: sr_name.unwrap_or_default().to_string(),
            store_name: store_name.to_string(),
            visit_type: self.visit_type,
            store_category: self.store_category,
            phone: phone.to_string(),
            lead_type: self.lead_type,
            follow_up_date: self.follow_up_date,
            products: Product::join(&self.products),
            order_details,
            photo: self.photo.clone().unwrap_or_default(),
            location,
            location_answer: self.location_answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> VisitForm {
        VisitForm {
            sr_name: "raju das".into(),
            store_name: "  Sen Stores / Mr. Sen ".into(),
            visit_type: VisitType::Revisit,
            store_category: StoreCategory::HoReCa,
            phone: "+91 98300-12345".into(),
            lead_type: LeadType::Warm,
            follow_up_date: None,
            products: vec![Product::Hookah, Product::Cigarette],
            order_details: Some("   ".into()),
            photo: Some(PathBuf::from("shop.jpg")),
            location_answer: LocationAnswer::No,
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        let v = form().validate(&Config::default(), None).unwrap();
        assert_eq!(v.sr_name, "RAJU DAS");
        assert_eq!(v.store_name, "Sen Stores / Mr. Sen");
        assert_eq!(v.products, "CIGARETTE, HOOKAH");
        assert_eq!(v.order_details, None);
        assert_eq!(v.location, None);
    }

    #[test]
    fn all_problems_are_collected_in_order() {
        let mut f = form();
        f.store_name = " ".into();
        f.phone = String::new();
        f.photo = None;
        f.products.clear();
        f.location_answer = LocationAnswer::Yes;

        let errors = f.validate(&Config::default(), None).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Store Name is required.",
                "Phone Number is required.",
                "Photograph is required.",
                "Select at least one Product.",
                "You said YES to location, but none is recorded. Please check 'Record Location'.",
            ]
        );
    }

    #[test]
    fn answer_no_drops_captured_location() {
        let loc = Coordinates::new(1.0, 2.0).unwrap();
        let v = form().validate(&Config::default(), Some(loc)).unwrap();
        assert_eq!(v.location, None);

        let mut yes = form();
        yes.location_answer = LocationAnswer::Yes;
        let v = yes.validate(&Config::default(), Some(loc)).unwrap();
        assert_eq!(v.location, Some(loc));
    }

    #[test]
    fn unknown_salesperson_is_rejected() {
        let mut f = form();
        f.sr_name = "Someone Else".into();
        let errors = f.validate(&Config::default(), None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Unknown salesperson 'Someone Else'"));
    }

    #[test]
    fn phone_format() {
        assert!(phone_is_valid("033 2222 1111"));
        assert!(phone_is_valid("(033) 2222-1111"));
        assert!(!phone_is_valid("12345"));
        assert!(!phone_is_valid("call me maybe"));
        assert!(!phone_is_valid("+1234567890123456"));
    }
}
