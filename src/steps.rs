//! Question step definitions
//!
//! The ordered questionnaire the conversation walks through. The table is
//! pure data; the engine only ever does indexed lookup on it.

use serde::Serialize;

/// Input surface and validation class for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Text,
    Select,
    Phone,
    Email,
}

/// One question in the fixed sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Storage key for the answer
    pub key: &'static str,
    /// Display text shown to the user
    pub prompt: &'static str,
    pub kind: StepKind,
    /// Allowed choices; non-empty only for `Select` steps
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [&'static str],
    /// Key of the step that is skipped when this one is answered "No"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<&'static str>,
}

impl Step {
    pub const fn text(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: StepKind::Text,
            options: &[],
            follow_up: None,
        }
    }

    pub const fn select(
        key: &'static str,
        prompt: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            prompt,
            kind: StepKind::Select,
            options,
            follow_up: None,
        }
    }

    pub const fn phone(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: StepKind::Phone,
            options: &[],
            follow_up: None,
        }
    }

    pub const fn email(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: StepKind::Email,
            options: &[],
            follow_up: None,
        }
    }

    /// A yes/no step whose "No" answer skips the named follow-up step
    pub const fn branching(
        key: &'static str,
        prompt: &'static str,
        follow_up: &'static str,
    ) -> Self {
        Self {
            key,
            prompt,
            kind: StepKind::Select,
            options: &["Yes", "No"],
            follow_up: Some(follow_up),
        }
    }
}

/// Immutable, ordered sequence of steps
#[derive(Debug, Clone)]
pub struct StepTable {
    steps: Vec<Step>,
}

impl StepTable {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The production advisory questionnaire
    pub fn standard() -> Self {
        Self::new(STANDARD_STEPS.to_vec())
    }

    /// Step at position `i`, or `None` once the sequence is exhausted
    pub fn step_at(&self, i: usize) -> Option<&Step> {
        self.steps.get(i)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[allow(dead_code)] // Used by table-integrity tests
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

const BUSINESS_TYPES: &[&str] = &[
    "Leather products",
    "Moulding of items",
    "Products associated with natural fragrances and tastes",
    "Consulting, management, and placement services",
    "Educational Training Institutes",
    "Energy-saving pump manufacturers",
    "Photocopying Agencies/Centres",
    "Crèches and beauty salons",
    "Garages and auto repair services",
    "X-ray machine manufacturers",
    "Rental and leasing of equipment",
    "Photographic lab",
    "Maintenance of farm machinery for agriculture",
    "Back-office operations",
    "Local and International calling booths",
    "Low-capital retail trade enterprise",
    "Dish cable TV with multiple channels using a dish antenna",
    "Dry cleaning and laundry",
    "Hardened metal ware",
    "Electronic components for automobiles",
    "Electronic monitoring and security",
    "Engineering Mechanics",
    "Engineering and manufacturing",
    "VCRs, recorders, radios, transformers, motors, and watches",
    "Plants' micronutrients",
    "Ayurvedic items and active pharmaceutical components",
    "Products made from Khadi and Hosiery",
    "Businesses involved in crafting activities",
    "Paper printing and other paper-based products",
    "Coir Products",
    "Furniture goods",
    "Farming of poultry",
    "Bicycle components",
    "Items of stationery",
    "Contact Centre",
    "Products made of rubber",
    "IT services",
    "Industry testing laboratories",
    "Automobile companies",
    "Ceramics and glass products",
    "Retail Operations",
];

const STANDARD_STEPS: &[Step] = &[
    Step::text("name", "What’s your name?"),
    Step::select(
        "gender",
        "Great to meet you! Can you tell me your gender?",
        &["Male", "Female", "Other"],
    ),
    Step::text("age", "Thanks! How old are you?"),
    Step::text("town", "Which town do you live in?"),
    Step::text("district", "And your district?"),
    Step::text(
        "educational_qualification",
        "What is your educational qualification?",
    ),
    Step::select(
        "category",
        "Which category do you belong to?",
        &["General", "OBC", "SC/ST", "Other"],
    ),
    Step::phone("contact_number", "Please share your contact number."),
    Step::email("email_id", "And your email ID?"),
    Step::select(
        "is_first_business",
        "Is this your first business?",
        &["Yes", "No"],
    ),
    Step::text("business_location", "Where is your business located?"),
    Step::select(
        "sector",
        "What sector does your business belong to?",
        &["Manufacturing", "Services", "Trading"],
    ),
    Step::select(
        "business_type",
        "What type of business do you plan to start?",
        BUSINESS_TYPES,
    ),
    Step::text(
        "business_idea_brief",
        "Could you tell me a little about your business idea? (Brief description, max 100 words)",
    ),
    Step::branching(
        "market_research",
        "Have you conducted any market research?",
        "research_summary",
    ),
    Step::text(
        "research_summary",
        "Please provide a brief summary of your research (up to 100 words).",
    ),
    Step::branching(
        "skills_experience",
        "Do you have relevant skills or experience for this business?",
        "skills_description",
    ),
    Step::text(
        "skills_description",
        "Please describe your skills or experience (up to 100 words).",
    ),
    Step::select(
        "timeline",
        "When do you plan to start your business?",
        &[
            "In 3 to 6 months",
            "In 6 to 12 months",
            "After 1 year",
            "Not yet decided",
        ],
    ),
    Step::select(
        "investment_amount",
        "How much do you plan to invest?",
        &[
            "Under Rs. 3 Lakh",
            "Rs. 3-5 Lakh",
            "Rs. 5-10 Lakh",
            "Rs 10-25 Lakh",
        ],
    ),
    Step::text(
        "goals_description",
        "Do you have any specific milestones or goals for the first year? (Up to 100 words)",
    ),
    Step::text(
        "concerns_description",
        "Do you have any concerns or questions about starting your business? (Up to 100 words)",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_table_has_unique_keys() {
        let table = StepTable::standard();
        let keys: HashSet<&str> = table.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), table.len());
    }

    #[test]
    fn follow_ups_name_the_immediately_succeeding_step() {
        let table = StepTable::standard();
        for (i, step) in table.iter().enumerate() {
            if let Some(follow_up) = step.follow_up {
                let next = table
                    .step_at(i + 1)
                    .expect("branching step must not be last");
                assert_eq!(next.key, follow_up, "follow-up of {} out of place", step.key);
            }
        }
    }

    #[test]
    fn branching_steps_are_selects_offering_no() {
        let table = StepTable::standard();
        for step in table.iter() {
            if step.follow_up.is_some() {
                assert_eq!(step.kind, StepKind::Select);
                assert!(step.options.contains(&"No"));
            }
        }
    }

    #[test]
    fn select_steps_carry_options() {
        let table = StepTable::standard();
        for step in table.iter() {
            match step.kind {
                StepKind::Select => assert!(!step.options.is_empty(), "{}", step.key),
                _ => assert!(step.options.is_empty(), "{}", step.key),
            }
        }
    }

    #[test]
    fn lookup_past_the_end_is_none() {
        let table = StepTable::standard();
        assert!(table.step_at(table.len()).is_none());
        assert!(table.step_at(0).is_some());
    }
}
