//! # Curriculum Catalog
//!
//! The static configuration that drives an ingestion run: an ordered list of
//! courses, each an ordered list of levels, each level bound to one search
//! query. The catalog is loaded once at startup, validated, and never mutated
//! during a run.
//!
//! A built-in catalog covers the platform's five launch courses; operators can
//! supply their own as a TOML file instead.

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("course '{course}' has a non-positive level index")]
    InvalidLevelIndex { course: String },
    #[error("course '{course}' declares level {level} more than once")]
    DuplicateLevel { course: String, level: u32 },
}

/// One level of a course: a position, a human topic label, and the search
/// query that sources its videos.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurriculumLevel {
    #[serde(rename = "level")]
    pub level_index: u32,
    pub topic: String,
    pub search_query: String,
}

/// A course and its ordered levels.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Course {
    pub key: String,
    #[serde(rename = "id")]
    pub course_id: i64,
    pub title: String,
    pub levels: Vec<CurriculumLevel>,
}

/// The full ordered course catalog for one ingestion run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

impl Catalog {
    /// Parses and validates a catalog from TOML.
    ///
    /// Course order is declaration order and is preserved; levels are sorted
    /// ascending by index after validation.
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = toml::from_str(input)?;
        for course in &mut catalog.courses {
            let mut seen = Vec::with_capacity(course.levels.len());
            for level in &course.levels {
                if level.level_index == 0 {
                    return Err(CatalogError::InvalidLevelIndex {
                        course: course.key.clone(),
                    });
                }
                if seen.contains(&level.level_index) {
                    return Err(CatalogError::DuplicateLevel {
                        course: course.key.clone(),
                        level: level.level_index,
                    });
                }
                seen.push(level.level_index);
            }
            course.levels.sort_by_key(|level| level.level_index);
        }
        Ok(catalog)
    }

    /// The built-in life-skills catalog used by the platform's launch courses.
    pub fn builtin() -> Self {
        fn level(index: u32, topic: &str, query: &str) -> CurriculumLevel {
            CurriculumLevel {
                level_index: index,
                topic: topic.to_string(),
                search_query: query.to_string(),
            }
        }
        fn course(key: &str, id: i64, title: &str, levels: Vec<CurriculumLevel>) -> Course {
            Course {
                key: key.to_string(),
                course_id: id,
                title: title.to_string(),
                levels,
            }
        }

        Catalog {
            courses: vec![
                course(
                    "adulting_101",
                    1,
                    "Adulting 101: The Survival Guide",
                    vec![
                        level(1, "Laundry Basics", "how to do laundry for beginners symbols sorting"),
                        level(2, "Kitchen Skills", "basic knife skills and boiling an egg tutorial"),
                        level(3, "Basic Repairs", "how to sew a button and iron a shirt"),
                        level(4, "Deep Cleaning", "how to deep clean bathroom and unblock sink"),
                        level(5, "Meal Prep", "weekly meal prep on a budget for beginners"),
                    ],
                ),
                course(
                    "diy_home",
                    2,
                    "DIY Home Repair",
                    vec![
                        level(1, "Toolbox Essentials", "essential tools for homeowners beginners"),
                        level(2, "Wall Fixes", "how to patch drywall nail holes tutorial"),
                        level(3, "Plumbing Basics", "fix running toilet and unclog drain diy"),
                        level(4, "Furniture Assembly", "how to assemble flat pack furniture tips"),
                        level(5, "Electrical Safety", "how to change a light fixture safety"),
                    ],
                ),
                course(
                    "finance_101",
                    3,
                    "Financial Literacy",
                    vec![
                        level(1, "Budgeting", "50 30 20 rule budgeting explained"),
                        level(2, "Banking", "checking vs savings account explained"),
                        level(3, "Taxes", "how to file taxes for beginners simple"),
                        level(4, "Investing", "compound interest explained simply"),
                        level(5, "Credit", "how credit scores work for beginners"),
                    ],
                ),
                course(
                    "office_skills",
                    4,
                    "Office Survival",
                    vec![
                        level(1, "Email Etiquette", "professional email writing tips for work"),
                        level(2, "Spreadsheets", "excel vlookup and pivot tables for beginners"),
                        level(3, "Cyber Security", "phishing email awareness training"),
                        level(4, "Presentations", "powerpoint design tips for non designers"),
                    ],
                ),
                course(
                    "car_basics",
                    5,
                    "Car Maintenance",
                    vec![
                        level(1, "Dashboard Lights", "car dashboard warning lights meaning"),
                        level(2, "Fluids", "how to check oil and coolant level car"),
                        level(3, "Tyres", "how to check tyre pressure and tread depth"),
                        level(4, "Emergency", "how to jump start a car battery safely"),
                    ],
                ),
            ],
        }
    }
}
