use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;

use crate::db::entities::todo;

/// Raw form payload as submitted by the browser. Kept as strings so an
/// invalid submission can be redisplayed exactly as the user typed it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
}

#[derive(Debug, Default)]
pub struct FormErrors {
    pub title: Option<&'static str>,
    pub due_date: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.due_date.is_none()
    }
}

/// A validated submission, ready for the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
}

impl TodoForm {
    pub fn validate(&self) -> Result<TodoInput, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required");
        }

        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_string());

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => {
                let parsed = parse_due_date(raw);
                if parsed.is_none() {
                    errors.due_date = Some("Enter a date as YYYY-MM-DD or YYYY-MM-DDTHH:MM");
                }
                parsed
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TodoInput {
            title: title.to_string(),
            description,
            due_date,
        })
    }

    pub fn from_model(item: &todo::Model) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            due_date: item.due_date.as_ref().map(format_due_date).unwrap_or_default(),
        }
    }
}

/// Accepts the values produced by HTML date and datetime-local inputs.
fn parse_due_date(raw: &str) -> Option<DateTimeWithTimeZone> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}

fn format_due_date(value: &DateTimeWithTimeZone) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::TodoForm;

    fn form(title: &str, description: &str, due_date: &str) -> TodoForm {
        TodoForm {
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
        }
    }

    #[test]
    fn accepts_a_title_only_submission() {
        let input = form("Buy milk", "", "")
            .validate()
            .expect("submission should validate");

        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, None);
        assert_eq!(input.due_date, None);
    }

    #[test]
    fn trims_whitespace_from_every_field() {
        let input = form("  Buy milk  ", "  oat, not dairy  ", " 2026-03-01 ")
            .validate()
            .expect("submission should validate");

        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description.as_deref(), Some("oat, not dairy"));
        assert!(input.due_date.is_some());
    }

    #[test]
    fn rejects_an_empty_title() {
        let errors = form("   ", "text", "")
            .validate()
            .expect_err("submission should fail");

        assert_eq!(errors.title, Some("Title is required"));
        assert_eq!(errors.due_date, None);
    }

    #[test]
    fn parses_date_and_datetime_local_formats() {
        let date_only = form("t", "", "2026-03-01")
            .validate()
            .expect("date should validate")
            .due_date
            .expect("date should be present");
        assert_eq!(
            (date_only.year(), date_only.month(), date_only.day()),
            (2026, 3, 1)
        );
        assert_eq!((date_only.hour(), date_only.minute()), (0, 0));

        let with_time = form("t", "", "2026-03-01T09:30")
            .validate()
            .expect("datetime should validate")
            .due_date
            .expect("datetime should be present");
        assert_eq!((with_time.hour(), with_time.minute()), (9, 30));
    }

    #[test]
    fn rejects_a_malformed_due_date() {
        let errors = form("t", "", "next tuesday")
            .validate()
            .expect_err("submission should fail");

        assert!(errors.title.is_none());
        assert!(errors.due_date.is_some());
    }

    #[test]
    fn collects_errors_from_multiple_fields_at_once() {
        let errors = form("", "", "not-a-date")
            .validate()
            .expect_err("submission should fail");

        assert!(errors.title.is_some());
        assert!(errors.due_date.is_some());
    }
}
