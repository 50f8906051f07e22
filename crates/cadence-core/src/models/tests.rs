#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};

    use crate::models::{
        parse_weekday, Priority, RecurrencePattern, RecurrenceRule, RecurrenceType, TaskTemplate,
        PatternSummary, UpdatePatternRequest,
    };

    fn create_test_pattern() -> RecurrencePattern {
        let mut rule = RecurrenceRule::new(RecurrenceType::Weekly, date(2024, 1, 1));
        rule.days_of_week = [1, 3, 5].into_iter().collect();

        RecurrencePattern {
            id: 789,
            owner_id: "user-1".to_string(),
            template: TaskTemplate {
                title: "Morning run".to_string(),
                description: Some("Easy pace around the park".to_string()),
                category_id: Some(3),
                priority: Priority::High,
                estimated_duration: Some(45),
                tags: vec!["health".to_string(), "outdoor".to_string()],
                notes: Some("Bring water".to_string()),
            },
            rule,
            rule_effective_from: None,
            is_active: true,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    #[test]
    fn test_rule_descriptions() {
        let start = date(2024, 1, 3); // a Wednesday
        let describe = |rule: &RecurrenceRule| rule.to_string();

        let mut rule = RecurrenceRule::new(RecurrenceType::Daily, start);
        assert_eq!(describe(&rule), "every day, from 2024-01-03");
        rule.interval_value = 2;
        assert_eq!(describe(&rule), "every 2 days, from 2024-01-03");

        let mut rule = RecurrenceRule::new(RecurrenceType::Weekly, start);
        assert_eq!(describe(&rule), "every week on Wed, from 2024-01-03");
        rule.days_of_week = [5, 1, 3].into_iter().collect();
        assert_eq!(describe(&rule), "every week on Mon, Wed, Fri, from 2024-01-03");

        let mut rule = RecurrenceRule::new(RecurrenceType::Monthly, start);
        rule.day_of_month = Some(31);
        assert_eq!(describe(&rule), "every month on day 31, from 2024-01-03");

        let mut rule = RecurrenceRule::new(RecurrenceType::Yearly, date(2024, 2, 29));
        rule.interval_value = 4;
        assert_eq!(describe(&rule), "every 4 years on Feb 29, from 2024-02-29");
    }

    #[test]
    fn test_rule_description_bounds() {
        let mut rule = RecurrenceRule::new(RecurrenceType::Daily, date(2024, 1, 1));
        rule.end_date = Some(date(2024, 3, 1));
        rule.max_occurrences = Some(10);
        assert_eq!(
            rule.to_string(),
            "every day, from 2024-01-01 until 2024-03-01, at most 10 times"
        );
    }

    #[test]
    fn test_pattern_display() {
        let pattern = create_test_pattern();
        let output = format!("{}", pattern);

        // Header and schedule
        assert!(output.contains("# 789. Morning run"));
        assert!(output.contains("- Schedule: every week on Mon, Wed, Fri, from 2024-01-01"));
        assert!(output.contains("- Status: active"));

        // Template metadata
        assert!(output.contains("- Priority: high"));
        assert!(output.contains("- Category: 3"));
        assert!(output.contains("- Estimate: 45 min"));
        assert!(output.contains("- Tags: health, outdoor"));
        assert!(output.contains("- Owner: user-1"));
        assert!(output.contains("- Created: "));

        // Body
        assert!(output.contains("Easy pace around the park"));
        assert!(output.contains("#### Notes"));
        assert!(output.contains("Bring water"));

        assert!(!output.contains("Current schedule since"));
    }

    #[test]
    fn test_pattern_display_inactive_with_effective_date() {
        let mut pattern = create_test_pattern();
        pattern.is_active = false;
        pattern.rule_effective_from = Some(date(2024, 5, 1));
        pattern.template.tags.clear();
        pattern.owner_id.clear();
        let output = format!("{}", pattern);

        assert!(output.contains("- Status: inactive"));
        assert!(output.contains("- Current schedule since: 2024-05-01"));
        assert!(!output.contains("- Tags:"));
        assert!(!output.contains("- Owner:"));
    }

    #[test]
    fn test_generation_floor() {
        let mut pattern = create_test_pattern();
        assert_eq!(pattern.generation_floor(), date(2024, 1, 1));

        pattern.rule_effective_from = Some(date(2024, 6, 1));
        assert_eq!(pattern.generation_floor(), date(2024, 6, 1));

        // An effective date before the start never widens the range
        pattern.rule_effective_from = Some(date(2023, 6, 1));
        assert_eq!(pattern.generation_floor(), date(2024, 1, 1));
    }

    #[test]
    fn test_rule_validation() {
        let valid = RecurrenceRule::new(RecurrenceType::Monthly, date(2024, 1, 1));
        assert!(valid.validate().is_ok());

        let field_of = |rule: RecurrenceRule| match rule.validate() {
            Err(crate::CadenceError::InvalidInput { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        };

        let mut rule = valid.clone();
        rule.interval_value = 0;
        assert_eq!(field_of(rule), "interval_value");

        let mut rule = valid.clone();
        rule.end_date = Some(date(2023, 12, 31));
        assert_eq!(field_of(rule), "end_date");

        let mut rule = valid.clone();
        rule.day_of_month = Some(32);
        assert_eq!(field_of(rule), "day_of_month");

        let mut rule = valid.clone();
        rule.days_of_week = [7].into_iter().collect();
        assert_eq!(field_of(rule), "days_of_week");

        let mut rule = valid.clone();
        rule.max_occurrences = Some(0);
        assert_eq!(field_of(rule), "max_occurrences");

        // End date equal to start is a single-day series
        let mut rule = valid;
        rule.end_date = Some(date(2024, 1, 1));
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_template_validation() {
        assert!(TaskTemplate::titled("Run").validate().is_ok());
        assert!(TaskTemplate::titled("   ").validate().is_err());

        let mut template = TaskTemplate::titled("Run");
        template.tags = vec!["ok".into(), " ".into()];
        assert!(template.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Weekly".parse::<RecurrenceType>(), Ok(RecurrenceType::Weekly));
        assert_eq!("annually".parse::<RecurrenceType>(), Ok(RecurrenceType::Yearly));
        assert!("fortnightly".parse::<RecurrenceType>().is_err());

        assert_eq!("URGENT".parse::<Priority>(), Ok(Priority::Urgent));
        assert_eq!("normal".parse::<Priority>(), Ok(Priority::Medium));
        assert!("whenever".parse::<Priority>().is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("0").unwrap(), 0);
        assert_eq!(parse_weekday("6").unwrap(), 6);
        assert_eq!(parse_weekday("mon").unwrap(), 1);
        assert_eq!(parse_weekday("Wednesday").unwrap(), 3);
        assert_eq!(parse_weekday(" sat ").unwrap(), 6);
        assert!(parse_weekday("7").is_err());
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn test_update_request_reports_only_real_changes() {
        let mut pattern = create_test_pattern();
        let request = UpdatePatternRequest {
            title: Some("Morning run".to_string()),
            priority: Some(Priority::Low),
            end_date: Some(Some(date(2024, 12, 31))),
            notes: Some(None),
            ..Default::default()
        };
        assert!(!request.is_empty());

        let changes = request.apply_to(&mut pattern);
        assert_eq!(
            changes,
            vec![
                "Changed priority to low".to_string(),
                "Updated notes".to_string(),
                "Set end date to 2024-12-31".to_string(),
            ]
        );
        assert_eq!(pattern.template.priority, Priority::Low);
        assert_eq!(pattern.template.notes, None);
        assert_eq!(pattern.rule.end_date, Some(date(2024, 12, 31)));

        // Applying the same request again changes nothing
        assert!(request.apply_to(&mut pattern).is_empty());
        assert!(UpdatePatternRequest::default().is_empty());
    }

    #[test]
    fn test_pattern_serializes_flat() {
        let pattern = create_test_pattern();
        let json = serde_json::to_value(&pattern).unwrap();

        assert_eq!(json["title"], "Morning run");
        assert_eq!(json["recurrence_type"], "weekly");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["days_of_week"], serde_json::json!([1, 3, 5]));
        assert!(json.get("end_date").is_none());

        let back: RecurrencePattern = serde_json::from_value(json).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_summary_from_pattern() {
        let summary =
            PatternSummary::from_pattern(create_test_pattern(), 6, 2, Some(date(2024, 1, 12)));
        assert_eq!(summary.id, 789);
        assert_eq!(summary.title, "Morning run");
        assert_eq!(summary.pending_instances(), 4);
        assert!(summary.is_active);
    }
}
