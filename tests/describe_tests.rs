// Table tests for recurrence descriptions
use chrono::NaiveDate;
use deployment_calendar::models::recurrence::{RecurrenceRule, RecurrenceType};
use deployment_calendar::services::event::describe_recurrence;
use test_case::test_case;

fn dec_31() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
}

#[test_case(RecurrenceRule::none(), "" ; "none")]
#[test_case(RecurrenceRule::daily(1), "Every day" ; "daily")]
#[test_case(RecurrenceRule::daily(3), "Every 3 days" ; "every three days")]
#[test_case(RecurrenceRule::weekdays(), "Every weekday (Mon-Fri)" ; "weekdays")]
#[test_case(RecurrenceRule::weekly(1, vec![1, 3, 5]), "Weekly on Mon, Wed, Fri" ; "weekly with days")]
#[test_case(RecurrenceRule::weekly(3, vec![0]), "Every 3 weeks on Sun" ; "every three weeks")]
#[test_case(RecurrenceRule::biweekly(vec![6]), "Every 2 weeks on Sat" ; "biweekly")]
#[test_case(RecurrenceRule::monthly(1, 2, 2), "Monthly on the 2nd Tue" ; "monthly")]
#[test_case(RecurrenceRule::monthly(2, 5, 3), "Every 2 months on the 5th Wed" ; "every other month")]
#[test_case(RecurrenceRule::yearly(1), "Yearly" ; "yearly")]
#[test_case(RecurrenceRule::yearly(4), "Every 4 years" ; "every four years")]
#[test_case(RecurrenceRule::weekly(1, vec![1]).times(4), "Weekly on Mon for 4 times" ; "count")]
#[test_case(RecurrenceRule::weekdays().until(dec_31()), "Every weekday (Mon-Fri) until Dec 31, 2025" ; "until")]
fn test_describe(rule: RecurrenceRule, expected: &str) {
    assert_eq!(describe_recurrence(&rule), expected);
}

#[test]
fn test_describe_ignores_invalid_days() {
    let rule = RecurrenceRule {
        kind: RecurrenceType::Weekly,
        interval: 1,
        days_of_week: vec![9, 2],
        ..RecurrenceRule::default()
    };
    assert_eq!(describe_recurrence(&rule), "Weekly on Tue");
}
