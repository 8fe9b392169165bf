use chrono::{TimeZone, Utc};
use rulefeed_domain::{DiffRecord, RuleList};
use std::sync::Arc;

#[test]
fn test_normalize_name_lowercases() {
    assert_eq!(RuleList::normalize_name("GFWList"), "gfwlist");
    assert_eq!(RuleList::normalize_name("  EasyList "), "easylist");
}

#[test]
fn test_validate_name() {
    assert!(RuleList::validate_name("gfwlist").is_ok());
    assert!(RuleList::validate_name("easylist_china-1.0").is_ok());

    let empty = RuleList::validate_name("");
    assert!(empty.unwrap_err().contains("cannot be empty"));

    let bad = RuleList::validate_name("../etc");
    assert!(bad.unwrap_err().contains("can only contain"));

    let long = "a".repeat(101);
    assert!(RuleList::validate_name(&long).is_err());
}

#[test]
fn test_rule_list_creation() {
    let date = Utc.with_ymd_and_hms(2011, 3, 14, 8, 0, 0).unwrap();
    let list = RuleList::new(Some(1), Arc::from("gfwlist"), date);

    assert_eq!(list.id, Some(1));
    assert_eq!(list.name.as_ref(), "gfwlist");
    assert_eq!(list.date, date);
    assert_eq!(list.revision, 0);
    assert_eq!(list.with_revision(42).revision, 42);
}

#[test]
fn test_diff_record_is_empty() {
    let date = Utc.with_ymd_and_hms(2011, 3, 14, 8, 0, 0).unwrap();

    assert!(DiffRecord::new(date, vec![], vec![]).is_empty());
    assert!(!DiffRecord::new(date, vec!["||a.com".to_string()], vec![]).is_empty());
}
