use feed_engine::{
    decode_field, decode_records, format_salary, ApiFullDescription, ApiSalary, Decoded,
    FallbackReason,
};
use serde_json::{json, Value};

#[test]
fn malformed_string_falls_back_to_empty_list() {
    let decoded: Decoded<Vec<String>> = decode_field("job[0].benefits", &json!("not json"));
    assert!(matches!(
        decoded.fallback_reason(),
        Some(FallbackReason::Malformed(_))
    ));
    assert_eq!(decoded.into_value(), Vec::<String>::new());
}

#[test]
fn encoded_string_is_parsed() {
    let decoded: Decoded<Vec<String>> =
        decode_field("job[0].benefits", &json!("[\"Gym\", \"Meals\"]"));
    assert_eq!(
        decoded,
        Decoded::Parsed(vec!["Gym".to_string(), "Meals".to_string()])
    );
}

#[test]
fn structured_value_is_accepted_as_is() {
    let decoded: Decoded<Vec<String>> = decode_field("job[0].skills", &json!(["Rust"]));
    assert_eq!(decoded, Decoded::Parsed(vec!["Rust".to_string()]));
}

#[test]
fn missing_values_are_tagged_missing() {
    for raw in [Value::Null, json!(""), json!("null"), json!("   ")] {
        let decoded: Decoded<Vec<String>> = decode_field("job[0].benefits", &raw);
        assert_eq!(
            decoded,
            Decoded::Fallback {
                value: Vec::new(),
                reason: FallbackReason::Missing
            },
            "raw {raw:?}"
        );
    }
}

#[test]
fn wrong_shape_is_tagged_separately() {
    let decoded: Decoded<Vec<String>> = decode_field("job[0].benefits", &json!({ "a": 1 }));
    assert!(matches!(
        decoded.fallback_reason(),
        Some(FallbackReason::WrongShape(_))
    ));
}

#[test]
fn full_description_falls_back_to_empty_shape() {
    let decoded: Decoded<ApiFullDescription> =
        decode_field("job[0].fullDescription", &json!("Engineering role, hybrid"));
    assert!(decoded.fallback_reason().is_some());
    let value = decoded.into_value();
    assert!(value.category.is_empty());
    assert!(value.description.is_empty());
    assert!(value.requirements.is_empty());
}

#[test]
fn one_bad_field_does_not_spoil_the_record() {
    let fetched = decode_records(vec![json!({
        "id": "7",
        "title": "Mobile Developer",
        "benefits": "not json",
        "skills": ["Swift", "Kotlin"],
        "matchScore": 140
    })]);
    assert_eq!(fetched.listings.len(), 1);
    let listing = &fetched.listings[0];
    assert_eq!(listing.title, "Mobile Developer");
    assert!(listing.details.benefits.is_empty());
    assert_eq!(listing.skills.len(), 2);
    assert_eq!(listing.match_score.value(), 100);
}

#[test]
fn blank_ids_get_positional_fallback() {
    let fetched = decode_records(vec![json!({ "id": "" }), json!({ "id": null })]);
    let ids: Vec<_> = fetched.listings.iter().map(|l| l.id.to_string()).collect();
    assert_eq!(ids, vec!["job-0", "job-1"]);
}

#[test]
fn invalid_apply_url_is_dropped() {
    let fetched = decode_records(vec![json!({ "applyUrl": "apply here" })]);
    assert_eq!(fetched.listings[0].details.apply_url, None);
}

#[test]
fn salary_formatting() {
    let salary = ApiSalary {
        amount: Some(45_000),
        currency: "INR".into(),
        unit: "month".into(),
    };
    assert_eq!(format_salary(Some(&salary)), "INR 45,000/month");

    let zero = ApiSalary {
        amount: Some(0),
        ..salary.clone()
    };
    assert_eq!(format_salary(Some(&zero)), "Not specified");
    assert_eq!(format_salary(None), "Not specified");
}

#[test]
fn wrongly_typed_scalars_only_cost_their_field() {
    let fetched = decode_records(vec![json!({
        "id": "7",
        "title": "Backend Dev",
        "company": "Acme",
        "matchScore": "85",
        "location": ["Pune", "Remote"],
        "benefits": "not json"
    })]);
    assert_eq!(fetched.report.skipped, 0);
    assert_eq!(fetched.listings.len(), 1);

    let listing = &fetched.listings[0];
    assert_eq!(listing.title, "Backend Dev");
    assert_eq!(listing.match_score.value(), 85);
    assert_eq!(listing.location, "");

    let fields: Vec<_> = fetched
        .report
        .fallbacks
        .iter()
        .filter(|f| !matches!(f.reason, FallbackReason::Missing))
        .map(|f| f.field.as_str())
        .collect();
    assert_eq!(fields, vec!["job[0].benefits", "job[0].location"]);
}

#[test]
fn unreadable_match_score_falls_back_to_zero() {
    let fetched = decode_records(vec![json!({ "matchScore": "high" })]);
    assert_eq!(fetched.listings[0].match_score.value(), 0);
    assert!(fetched
        .report
        .fallbacks
        .iter()
        .any(|f| f.field == "job[0].matchScore"
            && matches!(f.reason, FallbackReason::Malformed(_))));
}

#[test]
fn flat_salary_columns_feed_the_salary_label() {
    let fetched = decode_records(vec![
        json!({ "salaryAmount": 45000, "salaryCurrency": "INR", "salaryUnit": "month" }),
        json!({ "salaryAmount": "1200000", "salaryCurrency": "INR", "salaryUnit": "year" }),
        json!({ "salaryAmount": 30000 }),
        json!({
            "salary": { "amount": 900, "currency": "USD", "unit": "week" },
            "salaryAmount": 45000,
            "salaryCurrency": "INR"
        }),
        json!({ "salaryRange": "₹15L - ₹22L", "salaryAmount": 45000 }),
    ]);
    let labels: Vec<_> = fetched
        .listings
        .iter()
        .map(|l| l.salary_range.as_str())
        .collect();
    assert_eq!(
        labels,
        vec![
            "INR 45,000/month",
            "INR 1,200,000/year",
            "30,000",
            "USD 900/week",
            "₹15L - ₹22L",
        ]
    );
}
