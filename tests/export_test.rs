use teller::{export, ExportRecord, InputRecord, Outcome, PredictionResult};

fn full_record() -> InputRecord {
    InputRecord::builder()
        .set_number("age", 30.0)
        .unwrap()
        .set_label("job", "admin.")
        .unwrap()
        .set_label("marital", "divorced")
        .unwrap()
        .set_label("education", "primary")
        .unwrap()
        .set_label("default", "no")
        .unwrap()
        .set_number("balance", 1000.0)
        .unwrap()
        .set_label("housing", "no")
        .unwrap()
        .set_label("loan", "no")
        .unwrap()
        .set_label("contact", "cellular")
        .unwrap()
        .set_number("day", 15.0)
        .unwrap()
        .set_label("month", "apr")
        .unwrap()
        .set_number("duration", 300.0)
        .unwrap()
        .set_number("campaign", 1.0)
        .unwrap()
        .set_number("pdays", -1.0)
        .unwrap()
        .set_number("previous", 0.0)
        .unwrap()
        .set_label("poutcome", "failure")
        .unwrap()
        .build()
}

#[test]
fn test_export_layout_matches_the_downloaded_table() {
    let result = PredictionResult { outcome: Outcome::Yes, confidence: 0.65 };
    let text = String::from_utf8(export(&full_record(), &result)).unwrap();

    let expected_header = "age,job,marital,education,default,balance,housing,loan,contact,day,\
                           month,duration,campaign,pdays,previous,poutcome,Prediction,Confidence";
    let expected_row =
        "30,admin.,divorced,primary,no,1000,no,no,cellular,15,apr,300,1,-1,0,failure,Yes,65.00%";

    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), expected_header);
    assert_eq!(lines.next().unwrap(), expected_row);
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_round_trips_every_input_field() {
    let record = full_record();
    let result = PredictionResult { outcome: Outcome::No, confidence: 0.2 };
    let exported = ExportRecord::new(&record, &result);

    // All 16 original fields, unchanged, plus exactly the two
    // prediction columns.
    assert_eq!(exported.columns().len(), 18);
    for (spec, value) in record.fields() {
        let column = exported
            .columns()
            .iter()
            .find(|(name, _)| name == spec.name)
            .unwrap();
        assert_eq!(column.1, value.to_string());
    }
    let tail: Vec<&str> = exported.columns()[16..].iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(tail, vec!["Prediction", "Confidence"]);
}

#[test]
fn test_confidence_is_formatted_to_two_decimals() {
    let result = PredictionResult { outcome: Outcome::Yes, confidence: 0.7342 };
    assert_eq!(result.confidence_percent(), "73.42%");

    let result = PredictionResult { outcome: Outcome::No, confidence: 0.2 };
    assert_eq!(result.confidence_percent(), "20.00%");
}

#[test]
fn test_fields_containing_separators_are_quoted() {
    let record = InputRecord::builder()
        .set_label("job", "clerk, senior")
        .unwrap()
        .build();
    let result = PredictionResult { outcome: Outcome::Yes, confidence: 0.5 };
    let text = String::from_utf8(export(&record, &result)).unwrap();
    assert!(text.contains("\"clerk, senior\""));
}

#[test]
fn test_negative_and_fractional_numbers_render_plainly() {
    let record = InputRecord::builder()
        .set_number("pdays", -1.0)
        .unwrap()
        .set_number("balance", 950.5)
        .unwrap()
        .build();
    let result = PredictionResult { outcome: Outcome::No, confidence: 0.1 };
    let text = String::from_utf8(export(&record, &result)).unwrap();
    let row = text.lines().nth(1).unwrap();
    assert_eq!(row, "950.5,-1,No,10.00%");
}
