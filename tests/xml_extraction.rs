use rust_data_extraction::ExtractionError;
use rust_data_extraction::ingestion::xml::{extract_xml_from_path, extract_xml_from_str};
use rust_data_extraction::types::{OutputMode, Schema, Value};

fn texts(vs: &[&str]) -> Vec<Value> {
    vs.iter().map(|v| Value::text(*v)).collect()
}

#[test]
fn products_xml_matches_json_layout() {
    let schema: Schema = [
        ("name", "$.xml.product.name.&text"),
        ("price", "$.xml.prices.price[*].@value"),
        ("currency", "$.xml.prices.price[*].currency[*].&text"),
        ("date", "$.xml.info.dates.date[*].&text"),
        ("sales", "$.xml.info.dates.date[*].sale[*].&text"),
    ]
    .into_iter()
    .collect();

    let ds = extract_xml_from_path("tests/fixtures/products.xml", &schema, OutputMode::DataSet)
        .unwrap()
        .into_dataset()
        .unwrap();

    assert_eq!(ds.row_count(), 8);
    assert_eq!(ds.column("name").unwrap(), texts(&["chocolate"; 8]).as_slice());
    assert_eq!(
        ds.column("price").unwrap(),
        &[
            Value::text("10"),
            Value::text("10"),
            Value::text("10"),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::text("14"),
            Value::text("14"),
        ]
    );
    assert_eq!(
        ds.column("currency").unwrap(),
        texts(&["EUR", "USD", "AUD", "EUR", "USD", "AUD", "EUR", "AUD"]).as_slice()
    );
    assert_eq!(
        ds.column("date").unwrap(),
        texts(&[
            "2000-01-01",
            "2000-01-01",
            "2000-01-01",
            "2010-01-01",
            "2010-01-01",
            "2010-01-01",
            "2011-01-01",
            "2011-01-01",
        ])
        .as_slice()
    );
    assert_eq!(
        ds.column("sales").unwrap(),
        texts(&["10", "30", "30", "50", "20", "100", "45", "60"]).as_slice()
    );
}

#[test]
fn readme_example_xml() {
    let schema: Schema = [
        ("items", "$.product.prices.foo[*].@bar"),
        ("prices", "$.product.prices.foo[*].&text"),
        ("date", "$.product.date.&text"),
    ]
    .into_iter()
    .collect();
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
        <product>
          <prices>
            <foo bar="item1">10</foo>
            <foo bar="item2">20</foo>
            <foo bar="item3">30</foo>
          </prices>
          <date>2020-01-01</date>
        </product>"#;

    let ds = extract_xml_from_str(input, &schema, OutputMode::DataSet)
        .unwrap()
        .into_dataset()
        .unwrap();
    assert_eq!(ds.column("items").unwrap(), texts(&["item1", "item2", "item3"]).as_slice());
    assert_eq!(ds.column("prices").unwrap(), texts(&["10", "20", "30"]).as_slice());
    assert_eq!(ds.column("date").unwrap(), texts(&["2020-01-01"; 3]).as_slice());

    let iv = extract_xml_from_str(input, &schema, OutputMode::IndividualValues)
        .unwrap()
        .into_individual_values()
        .unwrap();
    assert_eq!(iv.get("date"), Some(&Value::text("2020-01-01")));
}

#[test]
fn single_repeated_element_is_still_an_axis() {
    let schema: Schema = [("items", "$.list.item[*].&text")].into_iter().collect();
    let ds = extract_xml_from_str("<list><item>only</item></list>", &schema, OutputMode::DataSet)
        .unwrap()
        .into_dataset()
        .unwrap();
    assert_eq!(ds.column("items").unwrap(), texts(&["only"]).as_slice());
}

#[test]
fn entities_are_unescaped() {
    let schema: Schema = [("v", "$.a.@v"), ("t", "$.a.&text")].into_iter().collect();
    let iv = extract_xml_from_str(r#"<a v="x &amp; y">1 &lt; 2</a>"#, &schema, OutputMode::IndividualValues)
        .unwrap()
        .into_individual_values()
        .unwrap();
    assert_eq!(iv.values(), &[Value::text("x & y"), Value::text("1 < 2")]);
}

#[test]
fn broken_xml_is_malformed() {
    let schema: Schema = [("a", "$.a")].into_iter().collect();
    let err = extract_xml_from_str("<a><b></a>", &schema, OutputMode::DataSet).unwrap_err();
    assert!(matches!(err, ExtractionError::MalformedDocument { .. }));
}

#[test]
fn self_closing_element_under_wildcard_is_one_null_row() {
    let schema: Schema = [("v", "$.r.items[*].&text")].into_iter().collect();
    let ds = extract_xml_from_str("<r><items/></r>", &schema, OutputMode::DataSet)
        .unwrap()
        .into_dataset()
        .unwrap();
    assert_eq!(ds.column("v").unwrap(), &[Value::Null]);
}
