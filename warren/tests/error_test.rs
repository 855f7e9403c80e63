
use crate::helper::read_json_file;
use serde_json::json;
use warren::model::document::Document;
use warren::model::error::{Error, ErrorSource};
use warren::model::link::Link;

#[test]
fn errors_from_json_file() {
    let _ = env_logger::try_init();

    let doc = Document::from_slice(read_json_file("data/errors.json").as_bytes()).unwrap();
    assert!(!doc.has_data());
    let errors = doc.errors().unwrap().unwrap();
    assert_eq!(errors.len(), 2);

    let first = errors.get(0).unwrap();
    assert_eq!(first.id(), Some("e-1"));
    assert_eq!(first.status(), Some("422"));
    assert_eq!(first.code(), Some("VALIDATION"));
    assert_eq!(first.source_pointer(), Some("/data/attributes/firstName"));
    assert_eq!(
        first.links().unwrap().get("about").unwrap().href(),
        "http://example.com/docs/errors/validation"
    );
    assert_eq!(first.meta().unwrap().get("limits"), Some(&json!({ "min": 2 })));

    let second = errors.get(1).unwrap();
    assert_eq!(second.status(), Some("403"));
    assert_eq!(second.source_parameter(), Some("include"));
    assert!(!second.has_detail());
    assert!(second.links().is_none());
}

#[test]
fn errors_member_must_be_an_array() {
    let doc: Document = r#"{ "errors": { "status": "500" } }"#.parse().unwrap();
    assert!(doc.errors().is_err());

    let doc: Document = r#"{ "errors": [{ "status": true }] }"#.parse().unwrap();
    assert!(doc.errors().is_err());
}

#[test]
fn merge_keeps_what_the_other_error_lacks() {
    let mut target = Error::new();
    target.set_status(Some("404"));

    let mut source = Error::new();
    source.set_title(Some("Not Found"));

    target.merge(&source);
    assert_eq!(target.status(), Some("404"));
    assert_eq!(target.title(), Some("Not Found"));

    let mut overriding = Error::new();
    overriding.set_status(Some(410));
    overriding.set_source(ErrorSource { pointer: Some("/data".into()), parameter: None });
    overriding.set_about_link("http://example.com/gone".parse::<Link>().unwrap());
    target.merge(&overriding);
    assert_eq!(target.status(), Some("410"));
    assert_eq!(target.source_pointer(), Some("/data"));
    assert!(target.links().unwrap().contains_key("about"));
}

#[test]
fn exchange_array_only_touches_present_members() {
    let mut error = Error::create(&json!({
        "status": "500",
        "title": "Server Error",
        "meta": { "trace": { "id": "abc" } }
    }))
    .unwrap();

    error
        .exchange_array(
            json!({ "detail": "database unavailable", "title": null, "meta": { "trace": { "span": 2 } } })
                .as_object()
                .unwrap(),
        )
        .unwrap();

    assert_eq!(error.status(), Some("500"));
    assert_eq!(error.title(), None);
    assert_eq!(error.detail(), Some("database unavailable"));
    assert_eq!(
        serde_json::Value::Object(error.meta().unwrap().clone()),
        json!({ "trace": { "id": "abc", "span": 2 } })
    );
}

#[test]
fn error_round_trips_through_json() {
    let _ = env_logger::try_init();

    let mut error = Error::new();
    error.set_id(Some(7));
    error.set_status(Some(409));
    error.set_code(Some("CONFLICT"));
    error.set_title(Some("Conflict"));
    error.set_detail(Some("Version mismatch"));
    error.set_source_pointer(Some("/data/attributes/version"));
    error.add_link("about", "http://example.com/errors/conflict".parse::<Link>().unwrap());
    error.set_meta(Some(json!({ "expected": 3, "actual": 2 }).as_object().unwrap().clone()));

    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["status"], json!("409"));
    assert_eq!(value["id"], json!("7"));

    assert_eq!(Error::create(&value).unwrap(), error);
    assert_eq!(serde_json::from_value::<Error>(value).unwrap(), error);
    assert_eq!(Error::create(&serde_json::to_value(&Error::new()).unwrap()).unwrap(), Error::new());
}

#[test]
fn create_many_preserves_order_and_duplicates() {
    let errors = Error::create_many(&[
        json!({ "code": "A" }),
        json!({ "code": "B" }),
        json!({ "code": "A" }),
    ])
    .unwrap();

    let codes: Vec<&str> = errors.iter().filter_map(Error::code).collect();
    assert_eq!(codes, vec!["A", "B", "A"]);
}
