mod common;

use common::fixtures::{body_of, minimal_docx, vars};
use stampa::{variables_from_json, PipelineBuilder, PipelineError, TemplateKind, Value};
use std::collections::HashMap;

#[test]
fn package_template_is_detected_and_patched() {
    let template = minimal_docx("Hello {{name:text}}, age {{age:number}}, active {{ok:boolean}}");
    let pipeline = PipelineBuilder::new().build();
    let patched = pipeline
        .patch(
            &template,
            &vars(vec![
                ("name", Value::from("Ann")),
                ("age", Value::from(7i64)),
                ("ok", Value::from(true)),
            ]),
        )
        .unwrap();

    assert_eq!(patched.kind, TemplateKind::Package);
    assert!(body_of(&patched.bytes).contains("Hello Ann, age 7, active Yes"));
    assert_eq!(patched.report.substituted, vec!["name", "age", "ok"]);
    assert!(patched.report.cleared.is_empty());
}

#[test]
fn flat_template_substitutes_in_place() {
    let pipeline = PipelineBuilder::new().build();
    let patched = pipeline
        .patch(
            b"Hello {{name:text}}, age {{age:number}}, active {{ok:boolean}}",
            &vars(vec![
                ("name", Value::from("Ann")),
                ("age", Value::from(7i64)),
                ("ok", Value::from(true)),
            ]),
        )
        .unwrap();

    assert_eq!(patched.kind, TemplateKind::Html);
    assert_eq!(
        String::from_utf8(patched.bytes).unwrap(),
        "Hello Ann, age 7, active Yes"
    );
}

#[test]
fn template_kind_override_beats_sniffing() {
    let pipeline = PipelineBuilder::new()
        .with_template_kind(TemplateKind::Html)
        .build();
    // Leading text, would sniff as HTML anyway; the point is the forced kind
    // also applies to ambiguous bytes.
    let patched = pipeline
        .patch(b"plain {{x:text}}", &vars(vec![("x", Value::from("y"))]))
        .unwrap();
    assert_eq!(patched.kind, TemplateKind::Html);
    assert_eq!(String::from_utf8(patched.bytes).unwrap(), "plain y");
}

#[test]
fn json_variable_maps_feed_the_pipeline() {
    let variables = variables_from_json(r#"{"name": "Ann", "age": 7, "ok": true}"#).unwrap();
    let pipeline = PipelineBuilder::new().build();
    let patched = pipeline
        .patch(
            b"Hello {{name:text}}, age {{age:number}}, active {{ok:boolean}}",
            &variables,
        )
        .unwrap();
    assert_eq!(
        String::from_utf8(patched.bytes).unwrap(),
        "Hello Ann, age 7, active Yes"
    );
}

#[test]
fn unmatched_placeholders_clear_everywhere() {
    let pipeline = PipelineBuilder::new().build();

    let flat = pipeline.patch(b"a {{gone:text}} b", &HashMap::new()).unwrap();
    assert_eq!(String::from_utf8(flat.bytes).unwrap(), "a  b");

    let template = minimal_docx("a {{gone:text}} b");
    let packaged = pipeline.patch(&template, &HashMap::new()).unwrap();
    assert!(body_of(&packaged.bytes).contains("a  b"));
    assert_eq!(packaged.report.cleared, vec!["gone"]);
}

#[test]
fn corrupt_package_aborts_with_no_output() {
    // Correct magic, broken archive: detected as a package, then fatal.
    let pipeline = PipelineBuilder::new().build();
    let result = pipeline.patch(b"PK\x03\x04 not really a zip", &HashMap::new());
    assert!(matches!(result, Err(PipelineError::Patch(_))));
}

#[test]
fn parsing_is_non_destructive_of_the_source() {
    let template_text = "Hello {{name:text,bold:true}}!";
    let before = stampa::parse(template_text);

    let pipeline = PipelineBuilder::new().build();
    pipeline
        .patch(
            template_text.as_bytes(),
            &vars(vec![("name", Value::from("Ann"))]),
        )
        .unwrap();

    // Substituting must not have consumed the original: re-parsing the
    // unsubstituted text still finds the same token.
    let after = stampa::parse(template_text);
    assert_eq!(before, after);
    assert_eq!(after[0].literal_span, "{{name:text,bold:true}}");
}

#[test]
fn flat_path_embeds_images_as_data_uris() {
    use base64::Engine as _;
    use common::fixtures::png_bytes;
    use stampa::{ImageSource, InMemoryResourceProvider};

    let png = png_bytes(8, 4);
    let provider = InMemoryResourceProvider::new();
    provider.add("pic.png", png.clone()).unwrap();
    let pipeline = PipelineBuilder::new()
        .with_resource_provider(Box::new(provider))
        .build();
    let patched = pipeline
        .patch(
            b"<p>{{pic:image}}</p>",
            &vars(vec![(
                "pic",
                Value::Image(ImageSource::Path("pic.png".to_string())),
            )]),
        )
        .unwrap();

    let html = String::from_utf8(patched.bytes).unwrap();
    let prefix = "src=\"data:image/png;base64,";
    let start = html.find(prefix).unwrap() + prefix.len();
    let end = html[start..].find('"').unwrap() + start;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&html[start..end])
        .unwrap();
    assert_eq!(decoded, png);
    assert!(html.contains("width=\"8\""));
    assert!(html.contains("height=\"4\""));
}

#[test]
fn date_values_format_iso() {
    let pipeline = PipelineBuilder::new().build();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let patched = pipeline
        .patch(
            b"due {{due:date}}",
            &vars(vec![("due", Value::Date(date))]),
        )
        .unwrap();
    assert_eq!(String::from_utf8(patched.bytes).unwrap(), "due 2024-05-01");
}

#[test]
fn untyped_placeholders_substitute_from_the_raw_map() {
    let pipeline = PipelineBuilder::new().build();
    let patched = pipeline
        .patch(b"hi {{name}}", &vars(vec![("name", Value::from("Ann"))]))
        .unwrap();
    assert_eq!(String::from_utf8(patched.bytes).unwrap(), "hi Ann");
}

#[test]
fn output_is_invariant_to_value_map_construction_order() {
    let template = minimal_docx("{{a:text}} {{b:text}}");
    let pipeline = PipelineBuilder::new().build();

    let forward = vars(vec![("a", Value::from("1")), ("b", Value::from("2"))]);
    let reverse = vars(vec![("b", Value::from("2")), ("a", Value::from("1"))]);

    let out_forward = pipeline.patch(&template, &forward).unwrap();
    let out_reverse = pipeline.patch(&template, &reverse).unwrap();
    assert_eq!(out_forward.bytes, out_reverse.bytes);
}
