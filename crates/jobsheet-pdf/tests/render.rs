//! End-to-end renders against synthetic templates.

use std::sync::{Arc, Mutex};

use jiff::civil::{Date, date};
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::form_kind::FormKind;
use jobsheet_pdf::fixtures::{self, fillable_pdf, text};
use jobsheet_pdf::signature::{Scaling, SignatureFetcher, decode_png, signature_bytes};
use jobsheet_pdf::templates::get_template;
use jobsheet_pdf::{RenderError, Renderer};
use lopdf::{Document, Object};
use serde_json::json;
use tempfile::TempDir;

const TODAY: Date = date(2026, 10, 19);

/// 1×1 PNG: one blue pixel at half alpha.
const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn forms_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_forms_dir(dir.path()).unwrap();
    dir
}

fn data(value: serde_json::Value) -> FormData {
    serde_json::from_value(value).unwrap()
}

fn stream_text(bytes: &[u8]) -> String {
    let mut doc = Document::load_mem(bytes).unwrap();
    doc.decompress();
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            Object::Stream(stream) => Some(String::from_utf8_lossy(&stream.content).into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn hex(value: &str) -> String {
    let encoded: String = value.bytes().map(|b| format!("{b:02X}")).collect();
    format!("<{encoded}>")
}

fn image_count(bytes: &[u8]) -> usize {
    let doc = Document::load_mem(bytes).unwrap();
    doc.objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(s) => {
                matches!(s.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image")
            }
            _ => false,
        })
        .count()
}

fn is_flat(bytes: &[u8]) -> bool {
    let doc = Document::load_mem(bytes).unwrap();
    let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let no_form = !doc.get_dictionary(root).unwrap().has(b"AcroForm");
    let no_widgets = !doc.objects.values().any(|obj| match obj {
        Object::Dictionary(d) => matches!(d.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Widget"),
        _ => false,
    });
    no_form && no_widgets
}

/// Serves a fixed body for any URL and records what was asked for.
struct StaticFetcher {
    body: Vec<u8>,
    requested: Mutex<Vec<String>>,
}

impl SignatureFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

fn png_bytes() -> Vec<u8> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(PNG_BASE64)
        .unwrap()
}

#[test]
fn every_form_type_renders_a_flat_pdf() {
    let dir = forms_dir();
    let renderer = Renderer::new(dir.path());
    for kind in FormKind::ALL {
        let bytes = renderer
            .render(kind.id(), &FormData::new(), TODAY)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert!(bytes.starts_with(b"%PDF-"), "{kind}");
        assert!(is_flat(&bytes), "{kind}");
        assert_eq!(image_count(&bytes), 0, "{kind}");
    }
}

#[test]
fn unknown_form_type_is_rejected_before_loading() {
    let renderer = Renderer::new("/nonexistent/forms");
    let err = renderer
        .render("form-unknown", &FormData::new(), TODAY)
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFormType(id) if id == "form-unknown"));
}

#[test]
fn clearance_values_reach_the_page() {
    let dir = forms_dir();
    let renderer = Renderer::new(dir.path());
    let submission = data(json!({
        "field-cname": "Thandi Mokoena",
        "field-oldgeyser": "Other",
        "field-oldgeyser-details": "Franke 100L",
        "field-cquality6": "8",
    }));
    let bytes = renderer
        .render("form-clearance-certificate", &submission, TODAY)
        .unwrap();

    let content = stream_text(&bytes);
    assert!(content.contains(&hex("Thandi Mokoena")));
    assert!(content.contains(&hex("Franke 100L")));
    assert!(content.contains(&hex("October 19th, 2026")));
}

#[test]
fn strict_template_missing_is_template_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Renderer::new(dir.path());
    let err = renderer
        .render("form-clearance-certificate", &FormData::new(), TODAY)
        .unwrap_err();
    match err {
        RenderError::TemplateNotFound { path, .. } => {
            assert!(path.ends_with("BBPClearanceCertificate.pdf"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_strict_template_is_template_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("liabWave.pdf"), b"%PDF-1.7 truncated").unwrap();
    let err = Renderer::new(dir.path())
        .render("form-liability-certificate", &FormData::new(), TODAY)
        .unwrap_err();
    assert!(matches!(err, RenderError::TemplateNotFound { .. }));
}

#[test]
fn absa_falls_back_to_summary_when_template_missing() {
    let dir = tempfile::tempdir().unwrap();
    let submission = data(json!({
        "field-csa-ref": "CSA-991",
        "field-full-name": "",
        "field-claim-number": "CLM-1",
    }));
    let bytes = Renderer::new(dir.path())
        .render("form-absa-certificate", &submission, TODAY)
        .unwrap();

    assert!(bytes.starts_with(b"%PDF-"));
    let content = stream_text(&bytes);
    assert!(content.contains("(ABSA Certificate)"));
    assert!(content.contains("(CSA Ref: CSA-991)"));
    assert!(content.contains("(Claim Number: CLM-1)"));
    assert!(content.contains("(Date: 19th,10)"));
    assert!(!content.contains("Full Name of Insured"));
}

#[test]
fn absa_falls_back_when_template_has_no_fields() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ABSACertificate.pdf"), fixtures::plain_pdf()).unwrap();
    let bytes = Renderer::new(dir.path())
        .render(
            "form-absa-certificate",
            &data(json!({"field-csa-ref": "R1"})),
            TODAY,
        )
        .unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert!(stream_text(&bytes).contains("(CSA Ref: R1)"));
}

#[test]
fn absa_fills_template_and_grid() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ABSACertificate.pdf"), fixtures::absa_pdf()).unwrap();
    let bytes = Renderer::new(dir.path())
        .render(
            "form-absa-certificate",
            &data(json!({
                "field-full-name": "Pieter Naidoo",
                "field-excess-paid-absa": "yes",
                "field-checkbox1": "2",
                "field-checkbox13": "99",
            })),
            TODAY,
        )
        .unwrap();

    assert!(is_flat(&bytes));
    let content = stream_text(&bytes);
    assert!(content.contains(&hex("Pieter Naidoo")));
    assert!(content.contains(&hex("19th,10")));
    assert!(!content.contains("(ABSA Certificate)"));
}

#[test]
fn data_url_signature_is_embedded() {
    let dir = forms_dir();
    let submission = data(json!({
        "field-signature-sahl": format!("data:image/png;base64,{PNG_BASE64}"),
    }));
    let bytes = Renderer::new(dir.path())
        .render("form-sahl-certificate", &submission, TODAY)
        .unwrap();

    assert_eq!(image_count(&bytes), 2);
    // Bounded scaling caps a 1×1 image at half size.
    assert!(stream_text(&bytes).contains("0.5 0 0 0.5 400 100 cm"));
}

#[test]
fn url_signature_goes_through_the_fetcher() {
    let dir = forms_dir();
    let fetcher = Arc::new(StaticFetcher {
        body: png_bytes(),
        requested: Mutex::new(Vec::new()),
    });
    let renderer = Renderer::new(dir.path()).with_fetcher(fetcher.clone());
    let submission = data(json!({
        "signature": "https://cdn.example.com/sig.png",
        "field-signature-liability": "data:image/png;base64,ignored",
    }));
    let bytes = renderer
        .render("form-liability-certificate", &submission, TODAY)
        .unwrap();

    assert_eq!(
        *fetcher.requested.lock().unwrap(),
        vec!["https://cdn.example.com/sig.png".to_string()]
    );
    assert_eq!(image_count(&bytes), 2);
    assert!(stream_text(&bytes).contains("0.3 0 0 0.3 400 100 cm"));
}

#[test]
fn bad_signature_does_not_fail_the_render() {
    let dir = forms_dir();
    for payload in [
        "data:image/png;base64,@@@",
        "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQ==",
        "ftp://example.com/sig.png",
    ] {
        let bytes = Renderer::new(dir.path())
            .render(
                "form-discovery-geyser",
                &data(json!({ "signature": payload, "field-claim-number": "C9" })),
                TODAY,
            )
            .unwrap();
        assert_eq!(image_count(&bytes), 0, "{payload}");
        assert!(stream_text(&bytes).contains(&hex("C9")));
    }
}

#[test]
fn signature_helpers() {
    let fetcher = StaticFetcher {
        body: Vec::new(),
        requested: Mutex::new(Vec::new()),
    };
    let bytes = signature_bytes(&format!("data:image/png;base64,{PNG_BASE64}"), &fetcher).unwrap();
    let image = decode_png(&bytes).unwrap();
    assert_eq!((image.width, image.height), (1, 1));
    assert_eq!(image.rgb.len(), 3);
    assert_eq!(image.rgb, vec![0, 0, 255]);
    assert_eq!(image.alpha, vec![127]);

    assert!(matches!(
        signature_bytes("data:image/png;base64", &fetcher),
        Err(RenderError::SignatureProcessing(_))
    ));
    assert!(matches!(
        decode_png(b"GIF89a"),
        Err(RenderError::SignatureProcessing(_))
    ));

    assert_eq!(Scaling::BOUNDED.apply(600, 200), (150.0, 50.0));
    assert_eq!(Scaling::BOUNDED.apply(100, 40), (50.0, 20.0));
    assert_eq!(Scaling::Flat(0.3).apply(100, 50), (30.0, 15.0));
}

#[test]
fn signature_data_url_padding_is_optional() {
    let fetcher = StaticFetcher {
        body: Vec::new(),
        requested: Mutex::new(Vec::new()),
    };
    let padded = signature_bytes(&format!("data:image/png;base64,{PNG_BASE64}"), &fetcher).unwrap();
    let unpadded = PNG_BASE64.trim_end_matches('=');
    let bytes = signature_bytes(&format!("data:image/png;base64,{unpadded}"), &fetcher).unwrap();
    assert_eq!(bytes, padded);
    assert_eq!(decode_png(&bytes).unwrap().alpha, vec![127]);
}

#[test]
fn signature_keys_prefer_the_generic_key() {
    let spec = get_template(FormKind::Absa).signature().unwrap();
    let submission = data(json!({
        "signature": "",
        "field-signature": "second",
        "field-signature-absa": "third",
    }));
    assert_eq!(spec.payload(&submission).as_deref(), Some("second"));
    assert!(get_template(FormKind::NonCompliance).signature().is_none());
}

#[test]
fn noncompliance_checks_selected_issue_boxes() {
    let dir = tempfile::tempdir().unwrap();
    let mut fields = vec![text("C_Number")];
    fields.push(fixtures::checkbox("n1"));
    fields.push(fixtures::checkbox("issue3"));
    std::fs::write(dir.path().join("Noncompliance.pdf"), fillable_pdf(&fields)).unwrap();

    let bytes = Renderer::new(dir.path())
        .render(
            "noncompliance-form",
            &data(json!({"claimNumber": "NC-4", "selectedIssues": "[0,1,2]"})),
            TODAY,
        )
        .unwrap();
    assert!(is_flat(&bytes));
    assert!(stream_text(&bytes).contains(&hex("NC-4")));
}

#[test]
fn audit_reports_missing_and_present_templates() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sahlld.pdf"),
        fillable_pdf(&[text("ClientRef"), fixtures::checkbox("StaffName")]),
    )
    .unwrap();
    let audits = Renderer::new(dir.path()).audit();
    assert_eq!(audits.len(), FormKind::ALL.len());

    let sahl = audits
        .iter()
        .find(|a| a.form_id == "form-sahl-certificate")
        .unwrap();
    assert!(sahl.present);
    assert_eq!(sahl.field_count, 2);
    assert!(sahl.missing_fields.contains(&"ClientName_ZIUG".to_string()));
    assert!(!sahl.missing_fields.contains(&"ClientRef".to_string()));
    assert_eq!(sahl.mismatched_fields, vec!["StaffName".to_string()]);

    let absa = audits
        .iter()
        .find(|a| a.form_id == "form-absa-certificate")
        .unwrap();
    assert!(!absa.present);
    assert!(absa.lenient);
    assert!(absa.error.is_some());
}

#[test]
fn audit_of_synthetic_templates_is_clean() {
    let dir = forms_dir();
    for audit in Renderer::new(dir.path()).audit() {
        assert!(audit.present, "{}", audit.form_id);
        assert!(audit.missing_fields.is_empty(), "{}", audit.form_id);
        assert!(audit.mismatched_fields.is_empty(), "{}", audit.form_id);
    }
}
