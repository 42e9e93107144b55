use jobsheet_core::error::CoreError;
use jobsheet_core::filenames;
use jobsheet_core::models::form_kind::FormKind;
use jobsheet_core::models::submission::{next_submission_number, FormSubmission, MAX_SUBMISSIONS};

#[test]
fn form_kind_ids_round_trip() {
    for kind in FormKind::ALL {
        assert_eq!(kind.id().parse::<FormKind>().unwrap(), kind);
        assert_eq!(
            serde_json::to_value(kind).unwrap(),
            serde_json::Value::String(kind.id().to_string())
        );
    }
}

#[test]
fn unknown_form_kind_is_rejected() {
    let err = "form-unknown".parse::<FormKind>().unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedFormType(id) if id == "form-unknown"));
}

#[test]
fn submission_numbers_run_one_to_three() {
    assert_eq!(next_submission_number(0).unwrap(), 1);
    assert_eq!(next_submission_number(2).unwrap(), 3);
    let err = next_submission_number(MAX_SUBMISSIONS).unwrap_err();
    assert!(matches!(err, CoreError::SubmissionLimitReached { count: 3, max: 3 }));
}

#[test]
fn submission_deserializes_from_client_json() {
    let submission: FormSubmission = serde_json::from_value(serde_json::json!({
        "id": "submission-7",
        "jobId": "job-1",
        "formId": "form-clearance-certificate",
        "submittedBy": "staff-2",
        "data": { "field-cname": "Jane" },
        "submittedAt": "2026-10-19T08:00:00Z",
        "submissionNumber": 2
    }))
    .unwrap();

    assert_eq!(submission.form_kind().unwrap(), FormKind::Clearance);
    assert_eq!(submission.signature, None);
    assert_eq!(submission.data.text("field-cname").as_deref(), Some("Jane"));
}

#[test]
fn download_names_match_legacy_patterns() {
    assert_eq!(
        filenames::submission_download("form-sahl-certificate", 2),
        "form-sahl-certificate-submission-2.pdf"
    );
    assert_eq!(
        filenames::filled_temp("LiabilityReport", 1718000000000),
        "LiabilityReport_filled_1718000000000.pdf"
    );
    assert_eq!(
        filenames::scoped_temp("noncompliance", "9", 5),
        "noncompliance-9-5.pdf"
    );
    assert_eq!(filenames::scoped_download("discovery", "9"), "discovery-9.pdf");
}
