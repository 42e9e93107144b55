use jiff::Timestamp;
use jobsheet_core::error::CoreError;
use jobsheet_core::models::form_data::FormData;
use jobsheet_server::store::{NewSubmission, SubmissionFilter, SubmissionStore};

fn new(job: &str, form: &str, user: &str) -> NewSubmission {
    NewSubmission {
        job_id: job.to_string(),
        form_id: form.to_string(),
        submitted_by: user.to_string(),
        data: FormData::from_iter([("field-cname", "Lerato")]),
        signature: None,
    }
}

#[test]
fn numbers_resubmissions_and_refuses_the_fourth() {
    let mut store = SubmissionStore::new();
    let now = Timestamp::UNIX_EPOCH;

    let numbers: Vec<u8> = (0..3)
        .map(|_| {
            store
                .submit(new("job-1", "form-clearance-certificate", "staff-1"), now)
                .unwrap()
                .submission_number
        })
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let err = store
        .submit(new("job-1", "form-clearance-certificate", "staff-1"), now)
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::SubmissionLimitReached { count: 3, max: 3 }
    ));
    assert_eq!(store.len(), 3);

    // Each triple has its own allowance.
    let other_user = store
        .submit(new("job-1", "form-clearance-certificate", "staff-2"), now)
        .unwrap();
    assert_eq!(other_user.submission_number, 1);
    let other_form = store
        .submit(new("job-1", "form-sahl-certificate", "staff-1"), now)
        .unwrap();
    assert_eq!(other_form.submission_number, 1);
}

#[test]
fn ids_come_from_a_counter() {
    let mut store = SubmissionStore::new();
    assert!(store.is_empty());
    let first = store
        .submit(new("job-1", "form-absa-certificate", "a"), Timestamp::UNIX_EPOCH)
        .unwrap();
    let second = store
        .submit(new("job-2", "form-absa-certificate", "a"), Timestamp::UNIX_EPOCH)
        .unwrap();
    assert_eq!(first.id, "submission-1");
    assert_eq!(second.id, "submission-2");
    assert_eq!(store.get("submission-2").unwrap().job_id, "job-2");
    assert!(store.get("submission-3").is_none());
}

#[test]
fn unknown_form_ids_are_accepted_at_intake() {
    let mut store = SubmissionStore::new();
    let submission = store
        .submit(new("job-1", "form-unknown", "a"), Timestamp::UNIX_EPOCH)
        .unwrap();
    assert!(submission.form_kind().is_err());
}

#[test]
fn list_filters_on_every_given_field() {
    let mut store = SubmissionStore::new();
    for (job, form, user) in [
        ("job-1", "form-sahl-certificate", "a"),
        ("job-1", "form-absa-certificate", "b"),
        ("job-2", "form-sahl-certificate", "a"),
    ] {
        store.submit(new(job, form, user), Timestamp::UNIX_EPOCH).unwrap();
    }

    assert_eq!(store.list(&SubmissionFilter::default()).len(), 3);

    let by_job = SubmissionFilter {
        job_id: Some("job-1".to_string()),
        ..Default::default()
    };
    assert_eq!(store.list(&by_job).len(), 2);

    let by_form_and_user = SubmissionFilter {
        form_id: Some("form-sahl-certificate".to_string()),
        submitted_by: Some("a".to_string()),
        ..Default::default()
    };
    let found = store.list(&by_form_and_user);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.submitted_by == "a"));
}
