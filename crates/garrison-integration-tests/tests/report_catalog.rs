//! Report filing and filtering through the console.

mod common;

use common::ConsoleHarness;
use garrison_console::ConsoleError;
use garrison_core::{DisciplinaryDetails, Rank, ReportStatus, ReportType};
use garrison_reports::{NewReport, ReportError};

#[tokio::test]
async fn test_blank_subject_leaves_catalog_unchanged() {
    let harness = ConsoleHarness::new();
    let console = harness.owner().await;
    console
        .create_report(NewReport::new(ReportType::Leave, "annual leave", "SILVA"))
        .await
        .unwrap();

    let err = console
        .create_report(NewReport::new(ReportType::Leave, "", "SILVA"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Report(ReportError::Validation(_))
    ));
    assert_eq!(console.reports(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_filter_is_ordered_subset() {
    let harness = ConsoleHarness::new();
    let console = harness.owner().await;
    let plan = [
        (ReportType::Weekly, "week 1"),
        (ReportType::Promotion, "promote SILVA"),
        (ReportType::Weekly, "week 2"),
        (ReportType::Transfer, "move COSTA"),
        (ReportType::Weekly, "week 3"),
    ];
    for (report_type, subject) in plan {
        console
            .create_report(NewReport::new(report_type, subject, "SILVA"))
            .await
            .unwrap();
    }

    let all = console.reports(None).await.unwrap();
    let weekly = console.reports(Some(ReportType::Weekly)).await.unwrap();
    assert!(weekly.iter().all(|r| r.report_type == ReportType::Weekly));
    let expected: Vec<_> = all
        .iter()
        .filter(|r| r.report_type == ReportType::Weekly)
        .cloned()
        .collect();
    assert_eq!(weekly, expected);
    let subjects: Vec<_> = weekly.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects, ["week 3", "week 2", "week 1"]);
}

#[tokio::test]
async fn test_disciplinary_report_round_trips_details() {
    let harness = ConsoleHarness::new();
    let console = harness.owner().await;
    let details = DisciplinaryDetails {
        investigator_notes: Some("statement taken".into()),
        ..Default::default()
    };
    let report = console
        .create_report(
            NewReport::new(ReportType::DisciplinaryProceeding, "late return", "COSTA")
                .with_rank(Rank::FirstLieutenant)
                .with_disciplinary(details.clone()),
        )
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Pending);

    let stored = console
        .reports(Some(ReportType::DisciplinaryProceeding))
        .await
        .unwrap();
    assert_eq!(stored[0].disciplinary, Some(details));
    assert_eq!(stored[0].personnel_rank, Rank::FirstLieutenant);
}
