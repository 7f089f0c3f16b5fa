mod common;

use anyhow::Result;
use common::{config, instructor, page, period, section};
use course_roster::{
    EtlEngine, LocalStorage, PaginatedFetcher, RosterError, RosterPipeline, TermCatalogBuilder,
};
use httpmock::prelude::*;
use tempfile::TempDir;

const TERM_1: (&str, &str) = ("T1", "2024-25 Winter Term 1 (UBC-V)");
const TERM_2: (&str, &str) = ("T2", "2024-25 Winter Term 2 (UBC-V)");
const SUMMER: (&str, &str) = ("S1", "2024 Summer Term 1 (UBC-V)");

fn mock_periods(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/academic-periods")
            .query_param("page", "1")
            .header("x-client-id", "period-id")
            .header("x-client-secret", "period-secret");
        then.status(200)
            .header("X-Next-Page", "true")
            .json_body(page(vec![
                period(TERM_1.0, TERM_1.1),
                period("O1", "2023-24 Winter Term 1 (UBC-O)"),
            ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/academic-periods")
            .query_param("page", "2");
        then.status(200)
            .header("X-Next-Page", "false")
            .json_body(page(vec![period(TERM_2.0, TERM_2.1), period(SUMMER.0, SUMMER.1)]));
    });
}

fn mock_sections(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("academicYear", "2024")
            .query_param("courseSubject", "LFS_V")
            .header("x-client-id", "section-id");
        then.status(200)
            .header("X-Next-Page", "false")
            .json_body(page(vec![
                section("CS1", TERM_1, "LFS_V 250 001", "Lecture", ("2024-09-03", "2025-04-08"),
                    vec![instructor("Bo", "Chen"), instructor("Cy", "Diaz")]),
                section("CS2", TERM_1, "LFS_V 100 001", "Lecture", ("2024-09-03", "2024-12-06"),
                    vec![instructor("Ada", "Lovelace")]),
                section("CS3", TERM_1, "LFS_V 110 L01", "Lab", ("2024-09-03", "2024-12-06"),
                    vec![instructor("Dan", "Evans")]),
                section("CS4", TERM_2, "LFS_V 100 002", "Lecture", ("2025-01-06", "2025-04-08"),
                    vec![instructor("Ada", "Lovelace")]),
            ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("academicYear", "2024")
            .query_param("courseSubject", "FNH_V");
        then.status(200)
            .header("X-Next-Page", "false")
            .json_body(page(vec![section(
                "CS5",
                TERM_1,
                "FNH_V 326 001",
                "Laboratory",
                ("2024-09-03", "2024-12-06"),
                vec![instructor("Eve", "Fox")],
            )]));
    });
}

#[tokio::test]
async fn test_roster_run_writes_term_and_term_span_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_periods(&server);
    mock_sections(&server);

    let config = config(&server.base_url(), &output_dir, false);
    let fetcher = PaginatedFetcher::new(&config);
    let catalog = TermCatalogBuilder::new(&fetcher, "UBC-V").build().await?;
    assert_eq!(catalog.year_range(), Some((2023, 2024)));

    let terms = catalog.terms_for_year("2024")?;
    let names: Vec<&str> = terms.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![SUMMER.1, TERM_1.1, TERM_2.1]);

    let pipeline = RosterPipeline::new(LocalStorage::new(&output_dir), config, "2024", terms);
    let written = EtlEngine::new(pipeline).run().await?;
    assert_eq!(written.len(), 3);

    let term_1 = std::fs::read_to_string(temp_dir.path().join(format!("{} - Courses.csv", TERM_1.1)))?;
    let lines: Vec<&str> = term_1.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Course,First Name,Last Name,Work Email,Personal Email",
            "FNH_V 326 001,Eve,Fox,eve@ubc.ca,eve@example.com",
            "LFS_V 100 001,Ada,Lovelace,ada@ubc.ca,ada@example.com",
            "LFS_V 250 001,Bo,Chen,bo@ubc.ca,bo@example.com",
            "LFS_V 250 001,Cy,Diaz,cy@ubc.ca,cy@example.com",
        ]
    );

    let span = std::fs::read_to_string(
        temp_dir
            .path()
            .join("2024-25 Winter Term 1+2 (UBC-V) - Courses.csv"),
    )?;
    assert_eq!(span.lines().count(), 3);
    assert!(span.contains("LFS_V 250 001,Bo,Chen"));
    assert!(!span.contains("LFS_V 100 001"));

    let term_2 = std::fs::read_to_string(temp_dir.path().join(format!("{} - Courses.csv", TERM_2.1)))?;
    assert_eq!(term_2.lines().nth(1), Some("LFS_V 100 002,Ada,Lovelace,ada@ubc.ca,ada@example.com"));

    // 暑期學期沒有任何課程資料，不應產生檔案
    assert!(!temp_dir
        .path()
        .join(format!("{} - Courses.csv", SUMMER.1))
        .exists());

    Ok(())
}

#[tokio::test]
async fn test_rerun_produces_identical_files() -> Result<()> {
    let server = MockServer::start();
    mock_periods(&server);
    mock_sections(&server);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let temp_dir = TempDir::new()?;
        let output_dir = temp_dir.path().to_str().unwrap().to_string();
        let config = config(&server.base_url(), &output_dir, false);
        let fetcher = PaginatedFetcher::new(&config);
        let terms = TermCatalogBuilder::new(&fetcher, "UBC-V")
            .build()
            .await?
            .terms_for_year("2024")?;

        let pipeline = RosterPipeline::new(LocalStorage::new(&output_dir), config, "2024", terms);
        EtlEngine::new(pipeline).run().await?;
        outputs.push(std::fs::read(
            temp_dir.path().join(format!("{} - Courses.csv", TERM_1.1)),
        )?);
    }

    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_year_is_not_found() -> Result<()> {
    let server = MockServer::start();
    mock_periods(&server);

    let config = config(&server.base_url(), "./unused", false);
    let fetcher = PaginatedFetcher::new(&config);
    let catalog = TermCatalogBuilder::new(&fetcher, "UBC-V").build().await?;

    let err = catalog.terms_for_year("2031").unwrap_err();
    assert!(err.is_recoverable());
    // 2023 只有 UBC-O 的學期
    assert!(matches!(
        catalog.terms_for_year("2023"),
        Err(RosterError::NotFoundError { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_failed_subject_fetch_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("courseSubject", "LFS_V");
        then.status(200)
            .header("X-Next-Page", "false")
            .json_body(page(vec![section(
                "CS2",
                TERM_1,
                "LFS_V 100 001",
                "Lecture",
                ("2024-09-03", "2024-12-06"),
                vec![instructor("Ada", "Lovelace")],
            )]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("courseSubject", "FNH_V");
        then.status(503);
    });

    let config = config(&server.base_url(), &output_dir, false);
    let terms = vec![course_roster::core::TermToken {
        id: TERM_1.0.to_string(),
        name: TERM_1.1.to_string(),
    }];
    let pipeline = RosterPipeline::new(LocalStorage::new(&output_dir), config, "2024", terms);

    let result = EtlEngine::new(pipeline).run().await;

    assert!(matches!(
        result,
        Err(RosterError::HttpStatusError { status: 503, .. })
    ));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_both_terms_share_one_term_span_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_periods(&server);
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("courseSubject", "LFS_V");
        then.status(200).json_body(page(vec![
            section("CS1", TERM_1, "LFS_V 100 001", "Lecture", ("2024-09-03", "2025-04-08"),
                vec![instructor("Ada", "Lovelace")]),
            section("CS2", TERM_2, "LFS_V 200 001", "Lecture", ("2024-09-03", "2025-04-08"),
                vec![instructor("Bo", "Chen")]),
        ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/course-section-details")
            .query_param("courseSubject", "FNH_V");
        then.status(200).json_body(page(vec![]));
    });

    let config = config(&server.base_url(), &output_dir, false);
    let terms = TermCatalogBuilder::new(&PaginatedFetcher::new(&config), "UBC-V")
        .build()
        .await?
        .terms_for_year("2024")?;

    let pipeline = RosterPipeline::new(LocalStorage::new(&output_dir), config, "2024", terms);
    let mut written = EtlEngine::new(pipeline).run().await?;

    assert_eq!(written.len(), 3);
    written.sort();
    written.dedup();
    assert_eq!(written.len(), 3);
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 3);

    let span = std::fs::read_to_string(
        temp_dir
            .path()
            .join("2024-25 Winter Term 1+2 (UBC-V) - Courses.csv"),
    )?;
    let lines: Vec<&str> = span.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Course,First Name,Last Name,Work Email,Personal Email",
            "LFS_V 100 001,Ada,Lovelace,ada@ubc.ca,ada@example.com",
            "LFS_V 200 001,Bo,Chen,bo@ubc.ca,bo@example.com",
        ]
    );
    Ok(())
}
