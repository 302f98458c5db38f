//! Integration tests for dataready.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::uninlined_format_args,
    clippy::cast_lossless
)]

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use dataready::{
    assess, compute_quality_flags, correlation_matrix, flatten_summary_for_print, missing_table,
    preview, profile_dataset, summarize, top_categories, ArrowDataset, ColumnKind, Dataset,
    DatasetFeatures, FeatureThresholds, PreviewMode, ProfileConfig,
};

fn dataset(columns: Vec<(&str, ArrayRef)>) -> ArrowDataset {
    ArrowDataset::from_columns(columns)
        .ok()
        .unwrap_or_else(|| panic!("Should create dataset"))
}

/// `{age, height, city}` with one missing cell in `age` and `city`.
fn people() -> ArrowDataset {
    dataset(vec![
        (
            "age",
            Arc::new(Int64Array::from(vec![Some(10), Some(20), Some(30), None])) as ArrayRef,
        ),
        (
            "height",
            Arc::new(Int64Array::from(vec![140, 150, 160, 170])) as ArrayRef,
        ),
        (
            "city",
            Arc::new(StringArray::from(vec![Some("A"), Some("B"), Some("A"), None])) as ArrayRef,
        ),
    ])
}

/// Creates a larger mixed dataset split across batches.
fn create_test_dataset(rows: usize, batches: usize) -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("segment", DataType::Utf8, true),
        Field::new("score", DataType::Float64, true),
    ]));

    let per_batch = rows / batches;
    let batches = (0..batches)
        .map(|b| {
            let start = (b * per_batch) as i32;
            let ids: Vec<i32> = (start..start + per_batch as i32).collect();
            let segments: Vec<Option<String>> = ids
                .iter()
                .map(|i| (i % 7 != 0).then(|| format!("seg_{}", i % 4)))
                .collect();
            let scores: Vec<Option<f64>> = ids
                .iter()
                .map(|i| (i % 11 != 0).then_some(*i as f64 * 1.5))
                .collect();
            RecordBatch::try_new(
                Arc::clone(&schema),
                vec![
                    Arc::new(Int32Array::from(ids)),
                    Arc::new(StringArray::from(segments)),
                    Arc::new(Float64Array::from(scores)),
                ],
            )
            .ok()
            .unwrap_or_else(|| panic!("Should create batch"))
        })
        .collect();

    ArrowDataset::new(batches)
        .ok()
        .unwrap_or_else(|| panic!("Should create dataset"))
}

#[test]
fn test_people_shape_and_missing() {
    let ds = people();
    let summary = summarize(&ds)
        .ok()
        .unwrap_or_else(|| panic!("Should summarize dataset"));
    let missing = missing_table(&ds);

    assert_eq!(summary.n_rows, 4);
    assert_eq!(summary.n_cols, 3);
    assert_eq!(missing.get("age").map(|row| row.missing_count), Some(1));
    assert_eq!(
        summary.column("city").map(|c| c.kind),
        Some(ColumnKind::Categorical)
    );
}

#[test]
fn test_people_top_categories() {
    let top = top_categories(&people(), 5, 2)
        .ok()
        .unwrap_or_else(|| panic!("Should compute top categories"));
    let city = top.get("city").unwrap_or_else(|| panic!("city profiled"));

    assert!(city.len() <= 2);
    assert_eq!(city.count_of("A"), Some(2));
    assert_eq!(city.rows[0].value, "A");
}

#[test]
fn test_constant_column_example() {
    let ds = dataset(vec![
        (
            "constant_col",
            Arc::new(Int64Array::from(vec![1, 1, 1, 1])) as ArrayRef,
        ),
        (
            "var_col",
            Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef,
        ),
        (
            "city",
            Arc::new(StringArray::from(vec![Some("A"), Some("B"), None, Some("A")])) as ArrayRef,
        ),
    ]);
    let summary = summarize(&ds)
        .ok()
        .unwrap_or_else(|| panic!("Should summarize dataset"));
    let flags = compute_quality_flags(&summary, &missing_table(&ds))
        .ok()
        .unwrap_or_else(|| panic!("Should compute quality flags"));

    assert!(flags.has_constant_columns);
}

#[test]
fn test_zero_value_example() {
    let ds = dataset(vec![
        (
            "col1",
            Arc::new(Int64Array::from(vec![0, 0, 0, 0])) as ArrayRef,
        ),
        (
            "col2",
            Arc::new(Int64Array::from(vec![0, 0, 0, 100])) as ArrayRef,
        ),
        (
            "col3",
            Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef,
        ),
    ]);
    let summary = summarize(&ds)
        .ok()
        .unwrap_or_else(|| panic!("Should summarize dataset"));
    let flags = compute_quality_flags(&summary, &missing_table(&ds))
        .ok()
        .unwrap_or_else(|| panic!("Should compute quality flags"));

    assert!(flags.has_many_zero_values);
    assert!(flags.zero_value_columns.contains(&"col1".to_string()));
    assert!(flags.zero_value_columns.contains(&"col2".to_string()));
    assert!(!flags.zero_value_columns.contains(&"col3".to_string()));
}

#[test]
fn test_end_to_end_workflow() {
    // 1. Create a dataset
    let ds = create_test_dataset(1_000, 4);
    assert_eq!(ds.len(), 1_000);
    assert_eq!(ds.num_batches(), 4);

    // 2. Profile it
    let config = ProfileConfig::default();
    let profile = profile_dataset(&ds, &config)
        .ok()
        .unwrap_or_else(|| panic!("Should profile dataset"));
    assert_eq!(profile.summary.n_rows, 1_000);
    assert_eq!(profile.correlation.columns(), &["id".to_string(), "score".to_string()]);
    assert!(profile.top_categories.contains("segment"));
    assert!(!profile.flags.has_suspicious_id_duplicates);

    // 3. Summary and missing table agree across batches
    for (column, row) in profile.summary.columns.iter().zip(profile.missing.iter()) {
        assert_eq!(column.name, row.column);
        assert_eq!(column.missing_count, row.missing_count);
    }

    // 4. Assess readiness
    let report = assess(&ds, &config)
        .ok()
        .unwrap_or_else(|| panic!("Should assess dataset"));
    assert_eq!(report.flags, profile.flags);
    assert!(report.readiness.ok_for_model);

    // 5. Aggregate-feature heuristic on the same dataset
    let result = report
        .features()
        .assess(&FeatureThresholds::default())
        .ok()
        .unwrap_or_else(|| panic!("Should assess features"));
    assert!(!result.too_few_rows);
    assert!(!result.no_numeric_columns);
    assert!(!result.no_categorical_columns);
}

#[test]
fn test_correlation_perfect_linear() {
    let ds = dataset(vec![
        (
            "x",
            Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])) as ArrayRef,
        ),
        (
            "y",
            Arc::new(Float64Array::from(vec![2.0, 4.0, 6.0, 8.0])) as ArrayRef,
        ),
        (
            "z",
            Arc::new(Float64Array::from(vec![4.0, 3.0, 2.0, 1.0])) as ArrayRef,
        ),
    ]);
    let matrix = correlation_matrix(&ds)
        .ok()
        .unwrap_or_else(|| panic!("Should compute correlation matrix"));

    let xy = matrix.get("x", "y").unwrap_or_else(|| panic!("defined"));
    let xz = matrix.get("x", "z").unwrap_or_else(|| panic!("defined"));
    assert!((xy - 1.0).abs() < 1e-12);
    assert!((xz + 1.0).abs() < 1e-12);
    assert_eq!(matrix.strongest_pairs(0.9).len(), 3);
}

#[test]
fn test_flattened_summary_renders() {
    let summary = summarize(&people())
        .ok()
        .unwrap_or_else(|| panic!("Should summarize dataset"));
    let table = flatten_summary_for_print(&summary);

    assert_eq!(table.len(), 3);
    let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["age", "height", "city"]);

    let rendered = table.to_string();
    assert!(rendered.contains("missing_share"));
    assert!(rendered.contains("height"));
}

#[test]
fn test_preview_head_and_sample() {
    let ds = create_test_dataset(100, 2);

    let head = preview(&ds, 5, PreviewMode::Head)
        .ok()
        .unwrap_or_else(|| panic!("Should preview dataset"));
    assert_eq!(head.len(), 5);
    assert_eq!(head.total_rows, 100);

    let sample = preview(&ds, 5, PreviewMode::sample())
        .ok()
        .unwrap_or_else(|| panic!("Should preview dataset"));
    let again = preview(&ds, 5, PreviewMode::sample())
        .ok()
        .unwrap_or_else(|| panic!("Should preview dataset"));
    assert_eq!(sample.batch, again.batch);
    assert!(sample.sampled);
}

#[test]
fn test_features_categorical_only() {
    let ds = dataset(vec![(
        "city",
        Arc::new(StringArray::from(vec!["A", "B", "C"])) as ArrayRef,
    )]);
    let summary = summarize(&ds)
        .ok()
        .unwrap_or_else(|| panic!("Should summarize dataset"));
    let features = DatasetFeatures::from_profile(&summary, &missing_table(&ds));
    let result = features
        .assess(&FeatureThresholds::default())
        .ok()
        .unwrap_or_else(|| panic!("Should assess features"));

    assert!(result.no_numeric_columns);
    // 1 - 0.2 (rows) - 0.1 (categorical only)
    assert!((result.readiness.quality_score - 0.7).abs() < 1e-9);
}

#[test]
fn test_config_from_json_drives_assessment() {
    let config = ProfileConfig::from_json_str(
        r#"{"thresholds": {"min_rows": 2, "ok_threshold": 0.6}}"#,
    )
    .ok()
    .unwrap_or_else(|| panic!("Should parse config"));
    let report = assess(&people(), &config)
        .ok()
        .unwrap_or_else(|| panic!("Should assess dataset"));

    assert!(!report.flags.too_few_rows);
    assert!((report.flags.quality_score - 0.75).abs() < 1e-9);
    assert!(report.readiness.ok_for_model);
}
