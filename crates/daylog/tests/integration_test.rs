//! Integration tests for the daylog pipeline.

use std::collections::HashMap;
use std::fs;
use std::io::Write;

use chrono::NaiveDate;
use tempfile::{NamedTempFile, TempDir};

use daylog::output::{read_table, PROPERTIES_TABLE_FILE, TEXT_TABLE_FILE};
use daylog::transform::STAR;
use daylog::{
    BoolFormat, DaylogError, Pipeline, PipelineConfig, TableWriter, Value, WriterConfig,
};

const HEADER: &str = "Fecha,Status,Productiveness,Important Achievements,Learning,Daily Overview";

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn stars(n: usize) -> String {
    STAR.repeat(n)
}

/// Five days of log; the fifth is the documented example row.
fn sample_log() -> String {
    format!(
        "{HEADER}\n\
         26/02/2024,In progress,{one},Set up repo,Git,Started the project\n\
         27/02/2024,Complete,{two},,\"Python, Git\",Cleaned data\n\
         28/02/2024,In progress,{four},Dashboard,,Built charts\n\
         29/02/2024,Complete,{five},NA,Statistics,\"Read, then wrote\"\n\
         01/03/2024,Complete,{three},,\"SQL, Python\",worked on ETL\n",
        one = stars(1),
        two = stars(2),
        three = stars(3),
        four = stars(4),
        five = stars(5),
    )
}

fn pipeline_for(input: &NamedTempFile, out: &TempDir) -> Pipeline {
    Pipeline::new(PipelineConfig::new(input.path(), out.path()))
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_documented_example_row() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let pipeline = pipeline_for(&file, &out);

    let (raw, _) = pipeline.load(file.path()).expect("Load failed");
    let (table, _) = pipeline.transform(&raw).expect("Transform failed");

    let row = 4;
    assert_eq!(
        table.value(row, "date"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
    );
    assert_eq!(table.value(row, "day_id"), Some(&Value::Integer(5)));
    assert_eq!(table.value(row, "status"), Some(&Value::Integer(1)));
    assert_eq!(table.value(row, "productiveness"), Some(&Value::Integer(3)));
    assert_eq!(table.value(row, "important_achievements"), Some(&Value::from("No")));
    assert_eq!(table.value(row, "SQL"), Some(&Value::Boolean(true)));
    assert_eq!(table.value(row, "Python"), Some(&Value::Boolean(true)));
    assert_eq!(table.value(row, "Git"), Some(&Value::Boolean(false)));
    assert_eq!(table.value(row, "daily_overview"), Some(&Value::from("worked on ETL")));
}

#[test]
fn test_run_writes_both_files() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().expect("Run failed");

    assert_eq!(output.report.rows, 5);
    assert_eq!(output.report.vocabulary, vec!["Git", "Python", "SQL", "Statistics"]);
    assert!(output.report.is_clean());

    let text = fs::read_to_string(out.path().join(TEXT_TABLE_FILE)).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("day_id,daily_overview"));
    assert_eq!(lines.next(), Some("1,Started the project"));
    assert_eq!(text.lines().nth(4), Some("4,\"Read, then wrote\""));

    let props = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert_eq!(
        props.lines().next(),
        Some("status,productiveness,important_achievements,date,day_id,Git,Python,SQL,Statistics")
    );
    assert_eq!(
        props.lines().nth(5),
        Some("1,3,No,2024-03-01,5,false,true,true,false")
    );
    assert!(!props.contains("daily_overview"));
}

#[test]
fn test_run_creates_nested_output_dir() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let nested = out.path().join("data").join("processed");

    let pipeline = Pipeline::new(PipelineConfig::new(file.path(), &nested));
    pipeline.run().expect("Run failed");

    assert!(nested.join(TEXT_TABLE_FILE).exists());
    assert!(nested.join(PROPERTIES_TABLE_FILE).exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let pipeline = pipeline_for(&file, &out);

    pipeline.run().unwrap();
    let first = fs::read(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    pipeline.run().unwrap();
    let second = fs::read(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_numeric_bool_format() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let mut config = PipelineConfig::new(file.path(), out.path());
    config.writer.bool_format = BoolFormat::Numeric;

    Pipeline::new(config).run().unwrap();

    let props = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert_eq!(props.lines().nth(5), Some("1,3,No,2024-03-01,5,0,1,1,0"));
}

#[test]
fn test_header_only_input() {
    let file = create_test_file(&format!("{HEADER}\n"));
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().expect("Run failed");

    assert_eq!(output.report.rows, 0);
    let text = fs::read_to_string(out.path().join(TEXT_TABLE_FILE)).unwrap();
    assert_eq!(text, "day_id,daily_overview\n");
    let props = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert_eq!(props, "status,productiveness,important_achievements,date,day_id\n");
}

#[test]
fn test_passthrough_columns_are_kept() {
    let content = format!(
        "Fecha,Status,Productiveness,Important Achievements,Learning,Daily Overview,Sleep Hours\n\
         01/03/2024,Complete,{},,SQL,ok,7\n",
        stars(2)
    );
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().unwrap();

    assert!(output.tables.properties.column_index("sleep_hours").is_some());
    assert_eq!(
        output.tables.properties.value(0, "sleep_hours"),
        Some(&Value::from("7"))
    );
}

// =============================================================================
// Data quality
// =============================================================================

#[test]
fn test_unmapped_categories_are_lenient() {
    let content = format!(
        "{HEADER}\n\
         01/03/2024,Blocked,{},,SQL,a\n\
         02/03/2024,Complete,x,,SQL,b\n",
        stars(6)
    );
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().expect("Run failed");

    let props = &output.tables.properties;
    assert_eq!(props.value(0, "status"), Some(&Value::Missing));
    assert_eq!(props.value(0, "productiveness"), Some(&Value::Missing));
    assert_eq!(props.value(1, "productiveness"), Some(&Value::Missing));
    assert_eq!(output.report.unmapped.len(), 3);

    let written = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert_eq!(written.lines().nth(1), Some(",,No,2024-03-01,1,true"));
}

#[test]
fn test_strict_mode_writes_nothing() {
    let content = format!("{HEADER}\n01/03/2024,Blocked,{},,SQL,a\n", stars(1));
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();
    let mut config = PipelineConfig::new(file.path(), out.path());
    config.transform.strict_categories = true;

    let err = Pipeline::new(config).run().unwrap_err();

    assert!(matches!(err, DaylogError::UnmappedCategory { .. }));
    assert!(!out.path().join(TEXT_TABLE_FILE).exists());
}

#[test]
fn test_learning_token_named_like_a_column() {
    let content = format!("{HEADER}
01/03/2024,Complete,{},,\"date, SQL\",a
", stars(2));
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().expect("Run failed");

    assert_eq!(output.report.vocabulary, vec!["SQL", "date"]);
    let props = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert_eq!(
        props.lines().next(),
        Some("status,productiveness,important_achievements,date,day_id,SQL,learning_date")
    );
    assert_eq!(props.lines().nth(1), Some("1,2,No,2024-03-01,1,true,true"));
}

#[test]
fn test_null_spellings_match_exactly() {
    let content = format!(
        "{HEADER}
         01/03/2024,Complete,{s},none,Null,a
         02/03/2024,Complete,{s},None,NA,b
",
        s = stars(1)
    );
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().expect("Run failed");

    let props = &output.tables.properties;
    assert_eq!(props.value(0, "important_achievements"), Some(&Value::from("none")));
    assert_eq!(props.value(1, "important_achievements"), Some(&Value::from("No")));
    assert_eq!(output.report.vocabulary, vec!["Null"]);
    assert_eq!(props.value(1, "Null"), Some(&Value::Boolean(false)));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_input_file() {
    let out = TempDir::new().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::new(out.path().join("nope.csv"), out.path()));

    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, DaylogError::Io { .. }));
}

#[test]
fn test_bad_date_aborts_before_writing() {
    let content = format!(
        "{HEADER}\n\
         01/03/2024,Complete,{s},,SQL,a\n\
         03-02-2024,Complete,{s},,SQL,b\n",
        s = stars(1)
    );
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let err = pipeline_for(&file, &out).run().unwrap_err();

    assert!(matches!(err, DaylogError::DateParse { row: 2, .. }));
    assert!(!out.path().join(TEXT_TABLE_FILE).exists());
    assert!(!out.path().join(PROPERTIES_TABLE_FILE).exists());
}

#[test]
fn test_missing_overview_column() {
    let content = "Fecha,Status,Productiveness,Important Achievements,Learning\n\
                   01/03/2024,Complete,,,SQL\n";
    let file = create_test_file(content);
    let out = TempDir::new().unwrap();

    let err = pipeline_for(&file, &out).run().unwrap_err();
    assert!(matches!(err, DaylogError::MissingColumn(ref c) if c == "daily_overview"));
}

#[test]
fn test_check_does_not_write() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();

    let result = pipeline_for(&file, &out).check().expect("Check failed");

    assert_eq!(result.source.row_count, 5);
    assert!(result.schema.iter().any(|c| c.name == "day_id"));
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

// =============================================================================
// Join and round-trip
// =============================================================================

#[test]
fn test_text_and_properties_join_on_day_id() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let pipeline = pipeline_for(&file, &out);

    let (raw, _) = pipeline.load(file.path()).unwrap();
    let (table, _) = pipeline.transform(&raw).unwrap();
    let pair = pipeline.split(&table).unwrap();

    let overview_by_id: HashMap<&Value, &Value> = pair
        .text
        .rows
        .iter()
        .map(|row| (&row[0], &row[1]))
        .collect();
    assert_eq!(overview_by_id.len(), table.row_count());

    let id_col = pair.properties.column_index("day_id").unwrap();
    for (i, props_row) in pair.properties.rows.iter().enumerate() {
        let overview = overview_by_id[&props_row[id_col]];
        for (col, name) in table.columns.iter().enumerate() {
            let expected = &table.rows[i][col];
            let actual = if name == "daily_overview" {
                overview
            } else {
                &props_row[pair.properties.column_index(name).unwrap()]
            };
            assert_eq!(actual, expected, "column {} row {}", name, i);
        }
    }
}

#[test]
fn test_properties_round_trip() {
    let file = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();

    let output = pipeline_for(&file, &out).run().unwrap();
    let back = read_table(&output.saved.properties_path).unwrap();

    let writer = TableWriter::with_config(WriterConfig::default());
    let props = &output.tables.properties;
    assert_eq!(back.headers, props.columns);
    assert_eq!(back.row_count(), props.row_count());
    for (row, values) in props.rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            assert_eq!(back.get(row, col), Some(writer.format_value(value).as_str()));
        }
    }
}

#[test]
fn test_config_file_drives_run() {
    let input = create_test_file(&sample_log());
    let out = TempDir::new().unwrap();
    let config_json = format!(
        r#"{{"input_path": {:?}, "output_dir": {:?}, "writer": {{"bool_format": "numeric"}}}}"#,
        input.path().display().to_string(),
        out.path().display().to_string()
    );
    let config_file = create_test_file(&config_json);

    let config = PipelineConfig::load(config_file.path()).unwrap();
    Pipeline::new(config).run().unwrap();

    let props = fs::read_to_string(out.path().join(PROPERTIES_TABLE_FILE)).unwrap();
    assert!(props.lines().nth(1).unwrap().ends_with(",1,0,0,0"));
}
