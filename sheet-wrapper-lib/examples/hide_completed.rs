//! Hides completed tasks in an in-memory sheet and prints the host calls.
//!
//! Run with: cargo run --example hide_completed

use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;

use sheet_wrapper_lib::SheetConfig;
use sheet_wrapper_lib::SheetWrapper;
use sheet_wrapper_lib::host::MemorySpreadsheet;
use sheet_wrapper_lib::model::RowInput;
use sheet_wrapper_lib::model::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let tasks = [
        ("Order parts", true),
        ("Cut panels", true),
        ("Drill holes", true),
        ("Paint", false),
        ("Assemble", true),
        ("Inspect", true),
        ("Ship", false),
    ];

    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .ok_or("invalid start date")?;

    let mut rows = vec![vec![
        Value::from("task"),
        Value::from("done"),
        Value::from("due"),
    ]];
    rows.extend(tasks.iter().zip(0..).map(|((task, done), day)| {
        vec![
            Value::from(*task),
            Value::from(*done),
            Value::from(start + Duration::days(day)),
        ]
    }));

    let spreadsheet = MemorySpreadsheet::new("workshop");
    let sheet = spreadsheet.add_sheet("Tasks", rows);

    let config = SheetConfig::from_json(
        r#"{ "sheetName": "Tasks", "numHeaders": 1, "fields": "task, done, due" }"#,
    )?;
    let wrapper = SheetWrapper::new(spreadsheet, config)?;

    let blocks = wrapper.hide(|record| record.get_bool("done") == Ok(Some(true)))?;
    println!("Hid rows {:?} using {} calls", sheet.hidden_rows(), blocks.len());
    for block in &blocks {
        println!("  rows {}..={}", block.start_row_id, block.end_row_id());
    }

    wrapper.append_row(RowInput::fields([("task", Value::from("Invoice"))]))?;
    for record in wrapper.records()? {
        let due = record
            .get_date("due")?
            .map(|due| due.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "{:>3}  {:<12} {}",
            record.row_id(),
            record.get_string("task")?.unwrap_or(""),
            due
        );
    }

    wrapper.show_all()?;
    println!("Hidden after show_all: {:?}", sheet.hidden_rows());

    Ok(())
}
