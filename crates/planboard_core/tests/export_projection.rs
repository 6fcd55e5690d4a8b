use chrono::NaiveDate;
use planboard_core::{
    build_workbook, delete_experiment, export_to_buffer, export_to_path, project, seed_board,
    set_cell_tasks, toggle_week_visibility, Board, ExportError, ExportOptions, Experiment, Task,
    WeekColumn, NAME_COLUMN_HEADER,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn small_board() -> Board {
    let mut board = Board::new(vec![
        WeekColumn::new(date(2024, 10, 27)),
        WeekColumn::new(date(2024, 11, 3)),
        WeekColumn::new(date(2024, 11, 10)),
    ]);
    board.experiments.push(Experiment::with_id("exp_1", "alpha"));
    board.experiments.push(Experiment::with_id("exp_2", "beta"));
    set_cell_tasks(
        board,
        "exp_1",
        date(2024, 11, 3),
        vec![
            Task::with_id("t1", "mix").completed(true),
            Task::with_id("t2", "heat"),
        ],
    )
}

#[test]
fn header_lists_visible_weeks_as_day_month() {
    let rows = project(&small_board());

    assert_eq!(
        rows[0],
        vec![NAME_COLUMN_HEADER, "27/10", "3/11", "10/11"]
    );
    assert_eq!(rows.len(), 3);
}

#[test]
fn cells_join_tasks_with_markers() {
    let rows = project(&small_board());

    assert_eq!(rows[1], vec!["alpha", "", "mix (V)\nheat (X)", ""]);
    assert_eq!(rows[2], vec!["beta", "", "", ""]);
}

#[test]
fn hidden_weeks_are_dropped_in_order() {
    let board = toggle_week_visibility(small_board(), date(2024, 10, 27));
    let rows = project(&board);

    assert_eq!(rows[0], vec![NAME_COLUMN_HEADER, "3/11", "10/11"]);
    assert_eq!(rows[1], vec!["alpha", "mix (V)\nheat (X)", ""]);
}

#[test]
fn emptied_cell_projects_to_empty_string() {
    let board = set_cell_tasks(seed_board(), "exp_1", date(2024, 11, 3), Vec::new());
    let rows = project(&board);

    let column = rows[0].iter().position(|label| label == "3/11").unwrap();
    let row = rows.iter().find(|row| row[0] == "ניסוי ראשון").unwrap();
    assert_eq!(row[column], "");
}

#[test]
fn deleting_an_experiment_removes_only_its_row() {
    let before = project(&seed_board());
    let after = project(&delete_experiment(seed_board(), "exp_1"));

    assert_eq!(after.len(), before.len() - 1);
    assert_eq!(after[0], before[0]);
    assert_eq!(&after[1..], &before[2..]);
}

#[test]
fn projection_is_deterministic() {
    let board = seed_board();
    assert_eq!(project(&board), project(&board));
}

#[test]
fn workbook_buffer_is_a_zip_archive() {
    let bytes = export_to_buffer(&seed_board(), &ExportOptions::default()).unwrap();
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn workbook_is_written_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::default();
    let path = dir.path().join(&options.file_name);

    export_to_path(&small_board(), &path, &options).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn default_options_match_sheet_layout() {
    let options = ExportOptions::default();
    assert!(options.right_to_left);
    assert_eq!(options.name_column_width, 25.0);
    assert_eq!(options.week_column_width, 15.0);
    assert!(options.file_name.ends_with(".xlsx"));
}

#[test]
fn workbook_sheet_takes_name_from_options() {
    let options = ExportOptions::default();
    let mut workbook = build_workbook(&small_board(), &options).unwrap();
    assert_eq!(workbook.worksheet_from_index(0).unwrap().name(), options.sheet_name);

    let custom = ExportOptions {
        sheet_name: "Q1 plan".to_string(),
        ..ExportOptions::default()
    };
    let mut workbook = build_workbook(&small_board(), &custom).unwrap();
    assert_eq!(workbook.worksheet_from_index(0).unwrap().name(), "Q1 plan");
    assert!(workbook.worksheet_from_index(1).is_err());
}

#[test]
fn invalid_sheet_name_is_an_export_error() {
    let options = ExportOptions {
        sheet_name: "bad/name".to_string(),
        ..ExportOptions::default()
    };
    assert!(matches!(
        build_workbook(&small_board(), &options),
        Err(ExportError::Xlsx(_))
    ));
}

#[test]
fn export_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("2025").join("board.xlsx");

    export_to_path(&small_board(), &path, &ExportOptions::default()).unwrap();
    assert!(path.is_file());
}

#[test]
fn export_below_a_file_reports_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let path = blocker.join("board.xlsx");

    match export_to_path(&small_board(), &path, &ExportOptions::default()).unwrap_err() {
        ExportError::Io { path, .. } => assert_eq!(path, blocker),
        other => panic!("unexpected error: {other}"),
    }
}
