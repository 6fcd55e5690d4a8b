use planboard_core::{
    append_task, seed_board, toggle_task, Board, BoardMutation, BoardStore, MemoryKvRepository,
    Style,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Add,
    Delete(usize),
    Rename(usize, String),
    RowStyle(usize, Option<String>, Option<String>),
    WeekStyle(usize, Option<String>),
    Toggle(usize),
    AddTask(usize, usize, String),
    ToggleFirstTask(usize, usize),
}

fn color() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("#[0-9a-f]{6}")
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Add),
        (0usize..8).prop_map(Step::Delete),
        (0usize..8, ".{0,12}").prop_map(|(i, name)| Step::Rename(i, name)),
        (0usize..8, color(), color()).prop_map(|(i, bg, fg)| Step::RowStyle(i, bg, fg)),
        (0usize..70, color()).prop_map(|(w, bg)| Step::WeekStyle(w, bg)),
        (0usize..70).prop_map(Step::Toggle),
        (0usize..8, 0usize..70, "[a-z ]{0,10}").prop_map(|(i, w, t)| Step::AddTask(i, w, t)),
        (0usize..8, 0usize..70).prop_map(|(i, w)| Step::ToggleFirstTask(i, w)),
    ]
}

fn experiment_id(board: &Board, index: usize) -> String {
    board
        .experiments
        .get(index)
        .map_or_else(|| format!("missing_{index}"), |e| e.id.clone())
}

fn run(steps: Vec<Step>) -> Board {
    let mut board = seed_board();
    for step in steps {
        let mutation = match step {
            Step::Add => BoardMutation::AddExperiment,
            Step::Delete(i) => BoardMutation::DeleteExperiment {
                id: experiment_id(&board, i),
            },
            Step::Rename(i, name) => BoardMutation::RenameExperiment {
                id: experiment_id(&board, i),
                name,
            },
            Step::RowStyle(i, background_color, text_color) => BoardMutation::SetExperimentStyle {
                id: experiment_id(&board, i),
                style: Style {
                    background_color,
                    text_color,
                },
            },
            Step::WeekStyle(w, background_color) => match board.weeks.get(w) {
                Some(week) => BoardMutation::SetWeekStyle {
                    start_date: week.start_date,
                    style: Style {
                        background_color,
                        text_color: None,
                    },
                },
                None => continue,
            },
            Step::Toggle(w) => match board.weeks.get(w) {
                Some(week) => BoardMutation::ToggleWeekVisibility {
                    start_date: week.start_date,
                },
                None => continue,
            },
            Step::AddTask(i, w, text) => {
                let Some(start_date) = board.weeks.get(w).map(|week| week.start_date) else {
                    continue;
                };
                let id = experiment_id(&board, i);
                let tasks = board
                    .experiment(&id)
                    .map(|e| append_task(e.tasks(start_date), &text))
                    .unwrap_or_default();
                BoardMutation::SetCellTasks {
                    experiment_id: id,
                    start_date,
                    tasks,
                }
            }
            Step::ToggleFirstTask(i, w) => {
                let Some(start_date) = board.weeks.get(w).map(|week| week.start_date) else {
                    continue;
                };
                let id = experiment_id(&board, i);
                let tasks = board
                    .experiment(&id)
                    .map(|e| {
                        let current = e.tasks(start_date);
                        match current.first() {
                            Some(first) => toggle_task(current, &first.id),
                            None => current.to_vec(),
                        }
                    })
                    .unwrap_or_default();
                BoardMutation::SetCellTasks {
                    experiment_id: id,
                    start_date,
                    tasks,
                }
            }
        };
        board = mutation.apply(board);
    }
    board
}

proptest! {
    #[test]
    fn reachable_boards_round_trip_through_the_store(steps in proptest::collection::vec(step(), 0..24)) {
        let board = run(steps);
        prop_assert!(board.validate().is_ok());

        let repo = MemoryKvRepository::new();
        let store = BoardStore::new(&repo);
        store.save(&board).unwrap();
        prop_assert_eq!(store.load().unwrap(), board);
    }
}
