//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - `walkthrough` replays a scripted gesture session over an in-memory
//!   board and prints the rows after each step.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;
use std::process::ExitCode;
use taskdeck_core::{
    open_db_in_memory, GestureConfig, ListScreen, MotionEvent, RowAdapter, RowCollection,
    RowStore, SnapshotView, SqliteRowStore, Task, TaskList, Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 320.0,
    height: 600.0,
    row_height: 60.0,
    badge_width: 48.0,
};

fn main() -> ExitCode {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    if std::env::args().nth(1).as_deref() == Some("walkthrough") {
        if let Err(err) = walkthrough() {
            eprintln!("walkthrough failed: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn walkthrough() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;

    let mut lists = SqliteRowStore::<TaskList, _>::open(&conn, None)?;
    let groceries = TaskList::new("Groceries");
    lists.write(|rows| rows.insert(0, groceries.clone()))?;

    let mut tasks = SqliteRowStore::<Task, _>::open(&conn, Some(groceries.uuid))?;
    tasks.write(|rows| {
        for (position, text) in ["milk", "eggs", "bread", "apples"].into_iter().enumerate() {
            rows.insert(position, Task::new(text));
        }
    })?;

    let mut screen = ListScreen::new(
        GestureConfig::default(),
        RowAdapter::new(tasks),
        SnapshotView::new(1, VIEWPORT),
    );
    print_rows("start", &screen);

    // Swipe "milk" right past the niche.
    swipe(&mut screen, 30.0, 90.0);
    print_rows("complete row 0", &screen);

    // Long-press "bread" and drag it one row up.
    screen.handle_touch(&MotionEvent::down(0, 100.0, 90.0, 2_000));
    screen.tick(2_500);
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 25.0, 2_510));
    screen.handle_touch(&MotionEvent::up(0, 100.0, 25.0, 2_520));
    print_rows("drag row 1 up", &screen);

    // Pull down to create, name it, and tap outside to commit.
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 3_000));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 60.0, 3_010));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 120.0, 3_020));
    screen.draw();
    screen.handle_touch(&MotionEvent::up(0, 100.0, 120.0, 3_030));
    screen.type_text("butter");
    screen.handle_touch(&MotionEvent::down(0, 100.0, 550.0, 3_100));
    screen.handle_touch(&MotionEvent::up(0, 100.0, 550.0, 3_150));
    print_rows("pull to create", &screen);

    // Swipe the last active row left to dismiss it.
    let last_active = screen.adapter().active_count().saturating_sub(1);
    swipe(&mut screen, last_active as f32 * VIEWPORT.row_height + 30.0, -90.0);
    print_rows("dismiss last active row", &screen);

    screen.close();
    lists.reload()?;
    for list in lists.rows() {
        println!("list {} active_tasks={}", list.text, list.active_task_count);
    }
    Ok(())
}

fn swipe<S>(screen: &mut ListScreen<Task, S>, y: f32, dx: f32)
where
    S: RowStore<Task>,
{
    screen.handle_touch(&MotionEvent::down(0, 100.0, y, 0));
    screen.handle_touch(&MotionEvent::moved(0, 100.0 + dx, y, 10));
    screen.draw();
    screen.handle_touch(&MotionEvent::up(0, 100.0 + dx, y, 20));
}

fn print_rows<S>(step: &str, screen: &ListScreen<Task, S>)
where
    S: RowStore<Task>,
{
    let rows = screen
        .adapter()
        .rows()
        .iter()
        .map(|task| {
            if task.completed {
                format!("[x] {}", task.text)
            } else {
                format!("[ ] {}", task.text)
            }
        })
        .collect::<Vec<_>>();
    println!("{step}: {}", rows.join(", "));
}
