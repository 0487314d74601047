use chrono::{DateTime, Utc};

use super::models::Task;

const INDENT: &str = "  ";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One line per task, subtasks indented under their parent.
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        render_node(task, 0, &mut out);
    }
    out
}

fn render_node(task: &Task, depth: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(if task.done { "[x] " } else { "[ ] " });
    out.push_str(&one_line(&task.title));
    out.push_str(&format!(" ({})", task.priority));
    if let Some(due) = &task.due {
        out.push_str(&format!(" due {}", fmt_date(due)));
    }
    if let Some(done_at) = &task.done_at {
        out.push_str(&format!(" done {}", fmt_date(done_at)));
    }
    out.push('\n');

    for child in &task.sub {
        render_node(child, depth + 1, out);
    }
}

fn fmt_date(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
