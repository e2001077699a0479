use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

/// Column limit for the "operation (target)" field.
const OP_WIDTH_MAX: usize = 60;

/// ANSI color for an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "submit" => Colour::Cyan,
        "approve" => Colour::Green,
        "reject" => Colour::Red,
        "role" | "add_user" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 3 >= max {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(&e.operation, &e.target).width())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());

            let visible = truncate(&op_target(&e.operation, &e.target), OP_WIDTH_MAX);
            let padding = " ".repeat(op_w.saturating_sub(visible.width()));

            // only the operation word is colored
            let color = color_for_operation(&e.operation);
            let rendered = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                date,
                rendered,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

fn op_target(operation: &str, target: &str) -> String {
    if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_targets() {
        let long = "x".repeat(100);
        let t = truncate(&long, 20);
        assert!(t.ends_with("..."));
        assert!(t.width() <= 20);
        assert_eq!(truncate("short", 20), "short");
    }

    #[test]
    fn op_target_formatting() {
        assert_eq!(op_target("init", ""), "init");
        assert_eq!(op_target("approve", "abc"), "approve (abc)");
    }
}
