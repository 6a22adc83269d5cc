use crate::domain::models::JsonOut;
use serde::Serialize;

fn emit_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

/// Print a row set: one formatted line per row, or the whole set inside the
/// `{ ok, data }` envelope under `--json`.
pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(data);
    }
    for d in data {
        println!("{}", row(d));
    }
    Ok(())
}

/// Print a single report, same envelope rule as `print_out`.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(&data);
    }
    println!("{}", row(&data));
    Ok(())
}
