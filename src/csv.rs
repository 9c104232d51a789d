// src/csv.rs
use std::borrow::Cow;
use std::io::{self, Write};

use crate::record::{headers, CardRecord};

/// Quote a cell when it holds the separator, a quote or a line break.
fn escape(cell: &str, sep: char) -> Cow<'_, str> {
    let special = |c: char| c == sep || c == '"' || c == '\n' || c == '\r';
    if cell.contains(special) {
        Cow::Owned(join!("\"", cell.replace('"', "\"\""), "\""))
    } else {
        Cow::Borrowed(cell)
    }
}

/// One delimited line. Cells are anything string-like, so records can be
/// written without collecting their values first.
pub fn write_row<W, I, S>(mut w: W, cells: I, sep: char) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        w.write_all(escape(cell.as_ref(), sep).as_bytes())?;
    }
    writeln!(w)
}

/// Header (optional) plus one line per record, columns in the fixed export order.
pub fn write_records<W: Write>(
    mut w: W,
    records: &[CardRecord],
    sep: char,
    include_headers: bool,
) -> io::Result<()> {
    if include_headers {
        write_row(&mut w, headers(), sep)?;
    }
    for rec in records {
        write_row(&mut w, rec.iter().map(|(_, v)| v), sep)?;
    }
    Ok(())
}

/// Whole export as a string (clipboard, stdout, tests).
pub fn to_export_string(records: &[CardRecord], sep: char, include_headers: bool) -> String {
    let mut buf = Vec::new();
    if let Err(e) = write_records(&mut buf, records, sep, include_headers) {
        loge!("export to memory failed: {e}");
    }
    // Every cell is a `&str`, so the buffer is valid UTF-8.
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    #[test]
    fn quoting() {
        let mut buf = Vec::new();
        let row = vec![s!("plain"), s!("a,b"), s!("say \"hi\""), s!("two\nlines")];
        write_row(&mut buf, &row, ',').unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "plain,\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
        );
    }

    #[test]
    fn tab_separated_leaves_commas_alone() {
        let mut buf = Vec::new();
        write_row(&mut buf, ["a,b", "c"], '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\tc\n");
    }

    #[test]
    fn header_then_records() {
        let mut rec = CardRecord::blank("N/A");
        rec.set(Field::Number, "A1 001");
        rec.set(Field::Move1Effect, "Heal 30, then draw.");
        let out = to_export_string(&[rec.clone(), rec], ',', true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("number,name,rarity,stage,HP,type,weakness,retreat_cost,"));
        assert!(lines[0].ends_with(",image,url"));
        assert!(lines[1].starts_with("A1 001,N/A,"));
        assert!(lines[1].contains("\"Heal 30, then draw.\""));
    }

    #[test]
    fn no_headers() {
        let out = to_export_string(&[CardRecord::blank("-")], '\t', false);
        assert_eq!(out.trim_end().split('\t').count(), 24);
        assert!(!out.contains("number"));
    }
}
