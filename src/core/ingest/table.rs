//! Delimited-text parsing.
//!
//! The parser is a character state machine rather than a line splitter:
//! quoted fields may contain the delimiter, doubled quotes and embedded
//! newlines, so rows cannot be recovered with a plain `lines()` pass.

/// Parse a whole delimited document into rows of fields.
///
/// Handles `"`-quoted fields, `""` escaping inside quotes, and both `\n`
/// and `\r\n` row endings. Rows whose fields are all empty after trimming
/// are dropped.
pub fn parse_delimited(input: &str, delim: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    // doubled quote → literal quote
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, &mut row);
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, &mut row);
            }
            c if c == delim => row.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    // trailing row without final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, &mut row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let blank = row.iter().all(|f| f.trim().is_empty());
    if blank {
        row.clear();
    } else {
        rows.push(std::mem::take(row));
    }
}

/// Split a single line on the delimiter, honouring quotes.
/// Used by the plain-text fallback where each line is one entry.
pub fn split_line(line: &str, delim: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delim {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}
