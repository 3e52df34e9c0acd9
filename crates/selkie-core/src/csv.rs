//! Tabular record input.
//!
//! A small hand-rolled CSV reader: quoted fields, `""` escapes, CRLF line
//! endings. The first row is a header; records are read by column name so
//! the dataset can carry extra columns without breaking the loader.
//!
//! Only rows whose `display` column equals `"yes"` become [`Record`]s.
//! Numeric columns are validated here so a bad month/year fails loading
//! with a line-numbered error instead of leaking a bogus duration into
//! relationship discovery.

use crate::error::{Error, Result};
use crate::model::Record;

const COL_DISPLAY: &str = "display";
const COL_NAME: &str = "name";
const COL_MONTH: &str = "month";
const COL_YEAR: &str = "year";
const COL_TAGS: [&str; 3] = ["tag_1", "tag_2", "tag_3"];
const COL_URL: &str = "url";
const COL_IMG: &str = "img";

/// Parse CSV text into displayable records.
pub fn load_records(input: &str) -> Result<Vec<Record>> {
    let rows = parse_rows(input)?;
    let mut it = rows.into_iter();
    let Some((_, header)) = it.next() else {
        return Ok(Vec::new());
    };

    let col = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn {
                name: name.to_string(),
            })
    };

    let display = col(COL_DISPLAY)?;
    let name = col(COL_NAME)?;
    let month = col(COL_MONTH)?;
    let year = col(COL_YEAR)?;
    let tags = [col(COL_TAGS[0])?, col(COL_TAGS[1])?, col(COL_TAGS[2])?];
    let url = col(COL_URL)?;
    let img = col(COL_IMG)?;

    let mut records = Vec::new();
    for (line, row) in it {
        let field = |idx: usize| -> &str { row.get(idx).map(String::as_str).unwrap_or("") };

        if field(display).trim() != "yes" {
            continue;
        }

        let parse_int = |idx: usize, what: &str| -> Result<i32> {
            let raw = field(idx).trim();
            raw.parse::<i32>().map_err(|_| Error::InvalidRecord {
                line,
                message: format!("{what} is not an integer: {raw:?}"),
            })
        };

        let record_name = field(name).trim();
        if record_name.is_empty() {
            return Err(Error::InvalidRecord {
                line,
                message: "empty name".to_string(),
            });
        }

        records.push(Record {
            name: record_name.to_string(),
            month: parse_int(month, "month")?,
            year: parse_int(year, "year")?,
            tags: [
                field(tags[0]).trim().to_string(),
                field(tags[1]).trim().to_string(),
                field(tags[2]).trim().to_string(),
            ],
            url: field(url).trim().to_string(),
            img: field(img).trim().to_string(),
        });
    }
    Ok(records)
}

/// Parse raw CSV into rows of fields, tagged with 1-based line numbers.
/// Blank lines are skipped.
fn parse_rows(input: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut p = CsvParser::new(input);
    let mut rows = Vec::new();
    p.consume_newlines();
    while !p.eof() {
        let line = p.line;
        let mut fields = vec![p.parse_field()?];
        while p.try_consume(',') {
            fields.push(p.parse_field()?);
        }

        // End of record: newline or EOF.
        if p.try_consume_newline() {
            p.consume_newlines();
        } else if !p.eof() {
            return Err(Error::Csv {
                line: p.line,
                message: "expected end of record".to_string(),
            });
        }

        rows.push((line, fields));
    }
    Ok(rows)
}

struct CsvParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> CsvParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn try_consume(&mut self, ch: char) -> bool {
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn consume_newlines(&mut self) {
        while self.try_consume_newline() {}
    }

    fn try_consume_newline(&mut self) -> bool {
        match self.peek_char() {
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
                true
            }
            Some('\r') => {
                self.pos += 1;
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn parse_field(&mut self) -> Result<String> {
        match self.peek_char() {
            Some('"') => self.parse_quoted_field(),
            Some('\n' | '\r') | None => Ok(String::new()),
            _ => Ok(self.parse_unquoted_field()),
        }
    }

    fn parse_unquoted_field(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == ',' || ch == '\n' || ch == '\r' {
                break;
            }
            out.push(ch);
            self.pos += ch.len_utf8();
        }
        out
    }

    fn parse_quoted_field(&mut self) -> Result<String> {
        self.pos += 1; // opening quote
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
            if ch == '"' {
                if self.peek_char() == Some('"') {
                    // Escaped quote
                    self.pos += 1;
                    out.push('"');
                    continue;
                }
                // Closing quote
                return Ok(out);
            }
            out.push(ch);
        }
        Err(Error::Csv {
            line: self.line,
            message: "unterminated quoted field".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "display,name,month,year,tag_1,tag_2,tag_3,url,img";

    #[test]
    fn loads_only_rows_marked_for_display() {
        let input = format!(
            "{HEADER}\n\
             yes,Alpha,1,2020,memory,,,https://a.example,a.png\n\
             no,Hidden,2,2020,memory,,,https://h.example,h.png\n\
             yes,Beta,3,2020,memory,vitality,,https://b.example,b.png\n"
        );
        let records = load_records(&input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alpha");
        assert_eq!(records[1].name, "Beta");
        assert_eq!(records[1].tags, ["memory", "vitality", ""]);
        assert_eq!(records[1].url, "https://b.example");
    }

    #[test]
    fn parses_quoted_fields_and_escaped_quotes() {
        let input = format!(
            "{HEADER}\r\n\
             yes,\"Comma, Inc\",1,2020,\"say \"\"hi\"\"\",,,u,i\r\n"
        );
        let records = load_records(&input).unwrap();
        assert_eq!(records[0].name, "Comma, Inc");
        assert_eq!(records[0].tags[0], "say \"hi\"");
    }

    #[test]
    fn rejects_non_integer_month() {
        let input = format!("{HEADER}\nyes,Alpha,January,2020,,,,u,i\n");
        let err = load_records(&input).unwrap_err();
        match err {
            Error::InvalidRecord { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("month"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_column() {
        let input = "display,name,month,year\nyes,Alpha,1,2020\n";
        let err = load_records(input).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref name } if name == "tag_1"));
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(load_records("").unwrap().is_empty());
        assert!(load_records(HEADER).unwrap().is_empty());
    }

    #[test]
    fn header_columns_can_be_reordered() {
        let input = "name,year,month,display,img,url,tag_3,tag_2,tag_1\n\
                     Alpha,2020,1,yes,a.png,https://a.example,,,memory\n";
        let records = load_records(input).unwrap();
        assert_eq!(records[0].name, "Alpha");
        assert_eq!(records[0].year, 2020);
        assert_eq!(records[0].tags, ["memory", "", ""]);
    }
}
