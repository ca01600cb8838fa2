//! Structuring element text format
//!
//! Elements are stored as a header of `#`-prefixed lines followed by one
//! line per row:
//!
//! ```text
//! # binary structuring element
//! # width=3
//! # height=3
//! # xorigin=1
//! # yorigin=1
//! 010
//! 111
//! 010
//! ```
//!
//! Binary rows are `width` characters of `0`/`1`; anything past `width` is
//! ignored. Grey rows are whitespace-separated integers and are written
//! right-justified in five-character columns; a wider value gets one
//! leading space instead.

use crate::sel::{BinarySel, GreySel, Sel};
use crate::{MorphError, MorphResult};
use std::io::{Read, Write};

const BINARY_HEADER: &str = "# binary structuring element";
const GREY_HEADER: &str = "# grey structuring element";

/// Line cursor that reports 1-based line numbers in parse errors.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> MorphError {
        MorphError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn next_line(&mut self) -> MorphResult<&'a str> {
        self.line += 1;
        self.inner
            .next()
            .ok_or_else(|| self.error("unexpected end of input"))
    }

    fn expect_header(&mut self, header: &str) -> MorphResult<()> {
        let line = self.next_line()?;
        if !line.starts_with(header) {
            return Err(self.error(format!("expected {header:?}")));
        }
        Ok(())
    }

    /// Read a `# key=value` line.
    fn read_int(&mut self, key: &str) -> MorphResult<i32> {
        let line = self.next_line()?;
        let prefix = format!("# {key}=");
        let value = line
            .strip_prefix(&prefix)
            .ok_or_else(|| self.error(format!("expected {prefix:?}")))?;
        value
            .trim()
            .parse()
            .map_err(|_| self.error(format!("invalid {key} value {:?}", value.trim())))
    }

    fn read_geometry(&mut self) -> MorphResult<(u32, u32, i32, i32)> {
        let width = self.read_int("width")?;
        if width < 1 {
            return Err(self.error(format!("width must be at least 1, got {width}")));
        }
        let height = self.read_int("height")?;
        if height < 1 {
            return Err(self.error(format!("height must be at least 1, got {height}")));
        }
        let ox = self.read_int("xorigin")?;
        let oy = self.read_int("yorigin")?;
        Ok((width as u32, height as u32, ox, oy))
    }
}

fn read_to_string<R: Read>(mut reader: R) -> MorphResult<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

fn header_text(header: &str, width: u32, height: u32, origin: (i32, i32)) -> String {
    format!(
        "{header}\n# width={width}\n# height={height}\n# xorigin={}\n# yorigin={}\n",
        origin.0, origin.1
    )
}

fn write_text<W: Write>(mut out: W, text: &str) -> MorphResult<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

impl BinarySel {
    /// Parse a binary element from its text form.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::Parse`] for a wrong header, a missing or
    /// malformed geometry line, a row shorter than `width`, or a row
    /// character that is not `0` or `1`.
    pub fn parse(text: &str) -> MorphResult<Self> {
        let mut lines = Lines::new(text);
        lines.expect_header(BINARY_HEADER)?;
        let (width, height, ox, oy) = lines.read_geometry()?;

        // Grown row by row; header sizes are untrusted.
        let mut values = Vec::new();
        for _ in 0..height {
            let row = lines.next_line()?;
            let cells: Vec<char> = row.chars().take(width as usize).collect();
            if cells.len() < width as usize {
                return Err(lines.error(format!(
                    "truncated row: {} of {width} values",
                    cells.len()
                )));
            }
            for c in cells {
                let d = c
                    .to_digit(2)
                    .ok_or_else(|| lines.error(format!("invalid binary value {c:?}")))?;
                values.push(d as u8);
            }
        }

        Ok(Self::from_values(width, height, &values)?.with_origin(ox, oy))
    }

    /// Read a binary element from `reader`.
    pub fn read<R: Read>(reader: R) -> MorphResult<Self> {
        Self::parse(&read_to_string(reader)?)
    }

    /// Write the element, header included.
    pub fn write<W: Write>(&self, out: W) -> MorphResult<()> {
        write_text(out, &self.to_text())
    }

    /// Text form of the element.
    pub fn to_text(&self) -> String {
        let mut text = header_text(BINARY_HEADER, self.width(), self.height(), self.origin());
        for row in self.data().chunks(self.width() as usize) {
            text.extend(row.iter().map(|&v| char::from(b'0' + v)));
            text.push('\n');
        }
        text
    }
}

impl GreySel {
    /// Parse a grey element from its text form.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::Parse`] for a wrong header, a missing or
    /// malformed geometry line, a row with fewer than `width` values, or a
    /// value that is not an integer.
    pub fn parse(text: &str) -> MorphResult<Self> {
        let mut lines = Lines::new(text);
        lines.expect_header(GREY_HEADER)?;
        let (width, height, ox, oy) = lines.read_geometry()?;

        let mut values = Vec::new();
        for _ in 0..height {
            let row = lines.next_line()?;
            let tokens: Vec<&str> = row.split_whitespace().take(width as usize).collect();
            if tokens.len() < width as usize {
                return Err(lines.error(format!(
                    "truncated row: {} of {width} values",
                    tokens.len()
                )));
            }
            for tok in tokens {
                let v = tok
                    .parse::<i32>()
                    .map_err(|_| lines.error(format!("invalid grey value {tok:?}")))?;
                values.push(v);
            }
        }

        Ok(Self::from_values(width, height, &values)?.with_origin(ox, oy))
    }

    /// Read a grey element from `reader`.
    pub fn read<R: Read>(reader: R) -> MorphResult<Self> {
        Self::parse(&read_to_string(reader)?)
    }

    /// Write the element, header included.
    pub fn write<W: Write>(&self, out: W) -> MorphResult<()> {
        write_text(out, &self.to_text())
    }

    /// Text form of the element.
    pub fn to_text(&self) -> String {
        let mut text = header_text(GREY_HEADER, self.width(), self.height(), self.origin());
        for row in self.data().chunks(self.width() as usize) {
            for (i, v) in row.iter().enumerate() {
                let cell = format!("{v:>5}");
                // Values wider than the column still need a separator.
                if i > 0 && !cell.starts_with(' ') {
                    text.push(' ');
                }
                text.push_str(&cell);
            }
            text.push('\n');
        }
        text
    }
}

impl Sel {
    /// Parse either variant, chosen by the header line.
    pub fn parse(text: &str) -> MorphResult<Self> {
        let first = text.lines().next().unwrap_or_default();
        if first.starts_with(BINARY_HEADER) {
            BinarySel::parse(text).map(Sel::Binary)
        } else if first.starts_with(GREY_HEADER) {
            GreySel::parse(text).map(Sel::Grey)
        } else {
            Err(MorphError::Parse {
                line: 1,
                message: "unknown structuring element header".to_string(),
            })
        }
    }

    /// Read either variant from `reader`.
    pub fn read<R: Read>(reader: R) -> MorphResult<Self> {
        Self::parse(&read_to_string(reader)?)
    }

    /// Write the element, header included.
    pub fn write<W: Write>(&self, out: W) -> MorphResult<()> {
        match self {
            Sel::Binary(s) => s.write(out),
            Sel::Grey(s) => s.write(out),
        }
    }

    /// Text form of the element.
    pub fn to_text(&self) -> String {
        match self {
            Sel::Binary(s) => s.to_text(),
            Sel::Grey(s) => s.to_text(),
        }
    }
}
