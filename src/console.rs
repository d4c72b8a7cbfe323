//! Line-oriented console protocol for acquiring a method body.
//!
//! The text is accumulated verbatim, one line at a time, each with a
//! trailing newline; the first empty line (or end of input) terminates.
//! No escaping or validation happens here.

use std::io::{self, BufRead, Write};

/// Read a method body, echoing the prompt and the method header around it
/// the way an operator would see the final source.
pub fn read_method_body<R, W>(input: R, output: &mut W, method_header: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "Please input the following method body. To end the input enter the empty line:"
    )?;
    writeln!(output, "{method_header} {{")?;
    let mut body = String::new();
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        body.push_str(&line);
        body.push('\n');
    }
    writeln!(output, "}}")?;
    writeln!(output, "Input complete.")?;
    Ok(body)
}
