use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::render;
use crate::shell::Shell;

/// Prompt/read/execute loop. Stops on `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    shell: &mut Shell,
    mut input: R,
    output: &mut W,
    prompt: &str,
    banner: bool,
) -> Result<()> {
    if banner {
        for line in render::banner() {
            writeln!(output, "{line}")?;
        }
    }

    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            writeln!(output)?;
            return Ok(());
        }

        let reply = shell.execute(&line);
        for text in &reply.lines {
            writeln!(output, "{text}")?;
        }
        if reply.quit {
            return Ok(());
        }
    }
}
