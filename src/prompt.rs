use std::io::{self, BufRead, Write};

/// Pose `question` jusqu'à obtenir un entier strictement positif.
///
/// Renvoie une erreur `UnexpectedEof` si l'entrée se termine avant.
pub fn read_positive<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<usize> {
    let mut line = String::new();
    loop {
        write!(output, "{question}: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer for {question:?}"),
            ));
        }

        match line.trim().parse::<usize>() {
            Ok(n) if n > 0 => return Ok(n),
            _ => writeln!(output, "Please enter a positive integer.")?,
        }
    }
}
