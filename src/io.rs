use std::io::BufRead;

/// Line-oriented source of program input, consumed one line per `READ`.
///
/// Implementations strip the line terminator; `None` signals end of input,
/// which `READ` turns into `nil`.
pub trait InputSource {
    fn read_line(&mut self) -> Option<String>;
}

/// Adapts any buffered reader into an [`InputSource`].
pub struct Lines<R> {
    reader: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Lines<R> {
        Lines { reader }
    }
}

impl<R: BufRead> InputSource for Lines<R> {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }
}
