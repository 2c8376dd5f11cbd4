//! Console output handler.

use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::Output;
use crate::decoding::Words;
use crate::generator::{Constant, Tables};

/// Four words as 8-digit lowercase hex, space-separated.
pub fn format_words(words: &Words) -> String {
    format!(
        "{:08x} {:08x} {:08x} {:08x}",
        words[0], words[1], words[2], words[3]
    )
}

/// Console output - one line per constant on stdout or a file.
pub struct ConsoleOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: bool,
}

impl ConsoleOutput {
    /// Create console output to stdout.
    pub fn new() -> Self {
        Self::with_writer(Box::new(BufWriter::new(io::stdout())))
    }

    /// Create console output to file.
    pub fn to_file(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_writer(Box::new(BufWriter::new(file))))
    }

    /// Create console output over any writer.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            verbose: false,
        }
    }

    /// Append position and table labels to each line.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn Write + Send>>> {
        self.writer
            .lock()
            .map_err(|_| anyhow!("output writer poisoned"))
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for ConsoleOutput {
    fn constant(&self, constant: &Constant, tables: &Tables) -> Result<()> {
        let mut w = self.lock()?;
        let words = format_words(&constant.words);

        if self.verbose {
            let labels = tables.describe(&constant.position);
            writeln!(
                w,
                "{}  # {} {} {} {} {}",
                words,
                constant.position.index,
                labels.seed,
                labels.encoding,
                labels.transform,
                labels.decoding
            )?;
        } else {
            writeln!(w, "{}", words)?;
        }

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut w = self.lock()?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::Decoding;
    use crate::encoding::Encoding;
    use crate::generator::Generator;
    use crate::seed::SeedTable;
    use crate::transform::{HashAlgorithm, Transform};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn golden_generator() -> Generator {
        let tables = Tables::new(
            SeedTable::from_digits(["31415"]).unwrap().into_seeds(),
            vec![Encoding::Decimal],
            vec![Transform::Hash(HashAlgorithm::Md5)],
            vec![Decoding::BigEndian, Decoding::LittleEndian],
        );
        Generator::new(tables).unwrap()
    }

    fn write_all(output: &ConsoleOutput, generator: &Generator, count: u64) {
        for constant in generator.generate(count).unwrap() {
            output.constant(&constant.unwrap(), generator.tables()).unwrap();
        }
        output.flush().unwrap();
    }

    #[test]
    fn test_format_words() {
        assert_eq!(
            format_words(&[0xfd80c4b0, 0x6025c38f, 0x9d6958eb, 0xe4f14532]),
            "fd80c4b0 6025c38f 9d6958eb e4f14532"
        );
        assert_eq!(format_words(&[0, 1, 0xabc, u32::MAX]), "00000000 00000001 00000abc ffffffff");
    }

    #[test]
    fn test_compact_lines() {
        let buffer = SharedBuffer::default();
        let output = ConsoleOutput::with_writer(Box::new(buffer.clone()));
        write_all(&output, &golden_generator(), 2);

        assert_eq!(
            buffer.contents(),
            "fd80c4b0 6025c38f 9d6958eb e4f14532\nb0c480fd 8fc32560 eb58699d 3245f1e4\n"
        );
    }

    #[test]
    fn test_verbose_lines() {
        let buffer = SharedBuffer::default();
        let output = ConsoleOutput::with_writer(Box::new(buffer.clone())).with_verbose(true);
        write_all(&output, &golden_generator(), 2);

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "fd80c4b0 6025c38f 9d6958eb e4f14532  # 0 custom int10 md5 be"
        );
        assert!(lines[1].ends_with("# 1 custom int10 md5 le"));
    }
}
