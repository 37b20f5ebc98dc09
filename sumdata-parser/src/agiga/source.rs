//! Corpus file handling
//!
//! Gigaword ships as one gzip-compressed XML file per month and source
//! (`data/xml/nyt_eng_199407.xml.gz`). Each input file becomes one record file under the
//! output root, keeping the input's parent directory name:
//!
//!     data/xml/nyt_eng_199407.xml.gz  ->  <out>/xml/nyt_eng_199407.txt

use flate2::read::MultiGzDecoder;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::agiga::extractor::{ExtractStats, Extractor};
use crate::agiga::ExtractOptions;
use crate::error::{Error, Result};
use crate::record::RecordFormat;

/// Line iterator that tolerates invalid UTF-8.
///
/// Corpus and record files are byte text; a stray byte should not end the stream, so every
/// line is decoded lossily. Trailing `\n` and `\r\n` are removed.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Open a corpus file, decompressing when the name ends in `.gz`.
pub fn open_corpus(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Record file for a corpus file: `<out_root>/<parent dir name>/<stem>.txt`.
///
/// The stem drops `.xml.gz`, or `.gz`, or the last extension, in that order of preference.
pub fn output_path(input: &Path, out_root: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name
        .strip_suffix(".xml.gz")
        .or_else(|| name.strip_suffix(".gz"))
        .map(str::to_string)
        .unwrap_or_else(|| {
            Path::new(&name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let mut path = out_root.to_path_buf();
    if let Some(dir) = input.parent().and_then(Path::file_name) {
        path.push(dir);
    }
    path.push(format!("{}.txt", stem));
    path
}

/// Run the extractor over `reader`, writing one record per line.
pub fn extract_to_writer<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    options: &ExtractOptions,
    format: RecordFormat,
) -> Result<ExtractStats> {
    let mut extractor = Extractor::from_reader(reader, options);
    for record in extractor.by_ref() {
        format.write_record(&mut writer, &record?)?;
    }
    writer.flush()?;
    Ok(extractor.stats().clone())
}

/// Extract one corpus file into its record file under `out_root`.
///
/// Returns the path written and the extraction counters.
pub fn extract_file(
    input: &Path,
    out_root: &Path,
    options: &ExtractOptions,
    format: RecordFormat,
) -> Result<(PathBuf, ExtractStats)> {
    let output = output_path(input, out_root);
    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir).map_err(|e| Error::io_at(dir, e))?;
    }
    info!("Extracting {} -> {}", input.display(), output.display());

    let reader = open_corpus(input)?;
    let file = File::create(&output).map_err(|e| Error::io_at(&output, e))?;
    let stats = extract_to_writer(reader, BufWriter::new(file), options, format)?;

    info!(
        "{}: {} lines, {} records",
        input.display(),
        stats.lines_read,
        stats.records_emitted
    );
    Ok((output, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Cursor;

    #[test]
    fn test_lossy_lines_strips_endings() {
        let lines: Vec<String> = LossyLines::new(Cursor::new("a\r\nb\nc"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lossy_lines_keeps_bad_bytes() {
        let bytes: &[u8] = b"(NN caf\xe9)\n";
        let lines: Vec<String> = LossyLines::new(Cursor::new(bytes))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("(NN caf"));
    }

    #[test]
    fn test_output_path() {
        let out = output_path(
            Path::new("/data/agiga/xml/nyt_eng_199407.xml.gz"),
            Path::new("/work/out"),
        );
        assert_eq!(out, PathBuf::from("/work/out/xml/nyt_eng_199407.txt"));
    }

    #[test]
    fn test_output_path_plain_file() {
        let out = output_path(Path::new("xml/apw.xml"), Path::new("out"));
        assert_eq!(out, PathBuf::from("out/xml/apw.txt"));
    }

    #[test]
    fn test_extract_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_dir = dir.path().join("xml");
        fs::create_dir_all(&corpus_dir).unwrap();
        let input = corpus_dir.join("apw_eng_201001.xml.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(b"<HEADLINE>\n(NP (NN Storm))\n<P>\n(S (NP (NN rain)) (. .))\n</P>\n")
            .unwrap();
        fs::write(&input, encoder.finish().unwrap()).unwrap();

        let out_root = dir.path().join("out");
        let (written, stats) =
            extract_file(&input, &out_root, &ExtractOptions::default(), RecordFormat::Tsv).unwrap();

        assert_eq!(written, out_root.join("xml").join("apw_eng_201001.txt"));
        assert_eq!(stats.records_emitted, 1);
        let text = fs::read_to_string(written).unwrap();
        assert_eq!(
            text,
            "(NP (NN Storm))\t(TOP (S (NP (NN rain)) (. .)))\tStorm\train .\n"
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = open_corpus(Path::new("/nonexistent/corpus.xml.gz"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/corpus.xml.gz"));
    }
}
