const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, thiserror::Error)]
pub enum CsvNamesError {
    #[error("file is not UTF-8 encoded (invalid byte at offset {})", .0.valid_up_to())]
    Encoding(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Reads the names out of an uploaded CSV file.
///
/// Every non-empty cell is a name, trimmed, in file order. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct CsvNameReader {
    pub has_header: bool,
    /// Field delimiter; sniffed from the first line when `None`.
    pub delimiter: Option<u8>,
}

impl CsvNameReader {
    pub fn new(has_header: bool) -> Self {
        Self {
            has_header,
            delimiter: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Fails on input that is not UTF-8 rather than guessing at its encoding.
    pub fn read_names(&self, data: &[u8]) -> Result<Vec<String>, CsvNamesError> {
        let text = std::str::from_utf8(data.strip_prefix(UTF8_BOM).unwrap_or(data))?;
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(text));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut names = Vec::new();
        for record in reader.records() {
            let record = record?;
            names.extend(
                record
                    .iter()
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(names)
    }
}

/// Pick the candidate delimiter that occurs most often on the first non-blank line.
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");

    CANDIDATE_DELIMITERS
        .iter()
        .map(|&d| (d, first_line.bytes().filter(|&b| b == d).count()))
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}
