//! PostScript feature-header scanner.
//!
//! Print dialogs record the chosen machine settings in the document setup
//! section as
//!
//! ```text
//! %%BeginFeature: *LaserCuttingPower 80%
//! ```
//!
//! The key is the text between the first and the second space; the value
//! is everything after the second space. `*CustomPageSize` is followed by
//! two bare lines holding the page length and width. Lines carrying
//! `%%%LaosInclude:` contribute raw text to the output document. Scanning
//! stops at `%%EndSetup`.

use crate::error::SettingsResult;
use crate::features::{keys, FeatureTable};
use std::io::BufRead;
use tracing::debug;

const BEGIN_FEATURE: &str = "%%BeginFeature:";
const LAOS_INCLUDE: &str = "%%%LaosInclude:";
const END_SETUP: &str = "%%EndSetup";

/// Side products of a header scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderScan {
    /// `%%%LaosInclude:` texts in file order, escapes already expanded
    pub includes: Vec<String>,
    /// Number of features read
    pub features_read: usize,
}

impl HeaderScan {
    /// All include texts, concatenated
    pub fn include_text(&self) -> String {
        self.includes.concat()
    }

    /// Fold another scan into this one
    pub fn extend(&mut self, other: HeaderScan) {
        self.includes.extend(other.includes);
        self.features_read += other.features_read;
    }
}

/// Scan a feature header, storing every feature found in `table`
pub fn scan_features<R: BufRead>(reader: R, table: &mut FeatureTable) -> SettingsResult<HeaderScan> {
    let mut scan = HeaderScan::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if let Some(pos) = line.find(LAOS_INCLUDE) {
            let text = &line[pos + LAOS_INCLUDE.len()..];
            scan.includes.push(text.replace("\\n", "\n"));
        }

        if line.contains(BEGIN_FEATURE) {
            let mut fields = line.splitn(3, ' ');
            fields.next();
            let key = fields.next().unwrap_or("");
            let value = fields.next().unwrap_or("");
            if !key.is_empty() {
                debug!("key: '{}' value: '{}'", key, value);
                table.set(key, value);
                scan.features_read += 1;
            }

            if line.contains(keys::CUSTOM_PAGE_SIZE) {
                if let Some(length) = lines.next() {
                    table.set(keys::PAGE_LENGTH, length?.trim_end_matches('\r'));
                }
                if let Some(width) = lines.next() {
                    table.set(keys::PAGE_WIDTH, width?.trim_end_matches('\r'));
                }
            }
        }

        if line.contains(END_SETUP) {
            break;
        }
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(text: &str) -> (FeatureTable, HeaderScan) {
        let mut table = FeatureTable::new();
        let scan = scan_features(Cursor::new(text), &mut table).unwrap();
        (table, scan)
    }

    #[test]
    fn test_feature_line() {
        let (table, scan) = scan("%%BeginFeature: *LaserCuttingPower 80%\n");
        assert_eq!(table.get(keys::CUTTING_POWER), "80%");
        assert_eq!(scan.features_read, 1);
    }

    #[test]
    fn test_value_keeps_spaces() {
        let (table, _) = scan("%%BeginFeature: *Trailer ; end of job here\n");
        assert_eq!(table.get(keys::TRAILER), "; end of job here");
    }

    #[test]
    fn test_missing_value_is_empty() {
        let (table, _) = scan("%%BeginFeature: *LaserEngravingMode\n");
        assert_eq!(table.get(keys::ENGRAVING_MODE), "");
    }

    #[test]
    fn test_custom_page_size() {
        let (table, _) = scan(
            "%%BeginFeature: *CustomPageSize True\n300.5\n200.25\n%%EndFeature\n",
        );
        assert_eq!(table.get(keys::PAGE_LENGTH), "300.5");
        assert_eq!(table.get(keys::PAGE_WIDTH), "200.25");
        assert_eq!(table.get(keys::CUSTOM_PAGE_SIZE), "True");
    }

    #[test]
    fn test_stops_at_end_setup() {
        let (table, scan) = scan(
            "%%BeginFeature: *Digits 2\n%%EndSetup\n%%BeginFeature: *Digits 5\n",
        );
        assert_eq!(table.get(keys::DIGITS), "2");
        assert_eq!(scan.features_read, 1);
    }

    #[test]
    fn test_includes() {
        let (_, scan) = scan("%%%LaosInclude:; job A\\n\n%%%LaosInclude:7 102 500\\n\n");
        assert_eq!(scan.includes, vec!["; job A\n", "7 102 500\n"]);
        assert_eq!(scan.include_text(), "; job A\n7 102 500\n");
    }

    #[test]
    fn test_crlf_lines() {
        let (table, _) = scan("%%BeginFeature: *Scale 1000\r\n");
        assert_eq!(table.get(keys::SCALE), "1000");
    }

    #[test]
    fn test_unrelated_lines_ignored() {
        let (table, scan) = scan("%!PS-Adobe-3.0\n%%Creator: inkscape\n");
        assert_eq!(table, FeatureTable::new());
        assert_eq!(scan, HeaderScan::default());
    }
}
