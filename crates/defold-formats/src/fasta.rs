use defold_core::record::{ParsedHeader, SequenceRecord};

use crate::{header, FormatError};

/// Parse FASTA text into records, in file order.
///
/// Never fails: lines before the first header are dropped and headers that
/// don't follow the expected layout decompose to `"N/A"` fields.
pub fn parse(input: &str) -> Vec<SequenceRecord> {
    let mut records = Vec::new();
    let mut current = SequenceRecord::new("", ParsedHeader::default());

    for line in input.split('\n') {
        if line.starts_with('>') {
            let header = line.trim();
            let next = SequenceRecord::new(header, header::decompose(header));
            let finished = std::mem::replace(&mut current, next);
            if finished.has_header() {
                records.push(finished);
            }
        } else {
            current.push_line(line);
        }
    }

    // Don't forget the last record
    if current.has_header() {
        records.push(current);
    }

    log::debug!("parsed {} FASTA records", records.len());
    records
}

const LINE_WIDTH: usize = 80;

/// Serialize records to FASTA format
///
/// Sequence lines wrap at 80 characters, moving a break forward when the
/// next line would start with `>` or whitespace, so [`parse`] reads the
/// output back unchanged. A sequence that itself starts with `>` cannot be
/// written that way and is rejected.
pub fn serialize(records: &[SequenceRecord]) -> Result<String, FormatError> {
    let mut out = String::new();

    for record in records {
        if record.sequence.starts_with('>') {
            return Err(FormatError::HeaderLikeSequence(record.header.clone()));
        }
        out.push_str(&record.header);
        out.push('\n');
        push_wrapped(&mut out, &record.sequence);
    }

    Ok(out)
}

fn push_wrapped(out: &mut String, sequence: &str) {
    let chars: Vec<char> = sequence.chars().collect();
    let mut line_len = 0;

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        line_len += 1;
        let Some(&next) = chars.get(i + 1) else {
            break;
        };
        let can_break = !ch.is_whitespace() && !next.is_whitespace() && next != '>';
        if line_len >= LINE_WIDTH && can_break {
            out.push('\n');
            line_len = 0;
        }
    }

    if !chars.is_empty() {
        out.push('\n');
    }
}
