// Spreadsheet export clean-up.
//
// Takes a delimited export of the squad spreadsheet and writes the CSV the
// loader expects: headers trimmed and title-cased, fully empty rows dropped,
// every other cell copied verbatim.

use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("input has no file name: {path}")]
    NoFileName { path: PathBuf },

    #[error("refusing to overwrite input file {path}")]
    WouldOverwriteInput { path: PathBuf },
}

/// Python-style title case: the first letter of each run of letters is
/// upper-cased, the rest lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

/// Normalise one header cell.
pub fn normalize_header(h: &str) -> String {
    title_case(h.trim())
}

/// Tab for `.tsv`/`.tab` exports, comma otherwise.
fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

/// Convert `input` into `<stem>.csv` under `output_dir` (default: next to
/// the input). Returns the written path.
pub fn convert_export(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf, ConvertError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e: std::io::Error| ConvertError::Io { path, source: e }
    };

    let input = input.canonicalize().map_err(io_err(input))?;
    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::NoFileName {
            path: input.clone(),
        })?
        .to_os_string();

    let out_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&out_dir).map_err(io_err(&out_dir))?;

    let mut file_name = stem;
    file_name.push(".csv");
    let output = out_dir.join(file_name);
    if output.canonicalize().ok().as_deref() == Some(input.as_path()) {
        return Err(ConvertError::WouldOverwriteInput { path: input });
    }

    info!("Reading export: {}", input.display());
    let csv_in = |e: csv::Error| ConvertError::Csv {
        path: input.clone(),
        source: e,
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(&input))
        .flexible(true)
        .from_path(&input)
        .map_err(csv_in)?;

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(csv_in)?
        .iter()
        .map(normalize_header)
        .collect();

    let csv_out = |e: csv::Error| ConvertError::Csv {
        path: output.clone(),
        source: e,
    };
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output)
        .map_err(csv_out)?;
    writer.write_record(&headers).map_err(csv_out)?;

    let mut kept = 0usize;
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_in)?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            dropped += 1;
            continue;
        }
        writer.write_record(&row).map_err(csv_out)?;
        kept += 1;
    }
    writer.flush().map_err(io_err(&output))?;

    info!(
        "Wrote {} rows to {} ({} empty rows dropped)",
        kept,
        output.display(),
        dropped
    );
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn title_case_matches_spreadsheet_headers() {
        assert_eq!(title_case("player name"), "Player Name");
        assert_eq!(title_case("PLAYER TYPE"), "Player Type");
        assert_eq!(title_case("credits"), "Credits");
        assert_eq!(title_case("team-name 2x"), "Team-Name 2X");
        assert_eq!(normalize_header("  team  "), "Team");
    }

    #[test]
    fn converts_export_and_drops_empty_rows() {
        let tmp = std::env::temp_dir().join("squad_convert_test_basic");
        let out = tmp.join("out");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let input = tmp.join("mi_players.tsv");
        fs::write(
            &input,
            " player name\tTEAM\tplayer type\tcredits \n\
             Rohit Sharma\tMI\tBAT\t10.5\n\
             \t\t\t\n\
             Jasprit Bumrah\tMI\tBOWL\t9\n",
        )
        .unwrap();

        let written = convert_export(&input, Some(&out)).unwrap();
        assert_eq!(written.file_name().unwrap(), "mi_players.csv");

        let text = fs::read_to_string(&written).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Player Name,Team,Player Type,Credits");
        assert_eq!(lines[1], "Rohit Sharma,MI,BAT,10.5");
        assert_eq!(lines[2], "Jasprit Bumrah,MI,BOWL,9");
        assert_eq!(lines.len(), 3);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let tmp = std::env::temp_dir().join("squad_convert_test_overwrite");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let input = tmp.join("squad.csv");
        fs::write(&input, "player name,team\nA,B\n").unwrap();

        match convert_export(&input, None).unwrap_err() {
            ConvertError::WouldOverwriteInput { .. } => {}
            other => panic!("expected WouldOverwriteInput, got: {other}"),
        }
        // input untouched
        assert_eq!(fs::read_to_string(&input).unwrap(), "player name,team\nA,B\n");

        let _ = fs::remove_dir_all(&tmp);
    }
}
