//! Text persistence for magic constants and attack records.
//!
//! Two files per slider:
//!
//! * `magics_<slider>.txt`: one `square;magic` line per square.
//! * `<slider>.txt`: one `square;key;attacks` line per occupied table slot.
//!
//! All numbers are unsigned decimal. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::attacks::magic_table::{AttackRecord, MagicTable, Slider};
use crate::chess_errors::AttackTableError;
use crate::game_state::chess_types::Square;

pub fn magics_file_name(slider: Slider) -> String {
    format!("magics_{}.txt", slider.name())
}

pub fn attacks_file_name(slider: Slider) -> String {
    format!("{}.txt", slider.name())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AttackTableError + '_ {
    move |source| AttackTableError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_lines(path: &Path) -> Result<Vec<(usize, String)>, AttackTableError> {
    let file = File::open(path).map_err(io_error(path))?;
    let mut lines = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error(path))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push((index + 1, trimmed.to_string()));
        }
    }
    Ok(lines)
}

fn parse_fields<const N: usize>(path: &Path, line: usize, content: &str) -> Result<[u64; N], AttackTableError> {
    let parse_error = || AttackTableError::Parse {
        path: path.to_path_buf(),
        line,
        content: content.to_string(),
    };

    let mut out = [0u64; N];
    let mut fields = content.split(';');
    for slot in out.iter_mut() {
        *slot = fields
            .next()
            .and_then(|field| field.trim().parse::<u64>().ok())
            .ok_or_else(parse_error)?;
    }
    if fields.next().is_some() {
        return Err(parse_error());
    }
    Ok(out)
}

pub fn write_magics(path: &Path, magics: &[u64; 64]) -> Result<(), AttackTableError> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut out = BufWriter::new(file);
    for (square, magic) in magics.iter().enumerate() {
        writeln!(out, "{square};{magic}").map_err(io_error(path))?;
    }
    out.flush().map_err(io_error(path))
}

/// Read a magic file; every square must appear.
pub fn read_magics(path: &Path, slider: Slider) -> Result<[u64; 64], AttackTableError> {
    let mut magics = [None; 64];
    for (line, content) in read_lines(path)? {
        let [square, magic] = parse_fields::<2>(path, line, &content)?;
        let slot = magics.get_mut(square as usize).ok_or_else(|| AttackTableError::Parse {
            path: path.to_path_buf(),
            line,
            content: content.clone(),
        })?;
        *slot = Some(magic);
    }

    let mut out = [0u64; 64];
    for (square, (slot, magic)) in out.iter_mut().zip(magics).enumerate() {
        *slot = magic.ok_or(AttackTableError::MissingMagic {
            slider,
            square: square as Square,
        })?;
    }
    Ok(out)
}

pub fn write_attack_records(path: &Path, table: &MagicTable) -> Result<(), AttackTableError> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut out = BufWriter::new(file);
    for record in table.records() {
        writeln!(out, "{};{};{}", record.square, record.key, record.attacks).map_err(io_error(path))?;
    }
    out.flush().map_err(io_error(path))
}

pub fn read_attack_records(path: &Path) -> Result<Vec<AttackRecord>, AttackTableError> {
    read_lines(path)?
        .into_iter()
        .map(|(line, content)| {
            let [square, key, attacks] = parse_fields::<3>(path, line, &content)?;
            let square = Square::try_from(square).map_err(|_| AttackTableError::Parse {
                path: path.to_path_buf(),
                line,
                content: content.clone(),
            })?;
            Ok(AttackRecord { square, key, attacks })
        })
        .collect()
}

/// Write both files for `table` into `dir`, returning their paths.
pub fn save_table(dir: &Path, table: &MagicTable) -> Result<(PathBuf, PathBuf), AttackTableError> {
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;
    let magics_path = dir.join(magics_file_name(table.slider()));
    let attacks_path = dir.join(attacks_file_name(table.slider()));
    write_magics(&magics_path, &table.magics())?;
    write_attack_records(&attacks_path, table)?;
    Ok((magics_path, attacks_path))
}

/// Load one slider's table from `dir` without ray casting.
pub fn load_table(dir: &Path, slider: Slider) -> Result<MagicTable, AttackTableError> {
    let magics = read_magics(&dir.join(magics_file_name(slider)), slider)?;
    let records = read_attack_records(&dir.join(attacks_file_name(slider)))?;
    MagicTable::from_records(slider, &magics, &records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::magic_numbers::BISHOP_MAGICS;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("magic_chess_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be writable");
        dir
    }

    #[test]
    fn bishop_table_survives_save_and_load() {
        let dir = scratch_dir("bishop_io");
        let table = MagicTable::build(Slider::Bishop, &BISHOP_MAGICS).expect("bishop table");
        save_table(&dir, &table).expect("save should succeed");

        let loaded = load_table(&dir, Slider::Bishop).expect("load should succeed");
        assert!(loaded.verify().is_ok());
        assert_eq!(loaded.magics(), BISHOP_MAGICS);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn magic_file_lines_are_square_semicolon_value() {
        let dir = scratch_dir("magic_lines");
        let path = dir.join("magics.txt");
        write_magics(&path, &BISHOP_MAGICS).expect("write should succeed");

        let text = std::fs::read_to_string(&path).expect("file should exist");
        let first = text.lines().next().expect("at least one line");
        assert_eq!(first, format!("0;{}", BISHOP_MAGICS[0]));
        assert_eq!(text.lines().count(), 64);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_square_in_magic_file_is_reported() {
        let dir = scratch_dir("magic_missing");
        let path = dir.join("magics.txt");
        std::fs::write(&path, "0;1\n1;2\n").expect("write should succeed");
        assert!(matches!(
            read_magics(&path, Slider::Rook),
            Err(AttackTableError::MissingMagic { square: 2, .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_record_names_its_line() {
        let dir = scratch_dir("bad_record");
        let path = dir.join("rook.txt");
        std::fs::write(&path, "0;1;2\n\n0;x;2\n").expect("write should succeed");
        match read_attack_records(&path) {
            Err(AttackTableError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
