//! Difficulty and leaderboard files.
//!
//! Both are tiny text files opened, read or written, and closed within one call.
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::difficulty::Difficulty;
use crate::error::{Error, Result};

/// Single digit file holding the chosen difficulty.
#[derive(Debug, Clone)]
pub struct DifficultyStore {
    path: PathBuf,
}

impl DifficultyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable content falls back to easy and is written back.
    pub fn load(&self) -> Result<Difficulty> {
        let content = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no difficulty file at {}, defaulting to easy", self.path.display());
                self.save(Difficulty::default())?;
                return Ok(Difficulty::default());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        match content.parse::<Difficulty>() {
            Ok(d) => Ok(d),
            Err(e) => {
                log::warn!("{} in {}, resetting to easy", e, self.path.display());
                self.save(Difficulty::default())?;
                Ok(Difficulty::default())
            }
        }
    }

    pub fn save(&self, difficulty: Difficulty) -> Result<()> {
        fs::write(&self.path, difficulty.to_string()).map_err(|e| Error::io(&self.path, e))?;
        log::info!("difficulty set to {}", difficulty.label());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub elapsed_secs: u32,
    pub name: String,
}

impl ScoreEntry {
    /// Drops characters that would break the one-record-per-line format.
    pub fn new(elapsed_secs: u32, name: &str) -> Self {
        let name = name.chars().filter(|&c| c != ',' && !c.is_control()).collect::<String>();
        Self { elapsed_secs, name: name.trim().to_string() }
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.elapsed_secs, self.name)
    }
}

impl FromStr for ScoreEntry {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim_end();
        let (secs, name) = line.split_once(',').ok_or_else(|| format!("missing comma in {line:?}"))?;
        let elapsed_secs = secs.trim().parse::<u32>().map_err(|e| format!("bad time {secs:?}: {e}"))?;
        Ok(Self { elapsed_secs, name: name.to_string() })
    }
}

/// Append-only list of `"<elapsed_seconds>,<name>"` lines.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable record in file order.
    pub fn entries(&self) -> Result<Vec<ScoreEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let mut entries = Vec::new();
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() { continue; }
            match line.parse::<ScoreEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("{}:{}: skipping record, {}", self.path.display(), n + 1, e),
            }
        }
        Ok(entries)
    }

    /// Fastest first; equal times keep their file order.
    pub fn ranked(&self, limit: usize) -> Result<Vec<ScoreEntry>> {
        let mut entries = self.entries()?;
        entries.sort_by_key(|e| e.elapsed_secs);
        entries.truncate(limit);
        Ok(entries)
    }

    /// Appends one record, first closing off a last line left without a newline.
    pub fn submit(&self, entry: &ScoreEntry) -> Result<()> {
        let io = |e| Error::io(&self.path, e);
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io)?;
        if file.metadata().map_err(io)?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1)).map_err(io)?;
            file.read_exact(&mut last).map_err(io)?;
            if last[0] != b'\n' {
                file.write_all(b"\n").map_err(io)?;
            }
        }
        writeln!(file, "{entry}").map_err(io)?;
        log::info!("leaderboard entry {entry} saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_difficulty_defaults_to_easy_and_is_written() {
        let dir = tempdir().unwrap();
        let store = DifficultyStore::new(dir.path().join("difficulty.txt"));
        assert_eq!(store.load().unwrap(), Difficulty::Easy);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "0");
    }

    #[test]
    fn difficulty_round_trips_through_the_file() {
        let dir = tempdir().unwrap();
        let store = DifficultyStore::new(dir.path().join("difficulty.txt"));
        store.save(Difficulty::Hard).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "2");
        assert_eq!(store.load().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn garbage_difficulty_resets_to_easy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("difficulty.txt");
        fs::write(&path, "seven").unwrap();
        let store = DifficultyStore::new(&path);
        assert_eq!(store.load().unwrap(), Difficulty::Easy);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn submit_after_unterminated_last_line_starts_a_new_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(&path, "42,ana").unwrap();
        let board = Leaderboard::new(&path);
        board.submit(&ScoreEntry::new(9, "bo")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42,ana\n9,bo\n");
        assert_eq!(board.entries().unwrap().len(), 2);
    }

    #[test]
    fn submit_appends_one_record_and_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(&path, "42,ana\n17,bo\n").unwrap();
        let board = Leaderboard::new(&path);
        board.submit(&ScoreEntry::new(99, "cy")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42,ana\n17,bo\n99,cy\n");
    }

    #[test]
    fn submit_creates_the_file() {
        let dir = tempdir().unwrap();
        let board = Leaderboard::new(dir.path().join("leaderboard.txt"));
        assert!(board.entries().unwrap().is_empty());
        board.submit(&ScoreEntry::new(5, "dee")).unwrap();
        assert_eq!(board.entries().unwrap(), vec![ScoreEntry::new(5, "dee")]);
    }

    #[test]
    fn entries_skip_blank_and_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(&path, "\n30,ann\nnonsense\nx,bob\n12,\n  \n7,zed smith\n").unwrap();
        let entries = Leaderboard::new(&path).entries().unwrap();
        assert_eq!(
            entries,
            vec![
                ScoreEntry { elapsed_secs: 30, name: "ann".into() },
                ScoreEntry { elapsed_secs: 12, name: "".into() },
                ScoreEntry { elapsed_secs: 7, name: "zed smith".into() },
            ]
        );
    }

    #[test]
    fn ranked_sorts_by_time_stably_and_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(&path, "50,a\n20,b\n50,c\n10,d\n").unwrap();
        let board = Leaderboard::new(&path);
        let names: Vec<String> = board.ranked(3).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["d", "b", "a"]);
        // the file itself is untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), "50,a\n20,b\n50,c\n10,d\n");
    }

    #[test]
    fn names_are_cleaned_before_saving() {
        let e = ScoreEntry::new(3, " a,b\nc ");
        assert_eq!(e.to_string(), "3,abc");
    }
}
