use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::sources::ResultSink;
use crate::state::EnrichedPlayer;

/// Writes each emitted ranking to `<dir>/<label-slug>.xlsx`.
pub struct XlsxSink {
    dir: PathBuf,
}

impl XlsxSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_env() -> Option<Self> {
        let dir = std::env::var("EXPORT_DIR").ok()?;
        let dir = dir.trim();
        if dir.is_empty() {
            return None;
        }
        Some(Self::new(dir))
    }
}

impl ResultSink for XlsxSink {
    fn emit(&mut self, players: &[EnrichedPlayer], label: &str) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rankings").context("name worksheet")?;

        let headers = [
            "Tier",
            "Player",
            "Position",
            "Club",
            "Nationality",
            "Age",
            "Market Value (m)",
            "Score",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *header)
                .context("write header")?;
        }

        for (idx, player) in players.iter().enumerate() {
            let row = (idx + 1) as u32;
            sheet
                .write_string(row, 0, player.tier.map(|t| t.label()).unwrap_or(""))
                .context("write tier")?;
            sheet
                .write_string(row, 1, &player.record.name)
                .context("write name")?;
            sheet
                .write_string(row, 2, &player.record.position)
                .context("write position")?;
            sheet
                .write_string(row, 3, &player.record.club)
                .context("write club")?;
            sheet
                .write_string(row, 4, &player.record.nationality)
                .context("write nationality")?;
            sheet
                .write_number(row, 5, player.record.age as f64)
                .context("write age")?;
            sheet
                .write_number(row, 6, player.record.market_value)
                .context("write market value")?;
            sheet
                .write_number(row, 7, player.score.unwrap_or(0.0))
                .context("write score")?;
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}.xlsx", slug(label)));
        workbook
            .save(&path)
            .with_context(|| format!("save workbook {}", path.display()))?;
        log::info!("exported ranking to {}", path.display());
        Ok(())
    }
}

fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "ranking".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::slug;

    #[test]
    fn labels_become_filenames() {
        assert_eq!(slug("Best Players by Criteria"), "best-players-by-criteria");
        assert_eq!(slug("???"), "ranking");
    }
}
