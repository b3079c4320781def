use color_eyre::{eyre::WrapErr, Result};
use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};
use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipWriter};
use zonedata::ZoneName;

/// A zip archive holding one zone table per entry.
pub struct TableArchive<W: Write + Seek> {
    writer: ZipWriter<W>,
    prefix: String,
    options: SimpleFileOptions,
}

impl TableArchive<BufWriter<File>> {
    pub fn create(path: &Path, prefix: &str) -> Result<Self> {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), prefix))
    }
}

impl<W: Write + Seek> TableArchive<W> {
    pub fn new(inner: W, prefix: &str) -> Self {
        // A fixed timestamp keeps archives of the same input identical.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);
        Self {
            writer: ZipWriter::new(inner),
            prefix: prefix.trim_matches('/').to_owned(),
            options,
        }
    }

    /// The entry name used for `zone`.
    pub fn entry_name(&self, zone: &ZoneName) -> String {
        if self.prefix.is_empty() {
            zone.to_string()
        } else {
            format!("{}/{zone}", self.prefix)
        }
    }

    pub fn add(&mut self, zone: &ZoneName, table: &[u8]) -> Result<()> {
        let name = self.entry_name(zone);
        self.writer
            .start_file(name.as_str(), self.options)
            .wrap_err_with(|| format!("failed to start archive entry {name}"))?;
        self.writer
            .write_all(table)
            .wrap_err_with(|| format!("failed to write archive entry {name}"))
    }

    pub fn finish(self) -> Result<W> {
        self.writer
            .finish()
            .wrap_err("failed to finish the archive")
    }
}
