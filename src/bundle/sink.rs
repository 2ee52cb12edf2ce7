//! Emit sink: the second destination of every bundle.
//!
//! Besides the direct write into the output directory, each bundle is handed
//! to an [`EmitSink`] under its final file name, standing in for a build
//! host's own output graph.

use std::io;

pub trait EmitSink {
    fn emit(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Collects emitted bundles in emission order.
#[derive(Debug, Default)]
pub struct EmittedAssets {
    assets: Vec<EmittedAsset>,
}

impl EmittedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[EmittedAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.bytes.len()).sum()
    }

}

impl EmitSink for EmittedAssets {
    fn emit(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        self.assets.push(EmittedAsset {
            file_name: file_name.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}
