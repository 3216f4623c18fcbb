//! Writing models into existing documents.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::document::Document;
use crate::error::Result;
use crate::model::Model;
use crate::schema::{self, Schema};
use crate::sync::Synchronizer;
use crate::xml::OutputFormat;

/// Hooks run around the update pass of a [`ModelWriter`].
pub trait DocumentModifier {
    /// Called after parsing, before the model is synchronized.
    fn pre_process(&mut self, _document: &mut Document) -> Result<()> {
        Ok(())
    }

    /// Called after synchronization, before the document is printed.
    fn post_process(&mut self, _document: &mut Document) -> Result<()> {
        Ok(())
    }
}

/// Synchronizes models of one schema into documents and prints them.
#[derive(Debug, Clone)]
pub struct ModelWriter {
    schema: &'static Schema,
    format: OutputFormat,
}

impl ModelWriter {
    pub fn new(schema: &'static Schema) -> Self {
        ModelWriter {
            schema,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    /// Synchronizes `model` into `document` without printing it.
    pub fn update(&self, model: &dyn Model, document: &Document) -> Result<()> {
        self.update_with(model, document, &self.format)
    }

    fn update_with(&self, model: &dyn Model, document: &Document, format: &OutputFormat) -> Result<()> {
        let sync = Synchronizer::new(format.sync_options());
        schema::sync_document(&sync, self.schema, model, document)
    }

    /// Synchronizes `model` into `document` and prints the result.
    pub fn write<W: Write>(&self, model: &dyn Model, document: &mut Document, writer: W) -> Result<()> {
        self.write_with(model, document, writer, &self.format, None)
    }

    /// Like [`ModelWriter::write`], with an explicit format and optional
    /// hooks.
    pub fn write_with<W: Write>(
        &self,
        model: &dyn Model,
        document: &mut Document,
        writer: W,
        format: &OutputFormat,
        mut modifier: Option<&mut dyn DocumentModifier>,
    ) -> Result<()> {
        if let Some(modifier) = modifier.as_deref_mut() {
            modifier.pre_process(document)?;
        }
        self.update_with(model, document, format)?;
        if let Some(modifier) = modifier.as_deref_mut() {
            modifier.post_process(document)?;
        }
        document.write_to(writer, format)
    }

    /// Synchronizes `model` into `document` and returns the printed text.
    pub fn to_string(&self, model: &dyn Model, document: &mut Document) -> Result<String> {
        self.update(model, document)?;
        document.to_xml(&self.format)
    }

    /// Synchronizes `model` into `document` and returns the encoded bytes,
    /// as they would be stored.
    pub fn to_bytes(&self, model: &dyn Model, document: &mut Document) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write(model, document, &mut output)?;
        Ok(output)
    }

    /// Rewrites the document at `path` in place, keeping its encoding.
    pub fn write_file<P: AsRef<Path>>(&self, model: &dyn Model, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut document = Document::parse_file(path)?;
        let output = self.to_bytes(model, &mut document)?;
        fs::write(path, output)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
